use std::error::Error;

use clap::Args;
use mastery_core::serde::to_yaml_string;

use crate::config::EngineConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Prints the effective configuration as YAML.
pub fn run(_args: &ConfigArgs, config: &EngineConfig) -> Result<String, Box<dyn Error>> {
    let rendered = to_yaml_string(config)?;
    print!("{rendered}");
    Ok(rendered)
}
