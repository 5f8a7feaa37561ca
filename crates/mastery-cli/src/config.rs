use std::fs;
use std::path::Path;

use mastery_core::errors::{ErrorInfo, MasteryError};
use mastery_core::serde::from_yaml_slice;
use mastery_graph::{BatchOpts, ComposeOpts};
use mastery_step::StepOpts;
use serde::{Deserialize, Serialize};

/// YAML-configurable engine settings. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Prompt composition settings.
    #[serde(default)]
    pub compose: ComposeOpts,
    /// Step answer matching settings.
    #[serde(default)]
    pub step: StepOpts,
    /// Parallel batch settings.
    #[serde(default)]
    pub batch: BatchOpts,
}

impl EngineConfig {
    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), MasteryError> {
        self.step.validate()?;
        if self.batch.concurrency == 0 {
            return Err(MasteryError::Config(
                ErrorInfo::new("bad-concurrency", "batch concurrency must be at least one")
                    .with_context("concurrency", self.batch.concurrency),
            ));
        }
        Ok(())
    }
}

/// Loads the engine configuration, falling back to defaults without a path.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, MasteryError> {
    let config = match path {
        Some(path) => {
            let bytes = fs::read(path).map_err(|err| {
                MasteryError::Config(
                    ErrorInfo::new("config-read", err.to_string())
                        .with_context("path", path.display()),
                )
            })?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                EngineConfig::default()
            } else {
                from_yaml_slice(&bytes)?
            }
        }
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
