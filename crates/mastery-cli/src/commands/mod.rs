use std::error::Error;
use std::fs;
use std::path::Path;

use mastery_core::serde::{from_json_slice, to_canonical_json_pretty};
use serde::{de::DeserializeOwned, Serialize};

pub mod batch;
pub mod compose;
pub mod config;
pub mod pathway;
pub mod propagate;
pub mod step;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let bytes = fs::read(path).map_err(|err| format!("{}: {err}", path.display()))?;
    Ok(from_json_slice(&bytes)?)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_canonical_json_pretty(value)?)?;
    Ok(())
}
