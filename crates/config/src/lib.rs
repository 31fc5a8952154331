//! Configuration models, loaders, and validation for the Motor Design Calculator.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub mod model;
pub mod validate;

pub use model::{
    ChamberRequest, CombustionRequest, EnvironmentRequest, FuelRequest, GasRequest, GrainRequest,
    InjectorRequest, MotorClass, MotorRequest, NozzleRequest, OxidizerRequest, RegressionRequest,
};
pub use validate::{
    ChamberSpec, CombustionMode, FiniteAreaSpec, FuelProperties, GasProperties, GrainSpec,
    InjectorSpec, MotorConfiguration, NozzleFamily, NozzleSpec, OxidizerProperties, RegressionLaw,
    ValidationError, check, defaults, validate,
};

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load motor requests from a YAML catalog, a single TOML file, or a directory
/// of TOML files.
pub fn load_motors<P: AsRef<Path>>(path: P) -> Result<Vec<MotorRequest>, ConfigError> {
    load_records(path)
}

/// Find a motor request by name within a loaded catalog.
pub fn find_motor<'a>(requests: &'a [MotorRequest], name: &str) -> Option<&'a MotorRequest> {
    requests
        .iter()
        .find(|request| request.name.eq_ignore_ascii_case(name))
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
