use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Locate `<service_dir>/config`, whether the process runs from the
/// workspace root or from inside the service directory.
pub fn configuration_directory(service_dir: &str) -> Result<PathBuf, AppError> {
    let base_path = std::env::current_dir()?;

    if base_path.ends_with(service_dir) {
        Ok(base_path.join("config"))
    } else {
        Ok(base_path.join(service_dir).join("config"))
    }
}

/// Load settings from `config/base.yaml` (optional) layered with
/// `APP_`-prefixed environment variables, e.g. `APP_SERVER__PORT=9000`.
pub fn load<T: DeserializeOwned>(service_dir: &str) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let directory = configuration_directory(service_dir)?;

    let settings = Cfg::builder()
        .add_source(File::from(directory.join("base.yaml")).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_directory_appends_service_dir() {
        let dir = configuration_directory("no-such-service").unwrap();
        assert!(dir.ends_with("no-such-service/config"));
    }
}
