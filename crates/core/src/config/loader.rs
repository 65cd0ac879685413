use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix of environment variables overriding file settings
/// (e.g. `DOCPUSH_UPLOAD__POOL_SIZE=8`).
pub const ENV_PREFIX: &str = "DOCPUSH_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
strict = true

[upload]
pool_size = 6
"#;
        let config = load_config_from_str(toml).unwrap();
        assert!(config.strict);
        assert_eq!(config.upload.pool_size, 6);
    }

    #[test]
    fn test_load_config_from_str_invalid() {
        let result = load_config_from_str("strict = \"maybe\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/.docpush.toml"));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[target]
url = "http://127.0.0.1:3000"
project = "petstore"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert!(!config.strict);
        assert_eq!(config.upload.pool_size, 4);

        let target = config.target.unwrap();
        assert_eq!(target.url, "http://127.0.0.1:3000");
        assert_eq!(target.project, "petstore");
        assert!(target.token.is_none());
    }

    #[test]
    fn test_load_config_malformed_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[upload\npool_size = ").unwrap();

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
