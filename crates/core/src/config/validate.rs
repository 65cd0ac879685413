use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Upload pool size is not 0
/// - Target URL, when present, is an http(s) URL
/// - Target timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.upload.pool_size == 0 {
        return Err(ConfigError::ValidationError(
            "upload.pool_size cannot be 0".to_string(),
        ));
    }

    if let Some(target) = &config.target {
        let url = target.url.trim();
        if url.is_empty() {
            return Err(ConfigError::ValidationError(
                "target.url cannot be empty".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "target.url must start with http:// or https://, got {}",
                url
            )));
        }
        if target.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "target.timeout_secs cannot be 0".to_string(),
            ));
        }
    }

    Ok(())
}
