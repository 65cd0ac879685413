use serde::{Deserialize, Serialize};

use crate::orchestrator::OrchestratorConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Reject endpoints and controllers that lack a hand-written summary or
    /// category.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub upload: OrchestratorConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetConfig>,
}

/// Documentation platform the endpoints are uploaded to
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Platform base URL (e.g., "https://docs.example.com")
    pub url: String,
    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Project the endpoints belong to on the platform
    #[serde(default = "default_project")]
    pub project: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_project() -> String {
    "default".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Sanitized config for display (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub strict: bool,
    pub upload: OrchestratorConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<SanitizedTargetConfig>,
}

/// Sanitized target config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTargetConfig {
    pub url: String,
    pub token_configured: bool,
    pub project: String,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            strict: config.strict,
            upload: config.upload.clone(),
            target: config.target.as_ref().map(|t| SanitizedTargetConfig {
                url: t.url.clone(),
                token_configured: t.token.as_deref().is_some_and(|s| !s.is_empty()),
                project: t.project.clone(),
                timeout_secs: t.timeout_secs,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.strict);
        assert_eq!(config.upload.pool_size, 4);
        assert!(config.target.is_none());
    }

    #[test]
    fn test_deserialize_with_target() {
        let toml = r#"
strict = true

[upload]
pool_size = 2

[target]
url = "https://docs.example.com"
token = "secret"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.strict);
        assert_eq!(config.upload.pool_size, 2);

        let target = config.target.as_ref().unwrap();
        assert_eq!(target.url, "https://docs.example.com");
        assert_eq!(target.token.as_deref(), Some("secret"));
        assert_eq!(target.project, "default");
        assert_eq!(target.timeout_secs, 30); // default
    }

    #[test]
    fn test_deserialize_target_missing_url_fails() {
        let toml = r#"
[target]
token = "secret"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_token() {
        let config = Config {
            strict: false,
            upload: OrchestratorConfig::default(),
            target: Some(TargetConfig {
                url: "https://docs.example.com".to_string(),
                token: Some("secret-token".to_string()),
                project: "petstore".to_string(),
                timeout_secs: 10,
            }),
        };

        let sanitized = SanitizedConfig::from(&config);
        let target = sanitized.target.as_ref().unwrap();
        assert!(target.token_configured);
        assert_eq!(target.project, "petstore");

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn test_sanitized_config_without_target() {
        let sanitized = SanitizedConfig::from(&Config::default());
        assert!(sanitized.target.is_none());
        assert_eq!(sanitized.upload.pool_size, 4);
    }
}
