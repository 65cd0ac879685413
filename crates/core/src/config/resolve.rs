//! Resolves the configuration an action runs with.

use std::path::Path;

use tracing::{debug, info};

use super::{load_config, types::Config, validate_config};
use crate::notify::{Notifier, APP_NAME};
use crate::step::Step;

/// Conventional name of the per-project config file.
pub const DEFAULT_CONFIG_FILE: &str = ".docpush.toml";

/// Loads and validates the configuration for one action.
///
/// A missing file stops the action when `required` is set and otherwise
/// falls back to the built-in defaults. An unreadable or invalid file always
/// stops it. Either way the user is told once through `notifier`.
pub fn resolve_config(path: Option<&Path>, required: bool, notifier: &dyn Notifier) -> Step<Config> {
    let existing = path.filter(|p| p.exists());

    let Some(path) = existing else {
        if required {
            notifier.warning(
                APP_NAME,
                &format!("Not found config file {}", DEFAULT_CONFIG_FILE),
            );
            return Step::Stop;
        }
        debug!("No config file, using defaults");
        return Step::Continue(Config::default());
    };

    match load_config(path).and_then(|config| validate_config(&config).map(|_| config)) {
        Ok(config) => {
            info!("Configuration loaded from {:?}", path);
            Step::Continue(config)
        }
        Err(e) => {
            notifier.error(APP_NAME, &format!("Config file error: {}", e));
            Step::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{NotificationLevel, RecordingNotifier};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_required_file_stops_with_warning() {
        let notifier = RecordingNotifier::new();
        let step = resolve_config(Some(Path::new("/nonexistent/.docpush.toml")), true, &notifier);

        assert!(step.is_stop());
        let recorded = notifier.notifications();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].level, NotificationLevel::Warning);
        assert!(recorded[0].body.contains("Not found config file"));
    }

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let notifier = RecordingNotifier::new();
        let step = resolve_config(None, false, &notifier);

        let config = step.into_option().unwrap();
        assert_eq!(config.upload.pool_size, 4);
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn test_invalid_file_stops_with_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[upload]\npool_size = 0").unwrap();

        let notifier = RecordingNotifier::new();
        let step = resolve_config(Some(temp_file.path()), false, &notifier);

        assert!(step.is_stop());
        assert_eq!(notifier.count(NotificationLevel::Error), 1);
        assert!(notifier.notifications()[0]
            .body
            .starts_with("Config file error:"));
    }

    #[test]
    fn test_valid_file_continues() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "strict = true").unwrap();

        let notifier = RecordingNotifier::new();
        let config = resolve_config(Some(temp_file.path()), true, &notifier)
            .into_option()
            .unwrap();
        assert!(config.strict);
        assert!(notifier.notifications().is_empty());
    }
}
