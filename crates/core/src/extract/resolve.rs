//! Turns a user selection into the list of endpoints to upload.

use tracing::{debug, warn};

use super::types::Selection;
use super::{ApiExtractor, ExtractError};
use crate::api::Api;
use crate::config::Config;
use crate::notify::{Notifier, APP_NAME};
use crate::step::Step;

pub const INVALID_METHOD: &str = "The current method is not a valid api or ignored";
pub const METHOD_NEEDS_SUMMARY: &str = "The current method must declare summary";
pub const INVALID_CONTROLLER: &str = "The current class is not a valid controller or ignored";
pub const CONTROLLER_NEEDS_CATEGORY: &str = "The current class must declare category";
pub const NO_CONTROLLERS: &str = "Not found valid controller class";

/// Extracts the endpoints of `selection`.
///
/// Single method and single controller selections stop on the first problem.
/// File selections skip unreadable files and invalid controllers and only
/// stop when no controller was found at all. In strict mode controllers
/// without a declared category and endpoints without a summary are dropped.
pub fn resolve_apis(
    extractor: &dyn ApiExtractor,
    selection: &Selection,
    config: &Config,
    notifier: &dyn Notifier,
) -> Step<Vec<Api>> {
    match selection {
        Selection::Method {
            file,
            controller,
            method,
        } => {
            let endpoint = extractor.parse_file(file).and_then(|manifest| {
                manifest
                    .controller(controller)
                    .and_then(|c| c.method(method))
                    .cloned()
                    .ok_or_else(|| ExtractError::NotFound(format!("{}::{}", controller, method)))
            });
            let endpoint = match endpoint {
                Ok(endpoint) => endpoint,
                Err(e) => return stop_with(notifier, &e.to_string()),
            };
            if !endpoint.valid {
                return stop_with(notifier, INVALID_METHOD);
            }
            if config.strict && !endpoint.has_declared_summary() {
                return stop_with(notifier, METHOD_NEEDS_SUMMARY);
            }
            Step::Continue(endpoint.apis)
        }

        Selection::Controller { file, controller } => {
            let found = extractor.parse_file(file).and_then(|manifest| {
                manifest
                    .controller(controller)
                    .cloned()
                    .ok_or_else(|| ExtractError::NotFound(controller.clone()))
            });
            let found = match found {
                Ok(found) => found,
                Err(e) => return stop_with(notifier, &e.to_string()),
            };
            if !found.valid {
                return stop_with(notifier, INVALID_CONTROLLER);
            }
            if config.strict && !found.has_declared_category() {
                return stop_with(notifier, CONTROLLER_NEEDS_CATEGORY);
            }
            Step::Continue(found.apis())
        }

        Selection::Files(files) => {
            let mut controllers = Vec::new();
            for file in files {
                match extractor.parse_file(file) {
                    Ok(manifest) => controllers.extend(manifest.controllers.iter().cloned()),
                    Err(e) => {
                        warn!("Skipping {:?}: {}", file, e);
                        notifier.warning(APP_NAME, &e.to_string());
                    }
                }
            }
            if controllers.is_empty() {
                return stop_with(notifier, NO_CONTROLLERS);
            }

            let mut apis = Vec::new();
            for controller in controllers {
                if !controller.valid {
                    debug!("Skipping invalid controller {}", controller.name);
                    continue;
                }
                if config.strict && !controller.has_declared_category() {
                    debug!("Skipping controller {} without category", controller.name);
                    continue;
                }
                let controller_apis = controller.apis();
                if config.strict {
                    apis.extend(controller_apis.into_iter().filter(Api::has_summary));
                } else {
                    apis.extend(controller_apis);
                }
            }
            Step::Continue(apis)
        }
    }
}

fn stop_with<T>(notifier: &dyn Notifier, message: &str) -> Step<T> {
    notifier.warning(APP_NAME, message);
    Step::Stop
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpMethod;
    use crate::extract::{ControllerManifest, SourceManifest};
    use crate::testing::{fixtures, NotificationLevel, RecordingNotifier};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    struct StaticExtractor {
        files: HashMap<PathBuf, Arc<SourceManifest>>,
    }

    impl StaticExtractor {
        fn new(files: Vec<(&str, Vec<ControllerManifest>)>) -> Self {
            Self {
                files: files
                    .into_iter()
                    .map(|(path, controllers)| {
                        (PathBuf::from(path), Arc::new(SourceManifest { controllers }))
                    })
                    .collect(),
            }
        }
    }

    impl ApiExtractor for StaticExtractor {
        fn name(&self) -> &str {
            "static"
        }

        fn parse_file(&self, path: &Path) -> Result<Arc<SourceManifest>, ExtractError> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| ExtractError::NotFound(path.display().to_string()))
        }
    }

    fn strict() -> Config {
        Config {
            strict: true,
            ..Default::default()
        }
    }

    fn method(file: &str, controller: &str, method: &str) -> Selection {
        Selection::Method {
            file: file.into(),
            controller: controller.to_string(),
            method: method.to_string(),
        }
    }

    #[test]
    fn test_method_selection() {
        let extractor = StaticExtractor::new(vec![(
            "pets.json",
            vec![fixtures::controller("Pets", Some("Pets"), &["list", "get"])],
        )]);
        let notifier = RecordingNotifier::new();

        let apis = resolve_apis(
            &extractor,
            &method("pets.json", "Pets", "get"),
            &strict(),
            &notifier,
        )
        .into_option()
        .unwrap();

        assert_eq!(apis.len(), 1);
        assert_eq!(apis[0].path, "/pets/get");
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn test_invalid_method_stops() {
        let mut controller = fixtures::controller("Pets", Some("Pets"), &["list"]);
        controller.methods[0].valid = false;
        let extractor = StaticExtractor::new(vec![("pets.json", vec![controller])]);
        let notifier = RecordingNotifier::new();

        let step = resolve_apis(
            &extractor,
            &method("pets.json", "Pets", "list"),
            &Config::default(),
            &notifier,
        );

        assert!(step.is_stop());
        assert_eq!(notifier.notifications()[0].body, INVALID_METHOD);
    }

    #[test]
    fn test_strict_method_needs_summary() {
        let mut controller = fixtures::controller("Pets", Some("Pets"), &["list"]);
        controller.methods[0].declared_summary = None;
        let extractor = StaticExtractor::new(vec![("pets.json", vec![controller])]);

        let notifier = RecordingNotifier::new();
        let step = resolve_apis(
            &extractor,
            &method("pets.json", "Pets", "list"),
            &strict(),
            &notifier,
        );
        assert!(step.is_stop());
        assert_eq!(notifier.notifications()[0].body, METHOD_NEEDS_SUMMARY);

        // Lenient mode accepts it.
        let lenient = resolve_apis(
            &extractor,
            &method("pets.json", "Pets", "list"),
            &Config::default(),
            &RecordingNotifier::new(),
        );
        assert!(lenient.is_continue());
    }

    #[test]
    fn test_unknown_method_stops() {
        let extractor = StaticExtractor::new(vec![(
            "pets.json",
            vec![fixtures::controller("Pets", None, &["list"])],
        )]);
        let notifier = RecordingNotifier::new();

        let step = resolve_apis(
            &extractor,
            &method("pets.json", "Pets", "missing"),
            &Config::default(),
            &notifier,
        );
        assert!(step.is_stop());
        assert_eq!(notifier.count(NotificationLevel::Warning), 1);
    }

    #[test]
    fn test_controller_selection_rules() {
        let mut invalid = fixtures::controller("Hidden", Some("Hidden"), &["list"]);
        invalid.valid = false;
        let extractor = StaticExtractor::new(vec![(
            "api.json",
            vec![
                fixtures::controller("Pets", Some("Pets"), &["list", "get"]),
                fixtures::controller("Users", None, &["list"]),
                invalid,
            ],
        )]);
        let select = |name: &str| Selection::Controller {
            file: "api.json".into(),
            controller: name.to_string(),
        };

        let notifier = RecordingNotifier::new();
        let apis = resolve_apis(&extractor, &select("Pets"), &strict(), &notifier)
            .into_option()
            .unwrap();
        assert_eq!(apis.len(), 2);

        let step = resolve_apis(&extractor, &select("Users"), &strict(), &notifier);
        assert!(step.is_stop());

        let step = resolve_apis(&extractor, &select("Hidden"), &Config::default(), &notifier);
        assert!(step.is_stop());

        let bodies: Vec<String> = notifier.notifications().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec![CONTROLLER_NEEDS_CATEGORY, INVALID_CONTROLLER]);
    }

    #[test]
    fn test_files_selection_filters_in_strict_mode() {
        let mut pets = fixtures::controller("Pets", Some("Pets"), &["list", "get"]);
        pets.methods[1].apis[0].summary = None;
        let mut hidden = fixtures::controller("Hidden", Some("Hidden"), &["list"]);
        hidden.valid = false;
        let extractor = StaticExtractor::new(vec![
            ("pets.json", vec![pets, hidden]),
            ("users.json", vec![fixtures::controller("Users", None, &["list"])]),
        ]);
        let selection = Selection::Files(vec!["pets.json".into(), "users.json".into()]);

        let notifier = RecordingNotifier::new();
        let apis = resolve_apis(&extractor, &selection, &strict(), &notifier)
            .into_option()
            .unwrap();
        assert_eq!(apis.len(), 1);
        assert_eq!(apis[0].path, "/pets/list");

        let apis = resolve_apis(&extractor, &selection, &Config::default(), &notifier)
            .into_option()
            .unwrap();
        let paths: Vec<&str> = apis.iter().map(|a| a.path.as_str()).collect();
        assert_eq!(paths, vec!["/pets/list", "/pets/get", "/users/list"]);
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn test_files_selection_skips_unreadable_files() {
        let extractor = StaticExtractor::new(vec![(
            "pets.json",
            vec![fixtures::controller("Pets", None, &["list"])],
        )]);
        let selection = Selection::Files(vec!["missing.json".into(), "pets.json".into()]);
        let notifier = RecordingNotifier::new();

        let apis = resolve_apis(&extractor, &selection, &Config::default(), &notifier)
            .into_option()
            .unwrap();
        assert_eq!(apis.len(), 1);
        assert_eq!(apis[0].method, HttpMethod::Get);
        assert_eq!(notifier.count(NotificationLevel::Warning), 1);
    }

    #[test]
    fn test_files_selection_without_controllers_stops() {
        let extractor = StaticExtractor::new(vec![("empty.json", vec![])]);
        let notifier = RecordingNotifier::new();

        let step = resolve_apis(
            &extractor,
            &Selection::Files(vec!["empty.json".into()]),
            &Config::default(),
            &notifier,
        );
        assert!(step.is_stop());
        assert_eq!(notifier.notifications()[0].body, NO_CONTROLLERS);
    }
}
