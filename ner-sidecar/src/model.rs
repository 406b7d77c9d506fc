//! Resolving a model identifier to a loaded recognizer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::config::ModelConfig;
use crate::entity_extraction::{EntityRecognizer, RuleBasedRecognizer};
use crate::ml::{BertRecognizer, ModelFiles};
use crate::{NerError, Result};

/// Model identifier selecting the built-in rule-based recognizer.
pub const RULES_MODEL_ID: &str = "rules";

/// Where the configured model comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Built-in rule-based recognizer
    Rules,
    /// Checkpoint directory on disk
    LocalDir(PathBuf),
    /// Repository on the Hugging Face Hub
    Hub { repo: String, revision: String },
}

impl ModelSource {
    /// Classify a model identifier.
    ///
    /// `rules` selects the rule-based recognizer. Anything that looks like a
    /// filesystem path (absolute, or starting with `.` or `~`) or names an
    /// existing directory is a local checkpoint. Everything else is treated as
    /// a hub repository id.
    pub fn resolve(config: &ModelConfig) -> Self {
        let id = config.id.trim();

        if id.eq_ignore_ascii_case(RULES_MODEL_ID) {
            return Self::Rules;
        }

        let path = expand_home(id);
        if path.is_dir() || looks_like_path(id) {
            return Self::LocalDir(path);
        }

        Self::Hub {
            repo: id.to_string(),
            revision: config.revision.clone(),
        }
    }
}

fn looks_like_path(id: &str) -> bool {
    Path::new(id).is_absolute() || id.starts_with('.') || id.starts_with('~')
}

fn expand_home(id: &str) -> PathBuf {
    if let Some(rest) = id.strip_prefix("~/")
        && let Some(dirs) = directories::BaseDirs::new()
    {
        return dirs.home_dir().join(rest);
    }
    PathBuf::from(id)
}

/// Load the recognizer named by `config.id`.
///
/// This blocks while weights are read (and downloaded on first use), so async
/// callers should run it on a blocking thread. Any failure is reported as
/// [`NerError::ModelLoad`] naming the model.
pub fn load_recognizer(config: &ModelConfig) -> Result<Arc<dyn EntityRecognizer>> {
    let source = ModelSource::resolve(config);
    info!("Loading model '{}' from {:?}", config.id, source);

    let recognizer: Arc<dyn EntityRecognizer> = match source {
        ModelSource::Rules => Arc::new(RuleBasedRecognizer::new()),
        ModelSource::LocalDir(dir) => {
            let files =
                ModelFiles::from_dir(&dir).map_err(|e| NerError::model_load(&config.id, e))?;
            Arc::new(
                BertRecognizer::load(&files, config, &config.id)
                    .map_err(|e| NerError::model_load(&config.id, e))?,
            )
        }
        ModelSource::Hub { repo, revision } => {
            let files = ModelFiles::from_hub(&repo, &revision, config.cache_dir.as_deref())
                .map_err(|e| NerError::model_load(&config.id, e))?;
            Arc::new(
                BertRecognizer::load(&files, config, &config.id)
                    .map_err(|e| NerError::model_load(&config.id, e))?,
            )
        }
    };

    info!(
        "Model '{}' ready ({} backend, labels: {})",
        config.id,
        recognizer.name(),
        recognizer.labels().join(", ")
    );

    Ok(recognizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_rules() {
        assert_eq!(ModelSource::resolve(&ModelConfig::with_id("rules")), ModelSource::Rules);
        assert_eq!(ModelSource::resolve(&ModelConfig::with_id(" RULES ")), ModelSource::Rules);
    }

    #[test]
    fn test_resolve_hub_repo() {
        let mut config = ModelConfig::with_id("dslim/bert-base-NER");
        config.revision = "v1".to_string();
        assert_eq!(
            ModelSource::resolve(&config),
            ModelSource::Hub {
                repo: "dslim/bert-base-NER".to_string(),
                revision: "v1".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_local_paths() {
        let dir = TempDir::new().unwrap();
        let id = dir.path().to_string_lossy().to_string();
        assert_eq!(
            ModelSource::resolve(&ModelConfig::with_id(id)),
            ModelSource::LocalDir(dir.path().to_path_buf())
        );
        assert_eq!(
            ModelSource::resolve(&ModelConfig::with_id("./models/ner")),
            ModelSource::LocalDir(PathBuf::from("./models/ner"))
        );
    }

    #[tokio::test]
    async fn test_load_rules_recognizer() {
        let recognizer = load_recognizer(&ModelConfig::with_id(RULES_MODEL_ID)).unwrap();
        assert_eq!(recognizer.name(), "rules");

        let entities = recognizer.recognize("Barack Obama visited Paris.").await.unwrap();
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn test_load_missing_local_model_fails() {
        let err = load_recognizer(&ModelConfig::with_id("/no/such/model/dir")).unwrap_err();
        match err {
            NerError::ModelLoad { model, reason } => {
                assert_eq!(model, "/no/such/model/dir");
                assert!(reason.contains("not a directory"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_incomplete_checkpoint_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        let id = dir.path().to_string_lossy().to_string();

        let err = load_recognizer(&ModelConfig::with_id(id)).unwrap_err();
        assert!(matches!(err, NerError::ModelLoad { .. }));
        assert!(err.to_string().contains("Failed to load model"));
    }
}
