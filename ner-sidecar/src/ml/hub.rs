//! Locating model files on disk or on the Hugging Face Hub.

use std::path::{Path, PathBuf};

use hf_hub::api::sync::{ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use serde_json::Value;
use tracing::debug;

use super::error::{MLError, Result};

/// How the tokenizer of a checkpoint is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerSource {
    /// Serialized `tokenizer.json`
    Json(PathBuf),
    /// Legacy BERT `vocab.txt`, with casing taken from `tokenizer_config.json`
    Vocab { vocab: PathBuf, lowercase: bool },
}

/// Weights file of a checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightsSource {
    SafeTensors(PathBuf),
    PyTorch(PathBuf),
}

/// The files needed to build a token-classification model.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: TokenizerSource,
    pub weights: WeightsSource,
}

impl ModelFiles {
    /// Locate model files in a local checkpoint directory.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(MLError::model_not_found(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let existing = |name: &str| {
            let path = dir.join(name);
            path.is_file().then_some(path)
        };

        let config = existing("config.json").ok_or_else(|| {
            MLError::model_not_found(format!("config.json missing in {}", dir.display()))
        })?;

        let tokenizer = match existing("tokenizer.json") {
            Some(path) => TokenizerSource::Json(path),
            None => {
                let vocab = existing("vocab.txt").ok_or_else(|| {
                    MLError::model_not_found(format!(
                        "neither tokenizer.json nor vocab.txt found in {}",
                        dir.display()
                    ))
                })?;
                TokenizerSource::Vocab {
                    vocab,
                    lowercase: read_lowercase(existing("tokenizer_config.json").as_deref()),
                }
            }
        };

        let weights = existing("model.safetensors")
            .map(WeightsSource::SafeTensors)
            .or_else(|| existing("pytorch_model.bin").map(WeightsSource::PyTorch))
            .ok_or_else(|| {
                MLError::model_not_found(format!(
                    "neither model.safetensors nor pytorch_model.bin found in {}",
                    dir.display()
                ))
            })?;

        Ok(Self {
            config,
            tokenizer,
            weights,
        })
    }

    /// Download (or reuse from the local cache) the files of a hub repository.
    ///
    /// This blocks on network IO and must not run on an async worker thread.
    pub fn from_hub(repo_id: &str, revision: &str, cache_dir: Option<&Path>) -> Result<Self> {
        let mut builder = ApiBuilder::new().with_progress(false);
        if let Some(dir) = cache_dir {
            builder = builder.with_cache_dir(dir.to_path_buf());
        }
        let api = builder
            .build()
            .map_err(|e| MLError::model_loading(format!("Failed to create hub client: {}", e)))?;
        let repo = api.repo(Repo::with_revision(
            repo_id.to_string(),
            RepoType::Model,
            revision.to_string(),
        ));

        let config = fetch(&repo, repo_id, "config.json")?;

        let tokenizer = match fetch(&repo, repo_id, "tokenizer.json") {
            Ok(path) => TokenizerSource::Json(path),
            Err(err) => {
                debug!("No tokenizer.json for {} ({}), trying vocab.txt", repo_id, err);
                let vocab = fetch(&repo, repo_id, "vocab.txt")?;
                let tokenizer_config = fetch(&repo, repo_id, "tokenizer_config.json").ok();
                TokenizerSource::Vocab {
                    vocab,
                    lowercase: read_lowercase(tokenizer_config.as_deref()),
                }
            }
        };

        let weights = match fetch(&repo, repo_id, "model.safetensors") {
            Ok(path) => WeightsSource::SafeTensors(path),
            Err(err) => {
                debug!("No model.safetensors for {} ({}), trying pytorch_model.bin", repo_id, err);
                WeightsSource::PyTorch(fetch(&repo, repo_id, "pytorch_model.bin")?)
            }
        };

        debug!("Model files for {} resolved in cache", repo_id);

        Ok(Self {
            config,
            tokenizer,
            weights,
        })
    }
}

fn fetch(repo: &ApiRepo, repo_id: &str, file: &str) -> Result<PathBuf> {
    repo.get(file)
        .map_err(|e| MLError::model_not_found(format!("{}/{}: {}", repo_id, file, e)))
}

/// Read `do_lower_case` from a tokenizer config, defaulting to cased.
fn read_lowercase(tokenizer_config: Option<&Path>) -> bool {
    tokenizer_config
        .and_then(|path| std::fs::read_to_string(path).ok())
        .and_then(|content| serde_json::from_str::<Value>(&content).ok())
        .and_then(|value| value.get("do_lower_case").and_then(Value::as_bool))
        .unwrap_or(false)
}
