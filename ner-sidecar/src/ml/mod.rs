//! Transformer-based entity recognition.
//!
//! A BERT token-classification checkpoint (for example `dslim/bert-base-NER`)
//! is loaded with candle, either from a local directory or from the Hugging
//! Face Hub cache, and its per-token BIO tags are grouped into entity spans.
//!
//! ```rust,no_run
//! use ner_sidecar::config::ModelConfig;
//! use ner_sidecar::ml::{BertRecognizer, ModelFiles};
//!
//! let config = ModelConfig::default();
//! let files = ModelFiles::from_hub(&config.id, &config.revision, None)?;
//! let recognizer = BertRecognizer::load(&files, &config, &config.id)?;
//! # Ok::<(), ner_sidecar::ml::MLError>(())
//! ```

pub mod bert;
pub mod bio;
pub mod error;
pub mod hub;

pub use bert::BertRecognizer;
pub use error::{MLError, Result};
pub use hub::{ModelFiles, TokenizerSource, WeightsSource};
