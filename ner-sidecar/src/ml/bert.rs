//! BERT token-classification recognizer on candle.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use serde_json::Value;
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::bert::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::utils::truncation::{TruncationDirection, TruncationParams, TruncationStrategy};
use tokenizers::{Encoding, Tokenizer as HFTokenizer};
use tracing::{debug, info, warn};

use super::bio::{argmax_rows, decode_entities, stitch_windows, TaggedToken};
use super::error::{MLError, Result};
use super::hub::{ModelFiles, TokenizerSource, WeightsSource};
use crate::config::ModelConfig;
use crate::entity_extraction::{Entity, EntityRecognizer};
use crate::NerError;

/// Tokens shared between consecutive windows of a long input
const MAX_WINDOW_STRIDE: usize = 32;

struct Inner {
    model: BertModel,
    classifier: Linear,
    tokenizer: HFTokenizer,
    id2label: Vec<String>,
    config: ModelConfig,
    device: Device,
}

/// Named-entity recognizer backed by a BERT token-classification checkpoint.
///
/// Inference runs on the CPU in a blocking task; the model is shared between
/// requests behind an `Arc`.
#[derive(Clone)]
pub struct BertRecognizer {
    inner: Arc<Inner>,
    model_id: String,
}

impl std::fmt::Debug for BertRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertRecognizer")
            .field("model_id", &self.model_id)
            .field("labels", &self.inner.id2label)
            .finish()
    }
}

impl BertRecognizer {
    /// Build the recognizer from resolved checkpoint files.
    pub fn load(files: &ModelFiles, config: &ModelConfig, model_id: &str) -> Result<Self> {
        info!("Loading token classification model: {}", model_id);
        let device = Device::Cpu;

        let config_json = std::fs::read_to_string(&files.config)?;
        let bert_config: Config = serde_json::from_str(&config_json)
            .map_err(|e| MLError::configuration(format!("Failed to parse config.json: {}", e)))?;
        let id2label = read_id2label(&config_json)?;
        debug!(
            "Model config: hidden_size={}, labels={:?}",
            bert_config.hidden_size, id2label
        );

        let mut config = config.clone();
        if config.max_length > bert_config.max_position_embeddings {
            warn!(
                "max_length {} exceeds the {} positions of {}; using {}",
                config.max_length,
                bert_config.max_position_embeddings,
                model_id,
                bert_config.max_position_embeddings
            );
            config.max_length = bert_config.max_position_embeddings;
        }
        let tokenizer = build_tokenizer(&files.tokenizer, config.max_length)?;

        let vb = match &files.weights {
            WeightsSource::SafeTensors(path) => unsafe {
                VarBuilder::from_mmaped_safetensors(&[path], DTYPE, &device)?
            },
            WeightsSource::PyTorch(path) => VarBuilder::from_pth(path, DTYPE, &device)?,
        };

        // Token-classification checkpoints nest the encoder under "bert"
        let model = BertModel::load(vb.pp("bert"), &bert_config)
            .or_else(|_| BertModel::load(vb.clone(), &bert_config))
            .map_err(|e| MLError::model_loading(format!("Failed to build BERT model: {}", e)))?;
        let classifier = candle_nn::linear(
            bert_config.hidden_size,
            id2label.len(),
            vb.pp("classifier"),
        )
        .map_err(|e| MLError::model_loading(format!("Failed to load classifier head: {}", e)))?;

        info!("Model {} loaded with {} labels", model_id, id2label.len());

        Ok(Self {
            inner: Arc::new(Inner {
                model,
                classifier,
                tokenizer,
                id2label,
                config,
                device,
            }),
            model_id: model_id.to_string(),
        })
    }
}

impl Inner {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoding = self
            .tokenizer
            .encode_char_offsets(text, true)
            .map_err(MLError::tokenization)?;

        if !encoding.get_overflowing().is_empty() {
            debug!(
                "Input exceeds {} tokens; running {} windows",
                self.config.max_length,
                encoding.get_overflowing().len() + 1
            );
        }

        let windows = std::iter::once(&encoding)
            .chain(encoding.get_overflowing().iter())
            .map(|window| self.tag_window(window))
            .collect::<Result<Vec<_>>>()?;

        let tokens = stitch_windows(&windows);
        Ok(decode_entities(text, &tokens, |kind| {
            self.config.resolve_label(kind)
        }))
    }

    /// Classify every token of one window.
    fn tag_window(&self, encoding: &Encoding) -> Result<Vec<TaggedToken<'_>>> {
        if encoding.get_ids().is_empty() {
            return Ok(Vec::new());
        }

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let logits = self.classifier.forward(&hidden)?;
        let scores = logits.squeeze(0)?.to_vec2::<f32>()?;
        if scores.len() != encoding.len() {
            return Err(MLError::inference(format!(
                "model returned {} rows for {} tokens",
                scores.len(),
                encoding.len()
            )));
        }
        let predictions = argmax_rows(&scores);

        Ok(predictions
            .iter()
            .zip(encoding.get_word_ids())
            .zip(encoding.get_special_tokens_mask())
            .zip(encoding.get_offsets())
            .map(|(((&label_id, &word), &special), &(start, end))| TaggedToken {
                tag: self.id2label.get(label_id).map(String::as_str).unwrap_or("O"),
                word: if special == 1 { None } else { word },
                start,
                end,
            })
            .collect())
    }
}

#[async_trait]
impl EntityRecognizer for BertRecognizer {
    async fn recognize(&self, text: &str) -> crate::Result<Vec<Entity>> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();
        let entities = tokio::task::spawn_blocking(move || inner.recognize(&text))
            .await
            .map_err(|e| NerError::Recognition(format!("Inference task failed: {}", e)))??;
        Ok(entities)
    }

    fn name(&self) -> &str {
        "bert"
    }

    fn labels(&self) -> Vec<String> {
        self.inner
            .id2label
            .iter()
            .filter(|tag| tag.as_str() != "O")
            .map(|tag| {
                let kind = tag.split_once('-').map(|(_, kind)| kind).unwrap_or(tag);
                self.inner.config.resolve_label(kind)
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Build the tokenizer with truncation into overlapping windows.
pub fn build_tokenizer(source: &TokenizerSource, max_length: usize) -> Result<HFTokenizer> {
    let mut tokenizer = match source {
        TokenizerSource::Json(path) => HFTokenizer::from_file(path).map_err(|e| {
            MLError::tokenization(format!("Failed to load tokenizer from {}: {}", path.display(), e))
        })?,
        TokenizerSource::Vocab { vocab, lowercase } => {
            let wordpiece = WordPiece::from_file(&vocab.to_string_lossy())
                .unk_token("[UNK]".to_string())
                .continuing_subword_prefix("##".to_string())
                .build()
                .map_err(|e| {
                    MLError::tokenization(format!("Failed to build WordPiece model: {}", e))
                })?;

            let mut tokenizer = HFTokenizer::new(wordpiece);
            tokenizer.with_normalizer(Some(BertNormalizer::new(true, true, None, *lowercase)));
            tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));

            let special = |token: &str| {
                tokenizer
                    .token_to_id(token)
                    .map(|id| (token.to_string(), id))
                    .ok_or_else(|| MLError::tokenization(format!("{} missing from vocabulary", token)))
            };
            let processor = BertProcessing::new(special("[SEP]")?, special("[CLS]")?);
            tokenizer.with_post_processor(Some(processor));
            tokenizer
        }
    };

    let stride = (max_length.saturating_sub(2) / 4).min(MAX_WINDOW_STRIDE);
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            strategy: TruncationStrategy::LongestFirst,
            stride,
            direction: TruncationDirection::Right,
        }))
        .map_err(|e| MLError::tokenization(format!("Failed to configure truncation: {}", e)))?;
    tokenizer.with_padding(None);

    Ok(tokenizer)
}

/// Read the `id2label` table of a checkpoint config, indexed by class id.
pub fn read_id2label(config_json: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(config_json)
        .map_err(|e| MLError::configuration(format!("Failed to parse config.json: {}", e)))?;
    let table = value
        .get("id2label")
        .and_then(Value::as_object)
        .filter(|table| !table.is_empty())
        .ok_or_else(|| {
            MLError::configuration("config.json has no id2label table; not a token classification model")
        })?;

    let mut labels = vec![String::new(); table.len()];
    for (key, label) in table {
        let idx: usize = key
            .parse()
            .map_err(|_| MLError::configuration(format!("invalid id2label key '{}'", key)))?;
        let label = label
            .as_str()
            .ok_or_else(|| MLError::configuration(format!("id2label[{}] is not a string", key)))?;
        let slot = labels
            .get_mut(idx)
            .ok_or_else(|| MLError::configuration(format!("id2label index {} out of range", idx)))?;
        *slot = label.to_string();
    }

    Ok(labels)
}
