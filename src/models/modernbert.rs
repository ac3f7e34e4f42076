use candle_core::{DType, Device, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::VarBuilder;
use candle_transformers::models::modernbert::{
    Config, ModernBertForSequenceClassification as CandleModernBertForSequenceClassification,
};
use hf_hub::{api::sync::Api, Repo, RepoType};
use serde::Deserialize;
use std::collections::HashMap;
use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};
use crate::models::ModernBertSize;
use crate::pipelines::sentiment::model::{
    Prediction, SentimentModel, LABEL_NEGATIVE, LABEL_POSITIVE,
};

/// Token budget applied before inference; longer inputs are truncated.
const MAX_TOKENS: usize = 512;

fn model_repo(size: ModernBertSize) -> &'static str {
    match size {
        ModernBertSize::Base => "clapAI/modernBERT-base-multilingual-sentiment",
        ModernBertSize::Large => "clapAI/modernBERT-large-multilingual-sentiment",
    }
}

// Fixed mapping from the model's native label vocabulary onto the crate's
// labels. Labels outside the table pass through unchanged - that is the
// outward contract, not a silent failure.
fn normalize_label(label: &str) -> String {
    match label {
        "POSITIVE" | "positive" | "LABEL_1" => LABEL_POSITIVE.to_string(),
        "NEGATIVE" | "negative" | "LABEL_0" => LABEL_NEGATIVE.to_string(),
        other => other.to_string(),
    }
}

/// Pretrained ModernBERT sentence-sentiment classifier.
///
/// Downloads weights and tokenizer from the Hugging Face Hub on
/// construction; inference runs locally through Candle. Inputs beyond 512
/// tokens are truncated before inference.
pub struct SentimentModernBertModel {
    model: CandleModernBertForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
    id2label: HashMap<String, String>,
}

impl SentimentModernBertModel {
    /// Download (or reuse the local cache of) the model for `size` and load
    /// it onto `device`.
    pub fn new(size: ModernBertSize, device: Device) -> Result<Self> {
        let repo_id = model_repo(size);
        let (config, vb, id2label) = load_classifier_model(repo_id, &device)?;
        let model = CandleModernBertForSequenceClassification::load(vb, &config)?;
        let tokenizer = load_tokenizer(repo_id)?;

        Ok(Self {
            model,
            tokenizer,
            device,
            id2label,
        })
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    fn encode_truncated(&self, text: &str) -> Result<(Vec<u32>, Vec<u32>)> {
        let encoding = self.tokenizer.encode(text, true).map_err(|e| {
            PipelineError::Tokenization(format!(
                "Tokenization failed on '{}': {}",
                &text.chars().take(50).collect::<String>(),
                e
            ))
        })?;
        let mut ids = encoding.get_ids().to_vec();
        let mut attention_mask = encoding.get_attention_mask().to_vec();
        ids.truncate(MAX_TOKENS);
        attention_mask.truncate(MAX_TOKENS);
        Ok((ids, attention_mask))
    }

    fn label_for(&self, pred_id: u32) -> Result<String> {
        match self.id2label.get(&pred_id.to_string()) {
            Some(label) => Ok(normalize_label(label)),
            None => {
                let mut available: Vec<&str> =
                    self.id2label.keys().map(String::as_str).collect();
                available.sort_unstable();
                Err(PipelineError::Unexpected(format!(
                    "Predicted label ID {} not in id2label. Available: {}",
                    pred_id,
                    available.join(", ")
                )))
            }
        }
    }

    fn softmax_row(&self, logits: &Tensor) -> Result<Vec<f32>> {
        let probs = softmax(logits, D::Minus1)?;
        Ok(probs.to_vec1::<f32>()?)
    }

    // [p_negative, p_positive] when the head is binary and both normalized
    // labels are recognized.
    fn probability_pair(&self, probs: &[f32]) -> Option<[f32; 2]> {
        if probs.len() != 2 {
            return None;
        }
        let mut pair = [0.0f32; 2];
        for (id, probability) in probs.iter().enumerate() {
            let label = normalize_label(self.id2label.get(&id.to_string())?);
            match label.as_str() {
                LABEL_NEGATIVE => pair[0] = *probability,
                LABEL_POSITIVE => pair[1] = *probability,
                _ => return None,
            }
        }
        Some(pair)
    }

    fn forward_single(&self, text: &str) -> Result<(u32, Vec<f32>)> {
        let (ids, attention_mask) = self.encode_truncated(text)?;
        let input_ids = Tensor::new(ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(attention_mask.as_slice(), &self.device)?.unsqueeze(0)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        let pred_id = logits.argmax(D::Minus1)?.squeeze(0)?.to_scalar::<u32>()?;
        let probs = self.softmax_row(&logits.squeeze(0)?)?;
        Ok((pred_id, probs))
    }
}

impl SentimentModel for SentimentModernBertModel {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let (pred_id, probs) = self.forward_single(text)?;
        let score = probs.get(pred_id as usize).copied().unwrap_or(0.0);
        Ok(Prediction {
            label: self.label_for(pred_id)?,
            score,
        })
    }

    fn predict_probabilities(&self, text: &str) -> Result<Option<[f32; 2]>> {
        let (_, probs) = self.forward_single(text)?;
        Ok(self.probability_pair(&probs))
    }

    fn predict_batch(&self, texts: &[&str]) -> Result<Vec<Result<Prediction>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let pad_token_id = self
            .tokenizer
            .get_padding()
            .map(|p| p.pad_id)
            .or_else(|| self.tokenizer.token_to_id("<pad>"))
            .or_else(|| self.tokenizer.token_to_id("[PAD]"))
            .unwrap_or(0);

        let mut encodings = Vec::with_capacity(texts.len());
        let mut error_results: Vec<Option<PipelineError>> =
            (0..texts.len()).map(|_| None).collect();

        for (i, text) in texts.iter().enumerate() {
            match self.encode_truncated(text) {
                Ok(encoding) => encodings.push(Some(encoding)),
                Err(e) => {
                    error_results[i] = Some(e);
                    encodings.push(None);
                }
            }
        }

        let valid_indices: Vec<usize> = encodings
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|_| i))
            .collect();

        if valid_indices.is_empty() {
            return Ok(error_results
                .into_iter()
                .map(|e| {
                    Err(e.unwrap_or_else(|| {
                        PipelineError::Unexpected("Model returned no predictions".to_string())
                    }))
                })
                .collect());
        }

        let valid_encodings: Vec<_> = valid_indices
            .iter()
            .map(|&i| encodings[i].as_ref().unwrap())
            .collect();
        let max_len = valid_encodings
            .iter()
            .map(|(ids, _)| ids.len())
            .max()
            .unwrap_or(0);

        let mut all_token_ids: Vec<u32> = Vec::new();
        let mut all_attention_masks: Vec<u32> = Vec::new();

        for (ids, attention_mask) in &valid_encodings {
            let mut token_ids = ids.clone();
            let mut mask = attention_mask.clone();
            token_ids.resize(max_len, pad_token_id);
            mask.resize(max_len, 0);
            all_token_ids.extend(token_ids);
            all_attention_masks.extend(mask);
        }

        let batch_size = valid_indices.len();
        let input_ids = Tensor::from_vec(all_token_ids, (batch_size, max_len), &self.device)?;
        let attention_mask =
            Tensor::from_vec(all_attention_masks, (batch_size, max_len), &self.device)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        let probs = softmax(&logits, D::Minus1)?;
        let pred_ids = logits.argmax(D::Minus1)?.to_vec1::<u32>()?;
        let probs_2d = probs.to_vec2::<f32>()?;

        let mut results: Vec<Result<Prediction>> = error_results
            .into_iter()
            .map(|e| match e {
                Some(err) => Err(err),
                None => Ok(Prediction {
                    label: String::new(),
                    score: 0.0,
                }),
            })
            .collect();

        for (batch_idx, &orig_idx) in valid_indices.iter().enumerate() {
            let pred_id = pred_ids[batch_idx];
            let score = probs_2d[batch_idx]
                .get(pred_id as usize)
                .copied()
                .unwrap_or(0.0);
            results[orig_idx] = self
                .label_for(pred_id)
                .map(|label| Prediction { label, score });
        }

        Ok(results)
    }
}

fn load_tokenizer(repo_id: &str) -> Result<Tokenizer> {
    let api = Api::new()?;
    let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));
    let tokenizer_path = repo.get("tokenizer.json")?;
    let path_str = tokenizer_path.display().to_string();
    Tokenizer::from_file(&tokenizer_path).map_err(|e| {
        PipelineError::Tokenization(format!(
            "Failed to load tokenizer from '{}': {}",
            path_str, e
        ))
    })
}

#[derive(Deserialize)]
struct ClassifierConfigJson {
    #[serde(default)]
    id2label: HashMap<String, String>,
    #[serde(default)]
    label2id: HashMap<String, u32>,
}

fn patch_config_num_labels(config: &mut Config, num_labels: usize) {
    use candle_transformers::models::modernbert::{ClassifierConfig, ClassifierPooling};

    if config.classifier_config.is_none()
        || config
            .classifier_config
            .as_ref()
            .map(|c| c.id2label.len())
            .unwrap_or(0)
            != num_labels
    {
        let id2label: HashMap<String, String> = (0..num_labels)
            .map(|i| (i.to_string(), format!("label_{i}")))
            .collect();
        let label2id: HashMap<String, String> = id2label
            .iter()
            .map(|(k, v)| (v.clone(), k.clone()))
            .collect();

        config.classifier_config = Some(ClassifierConfig {
            id2label,
            label2id,
            classifier_pooling: ClassifierPooling::default(),
        });
    }
}

fn load_classifier_model(
    repo_id: &str,
    device: &Device,
) -> Result<(Config, VarBuilder<'static>, HashMap<String, String>)> {
    let api = Api::new()?;
    let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));

    let config_path = repo.get("config.json")?;
    let weights_path = repo
        .get("model.safetensors")
        .or_else(|_| repo.get("pytorch_model.bin"))?;

    let config_str = std::fs::read_to_string(&config_path)?;
    let mut config: Config = serde_json::from_str(&config_str)?;
    let class_cfg: ClassifierConfigJson = serde_json::from_str(&config_str)?;

    let num_labels = class_cfg.label2id.len().max(class_cfg.id2label.len());
    patch_config_num_labels(&mut config, num_labels);

    let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
        unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
    } else {
        VarBuilder::from_pth(&weights_path, DType::F32, device)?
    };

    Ok((config, vb, class_cfg.id2label))
}
