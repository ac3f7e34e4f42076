use std::collections::BTreeMap;

use serde::Serialize;

use super::features::Feature;
use crate::annotate::AnnotatedSentence;
use crate::embedding::{cosine_similarity, WordEmbeddings};
use crate::error::Result;
use crate::pipelines::sentiment::model::{Prediction, SentimentModel, LABEL_POSITIVE};

/// Category assigned when a sentence matches no feature confidently.
pub const GENERAL_CATEGORY: &str = "general";

/// One classified sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationRecord {
    /// A feature name, or [`GENERAL_CATEGORY`].
    pub category: String,
    /// The sentence text.
    pub sentence: String,
    /// The sentiment label.
    pub sentiment: String,
}

/// Per-feature sentiment counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureSummary {
    /// Synonyms merged into the feature.
    pub related: Vec<String>,
    /// Sentences mentioning the feature labeled positive.
    pub positives: usize,
    /// Sentences mentioning the feature labeled negative.
    pub negatives: usize,
    /// Total sentences mentioning the feature.
    pub total: usize,
}

/// Corpus-level counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Classified sentences.
    pub total_sentences: usize,
    /// Sentences labeled positive.
    pub positive_count: usize,
    /// Sentences labeled negative.
    pub negative_count: usize,
    /// Canonical features discovered.
    pub features_found: usize,
}

/// The aggregated result of one batch run, in the external output shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Corpus-level counts.
    pub summary: Summary,
    /// Per-feature counts, keyed by canonical name.
    pub features: BTreeMap<String, FeatureSummary>,
    /// One record per classified sentence, in corpus order.
    pub classification: Vec<ClassificationRecord>,
}

/// A review rejected by preprocessing.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedReview {
    /// Index of the review in the input batch.
    pub index: usize,
    /// Why it was skipped.
    pub reason: String,
}

/// Per-run diagnostic counters. Reported alongside the result, never raised
/// as errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunDiagnostics {
    /// Reviews rejected by preprocessing, with reasons.
    pub skipped: Vec<SkippedReview>,
    /// Sentences that matched more than one feature.
    pub multi_feature_sentences: usize,
    /// Multi-match sentences that fell back to the general bucket because no
    /// candidate cleared the association-confidence threshold.
    pub unassociated_sentences: usize,
    /// Sentences excluded because the classifier failed on them.
    pub classifier_failures: usize,
}

// Mean embedding of the sentence's noun and adjective lemmas.
fn sentence_embedding(
    sentence: &AnnotatedSentence,
    embeddings: &dyn WordEmbeddings,
) -> Vec<f32> {
    let mut mean = vec![0.0f32; embeddings.dimension()];
    let mut count = 0usize;
    for lemma in sentence.content_lemmas() {
        let vector = embeddings.vector(lemma);
        for (slot, value) in mean.iter_mut().zip(vector.iter()) {
            *slot += value;
        }
        count += 1;
    }
    if count > 0 {
        for slot in &mut mean {
            *slot /= count as f32;
        }
    }
    mean
}

// Names of the features whose canonical name or related terms appear among
// the sentence's lemmas. Case-insensitive: lemmas and terms are lowercase.
fn matched_features<'f>(
    sentence: &AnnotatedSentence,
    features: &'f BTreeMap<String, Feature>,
) -> Vec<&'f Feature> {
    let lemmas: std::collections::HashSet<String> =
        sentence.lemmas().map(|l| l.to_lowercase()).collect();

    features
        .values()
        .filter(|feature| {
            lemmas.contains(&feature.name)
                || feature
                    .related_terms
                    .iter()
                    .any(|term| lemmas.contains(term))
        })
        .collect()
}

fn resolve_category(
    sentence: &AnnotatedSentence,
    matched: &[&Feature],
    embeddings: &dyn WordEmbeddings,
    association_confidence: f32,
    diagnostics: &mut RunDiagnostics,
) -> String {
    match matched {
        [] => GENERAL_CATEGORY.to_string(),
        [single] => single.name.clone(),
        _ => {
            diagnostics.multi_feature_sentences += 1;
            let aggregate = sentence_embedding(sentence, embeddings);
            let best = matched
                .iter()
                .map(|feature| {
                    (
                        feature,
                        cosine_similarity(&aggregate, &feature.embedding),
                    )
                })
                .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.name.cmp(&a.0.name)));

            match best {
                Some((feature, similarity)) if similarity > association_confidence => {
                    feature.name.clone()
                }
                _ => {
                    diagnostics.unassociated_sentences += 1;
                    GENERAL_CATEGORY.to_string()
                }
            }
        }
    }
}

/// Classify every noun-bearing sentence and roll the counts.
///
/// Per-feature buckets count every matched feature; the single record
/// category follows the association-confidence tie-break. A label equal to
/// [`LABEL_POSITIVE`] counts as positive, any other label as negative, so
/// `positives + negatives == total` holds per bucket even for pass-through
/// labels.
pub(crate) fn aggregate<M: SentimentModel>(
    sentences: &[AnnotatedSentence],
    features: &BTreeMap<String, Feature>,
    embeddings: &dyn WordEmbeddings,
    classifier: &M,
    association_confidence: f32,
    diagnostics: &mut RunDiagnostics,
) -> Result<AggregateResult> {
    let eligible: Vec<&AnnotatedSentence> = sentences
        .iter()
        .filter(|sentence| sentence.has_common_noun())
        .collect();

    let texts: Vec<&str> = eligible.iter().map(|s| s.text.as_str()).collect();
    let predictions = classifier.predict_batch(&texts)?;

    let mut result = AggregateResult {
        summary: Summary {
            features_found: features.len(),
            ..Summary::default()
        },
        features: features
            .iter()
            .map(|(name, feature)| {
                (
                    name.clone(),
                    FeatureSummary {
                        related: feature.related_terms.clone(),
                        ..FeatureSummary::default()
                    },
                )
            })
            .collect(),
        classification: Vec::with_capacity(eligible.len()),
    };

    for (sentence, prediction) in eligible.iter().zip(predictions) {
        let Prediction { label, .. } = match prediction {
            Ok(prediction) => prediction,
            Err(error) => {
                tracing::warn!(
                    sentence = %sentence.text,
                    %error,
                    "classifier failed; sentence excluded from classification"
                );
                diagnostics.classifier_failures += 1;
                continue;
            }
        };
        let positive = label == LABEL_POSITIVE;

        let matched = matched_features(sentence, features);
        let category = resolve_category(
            sentence,
            &matched,
            embeddings,
            association_confidence,
            diagnostics,
        );

        for feature in &matched {
            // Buckets exist for every discovered feature.
            if let Some(bucket) = result.features.get_mut(&feature.name) {
                if positive {
                    bucket.positives += 1;
                } else {
                    bucket.negatives += 1;
                }
                bucket.total += 1;
            }
        }

        result.summary.total_sentences += 1;
        if positive {
            result.summary.positive_count += 1;
        } else {
            result.summary.negative_count += 1;
        }
        result.classification.push(ClassificationRecord {
            category,
            sentence: sentence.text.clone(),
            sentiment: label,
        });
    }

    Ok(result)
}
