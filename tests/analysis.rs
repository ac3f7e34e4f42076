use std::sync::{Arc, Mutex};

use review_pipelines::analysis::{AnalysisPipelineBuilder, Checkpoint, Output, GENERAL_CATEGORY};
use review_pipelines::dataset::Review;
use review_pipelines::embedding::EmbeddingTable;
use review_pipelines::error::{PipelineError, Result};
use review_pipelines::sentiment::{Prediction, SentimentModel, LABEL_NEGATIVE, LABEL_POSITIVE};

struct AlwaysPositive;

impl SentimentModel for AlwaysPositive {
    fn predict(&self, _text: &str) -> Result<Prediction> {
        Ok(Prediction {
            label: LABEL_POSITIVE.to_string(),
            score: 0.9,
        })
    }
}

// Labels a sentence negative when it contains any of the marker words.
struct KeywordClassifier(&'static [&'static str]);

impl SentimentModel for KeywordClassifier {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let lowered = text.to_lowercase();
        let negative = self.0.iter().any(|marker| lowered.contains(marker));
        Ok(Prediction {
            label: if negative {
                LABEL_NEGATIVE.to_string()
            } else {
                LABEL_POSITIVE.to_string()
            },
            score: 1.0,
        })
    }
}

fn phone_embeddings() -> EmbeddingTable {
    EmbeddingTable::from_vectors(
        4,
        vec![
            ("battery", vec![1.0, 0.0, 0.0, 0.0]),
            ("life", vec![0.9, 0.1, 0.0, 0.0]),
            ("camera", vec![0.0, 1.0, 0.0, 0.0]),
            ("great", vec![0.0, 0.0, 1.0, 0.0]),
            ("excellent", vec![0.0, 0.0, 0.9, 0.1]),
        ],
    )
    .unwrap()
}

fn scenario_output() -> Output {
    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(phone_embeddings())
        .build_with(AlwaysPositive)
        .unwrap();

    let reviews = vec![
        Review::new("Great camera and battery life!", 5),
        Review::new("Battery life is excellent.", 5),
    ];
    pipeline.run(&reviews).unwrap()
}

#[test]
fn two_review_scenario() {
    let output = scenario_output();
    let result = &output.result;

    assert_eq!(result.summary.total_sentences, 2);
    assert_eq!(result.summary.positive_count, 2);
    assert_eq!(result.summary.negative_count, 0);
    assert_eq!(result.summary.features_found, 2);

    let battery = &result.features["battery"];
    assert_eq!(battery.related, ["life"]);
    assert_eq!(battery.positives, 2);
    assert_eq!(battery.negatives, 0);
    assert_eq!(battery.total, 2);

    let camera = &result.features["camera"];
    assert!(camera.related.is_empty());
    assert_eq!(camera.positives, 1);
    assert_eq!(camera.total, 1);

    // The multi-feature sentence resolves to its best association.
    assert_eq!(result.classification.len(), 2);
    assert_eq!(result.classification[0].category, "battery");
    assert_eq!(result.classification[1].category, "battery");
    assert_eq!(output.diagnostics.multi_feature_sentences, 1);
    assert_eq!(output.diagnostics.unassociated_sentences, 0);
}

#[test]
fn runs_are_byte_for_byte_reproducible() {
    let first = serde_json::to_string(&scenario_output().result).unwrap();
    let second = serde_json::to_string(&scenario_output().result).unwrap();
    assert_eq!(first, second);
}

#[test]
fn output_contract_field_names() {
    let output = scenario_output();
    let value = serde_json::to_value(&output.result).unwrap();

    let summary = &value["summary"];
    for key in [
        "total_sentences",
        "positive_count",
        "negative_count",
        "features_found",
    ] {
        assert!(summary.get(key).is_some(), "summary missing {key}");
    }

    let battery = &value["features"]["battery"];
    for key in ["related", "positives", "negatives", "total"] {
        assert!(battery.get(key).is_some(), "feature entry missing {key}");
    }

    let record = &value["classification"][0];
    for key in ["category", "sentence", "sentiment"] {
        assert!(record.get(key).is_some(), "record missing {key}");
    }
}

#[test]
fn conservation_with_single_matches() {
    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(phone_embeddings())
        .build_with(KeywordClassifier(&["terrible"]))
        .unwrap();

    let reviews = vec![
        Review::new("Battery life is great.", 5),
        Review::new("Camera is terrible.", 1),
    ];
    let output = pipeline.run(&reviews).unwrap();
    let result = &output.result;

    assert_eq!(
        result.summary.positive_count + result.summary.negative_count,
        result.summary.total_sentences
    );
    assert_eq!(result.summary.total_sentences, result.classification.len());
    for counts in result.features.values() {
        assert_eq!(counts.positives + counts.negatives, counts.total);
    }
    // Every sentence matched exactly one feature, so bucket totals add up to
    // the sentence count.
    let bucket_total: usize = result.features.values().map(|f| f.total).sum();
    assert_eq!(bucket_total, result.summary.total_sentences);
    assert!(!result
        .classification
        .iter()
        .any(|record| record.category == GENERAL_CATEGORY));

    assert_eq!(result.summary.positive_count, 1);
    assert_eq!(result.summary.negative_count, 1);
    assert_eq!(result.features["camera"].negatives, 1);
}

#[test]
fn corpus_without_nouns_yields_empty_result() {
    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(phone_embeddings())
        .build_with(AlwaysPositive)
        .unwrap();

    let reviews = vec![Review::new("Very good!", 5), Review::new("Amazing!", 5)];
    let output = pipeline.run(&reviews).unwrap();

    assert!(output.result.features.is_empty());
    assert!(output.result.classification.is_empty());
    assert_eq!(output.result.summary.total_sentences, 0);
    assert_eq!(output.result.summary.features_found, 0);
}

#[test]
fn empty_batch_is_not_an_error() {
    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(phone_embeddings())
        .build_with(AlwaysPositive)
        .unwrap();

    let output = pipeline.run(&[]).unwrap();
    assert_eq!(output.result.summary.total_sentences, 0);
    assert_eq!(output.stats.reviews_processed, 0);
}

#[test]
fn short_reviews_skip_with_reason() {
    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(phone_embeddings())
        .build_with(AlwaysPositive)
        .unwrap();

    let reviews = vec![Review::new("Hi", 5), Review::new("Battery life is great.", 5)];
    let output = pipeline.run(&reviews).unwrap();

    assert_eq!(output.diagnostics.skipped.len(), 1);
    assert_eq!(output.diagnostics.skipped[0].index, 0);
    assert!(output.diagnostics.skipped[0].reason.contains("minimum"));
    assert_eq!(output.result.summary.total_sentences, 1);
}

#[test]
fn ambiguous_sentence_below_confidence_goes_general() {
    // Ten orthonormal noun vectors: the multi-match sentence's aggregate
    // embedding lands at cosine 1/sqrt(10) ~= 0.316 from each feature,
    // under the 0.4 association-confidence default.
    let nouns = [
        "battery", "camera", "screen", "layout", "menu", "icon", "speaker", "button", "case",
        "design",
    ];
    let entries: Vec<(String, Vec<f32>)> = nouns
        .iter()
        .enumerate()
        .map(|(i, noun)| {
            let mut vector = vec![0.0f32; 16];
            vector[i] = 1.0;
            (noun.to_string(), vector)
        })
        .collect();
    let table = EmbeddingTable::from_vectors(16, entries).unwrap();

    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(table)
        .min_candidate_features(2)
        .build_with(AlwaysPositive)
        .unwrap();

    let reviews = vec![
        Review::new("Battery works.", 5),
        Review::new("Camera works.", 5),
        Review::new(
            "The screen layout menu icon speaker button case design shows battery and camera.",
            3,
        ),
    ];
    let output = pipeline.run(&reviews).unwrap();
    let result = &output.result;

    assert_eq!(result.summary.features_found, 2);
    assert_eq!(result.classification[2].category, GENERAL_CATEGORY);
    assert_eq!(output.diagnostics.multi_feature_sentences, 1);
    assert_eq!(output.diagnostics.unassociated_sentences, 1);

    // The ambiguous sentence still counts in both matched buckets.
    assert_eq!(result.features["battery"].total, 2);
    assert_eq!(result.features["camera"].total, 2);
}

#[test]
fn classifier_failure_excludes_sentence_not_batch() {
    struct FailOn(&'static str);
    impl SentimentModel for FailOn {
        fn predict(&self, text: &str) -> Result<Prediction> {
            if text.contains(self.0) {
                Err(PipelineError::Unexpected("malformed model input".into()))
            } else {
                Ok(Prediction {
                    label: LABEL_POSITIVE.to_string(),
                    score: 1.0,
                })
            }
        }
    }

    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(phone_embeddings())
        .build_with(FailOn("Camera"))
        .unwrap();

    let reviews = vec![
        Review::new("Battery life is great.", 5),
        Review::new("Camera is great.", 5),
    ];
    let output = pipeline.run(&reviews).unwrap();

    assert_eq!(output.diagnostics.classifier_failures, 1);
    assert_eq!(output.result.summary.total_sentences, 1);
    assert_eq!(output.result.classification[0].sentence, "Battery life is great.");
}

#[test]
fn progress_checkpoints_fire_in_order() {
    let seen: Arc<Mutex<Vec<Checkpoint>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(phone_embeddings())
        .progress(move |checkpoint| sink.lock().unwrap().push(checkpoint))
        .build_with(AlwaysPositive)
        .unwrap();

    let reviews = vec![
        Review::new("Great camera and battery life!", 5),
        Review::new("Battery life is excellent.", 5),
    ];
    pipeline.run(&reviews).unwrap();

    let checkpoints = seen.lock().unwrap();
    assert_eq!(
        *checkpoints,
        vec![
            Checkpoint::Started { reviews: 2 },
            Checkpoint::Annotated { sentences: 2 },
            Checkpoint::FeaturesExtracted { features: 2 },
            Checkpoint::Classified { records: 2 },
            Checkpoint::Completed,
        ]
    );
}

#[test]
fn panicking_progress_sink_does_not_abort_the_run() {
    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(phone_embeddings())
        .progress(|_| panic!("sink bug"))
        .build_with(AlwaysPositive)
        .unwrap();

    let output = pipeline
        .run(&[Review::new("Battery life is great.", 5)])
        .unwrap();
    assert_eq!(output.result.summary.total_sentences, 1);
}

#[test]
fn missing_embeddings_is_a_capability_error() {
    let error = AnalysisPipelineBuilder::new()
        .build_with(AlwaysPositive)
        .err()
        .expect("build must fail without embeddings");
    assert!(matches!(error, PipelineError::Capability(_)));
}

#[test]
fn single_text_analysis_uses_dummy_rating() {
    let pipeline = AnalysisPipelineBuilder::new()
        .embeddings(phone_embeddings())
        .build_with(AlwaysPositive)
        .unwrap();

    let output = pipeline.analyze("Battery life is excellent.").unwrap();
    assert_eq!(output.result.summary.total_sentences, 1);
    assert_eq!(output.result.classification[0].category, "battery");
    assert_eq!(output.stats.reviews_processed, 1);
}
