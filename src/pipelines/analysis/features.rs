use std::collections::{BTreeMap, HashMap};

use super::disjoint::DisjointSet;
use crate::annotate::{AnnotatedSentence, PosTag};
use crate::embedding::{cosine_similarity, WordEmbeddings};

/// A canonical product aspect discovered from the corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Canonical label: the highest-frequency member of the merged group.
    pub name: String,
    /// Synonyms merged into this feature, in group rank order. Never
    /// contains `name`; no term belongs to two features.
    pub related_terms: Vec<String>,
    /// Centroid of the member embedding vectors, used for
    /// sentence-to-feature association.
    pub embedding: Vec<f32>,
}

pub(crate) struct CandidateNoun {
    pub lemma: String,
    pub frequency: usize,
}

/// Rank noun lemmas by corpus frequency and keep the top fraction.
///
/// The candidate count is `ceil(top_percent * unique_lemmas)` with a floor so
/// small corpora still produce candidates; ties break lexically ascending for
/// determinism.
pub(crate) fn mine_candidates(
    sentences: &[AnnotatedSentence],
    top_percent: f32,
    floor: usize,
) -> Vec<CandidateNoun> {
    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    for sentence in sentences {
        for token in &sentence.tokens {
            if token.pos == PosTag::Noun && token.lemma.chars().count() >= 2 {
                *frequencies.entry(token.lemma.as_str()).or_insert(0) += 1;
            }
        }
    }

    let unique = frequencies.len();
    if unique == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(&str, usize)> = frequencies.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let target = ((unique as f32 * top_percent).ceil() as usize)
        .max(floor)
        .min(unique);
    ranked.truncate(target);

    ranked
        .into_iter()
        .map(|(lemma, frequency)| CandidateNoun {
            lemma: lemma.to_string(),
            frequency,
        })
        .collect()
}

/// Merge near-synonymous candidates into canonical features.
///
/// Candidates whose pairwise cosine similarity meets `threshold` land in one
/// disjoint-set component, so similarity closes transitively: A~B and B~C
/// merge A, B, C even when A~C alone falls short. The canonical name is the
/// group's highest-frequency member (candidates arrive frequency-ranked);
/// the representative embedding is the member centroid.
pub(crate) fn merge_candidates(
    candidates: &[CandidateNoun],
    embeddings: &dyn WordEmbeddings,
    threshold: f32,
) -> BTreeMap<String, Feature> {
    let vectors: Vec<Vec<f32>> = candidates
        .iter()
        .map(|candidate| embeddings.vector(&candidate.lemma))
        .collect();

    let mut groups = DisjointSet::new(candidates.len());
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            if cosine_similarity(&vectors[i], &vectors[j]) >= threshold {
                groups.union(i, j);
            }
        }
    }

    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for index in 0..candidates.len() {
        members.entry(groups.find(index)).or_default().push(index);
    }

    let mut features = BTreeMap::new();
    for group in members.values() {
        // Candidates are sorted by (frequency desc, lemma asc), so the first
        // member is the canonical one.
        let canonical = &candidates[group[0]];
        let related_terms: Vec<String> = group[1..]
            .iter()
            .map(|&index| candidates[index].lemma.clone())
            .collect();

        let dimension = embeddings.dimension();
        let mut centroid = vec![0.0f32; dimension];
        for &index in group {
            for (slot, value) in centroid.iter_mut().zip(vectors[index].iter()) {
                *slot += value;
            }
        }
        let count = group.len() as f32;
        for slot in &mut centroid {
            *slot /= count;
        }

        features.insert(
            canonical.lemma.clone(),
            Feature {
                name: canonical.lemma.clone(),
                related_terms,
                embedding: centroid,
            },
        );
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{Annotator, RuleAnnotator};
    use crate::embedding::EmbeddingTable;

    fn annotate(texts: &[&str]) -> Vec<AnnotatedSentence> {
        let annotator = RuleAnnotator::new();
        texts
            .iter()
            .flat_map(|text| annotator.annotate(text).unwrap())
            .collect()
    }

    #[test]
    fn mines_noun_frequencies_with_lexical_tie_break() {
        let sentences = annotate(&[
            "Battery life is great.",
            "Battery works.",
            "Camera works.",
        ]);
        let candidates = mine_candidates(&sentences, 1.0, 1);
        let ranked: Vec<(&str, usize)> = candidates
            .iter()
            .map(|c| (c.lemma.as_str(), c.frequency))
            .collect();
        assert_eq!(ranked, [("battery", 2), ("camera", 1), ("life", 1)]);
    }

    #[test]
    fn floor_keeps_small_corpora_covered() {
        let sentences = annotate(&["Great camera and battery life!"]);
        // ceil(0.05 * 3) = 1 alone, the floor lifts it to all three.
        let candidates = mine_candidates(&sentences, 0.05, 10);
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn candidate_count_scales_with_corpus() {
        let small: Vec<String> = (0..40).map(|i| format!("The gadget{i} works.")).collect();
        let large: Vec<String> = (0..80).map(|i| format!("The gadget{i} works.")).collect();
        let small_refs: Vec<&str> = small.iter().map(String::as_str).collect();
        let large_refs: Vec<&str> = large.iter().map(String::as_str).collect();

        let small_candidates = mine_candidates(&annotate(&small_refs), 0.1, 1);
        let large_candidates = mine_candidates(&annotate(&large_refs), 0.1, 1);
        assert_eq!(small_candidates.len(), 4);
        assert_eq!(large_candidates.len(), 8);
    }

    #[test]
    fn no_nouns_yields_no_candidates() {
        let sentences = annotate(&["Very good!"]);
        assert!(mine_candidates(&sentences, 0.05, 10).is_empty());
    }

    #[test]
    fn merge_is_transitive() {
        // a~b and b~c meet the threshold, a~c does not.
        let table = EmbeddingTable::from_vectors(
            2,
            vec![
                ("alpha", vec![1.0, 0.0]),
                ("bridge", vec![0.707, 0.707]),
                ("charlie", vec![0.0, 1.0]),
            ],
        )
        .unwrap();
        let candidates = vec![
            CandidateNoun {
                lemma: "alpha".into(),
                frequency: 3,
            },
            CandidateNoun {
                lemma: "bridge".into(),
                frequency: 2,
            },
            CandidateNoun {
                lemma: "charlie".into(),
                frequency: 1,
            },
        ];

        let features = merge_candidates(&candidates, &table, 0.6);
        assert_eq!(features.len(), 1);
        let feature = &features["alpha"];
        assert_eq!(feature.related_terms, ["bridge", "charlie"]);
    }

    #[test]
    fn dissimilar_candidates_stay_apart() {
        let table = EmbeddingTable::from_vectors(
            2,
            vec![("battery", vec![1.0, 0.0]), ("camera", vec![0.0, 1.0])],
        )
        .unwrap();
        let candidates = vec![
            CandidateNoun {
                lemma: "battery".into(),
                frequency: 2,
            },
            CandidateNoun {
                lemma: "camera".into(),
                frequency: 1,
            },
        ];

        let features = merge_candidates(&candidates, &table, 0.64);
        assert_eq!(features.len(), 2);
        assert!(features["battery"].related_terms.is_empty());
        assert!(features["camera"].related_terms.is_empty());
    }

    #[test]
    fn centroid_is_member_mean() {
        let table = EmbeddingTable::from_vectors(
            2,
            vec![("battery", vec![1.0, 0.0]), ("life", vec![0.8, 0.2])],
        )
        .unwrap();
        let candidates = vec![
            CandidateNoun {
                lemma: "battery".into(),
                frequency: 2,
            },
            CandidateNoun {
                lemma: "life".into(),
                frequency: 2,
            },
        ];

        let features = merge_candidates(&candidates, &table, 0.64);
        let feature = &features["battery"];
        assert_eq!(feature.related_terms, ["life"]);
        assert!((feature.embedding[0] - 0.9).abs() < 1e-6);
        assert!((feature.embedding[1] - 0.1).abs() < 1e-6);
    }
}
