//! Word-embedding capability and similarity math.
//!
//! The pipeline only ever needs two things from an embedding provider: a
//! fixed-dimension vector per token and cosine similarity between vectors.
//! [`EmbeddingTable`] is the shipped provider, loading word2vec-style
//! text-format vector files; hosts backed by a different store implement
//! [`WordEmbeddings`] and inject it via
//! [`AnalysisPipelineBuilder::embeddings`](crate::analysis::AnalysisPipelineBuilder::embeddings).

use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Capability contract for word-embedding lookup.
///
/// Lookups never fail: unknown tokens map to a provider-specific
/// out-of-vocabulary vector. Dimensionality is fixed for the provider's
/// lifetime.
pub trait WordEmbeddings: Send + Sync {
    /// Dimensionality of every vector returned by [`vector`](Self::vector).
    fn dimension(&self) -> usize;

    /// The vector for `token`.
    fn vector(&self, token: &str) -> Vec<f32>;
}

/// Cosine similarity of two vectors. Returns 0.0 when either vector has zero
/// magnitude or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// In-memory embedding table loaded from word2vec text format.
///
/// The format is one token per line followed by its vector components,
/// whitespace-separated; an optional `count dimension` header line is
/// accepted and skipped. Lookups are case-insensitive (tokens are stored
/// lowercase). Out-of-vocabulary tokens map to a deterministic unit vector
/// derived from the token's hash, so unknown tokens are stable across runs
/// and mutually near-orthogonal rather than clustered.
pub struct EmbeddingTable {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl EmbeddingTable {
    /// Load a table from word2vec text-format data.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut dimension = 0usize;
        let mut vectors = HashMap::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let token = fields
                .next()
                .ok_or_else(|| {
                    PipelineError::Capability(format!("embedding line {} is empty", line_no + 1))
                })?
                .to_lowercase();
            let values: Vec<f32> = fields
                .map(|field| {
                    field.parse::<f32>().map_err(|e| {
                        PipelineError::Capability(format!(
                            "embedding line {}: bad component '{}': {}",
                            line_no + 1,
                            field,
                            e
                        ))
                    })
                })
                .collect::<Result<_>>()?;

            // "count dimension" header: two numeric fields, first line only.
            if line_no == 0 && values.len() == 1 && token.parse::<usize>().is_ok() {
                continue;
            }

            if dimension == 0 {
                dimension = values.len();
            } else if values.len() != dimension {
                return Err(PipelineError::Capability(format!(
                    "embedding line {}: expected {} components, got {}",
                    line_no + 1,
                    dimension,
                    values.len()
                )));
            }
            vectors.insert(token, values);
        }

        if vectors.is_empty() || dimension == 0 {
            return Err(PipelineError::Capability(
                "embedding table is empty".to_string(),
            ));
        }
        Ok(Self { dimension, vectors })
    }

    /// Load a table from a text-format vector file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            PipelineError::Capability(format!(
                "failed to open embedding file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Build a table directly from `(token, vector)` pairs.
    pub fn from_vectors<I, S>(dimension: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut vectors = HashMap::new();
        for (token, vector) in entries {
            let token = token.into().to_lowercase();
            if vector.len() != dimension {
                return Err(PipelineError::Capability(format!(
                    "vector for '{}' has {} components, expected {}",
                    token,
                    vector.len(),
                    dimension
                )));
            }
            vectors.insert(token, vector);
        }
        if vectors.is_empty() || dimension == 0 {
            return Err(PipelineError::Capability(
                "embedding table is empty".to_string(),
            ));
        }
        Ok(Self { dimension, vectors })
    }

    /// Number of stored tokens.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the table holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Whether `token` has a stored vector (OOV tokens return false).
    pub fn contains(&self, token: &str) -> bool {
        self.vectors.contains_key(&token.to_lowercase())
    }

    fn oov_vector(&self, token: &str) -> Vec<f32> {
        // FNV-1a seed, xorshift* stream. Stable across runs and platforms.
        let mut seed = 0xcbf2_9ce4_8422_2325u64;
        for byte in token.as_bytes() {
            seed ^= u64::from(*byte);
            seed = seed.wrapping_mul(0x0000_0100_0000_01b3);
        }
        if seed == 0 {
            seed = 0x9e37_79b9_7f4a_7c15;
        }

        let mut values = Vec::with_capacity(self.dimension);
        let mut state = seed;
        for _ in 0..self.dimension {
            state ^= state >> 12;
            state ^= state << 25;
            state ^= state >> 27;
            let sample = state.wrapping_mul(0x2545_f491_4f6c_dd1d);
            // Map the top 24 bits into [-1, 1).
            values.push(((sample >> 40) as f32) / 8_388_608.0 - 1.0);
        }

        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut values {
                *value /= norm;
            }
        }
        values
    }
}

impl WordEmbeddings for EmbeddingTable {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn vector(&self, token: &str) -> Vec<f32> {
        match self.vectors.get(&token.to_lowercase()) {
            Some(vector) => vector.clone(),
            None => self.oov_vector(token),
        }
    }
}
