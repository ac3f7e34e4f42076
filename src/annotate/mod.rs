//! Linguistic annotation: sentence splitting, tokens, part-of-speech.
//!
//! The pipeline consumes annotation through the [`Annotator`] capability
//! trait. [`RuleAnnotator`] is the shipped deterministic English
//! implementation; hosts with a statistical tagger wrap it in the trait and
//! inject it via
//! [`AnalysisPipelineBuilder::annotator`](crate::analysis::AnalysisPipelineBuilder::annotator).

mod lexicon;
mod rules;

pub use rules::RuleAnnotator;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Part-of-speech tags produced by an annotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    /// Common noun.
    Noun,
    /// Proper noun.
    ProperNoun,
    /// Verb, including auxiliaries.
    Verb,
    /// Adjective.
    Adjective,
    /// Adverb.
    Adverb,
    /// Pronoun.
    Pronoun,
    /// Determiner or article.
    Determiner,
    /// Preposition.
    Preposition,
    /// Conjunction.
    Conjunction,
    /// Negation or other particle.
    Particle,
    /// Number.
    Numeral,
    /// Anything else.
    Other,
}

impl PosTag {
    /// Common or proper noun.
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }

    /// Open-class word carrying semantic content.
    pub fn is_content_word(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::ProperNoun | PosTag::Verb | PosTag::Adjective | PosTag::Adverb
        )
    }
}

/// A token with its surface form, lemma, and tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Original text of the token.
    pub surface: String,
    /// Normalized lowercase lemma.
    pub lemma: String,
    /// Part-of-speech tag.
    pub pos: PosTag,
}

impl Token {
    /// Create a token.
    pub fn new(surface: impl Into<String>, lemma: impl Into<String>, pos: PosTag) -> Self {
        Self {
            surface: surface.into(),
            lemma: lemma.into(),
            pos,
        }
    }
}

/// One sentence of a review with its token annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    /// The sentence text.
    pub text: String,
    /// Ordered tokens.
    pub tokens: Vec<Token>,
}

impl AnnotatedSentence {
    /// Whether any token is tagged [`PosTag::Noun`].
    pub fn has_common_noun(&self) -> bool {
        self.tokens.iter().any(|t| t.pos == PosTag::Noun)
    }

    /// Lemmas of all tokens, in order.
    pub fn lemmas(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.lemma.as_str())
    }

    /// Lemmas of noun and adjective tokens, the basis of the sentence's
    /// aggregate embedding.
    pub fn content_lemmas(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| t.pos.is_noun() || t.pos == PosTag::Adjective)
            .map(|t| t.lemma.as_str())
    }
}

/// Capability contract for linguistic annotation.
///
/// Given text, return ordered sentences with token/POS annotations.
/// Implementations must be deterministic for a fixed input; an `Err` is
/// treated as a capability failure and aborts the batch run.
pub trait Annotator: Send + Sync {
    /// Split `text` into ordered annotated sentences.
    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSentence>>;
}
