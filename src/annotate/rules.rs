use super::lexicon;
use super::{AnnotatedSentence, Annotator, PosTag, Token};
use crate::error::Result;

const SENTENCE_BREAKS: &[char] = &['.', '!', '?', ';', '\n', '\r'];

/// Deterministic rule-based English annotator.
///
/// Sentences split on `. ! ? ;` and line breaks, mirroring the sentencizer
/// configuration the reference deployment used. Tokens are tagged from
/// closed-class lexicons plus suffix heuristics; open-class words default to
/// `Noun`, which is the right bias for product-review text where unknown
/// words are mostly things ("touchscreen", "stylus"). Lemmas are lowercase
/// with possessives and common plural endings stripped.
///
/// # Examples
///
/// ```
/// use review_pipelines::annotate::{Annotator, PosTag, RuleAnnotator};
///
/// let annotator = RuleAnnotator::new();
/// let sentences = annotator.annotate("Great camera and battery life!").unwrap();
/// assert_eq!(sentences.len(), 1);
/// let nouns: Vec<&str> = sentences[0]
///     .tokens
///     .iter()
///     .filter(|t| t.pos == PosTag::Noun)
///     .map(|t| t.lemma.as_str())
///     .collect();
/// assert_eq!(nouns, ["camera", "battery", "life"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleAnnotator;

impl RuleAnnotator {
    /// Create an annotator backed by the built-in English lexicons.
    pub fn new() -> Self {
        Self
    }

    fn split_sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut iter = text.char_indices().peekable();
        while let Some((idx, ch)) = iter.next() {
            if SENTENCE_BREAKS.contains(&ch) {
                // A run of break characters is one boundary.
                let mut end = idx + ch.len_utf8();
                while let Some(&(next_idx, next_ch)) = iter.peek() {
                    if SENTENCE_BREAKS.contains(&next_ch) {
                        end = next_idx + next_ch.len_utf8();
                        iter.next();
                    } else {
                        break;
                    }
                }
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }
        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail);
        }
        sentences
    }

    fn tokenize<'t>(&self, sentence: &'t str) -> Vec<&'t str> {
        let mut tokens = Vec::new();
        let mut start = None;
        for (idx, ch) in sentence.char_indices() {
            if ch.is_alphanumeric() || ch == '\'' || ch == '\u{2019}' {
                if start.is_none() {
                    start = Some(idx);
                }
            } else if let Some(s) = start.take() {
                tokens.push(&sentence[s..idx]);
            }
        }
        if let Some(s) = start {
            tokens.push(&sentence[s..]);
        }
        tokens
    }

    fn base_lemma(surface: &str) -> String {
        let mut lemma = surface.to_lowercase().replace('\u{2019}', "'");
        if let Some(stripped) = lemma.strip_suffix("'s") {
            lemma = stripped.to_string();
        }
        lemma.retain(|c| c != '\'');
        lemma
    }

    fn depluralize(lemma: &str) -> String {
        let n = lemma.chars().count();
        if n > 4 {
            if let Some(stem) = lemma.strip_suffix("ies") {
                return format!("{stem}y");
            }
        }
        if n > 3 {
            for suffix in ["sses", "shes", "ches", "xes", "zes", "oes"] {
                if lemma.ends_with(suffix) {
                    return lemma[..lemma.len() - 2].to_string();
                }
            }
            if lemma.ends_with('s')
                && !lemma.ends_with("ss")
                && !lemma.ends_with("us")
                && !lemma.ends_with("is")
            {
                return lemma[..lemma.len() - 1].to_string();
            }
        }
        lemma.to_string()
    }

    fn tag(&self, surface: &str, lemma: &str, token_index: usize) -> PosTag {
        if lemma.chars().all(|c| c.is_numeric()) || lexicon::NUMBER_WORDS.contains(lemma) {
            return PosTag::Numeral;
        }
        if lexicon::DETERMINERS.contains(lemma) {
            return PosTag::Determiner;
        }
        if lexicon::PRONOUNS.contains(lemma) {
            return PosTag::Pronoun;
        }
        if lexicon::PREPOSITIONS.contains(lemma) {
            return PosTag::Preposition;
        }
        if lexicon::CONJUNCTIONS.contains(lemma) {
            return PosTag::Conjunction;
        }
        if lexicon::AUXILIARIES.contains(lemma) {
            return PosTag::Verb;
        }
        if lexicon::PARTICLES.contains(lemma) {
            return PosTag::Particle;
        }
        if lexicon::COMMON_ADVERBS.contains(lemma) {
            return PosTag::Adverb;
        }
        if lexicon::COMMON_ADJECTIVES.contains(lemma) {
            return PosTag::Adjective;
        }
        if lexicon::COMMON_VERBS.contains(lemma) {
            return PosTag::Verb;
        }

        let n = lemma.chars().count();
        if n > 3 && lemma.ends_with("ly") {
            return PosTag::Adverb;
        }
        if n > 4 {
            for suffix in ["ful", "less", "able", "ible", "ous", "ish", "est"] {
                if lemma.ends_with(suffix) {
                    return PosTag::Adjective;
                }
            }
            if lemma.ends_with("ing") || lemma.ends_with("ed") {
                return PosTag::Verb;
            }
        }

        if token_index > 0 && surface.chars().next().is_some_and(|c| c.is_uppercase()) {
            return PosTag::ProperNoun;
        }
        PosTag::Noun
    }

    fn annotate_sentence(&self, sentence: &str) -> AnnotatedSentence {
        let mut tokens = Vec::new();
        for (index, surface) in self.tokenize(sentence).into_iter().enumerate() {
            let lemma = Self::base_lemma(surface);
            if lemma.is_empty() {
                continue;
            }
            let pos = self.tag(surface, &lemma, index);
            let lemma = if pos.is_noun() {
                Self::depluralize(&lemma)
            } else {
                lemma
            };
            tokens.push(Token::new(surface, lemma, pos));
        }
        AnnotatedSentence {
            text: sentence.to_string(),
            tokens,
        }
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSentence>> {
        Ok(self
            .split_sentences(text)
            .into_iter()
            .map(|sentence| self.annotate_sentence(sentence))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotate_one(text: &str) -> AnnotatedSentence {
        let annotator = RuleAnnotator::new();
        let mut sentences = annotator.annotate(text).unwrap();
        assert_eq!(sentences.len(), 1, "expected one sentence in {text:?}");
        sentences.remove(0)
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let annotator = RuleAnnotator::new();
        let sentences = annotator
            .annotate("Great camera. Battery life is excellent! Would buy again?")
            .unwrap();
        let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            [
                "Great camera.",
                "Battery life is excellent!",
                "Would buy again?"
            ]
        );
    }

    #[test]
    fn ellipsis_is_one_boundary() {
        let annotator = RuleAnnotator::new();
        let sentences = annotator
            .annotate("Nice screen... battery died fast.")
            .unwrap();
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn tags_review_sentence() {
        let sentence = annotate_one("Great camera and battery life!");
        let tags: Vec<(&str, PosTag)> = sentence
            .tokens
            .iter()
            .map(|t| (t.lemma.as_str(), t.pos))
            .collect();
        assert_eq!(
            tags,
            [
                ("great", PosTag::Adjective),
                ("camera", PosTag::Noun),
                ("and", PosTag::Conjunction),
                ("battery", PosTag::Noun),
                ("life", PosTag::Noun),
            ]
        );
    }

    #[test]
    fn sentence_initial_capital_is_not_proper() {
        let sentence = annotate_one("Battery life is excellent.");
        assert_eq!(sentence.tokens[0].pos, PosTag::Noun);
        assert_eq!(sentence.tokens[0].lemma, "battery");
    }

    #[test]
    fn mid_sentence_capital_is_proper() {
        let sentence = annotate_one("The Anker charger works.");
        let anker = &sentence.tokens[1];
        assert_eq!(anker.pos, PosTag::ProperNoun);
    }

    #[test]
    fn plural_nouns_lemmatize() {
        let sentence = annotate_one("Two batteries and three speakers arrived.");
        let lemmas: Vec<&str> = sentence
            .tokens
            .iter()
            .filter(|t| t.pos.is_noun())
            .map(|t| t.lemma.as_str())
            .collect();
        assert_eq!(lemmas, ["battery", "speaker"]);
    }

    #[test]
    fn possessives_strip() {
        let sentence = annotate_one("The phone's screen cracked.");
        assert!(sentence.lemmas().any(|l| l == "phone"));
        assert!(!sentence.lemmas().any(|l| l == "phones"));
    }

    #[test]
    fn suffix_heuristics() {
        let sentence = annotate_one("The colorful display stopped working suddenly.");
        let by_lemma = |wanted: &str| {
            sentence
                .tokens
                .iter()
                .find(|t| t.lemma == wanted)
                .map(|t| t.pos)
        };
        assert_eq!(by_lemma("colorful"), Some(PosTag::Adjective));
        assert_eq!(by_lemma("display"), Some(PosTag::Noun));
        assert_eq!(by_lemma("stopped"), Some(PosTag::Verb));
        assert_eq!(by_lemma("working"), Some(PosTag::Verb));
        assert_eq!(by_lemma("suddenly"), Some(PosTag::Adverb));
    }

    #[test]
    fn no_nouns_no_common_noun_flag() {
        let sentence = annotate_one("Very good!");
        assert!(!sentence.has_common_noun());
    }

    #[test]
    fn contractions_tag_as_auxiliaries() {
        let sentence = annotate_one("It doesn't work.");
        let doesnt = sentence.tokens.iter().find(|t| t.lemma == "doesnt").unwrap();
        assert_eq!(doesnt.pos, PosTag::Verb);
    }

    #[test]
    fn number_words_are_numerals() {
        let sentence = annotate_one("Two of them failed.");
        assert_eq!(sentence.tokens[0].pos, PosTag::Numeral);
    }
}
