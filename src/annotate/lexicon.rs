//! Closed-class word lists backing the rule tagger.

use std::collections::HashSet;

use once_cell::sync::Lazy;

fn set(words: &'static [&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

pub(crate) static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "a", "an", "the", "this", "that", "these", "those", "some", "any", "no", "every", "each",
        "either", "neither", "both", "all", "most", "few", "more", "less", "much", "many", "such",
        "another", "other", "its", "my", "your", "his", "her", "their", "our",
    ])
});

pub(crate) static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
        "yourself", "itself", "who", "whom", "whose", "which", "anyone", "everyone", "someone",
        "something", "anything", "nothing", "everything",
    ])
});

pub(crate) static PREPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "about",
        "after", "before", "between", "during", "under", "over", "through", "against", "without",
        "within", "upon", "off", "up", "down", "out", "around", "near", "since", "until", "than",
        "as", "like", "via", "per",
    ])
});

pub(crate) static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "while", "if",
        "unless", "whereas", "when", "where", "why", "how", "whether",
    ])
});

// Auxiliaries and modals, tagged Verb. Contracted forms appear as written
// because the lemmatizer drops apostrophes.
pub(crate) static AUXILIARIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have",
        "has", "had", "will", "would", "can", "could", "shall", "should", "may", "might", "must",
        "wont", "cant", "dont", "doesnt", "didnt", "isnt", "arent", "wasnt", "werent", "hasnt",
        "havent", "couldnt", "wouldnt", "shouldnt",
    ])
});

pub(crate) static PARTICLES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["not", "never", "nt"]));

pub(crate) static NUMBER_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "dozen",
        "hundred", "thousand", "million",
    ])
});

pub(crate) static COMMON_ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "very", "really", "too", "also", "just", "quite", "only", "still", "even", "already",
        "almost", "always", "often", "sometimes", "again", "enough", "here", "there", "then",
        "now", "well", "far", "away", "instead", "pretty", "ever", "definitely", "highly",
        "extremely",
    ])
});

// Review-domain adjectives the suffix rules cannot reach.
pub(crate) static COMMON_ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "good", "great", "bad", "best", "worst", "better", "worse", "nice", "poor", "fine",
        "excellent", "amazing", "awesome", "terrible", "horrible", "awful", "superb",
        "outstanding", "wonderful", "decent", "cheap", "expensive", "fast", "slow", "quick",
        "big", "small", "large", "little", "new", "old", "easy", "hard", "heavy", "light",
        "long", "short", "high", "low", "clear", "crisp", "sharp", "blurry", "smooth", "loud",
        "quiet", "premium", "sturdy", "flimsy", "happy", "unhappy", "satisfied", "perfect",
        "ok", "okay", "fantastic", "lovely", "solid", "super", "top", "worth", "worthless",
        "average", "mediocre", "substandard", "crystal", "dead", "safe", "unsafe",
        "professional", "incredible", "disappointed", "disappointing",
    ])
});

// Review-domain verbs whose forms would otherwise default to Noun.
pub(crate) static COMMON_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "love", "loved", "loves", "like", "liked", "likes", "hate", "hated", "hates",
        "recommend", "recommends", "buy", "buys", "bought", "use", "uses", "work", "works",
        "break", "breaks", "broke", "stop", "stops", "charge", "charges", "last", "lasts",
        "return", "returns", "arrive", "arrives", "look", "looks", "feel", "feels", "felt",
        "get", "gets", "got", "make", "makes", "made", "take", "takes", "took", "come", "comes",
        "came", "go", "goes", "went", "keep", "keeps", "kept", "open", "opens", "drain",
        "drains", "heat", "heats", "lag", "lags", "seem", "seems", "want", "wants", "need",
        "needs", "expect", "expects", "know", "knows", "knew", "think", "thinks", "thought",
        "say", "says", "said", "try", "tries", "show", "shows", "showed", "give", "gives",
        "gave", "put", "puts", "run", "runs", "ran", "send", "sends", "sent", "hold", "holds",
        "held",
    ])
});
