//! Part-of-speech tagging seam and a lightweight heuristic tagger.
//!
//! The heuristic tagger is a stand-in for a real NLP library: sentences are
//! split on terminal punctuation and blank lines, and words are classified by
//! small lexicons, determiner context and common suffixes.

use super::ServiceResult;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Counts consumed by the structural-density heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagCounts {
    pub sentence_count: usize,
    pub noun_count: usize,
    pub verb_count: usize,
    pub word_count: usize,
}

/// Part-of-speech tagging capability.
pub trait Tagger: Send + Sync {
    fn analyze(&self, text: &str) -> ServiceResult<TagCounts>;
    /// Splits free text into sentences, in order.
    fn sentences(&self, text: &str) -> ServiceResult<Vec<String>>;
}

static STANZA_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n").expect("valid stanza regex"));
static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("valid sentence regex"));
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*").expect("valid word regex"));

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "my", "your", "his", "her", "its", "our", "their", "this", "that",
        "these", "those", "every", "each", "some",
    ]
    .into_iter()
    .collect()
});

static VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "is", "are", "was", "were", "be", "am", "been", "have", "has", "had", "do", "does", "did",
        "go", "come", "see", "know", "feel", "dance", "sing", "fly", "fall", "rise", "shine",
        "sleep", "dream", "whisper", "break", "fade", "paint", "linger", "glide", "reside", "wake",
        "awaken", "begin", "sigh", "kiss", "flee", "weep", "cry", "laugh", "hold", "keep", "write",
        "speak", "hear", "listen", "bloom", "grow", "burn", "run", "walk", "wait", "thrive",
        "survive", "gleam", "descend", "hide", "bring", "believe", "share", "rhyme", "remember",
        "forget", "lose", "find", "seek", "give", "take", "make", "let",
    ]
    .into_iter()
    .collect()
});

static NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "heart", "night", "moon", "sun", "star", "sky", "love", "world", "soul", "light", "day",
        "time", "rain", "wind", "sea", "tree", "flower", "bird", "life", "shadow", "eye", "hand",
        "song", "word", "home", "river", "dawn", "earth", "fire", "silence", "rhythm", "poem",
        "verse", "memory", "tale", "lore", "realm", "breeze", "darkness", "land", "dew",
        "dewdrop", "symphony", "step", "grace", "chamber", "echo", "laughter", "moment", "drum",
        "story", "depth", "tapestry", "joy", "pain", "hall", "secret", "wonder", "hope", "death",
        "friend", "friendship", "beauty", "loss", "journey", "nature", "sadness", "spring",
        "winter", "summer", "autumn", "ocean", "mountain", "road", "door", "window", "voice",
        "tear", "smile", "kiss", "dream",
    ]
    .into_iter()
    .collect()
});

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ness", "ment", "ity", "ship", "dom", "hood", "ance", "ence",
];
const VERB_SUFFIXES: &[&str] = &["ing", "ed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    Noun,
    Verb,
    Other,
}

/// Rule-based tagger requiring no model files.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    pub fn new() -> Self {
        Self
    }
}

impl Tagger for HeuristicTagger {
    fn analyze(&self, text: &str) -> ServiceResult<TagCounts> {
        let words: Vec<String> = WORD_RE
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect();

        let mut counts = TagCounts {
            sentence_count: split_sentences(text).len(),
            word_count: words.len(),
            ..TagCounts::default()
        };

        let mut previous: Option<&str> = None;
        for word in &words {
            match classify(word, previous) {
                WordClass::Noun => counts.noun_count += 1,
                WordClass::Verb => counts.verb_count += 1,
                WordClass::Other => {}
            }
            previous = Some(word.as_str());
        }

        Ok(counts)
    }

    fn sentences(&self, text: &str) -> ServiceResult<Vec<String>> {
        Ok(split_sentences(text))
    }
}

fn split_sentences(text: &str) -> Vec<String> {
    STANZA_BREAK_RE
        .split(text)
        .flat_map(|stanza| SENTENCE_RE.find_iter(stanza))
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|sentence| WORD_RE.is_match(sentence))
        .collect()
}

fn classify(word: &str, previous: Option<&str>) -> WordClass {
    if DETERMINERS.contains(word) {
        return WordClass::Other;
    }
    if previous.is_some_and(|prev| DETERMINERS.contains(prev)) {
        return WordClass::Noun;
    }

    for base in base_forms(word) {
        if VERBS.contains(base) {
            return WordClass::Verb;
        }
        if NOUNS.contains(base) {
            return WordClass::Noun;
        }
    }

    if word.len() > 4 && VERB_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
        return WordClass::Verb;
    }
    if word.len() > 4 && NOUN_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
        return WordClass::Noun;
    }
    WordClass::Other
}

/// Candidate dictionary forms of an inflected word, most specific first.
fn base_forms(word: &str) -> Vec<&str> {
    let mut forms = vec![word];
    for suffix in ["ies", "es", "s", "ed", "d", "ing"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() >= 2 {
                forms.push(stem);
            }
        }
    }
    forms
}

#[cfg(test)]
mod tests {
    use super::{classify, split_sentences, WordClass};

    #[test]
    fn determiner_context_marks_nouns() {
        assert_eq!(classify("dance", Some("the")), WordClass::Noun);
        assert_eq!(classify("dance", Some("they")), WordClass::Verb);
    }

    #[test]
    fn inflected_forms_resolve_through_lexicon() {
        assert_eq!(classify("shines", None), WordClass::Verb);
        assert_eq!(classify("stars", None), WordClass::Noun);
        assert_eq!(classify("wandering", None), WordClass::Verb);
        assert_eq!(classify("kindness", None), WordClass::Noun);
    }

    #[test]
    fn stanza_breaks_end_sentences() {
        let sentences = split_sentences("soft rain falls\n\nthe moon rises");
        assert_eq!(sentences, vec!["soft rain falls", "the moon rises"]);
    }

    #[test]
    fn punctuation_only_fragments_are_dropped() {
        let sentences = split_sentences("Hello there. ... Goodbye!");
        assert_eq!(sentences, vec!["Hello there.", "Goodbye!"]);
    }
}
