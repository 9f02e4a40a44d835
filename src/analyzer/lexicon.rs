// Word valences for headline scoring, on a -4..4 scale.
use std::collections::HashMap;

const POSITIVE: &[(&str, f64)] = &[
    ("beat", 1.9),
    ("exceed", 1.8),
    ("record", 1.6),
    ("profit", 1.9),
    ("profitable", 2.0),
    ("gain", 1.9),
    ("growth", 1.8),
    ("grow", 1.6),
    ("rise", 1.5),
    ("surge", 2.2),
    ("soar", 2.4),
    ("rally", 2.0),
    ("jump", 1.5),
    ("climb", 1.4),
    ("rebound", 1.6),
    ("recover", 1.5),
    ("recovery", 1.5),
    ("strong", 1.7),
    ("strength", 1.6),
    ("upgrade", 1.9),
    ("outperform", 2.0),
    ("bullish", 2.3),
    ("optimistic", 2.0),
    ("confident", 1.8),
    ("positive", 1.9),
    ("win", 2.2),
    ("success", 2.5),
    ("successful", 2.6),
    ("boost", 1.7),
    ("innovative", 1.8),
    ("breakthrough", 2.3),
    ("approve", 1.8),
    ("approval", 1.8),
    ("dividend", 0.9),
    ("buyback", 1.0),
    ("expand", 1.3),
    ("expansion", 1.3),
    ("good", 1.9),
    ("great", 3.1),
    ("best", 3.2),
    ("excellent", 3.2),
    ("impressive", 2.5),
    ("top", 0.8),
    ("high", 0.6),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("miss", -1.7),
    ("loss", -1.9),
    ("lose", -1.9),
    ("decline", -1.6),
    ("drop", -1.4),
    ("fall", -1.5),
    ("plunge", -2.2),
    ("tumble", -2.1),
    ("slump", -2.0),
    ("sink", -1.6),
    ("slide", -1.3),
    ("crash", -2.6),
    ("weak", -1.9),
    ("weakness", -1.8),
    ("downgrade", -1.9),
    ("underperform", -1.9),
    ("bearish", -2.3),
    ("pessimistic", -2.0),
    ("negative", -2.1),
    ("concern", -1.4),
    ("worry", -1.9),
    ("fear", -2.2),
    ("risk", -1.1),
    ("uncertainty", -1.4),
    ("volatile", -1.0),
    ("warn", -1.7),
    ("warning", -1.7),
    ("lawsuit", -1.8),
    ("sue", -1.7),
    ("probe", -1.2),
    ("investigation", -1.3),
    ("recall", -1.4),
    ("layoff", -1.9),
    ("cut", -1.1),
    ("delay", -1.3),
    ("fine", -0.8),
    ("penalty", -1.6),
    ("fraud", -3.0),
    ("scandal", -2.6),
    ("bankrupt", -3.0),
    ("bankruptcy", -3.0),
    ("crisis", -2.7),
    ("fail", -2.3),
    ("failure", -2.5),
    ("bad", -2.5),
    ("worst", -3.1),
    ("low", -1.1),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nothing", "cannot", "cant", "can't", "don't",
    "dont", "doesn't", "doesnt", "didn't", "didnt", "won't", "wont", "isn't", "isnt", "aren't",
    "arent", "wasn't", "wasnt", "weren't", "werent", "without", "hardly", "barely",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.6),
    ("highly", 1.3),
    ("sharply", 1.4),
    ("significantly", 1.3),
    ("dramatically", 1.5),
    ("massive", 1.4),
    ("huge", 1.3),
    ("slightly", 0.7),
    ("somewhat", 0.8),
    ("marginally", 0.6),
];

// Tried in order when the exact token is not in the table.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ing", ""),
    ("ing", "e"),
    ("ied", "y"),
    ("ed", ""),
    ("ed", "e"),
    ("ies", "y"),
    ("es", ""),
    ("s", ""),
];

#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    /// Finance-news vocabulary.
    pub fn new() -> Self {
        let valences = POSITIVE
            .iter()
            .chain(NEGATIVE.iter())
            .map(|&(w, v)| (w.to_string(), v))
            .collect();
        let intensifiers = INTENSIFIERS
            .iter()
            .map(|&(w, m)| (w.to_string(), m))
            .collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();

        Self {
            valences,
            intensifiers,
            negations,
        }
    }

    pub fn add_word(&mut self, word: &str, valence: f64) {
        self.valences.insert(word.to_lowercase(), valence);
    }

    /// Finance vocabulary plus the given entries, which win on conflict.
    pub fn with_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        let mut lexicon = Self::new();
        for (word, &valence) in words {
            lexicon.add_word(word, valence);
        }
        lexicon
    }

    /// Valence of a lowercase token, falling back to common inflections.
    pub fn valence(&self, token: &str) -> Option<f64> {
        if let Some(&v) = self.valences.get(token) {
            return Some(v);
        }
        SUFFIX_RULES.iter().find_map(|&(suffix, replacement)| {
            let stem = token.strip_suffix(suffix)?;
            if stem.len() < 2 {
                return None;
            }
            self.valences.get(&format!("{}{}", stem, replacement)).copied()
        })
    }

    pub fn intensifier(&self, token: &str) -> Option<f64> {
        self.intensifiers.get(token).copied()
    }

    pub fn is_negation(&self, token: &str) -> bool {
        self.negations.iter().any(|n| n == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflected_forms_resolve_to_base_word() {
        let lexicon = Lexicon::new();
        assert_eq!(lexicon.valence("beats"), Some(1.9));
        assert_eq!(lexicon.valence("profits"), Some(1.9));
        assert_eq!(lexicon.valence("surges"), Some(2.2));
        assert_eq!(lexicon.valence("plunged"), Some(-2.2));
        assert_eq!(lexicon.valence("soaring"), Some(2.4));
        assert_eq!(lexicon.valence("worries"), Some(-1.9));
    }

    #[test]
    fn unknown_and_neutral_words_have_no_valence() {
        let lexicon = Lexicon::new();
        assert_eq!(lexicon.valence("company"), None);
        assert_eq!(lexicon.valence("announced"), None);
        assert_eq!(lexicon.valence("s"), None);
    }

    #[test]
    fn custom_words_are_lowercased() {
        let mut lexicon = Lexicon::new();
        lexicon.add_word("Moonshot", 2.0);
        assert_eq!(lexicon.valence("moonshot"), Some(2.0));
    }

    #[test]
    fn configured_words_override_builtins() {
        let words: HashMap<String, f64> = [("beat".to_string(), 0.5), ("Rally".to_string(), 1.2)]
            .into_iter()
            .collect();
        let lexicon = Lexicon::with_words(&words);
        assert_eq!(lexicon.valence("beats"), Some(0.5));
        assert_eq!(lexicon.valence("rallied"), Some(1.2));
        assert_eq!(lexicon.valence("plunge"), Some(-2.2));
    }
}
