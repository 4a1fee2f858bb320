//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
//! A lemma-seeking stemmer for Kazakh (Cyrillic script).
//!
//! Inflectional suffixes are peeled off in layers (predicate, case, possessive, plural) and
//! every intermediate base is checked against a lemma set, allowing for final-consonant
//! voicing and a dropped stem vowel.  The search is depth-first and backtracks, so the first
//! path that lands on a known lemma wins.
//!
//! Nothing here touches Postgres; the SQL bindings live in `stem_sql`.
mod morphology;
mod search;
pub mod suffixes;

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

pub use morphology::Reason;
pub use suffixes::{SuffixGroup, DEFAULT_EXCEPTIONS};

/// What to do when the input word is itself a lemma.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EarlyReturnPolicy {
    /// Return it immediately.
    Always,
    /// Return it unless some suffix plausibly matches, in which case try stemming first.
    #[default]
    IfLooksUninflected,
    /// Always try stemming.
    Never,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StemOptions {
    /// How many suffixes may be stripped along one search path.
    pub max_depth: u32,
    pub policy: EarlyReturnPolicy,
    /// Record a line for every decision in [`Stemmed::trace`].
    pub trace: bool,
}

impl Default for StemOptions {
    fn default() -> Self {
        StemOptions { max_depth: 4, policy: EarlyReturnPolicy::default(), trace: false }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stemmed {
    pub stem: String,
    pub trace: Vec<String>,
}

/// Collects decision lines when tracing is on, and costs nothing when it is off.
pub(crate) struct Trace(Option<Vec<String>>);

impl Trace {
    fn new(enabled: bool) -> Self {
        Trace(enabled.then(Vec::new))
    }

    #[inline]
    pub(crate) fn note(&mut self, line: impl FnOnce() -> String) {
        if let Some(lines) = self.0.as_mut() {
            lines.push(line());
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.0.unwrap_or_default()
    }
}

pub struct Stemmer<'a> {
    lemmas: &'a HashSet<String>,
    exceptions: &'a HashSet<String>,
    options: StemOptions,
}

impl<'a> Stemmer<'a> {
    pub fn new(
        lemmas: &'a HashSet<String>,
        exceptions: &'a HashSet<String>,
        options: StemOptions,
    ) -> Self {
        Stemmer { lemmas, exceptions, options }
    }

    /// Reduce `word` to a lemma, or return it lowercased when no lemma is reachable.
    pub fn stem(&self, word: &str) -> Stemmed {
        let mut trace = Trace::new(self.options.trace);
        let stem = self.stem_traced(word, &mut trace);
        Stemmed { stem, trace: trace.into_lines() }
    }

    fn stem_traced(&self, word: &str, trace: &mut Trace) -> String {
        let w = normalize(word);
        trace.note(|| format!("WORD '{word}' -> normalized '{w}'"));

        if self.exceptions.contains(&w) {
            trace.note(|| format!("early return: '{w}' is an exception"));
            return w;
        }

        if self.lemmas.contains(&w) {
            match self.options.policy {
                EarlyReturnPolicy::Always => {
                    trace.note(|| "early return: word is a lemma (policy=Always)".into());
                    return w;
                }
                EarlyReturnPolicy::IfLooksUninflected => {
                    if !self.looks_inflected(&w, trace) {
                        trace.note(|| {
                            "early return: word is a lemma and does not look inflected".into()
                        });
                        return w;
                    }
                    trace.note(|| "word is a lemma but looks inflected; stemming anyway".into());
                }
                EarlyReturnPolicy::Never => {
                    trace.note(|| "word is a lemma; stemming anyway (policy=Never)".into());
                }
            }
        }

        let mut seen = HashSet::new();
        match self.search(&w, self.options.max_depth, &mut seen, trace) {
            Some(found) => {
                trace.note(|| format!("RESULT '{word}' -> '{found}'"));
                found
            }
            None => {
                trace.note(|| format!("RESULT '{word}' unchanged (no lemma found)"));
                w
            }
        }
    }
}

/// Lowercase and NFC-compose `word`, the form both input and lemmas are compared in.
pub fn normalize(word: &str) -> String {
    word.to_lowercase().nfc().collect()
}

/// Normalize each lemma, skipping NULL-like blanks.
pub fn lemma_set<I, S>(lemmas: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lemmas
        .into_iter()
        .map(|lemma| normalize(lemma.as_ref().trim()))
        .filter(|lemma| !lemma.is_empty())
        .collect()
}

/// The built-in exception set, owned.
pub fn default_exceptions() -> HashSet<String> {
    DEFAULT_EXCEPTIONS.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lemmas(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn stem_with(lemmas: &HashSet<String>, word: &str) -> String {
        let exceptions = default_exceptions();
        Stemmer::new(lemmas, &exceptions, StemOptions::default()).stem(word).stem
    }

    #[test]
    fn strips_case_and_possessive_layers() {
        let lemmas = lemmas(&["мектеп", "алма", "сөз"]);
        assert_eq!(stem_with(&lemmas, "мектептің"), "мектеп");
        assert_eq!(stem_with(&lemmas, "мектепке"), "мектеп");
        assert_eq!(stem_with(&lemmas, "алмаларымыздан"), "алма");
        assert_eq!(stem_with(&lemmas, "алмалар"), "алма");
        assert_eq!(stem_with(&lemmas, "сөздеріңізбен"), "сөз");
        assert_eq!(stem_with(&lemmas, "сөзіңізді"), "сөз");
    }

    #[test]
    fn strips_predicate_endings() {
        let lemmas = lemmas(&["алма", "сөз"]);
        assert_eq!(stem_with(&lemmas, "алмамын"), "алма");
        assert_eq!(stem_with(&lemmas, "алмасыңдар"), "алма");
        assert_eq!(stem_with(&lemmas, "сөзсіз"), "сөз");
    }

    #[test]
    fn restores_dropped_vowel() {
        let lemmas = lemmas(&["ауыз", "орын"]);
        assert_eq!(stem_with(&lemmas, "аузы"), "ауыз");
        assert_eq!(stem_with(&lemmas, "орны"), "орын");
    }

    #[test]
    fn lowercases_input() {
        let lemmas = lemmas(&["мектеп"]);
        assert_eq!(stem_with(&lemmas, "МЕКТЕПКЕ"), "мектеп");
    }

    #[test]
    fn exceptions_are_returned_as_is() {
        let lemmas = lemmas(&["алма"]);
        assert_eq!(stem_with(&lemmas, "Алматы"), "алматы");
        assert_eq!(stem_with(&lemmas, "туралы"), "туралы");
    }

    #[test]
    fn unknown_words_come_back_lowercased() {
        let lemmas = lemmas(&["алма"]);
        assert_eq!(stem_with(&lemmas, "Кітаптар"), "кітаптар");
        assert_eq!(stem_with(&HashSet::new(), "сөздер"), "сөздер");
    }

    #[test]
    fn lemma_that_does_not_look_inflected_returns_early() {
        let lemmas = lemmas(&["сөз"]);
        let exceptions = HashSet::new();
        let options = StemOptions { trace: true, ..StemOptions::default() };
        let stemmed = Stemmer::new(&lemmas, &exceptions, options).stem("сөз");
        assert_eq!(stemmed.stem, "сөз");
        assert!(stemmed.trace.iter().any(|l| l.starts_with("early return")));
    }

    #[test]
    fn policy_never_still_keeps_a_lemma() {
        let lemmas = lemmas(&["алма"]);
        let exceptions = HashSet::new();
        let options = StemOptions { policy: EarlyReturnPolicy::Never, ..StemOptions::default() };
        assert_eq!(Stemmer::new(&lemmas, &exceptions, options).stem("алма").stem, "алма");
    }

    #[test]
    fn policy_always_skips_inflection_check() {
        // "алмасы" is both a listed lemma and possessive of "алма"
        let lemmas = lemmas(&["алма", "алмасы"]);
        let exceptions = HashSet::new();
        let always = StemOptions { policy: EarlyReturnPolicy::Always, ..StemOptions::default() };
        let never = StemOptions { policy: EarlyReturnPolicy::Never, ..StemOptions::default() };
        assert_eq!(Stemmer::new(&lemmas, &exceptions, always).stem("алмасы").stem, "алмасы");
        assert_eq!(Stemmer::new(&lemmas, &exceptions, never).stem("алмасы").stem, "алмасы");

        let lemmas = self::lemmas(&["алма"]);
        assert_eq!(Stemmer::new(&lemmas, &exceptions, never).stem("алмасы").stem, "алма");
    }

    #[test]
    fn zero_depth_only_checks_the_word() {
        let lemmas = lemmas(&["алма"]);
        let exceptions = HashSet::new();
        let options = StemOptions { max_depth: 0, ..StemOptions::default() };
        assert_eq!(Stemmer::new(&lemmas, &exceptions, options).stem("алмалар").stem, "алмалар");
    }

    #[test]
    fn trace_is_empty_unless_enabled() {
        let lemmas = lemmas(&["алма"]);
        let exceptions = HashSet::new();
        let quiet = Stemmer::new(&lemmas, &exceptions, StemOptions::default()).stem("алмалар");
        assert!(quiet.trace.is_empty());

        let options = StemOptions { trace: true, ..StemOptions::default() };
        let loud = Stemmer::new(&lemmas, &exceptions, options).stem("алмалар");
        assert_eq!(loud.stem, quiet.stem);
        assert!(loud.trace.first().unwrap().starts_with("WORD"));
        assert!(loud.trace.last().unwrap().starts_with("RESULT"));
    }

    #[test]
    fn blank_lemmas_are_dropped() {
        let lemmas = lemma_set(["", "  ", " Алма "]);
        assert_eq!(lemmas, self::lemmas(&["алма"]));
    }

    #[test]
    fn empty_lemma_never_becomes_the_stem() {
        let mut lemmas = lemmas(&["алма"]);
        lemmas.insert(String::new());
        for word in ["ы", "мен", "лар", "алмалар"] {
            assert!(!stem_with(&lemmas, word).is_empty(), "{word} stemmed to nothing");
        }
        assert_eq!(stem_with(&lemmas, "алмалар"), "алма");
    }

    #[test]
    fn decomposed_input_matches_composed_lemma() {
        // "й" spelled as "и" + combining breve
        let lemmas = lemma_set(["үй"]);
        assert_eq!(stem_with(&lemmas, "ҮИ\u{306}лер"), "үй");
        assert_eq!(normalize("И\u{306}"), "й");
    }

    #[test]
    fn decomposed_lemmas_are_composed() {
        let lemmas = lemma_set(["үи\u{306}"]);
        assert!(lemmas.contains("үй"));
        assert_eq!(stem_with(&lemmas, "үйлер"), "үй");
    }

    proptest! {
        #[test]
        fn never_empty_and_deterministic(word in "[а-яәіңғүұқөһ]{1,12}") {
            let mut lemmas = lemmas(&["алма", "сөз", "мектеп", "ауыз"]);
            lemmas.insert(String::new());
            let first = stem_with(&lemmas, &word);
            prop_assert!(!first.is_empty());
            prop_assert_eq!(first, stem_with(&lemmas, &word));
        }
    }
}
