//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
use super::suffixes::{is_vowel, unvoiced, BACK_VOWELS, FRONT_VOWELS};
use super::{Stemmer, Trace};

/// How a candidate base was matched to a lemma.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    Direct,
    /// Final consonant was voiced before a vowel-initial suffix (`кітабы` -> `кітап`).
    Mutated,
    /// A stem vowel dropped before a vowel-initial suffix (`аузы` -> `ауыз`).
    Elided,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Direct => "direct",
            Reason::Mutated => "mutated",
            Reason::Elided => "elided",
        }
    }
}

impl Stemmer<'_> {
    pub(crate) fn check_stem(&self, stem: &str, trace: &mut Trace) -> Option<(String, Reason)> {
        if stem.is_empty() {
            return None;
        }

        if self.lemmas.contains(stem) {
            trace.note(|| format!("  CHECK '{stem}' is a direct lemma"));
            return Some((stem.to_owned(), Reason::Direct));
        }

        if let Some((head, last)) = split_last(stem) {
            if let Some(voiceless) = unvoiced(last) {
                let mutated = format!("{head}{voiceless}");
                if self.lemmas.contains(&mutated) {
                    trace.note(|| format!("  CHECK '{stem}' -> '{mutated}' via mutation"));
                    return Some((mutated, Reason::Mutated));
                }
            }
        }

        if let Some(restored) = self.restore_elided_vowel(stem, trace) {
            return Some((restored, Reason::Elided));
        }

        trace.note(|| format!("  CHECK '{stem}' not a lemma (no mutation/elision)"));
        None
    }

    /// Put back the high vowel Kazakh drops from the last syllable, e.g. `ауз` -> `ауыз`.
    ///
    /// The vowel's backness follows the nearest preceding vowel.
    fn restore_elided_vowel(&self, stem: &str, trace: &mut Trace) -> Option<String> {
        if stem.chars().count() < 2 {
            return None;
        }

        let harmony =
            stem.chars().rev().find(|ch| BACK_VOWELS.contains(*ch) || FRONT_VOWELS.contains(*ch))?;
        let inserted = if BACK_VOWELS.contains(harmony) { 'ы' } else { 'і' };

        let (head, last) = split_last(stem)?;
        let restored = format!("{head}{inserted}{last}");
        if self.lemmas.contains(&restored) {
            trace.note(|| format!("  ELIDE '{stem}' -> '{restored}' (restored)"));
            Some(restored)
        } else {
            trace.note(|| {
                format!("  ELIDE '{stem}' -> '{restored}', but restored form not in lemmas")
            });
            None
        }
    }
}

/// Guards against case suffixes that would split a word in the wrong place.
///
/// Accusative `-ны`/`-ні` only follows a vowel; bare dative `-а`/`-е` only follows a
/// possessive ending.
pub(crate) fn can_use_case_suffix(word: &str, suffix: &str, trace: &mut Trace) -> bool {
    match suffix {
        "ны" | "ні" => {
            let Some(base) = word.strip_suffix(suffix) else { return false };
            match base.chars().last() {
                None => {
                    trace.note(|| format!("  BLOCK '{suffix}' on '{word}' (too short for check)"));
                    false
                }
                Some(before) if !is_vowel(before) => {
                    trace.note(|| {
                        format!("  BLOCK '{suffix}' on '{word}' (preceding '{before}' not a vowel)")
                    });
                    false
                }
                Some(_) => true,
            }
        }
        "а" | "е" => {
            let base = word.strip_suffix(suffix).unwrap_or(word);
            let ok = ["ы", "і", "сы", "сі"].iter().any(|tail| base.ends_with(tail));
            if !ok {
                trace.note(|| format!("  BLOCK '{suffix}' on '{word}' (no possessive tail)"));
            }
            ok
        }
        _ => true,
    }
}

fn split_last(s: &str) -> Option<(&str, char)> {
    let last = s.chars().last()?;
    Some((&s[..s.len() - last.len_utf8()], last))
}
