//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
use std::collections::HashSet;

use super::morphology::can_use_case_suffix;
use super::suffixes::{is_vowel, SuffixGroup};
use super::{Stemmer, Trace};

impl Stemmer<'_> {
    /// Every suffix `word` ends with, in the order the search should try them.
    ///
    /// With `safeguard` set, a single-vowel suffix is not offered when `word` is already a
    /// lemma and dropping the vowel leads nowhere, so lemmas like `алма` stay intact.
    pub(crate) fn matching_suffixes(
        &self,
        word: &str,
        safeguard: bool,
        trace: &mut Trace,
    ) -> Vec<(SuffixGroup, &'static str)> {
        let mut matches = Vec::new();
        for group in SuffixGroup::ALL {
            for &suffix in group.suffixes() {
                let Some(base) = word.strip_suffix(suffix) else { continue };

                if group == SuffixGroup::Case && !can_use_case_suffix(word, suffix, trace) {
                    continue;
                }

                if safeguard
                    && is_single_vowel(suffix)
                    && self.lemmas.contains(word)
                    && self.check_stem(base, trace).is_none()
                {
                    trace.note(|| {
                        format!(
                            "  SAFE skip single-vowel '{suffix}' on '{word}': \
                             word is a lemma and stripping would not reach one"
                        )
                    });
                    continue;
                }

                trace.note(|| {
                    format!("  MATCH {} suffix '{suffix}' matches '{word}'", group.tag())
                });
                matches.push((group, suffix));
            }
        }
        matches
    }

    pub(crate) fn looks_inflected(&self, word: &str, trace: &mut Trace) -> bool {
        // no safeguard here, or forms like "аузы" would never be tried
        !self.matching_suffixes(word, false, trace).is_empty()
    }

    /// Depth-first search for a lemma, stripping one suffix per level.
    pub(crate) fn search(
        &self,
        word: &str,
        depth: u32,
        seen: &mut HashSet<String>,
        trace: &mut Trace,
    ) -> Option<String> {
        trace.note(|| format!("[DEPTH {depth}] ENTER '{word}'"));
        if let Some((hit, reason)) = self.check_stem(word, trace) {
            trace.note(|| format!("[DEPTH {depth}] HIT '{hit}' ({})", reason.as_str()));
            return Some(hit);
        }

        if depth == 0 || !seen.insert(word.to_owned()) {
            trace.note(|| format!("[DEPTH {depth}] STOP on '{word}' (depth/seen)"));
            return None;
        }

        for (group, suffix) in self.matching_suffixes(word, true, trace) {
            let base = &word[..word.len() - suffix.len()];
            trace.note(|| {
                let tag = group.tag();
                format!("[DEPTH {depth}] try {tag} suffix '{suffix}': '{word}' -> '{base}'")
            });

            if let Some((hit, reason)) = self.check_stem(base, trace) {
                trace.note(|| {
                    format!("[DEPTH {depth}] HIT after '{suffix}': '{hit}' ({})", reason.as_str())
                });
                return Some(hit);
            }

            if let Some(found) = self.search(base, depth - 1, seen, trace) {
                trace.note(|| {
                    format!("[DEPTH {depth}] backtrack success via '{suffix}': '{found}'")
                });
                return Some(found);
            }
        }

        trace.note(|| format!("[DEPTH {depth}] no suffix led to a lemma for '{word}'"));
        None
    }
}

fn is_single_vowel(suffix: &str) -> bool {
    let mut chars = suffix.chars();
    matches!((chars.next(), chars.next()), (Some(ch), None) if is_vowel(ch))
}
