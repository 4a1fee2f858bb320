//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
//! Kazakh inflectional suffix tables.
use once_cell::sync::Lazy;
use std::cmp::Reverse;

const PLURAL: &[&str] = &["лар", "лер", "дар", "дер", "тар", "тер"];

const POSSESSIVE: &[&str] = &[
    "ымыз", "іміз", "ыңыз", "іңіз", "лары", "лері", "дары", "дері", "тары", "тері", "сы", "сі",
    "ым", "ім", "ың", "ің", "м", "ң", "ы", "і",
];

// no bare "н": it strips too much
const CASE: &[&str] = &[
    "дағы", "дегі", "тағы", "тегі", "дан", "ден", "тан", "тен", "нан", "нен", "ның", "нің", "дың",
    "дің", "тың", "тің", "нда", "нде", "мен", "бен", "пен", "ға", "ге", "қа", "ке", "на", "не",
    "да", "де", "та", "те", "ны", "ні", "ды", "ді", "ты", "ті", "а", "е",
];

const PREDICATE: &[&str] = &[
    "сыңдар", "сіңдер", "сыздар", "сіздер", "мын", "мін", "пын", "пін", "сың", "сің", "сыз", "сіз",
    "мыз", "міз", "пыз", "піз",
];

const VOWELS: &str = "аәеёиіоуыөүұ";
pub(crate) const BACK_VOWELS: &str = "аоұы";
pub(crate) const FRONT_VOWELS: &str = "әеөүі";

/// Words that are returned as-is.
pub const DEFAULT_EXCEPTIONS: &[&str] = &["абай", "алматы", "туралы", "және"];

/// A morphological layer, in the order layers are peeled off a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuffixGroup {
    Predicate,
    Case,
    Possessive,
    Plural,
}

impl SuffixGroup {
    pub const ALL: [SuffixGroup; 4] =
        [SuffixGroup::Predicate, SuffixGroup::Case, SuffixGroup::Possessive, SuffixGroup::Plural];

    pub fn tag(self) -> &'static str {
        match self {
            SuffixGroup::Predicate => "PRED",
            SuffixGroup::Case => "CASE",
            SuffixGroup::Possessive => "POSS",
            SuffixGroup::Plural => "PLUR",
        }
    }

    /// Suffixes of this group, longest first.
    pub fn suffixes(self) -> &'static [&'static str] {
        match self {
            SuffixGroup::Predicate => &PREDICATE_BY_LENGTH,
            SuffixGroup::Case => &CASE_BY_LENGTH,
            SuffixGroup::Possessive => &POSSESSIVE_BY_LENGTH,
            SuffixGroup::Plural => &PLURAL_BY_LENGTH,
        }
    }
}

static PREDICATE_BY_LENGTH: Lazy<Vec<&'static str>> = Lazy::new(|| longest_first(PREDICATE));
static CASE_BY_LENGTH: Lazy<Vec<&'static str>> = Lazy::new(|| longest_first(CASE));
static POSSESSIVE_BY_LENGTH: Lazy<Vec<&'static str>> = Lazy::new(|| longest_first(POSSESSIVE));
static PLURAL_BY_LENGTH: Lazy<Vec<&'static str>> = Lazy::new(|| longest_first(PLURAL));

// stable, so equal lengths keep table order
fn longest_first(table: &[&'static str]) -> Vec<&'static str> {
    let mut sorted = table.to_vec();
    sorted.sort_by_key(|suffix| Reverse(suffix.chars().count()));
    sorted
}

#[inline]
pub fn is_vowel(ch: char) -> bool {
    VOWELS.contains(ch)
}

/// The voiceless consonant a voiced stem-final consonant came from, if any.
pub fn unvoiced(ch: char) -> Option<char> {
    match ch {
        'б' => Some('п'),
        'г' => Some('к'),
        'ғ' => Some('қ'),
        'д' => Some('т'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_longest_first() {
        for group in SuffixGroup::ALL {
            let lengths: Vec<usize> = group.suffixes().iter().map(|s| s.chars().count()).collect();
            assert!(lengths.windows(2).all(|w| w[0] >= w[1]), "{} is not sorted", group.tag());
        }
    }

    #[test]
    fn equal_lengths_keep_table_order() {
        let case = SuffixGroup::Case.suffixes();
        let da = case.iter().position(|s| *s == "да").unwrap();
        let de = case.iter().position(|s| *s == "де").unwrap();
        assert!(da < de);
        assert_eq!(case[0], "дағы");
    }

    #[test]
    fn vowels_and_mutation() {
        assert!(is_vowel('ы'));
        assert!(is_vowel('ә'));
        assert!(!is_vowel('н'));
        assert_eq!(unvoiced('б'), Some('п'));
        assert_eq!(unvoiced('ғ'), Some('қ'));
        assert_eq!(unvoiced('с'), None);
    }
}
