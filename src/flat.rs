//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
//! Greedy longest-ending stripper, the dictionary-light alternative to [`crate::stemmer`].
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

use pgrx::prelude::*;
use serde_json::Value;

use crate::stemmer::{lemma_set, normalize};
use crate::Error;

/// Words never get shorter than this.
const MIN_STEM_CHARS: usize = 2;

/// Trim, drop blanks and duplicates, and order longest first.
pub fn prepare_endings<I, S>(endings: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let unique: BTreeSet<String> = endings
        .into_iter()
        .map(|ending| ending.as_ref().trim().to_owned())
        .filter(|ending| !ending.is_empty())
        .collect();
    let mut sorted: Vec<String> = unique.into_iter().collect();
    sorted.sort_by_key(|ending| Reverse(ending.chars().count()));
    sorted
}

/// Collect endings from either `{"group": ["...", ...], ...}` or `["...", ...]`.
///
/// Non-string entries, and values of an object that are not arrays, are ignored.
pub fn endings_from_json(doc: &Value) -> Result<Vec<String>, Error> {
    let strings = |values: &Vec<Value>| -> Vec<String> {
        values.iter().filter_map(Value::as_str).map(str::to_owned).collect()
    };

    let endings = match doc {
        Value::Object(groups) => {
            groups.values().filter_map(Value::as_array).flat_map(strings).collect::<Vec<_>>()
        }
        Value::Array(values) => strings(values),
        Value::Null => return Err(Error::InvalidEndings("null")),
        Value::Bool(_) => return Err(Error::InvalidEndings("a boolean")),
        Value::Number(_) => return Err(Error::InvalidEndings("a number")),
        Value::String(_) => return Err(Error::InvalidEndings("a string")),
    };
    Ok(prepare_endings(endings))
}

/// Strip the longest matching ending until a lemma appears or nothing more comes off.
///
/// `endings` must already be in [`prepare_endings`] order.
pub fn flat_stem(word: &str, endings: &[String], lemmas: &HashSet<String>) -> String {
    let mut w = normalize(word);

    'strip: while w.chars().count() > MIN_STEM_CHARS {
        for ending in endings {
            let Some(candidate) = w.strip_suffix(ending.as_str()) else { continue };
            if !candidate.is_empty() && lemmas.contains(candidate) {
                return candidate.to_owned();
            }
            if candidate.chars().count() >= MIN_STEM_CHARS {
                w = candidate.to_owned();
                continue 'strip;
            }
        }
        break;
    }

    w
}

#[pg_extern(immutable, parallel_safe)]
fn kaz_flat_stem(
    word: &str,
    endings: Vec<Option<String>>,
    lemmas: Vec<Option<String>>,
) -> String {
    let endings = prepare_endings(endings.into_iter().flatten());
    let lemmas = lemma_set(lemmas.into_iter().flatten());
    flat_stem(word, &endings, &lemmas)
}

#[pg_extern(immutable, parallel_safe)]
fn kaz_endings_from_json(doc: pgrx::Json) -> Result<Vec<String>, Error> {
    endings_from_json(&doc.0)
}


#[cfg(any(test, feature = "pg_test"))]
#[pg_schema]
mod tests {
    use pgrx::prelude::*;

    #[pg_test]
    fn test_kaz_flat_stem() -> Result<(), pgrx::spi::Error> {
        let stem = Spi::get_one::<String>(
            "SELECT kaz_flat_stem('Алмалардың', ARRAY['лар', 'дың', NULL], ARRAY['алма'])",
        )?;
        assert_eq!(stem.as_deref(), Some("алма"));
        Ok(())
    }

    #[pg_test]
    fn test_kaz_flat_stem_ignores_blank_lemmas() -> Result<(), pgrx::spi::Error> {
        let stem =
            Spi::get_one::<String>("SELECT kaz_flat_stem('лар', ARRAY['лар'], ARRAY['', 'алма'])")?;
        assert_eq!(stem.as_deref(), Some("лар"));
        Ok(())
    }

    #[pg_test]
    fn test_kaz_endings_from_json() -> Result<(), pgrx::spi::Error> {
        let endings = Spi::get_one::<Vec<String>>(
            r#"SELECT kaz_endings_from_json('{"plural": ["лар"], "case": ["ның", "ға"]}')"#,
        )?;
        assert_eq!(endings, Some(vec!["лар".to_string(), "ның".to_string(), "ға".to_string()]));
        Ok(())
    }

    #[pg_test(error = "endings document must be a JSON object of string arrays or a JSON array of strings, got a number")]
    fn test_kaz_endings_from_json_rejects_scalars() -> Result<(), pgrx::spi::Error> {
        Spi::get_one::<Vec<String>>("SELECT kaz_endings_from_json('42')").map(|_| ())
    }
}
