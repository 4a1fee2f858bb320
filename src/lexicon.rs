//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
//! Lemma storage, and extraction of lemmas from Apertium `.lexc` sources.
use std::collections::{BTreeSet, HashSet};

use pgrx::prelude::*;

extension_sql!(
    r#"
CREATE TABLE kaz_stem_lemmas (
    lemma text PRIMARY KEY
);
COMMENT ON TABLE kaz_stem_lemmas IS 'dictionary base forms kaz_stem() searches for';
"#,
    name = "create_kaz_stem_lemmas",
);

/// Stems listed in the named `LEXICON` sections of a `.lexc` document.
///
/// An entry is the text before the first `:` of a line, so `алма:алма N1 ;` yields `алма`.
pub fn parse_lexc<'a>(source: &'a str, lexicons: &HashSet<&str>) -> BTreeSet<&'a str> {
    let mut lemmas = BTreeSet::new();
    let mut current: Option<&str> = None;

    for line in source.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with("LEXICON") {
            current = line.split_whitespace().nth(1);
            continue;
        }

        if current.is_some_and(|name| lexicons.contains(name)) {
            if let Some((stem, _)) = line.split_once(':') {
                let stem = stem.trim();
                if !stem.is_empty() {
                    lemmas.insert(stem);
                }
            }
        }
    }

    lemmas
}

/// Load every lemma from `kaz_stem_lemmas`, normalized and without blanks.
///
/// Not cached: rows written earlier in the same transaction are visible.
pub(crate) fn stored_lemmas() -> Result<HashSet<String>, pgrx::spi::Error> {
    let lemmas = Spi::get_one::<Vec<String>>("SELECT array_agg(lemma) FROM kaz_stem_lemmas")?;
    Ok(crate::stemmer::lemma_set(lemmas.unwrap_or_default()))
}

#[pg_extern(immutable, parallel_safe)]
fn kaz_lexc_lemmas(lexc: &str, lexicons: Vec<Option<String>>) -> SetOfIterator<'static, String> {
    let lexicons: Vec<String> = lexicons.into_iter().flatten().collect();
    let wanted: HashSet<&str> = lexicons.iter().map(String::as_str).collect();
    let lemmas: Vec<String> = parse_lexc(lexc, &wanted).into_iter().map(str::to_owned).collect();
    SetOfIterator::new(lemmas)
}


#[cfg(any(test, feature = "pg_test"))]
#[pg_schema]
mod tests {
    use pgrx::prelude::*;

    #[pg_test]
    fn test_kaz_lexc_lemmas() -> Result<(), pgrx::spi::Error> {
        let lemmas = Spi::get_one::<Vec<String>>(
            "SELECT array_agg(l ORDER BY l) FROM kaz_lexc_lemmas(
                E'LEXICON Common\\nсөз:сөз N1 ;\\nалма:алма N1 ;\\nLEXICON Other\\nүй:үй N1 ;',
                ARRAY['Common']
            ) l",
        )?;
        assert_eq!(lemmas, Some(vec!["алма".to_string(), "сөз".to_string()]));
        Ok(())
    }

    #[pg_test]
    fn test_stored_lemmas() -> Result<(), pgrx::spi::Error> {
        Spi::run("INSERT INTO kaz_stem_lemmas VALUES ('Алма'), ('сөз') ON CONFLICT DO NOTHING")?;
        let lemmas = crate::lexicon::stored_lemmas()?;
        assert!(lemmas.contains("алма"));
        assert!(lemmas.contains("сөз"));
        Ok(())
    }

    #[pg_test]
    fn test_stored_lemmas_empty_table() -> Result<(), pgrx::spi::Error> {
        Spi::run("DELETE FROM kaz_stem_lemmas")?;
        assert!(crate::lexicon::stored_lemmas()?.is_empty());
        Ok(())
    }
}
