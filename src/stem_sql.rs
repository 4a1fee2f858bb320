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

use pgrx::prelude::*;

use crate::lexicon::stored_lemmas;
use crate::stemmer::{default_exceptions, StemOptions, Stemmed, Stemmer};
use crate::tokenize::tokenize;
use crate::Error;

fn lemma_set(lemmas: Vec<Option<String>>) -> HashSet<String> {
    crate::stemmer::lemma_set(lemmas.into_iter().flatten())
}

fn report(stemmed: Stemmed) -> String {
    for line in &stemmed.trace {
        debug1!("kaz_stem: {}", line);
    }
    stemmed.stem
}

/// Stem `word` against the lemmas in `kaz_stem_lemmas`.
///
/// The whole table is read on every call, so `SELECT kaz_stem(w) FROM words` costs one lexicon
/// scan per row.  For bulk work prefer `kaz_stem_words`, which reads it once per call, or pass
/// the lemmas to `kaz_stem_with`.
#[pg_extern(stable, parallel_safe)]
fn kaz_stem(word: &str) -> Result<String, Error> {
    let lemmas = stored_lemmas()?;
    let exceptions = default_exceptions();
    let stemmer = Stemmer::new(&lemmas, &exceptions, StemOptions::from_gucs());
    Ok(report(stemmer.stem(word)))
}

/// Stem `word` against the given lemmas.  NULL elements are ignored.
#[pg_extern(stable, parallel_safe)]
fn kaz_stem_with(word: &str, lemmas: Vec<Option<String>>) -> String {
    let lemmas = lemma_set(lemmas);
    let exceptions = default_exceptions();
    let stemmer = Stemmer::new(&lemmas, &exceptions, StemOptions::from_gucs());
    report(stemmer.stem(word))
}

/// Every decision made while stemming `word`, ending with the result.
#[pg_extern(stable, parallel_safe)]
fn kaz_stem_explain(word: &str, lemmas: Vec<Option<String>>) -> SetOfIterator<'static, String> {
    let lemmas = lemma_set(lemmas);
    let exceptions = default_exceptions();
    let options = StemOptions { trace: true, ..StemOptions::from_gucs() };
    let stemmed = Stemmer::new(&lemmas, &exceptions, options).stem(word);
    SetOfIterator::new(stemmed.trace)
}

#[pg_extern(stable, parallel_safe)]
fn kaz_stem_words(
    input: &str,
) -> Result<TableIterator<'static, (name!(token, String), name!(stem, String))>, Error> {
    let lemmas = stored_lemmas()?;
    let exceptions = default_exceptions();
    let stemmer = Stemmer::new(&lemmas, &exceptions, StemOptions::from_gucs());
    let rows: Vec<(String, String)> =
        tokenize(input).map(|token| (token.to_owned(), report(stemmer.stem(token)))).collect();
    Ok(TableIterator::new(rows))
}

#[cfg(any(test, feature = "pg_test"))]
#[pg_schema]
mod tests {
    use crate::proptest::PgTestRunner;
    use pgrx::prelude::*;
    use proptest::prelude::*;

    fn seed_lemmas() {
        Spi::run(
            "INSERT INTO kaz_stem_lemmas VALUES ('алма'), ('сөз'), ('мектеп'), ('ауыз')
             ON CONFLICT DO NOTHING",
        )
        .expect("SPI failed");
    }

    #[pg_test]
    fn test_kaz_stem_reads_lemma_table() -> Result<(), pgrx::spi::Error> {
        seed_lemmas();
        let stem = |word: &str| Spi::get_one::<String>(&format!("SELECT kaz_stem('{word}')"));
        assert_eq!(stem("Мектептің")?.as_deref(), Some("мектеп"));
        assert_eq!(stem("аузы")?.as_deref(), Some("ауыз"));
        assert_eq!(stem("кітаптар")?.as_deref(), Some("кітаптар"));
        Ok(())
    }

    #[pg_test]
    fn test_kaz_stem_with() -> Result<(), pgrx::spi::Error> {
        let stem = Spi::get_one::<String>(
            "SELECT kaz_stem_with('алмаларымыздан', ARRAY['Алма', NULL])",
        )?;
        assert_eq!(stem.as_deref(), Some("алма"));
        Ok(())
    }

    #[pg_test]
    fn test_kaz_stem_with_ignores_blank_lemmas() -> Result<(), pgrx::spi::Error> {
        let stems = Spi::get_one::<Vec<String>>(
            "SELECT array_agg(kaz_stem_with(w, ARRAY['', '  ', 'алма']) ORDER BY n)
             FROM unnest(ARRAY['ы', 'мен', 'алмалар']) WITH ORDINALITY AS t(w, n)",
        )?;
        assert_eq!(
            stems,
            Some(vec!["ы".to_string(), "мен".to_string(), "алма".to_string()])
        );
        Ok(())
    }

    #[pg_test]
    fn test_kaz_stem_ignores_blank_rows() -> Result<(), pgrx::spi::Error> {
        Spi::run("INSERT INTO kaz_stem_lemmas VALUES (''), ('алма') ON CONFLICT DO NOTHING")?;
        let stem = Spi::get_one::<String>("SELECT kaz_stem('ы')")?;
        assert_eq!(stem.as_deref(), Some("ы"));
        Ok(())
    }

    #[pg_test]
    fn test_kaz_stem_composes_decomposed_input() -> Result<(), pgrx::spi::Error> {
        let stem = Spi::get_one::<String>(
            "SELECT kaz_stem_with(U&'\\04AF\\0438\\0306\\043B\\0435\\0440', ARRAY['үй'])",
        )?;
        assert_eq!(stem.as_deref(), Some("үй"));
        Ok(())
    }

    #[pg_test]
    fn test_kaz_stem_sees_lemmas_added_in_the_same_transaction() -> Result<(), pgrx::spi::Error> {
        Spi::run("DELETE FROM kaz_stem_lemmas")?;
        assert_eq!(Spi::get_one::<String>("SELECT kaz_stem('сөздер')")?.as_deref(), Some("сөздер"));
        Spi::run("INSERT INTO kaz_stem_lemmas VALUES ('сөз')")?;
        assert_eq!(Spi::get_one::<String>("SELECT kaz_stem('сөздер')")?.as_deref(), Some("сөз"));
        Ok(())
    }

    #[pg_test]
    fn test_kaz_stem_honors_max_depth() -> Result<(), pgrx::spi::Error> {
        Spi::run("SET kaz_stem.max_depth = 0")?;
        let stem = Spi::get_one::<String>("SELECT kaz_stem_with('алмалар', ARRAY['алма'])")?;
        assert_eq!(stem.as_deref(), Some("алмалар"));
        Ok(())
    }

    #[pg_test]
    fn test_kaz_stem_with_trace_on() -> Result<(), pgrx::spi::Error> {
        Spi::run("SET kaz_stem.trace = on")?;
        let stem = Spi::get_one::<String>("SELECT kaz_stem_with('сөздер', ARRAY['сөз'])")?;
        assert_eq!(stem.as_deref(), Some("сөз"));
        Ok(())
    }

    #[pg_test]
    fn test_kaz_stem_explain() -> Result<(), pgrx::spi::Error> {
        let lines = Spi::get_one::<Vec<String>>(
            "SELECT array_agg(line) FROM kaz_stem_explain('аузы', ARRAY['ауыз']) line",
        )?
        .expect("explain returned no rows");
        assert!(lines.first().unwrap().starts_with("WORD 'аузы'"));
        assert!(lines.iter().any(|line| line.contains("ELIDE 'ауз' -> 'ауыз' (restored)")));
        assert_eq!(lines.last().unwrap(), "RESULT 'аузы' -> 'ауыз'");
        Ok(())
    }

    #[pg_test]
    fn test_kaz_stem_words() -> Result<(), pgrx::spi::Error> {
        seed_lemmas();
        let stems = Spi::get_one::<Vec<String>>(
            "SELECT array_agg(token || '=' || stem) FROM kaz_stem_words('Алмаларымыз мен сөздеріңіз.')",
        )?;
        assert_eq!(
            stems,
            Some(vec![
                "Алмаларымыз=алма".to_string(),
                "мен=мен".to_string(),
                "сөздеріңіз=сөз".to_string(),
            ])
        );
        Ok(())
    }

    #[pg_test]
    fn test_kaz_stem_with_empty_table() -> Result<(), pgrx::spi::Error> {
        Spi::run("DELETE FROM kaz_stem_lemmas")?;
        let stem = Spi::get_one::<String>("SELECT kaz_stem('Алмалар')")?;
        assert_eq!(stem.as_deref(), Some("алмалар"));
        Ok(())
    }

    #[pg_test]
    fn proptest_kaz_stem_with_never_returns_empty() {
        let mut proptest = PgTestRunner::default();
        let strat = "[а-яәіңғүұқө]{1,12}";
        proptest
            .run(&strat, |word| {
                let stem = Spi::get_one::<String>(&format!(
                    "SELECT kaz_stem_with('{word}', ARRAY['алма', 'сөз'])"
                ))
                .map_err(|e| TestCaseError::fail(e.to_string()))?
                .unwrap_or_default();
                prop_assert!(!stem.is_empty());
                Ok(())
            })
            .unwrap();
    }
}
