//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
use once_cell::sync::Lazy;
use pgrx::prelude::*;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Unicode word runs of `input`, in order.
pub fn tokenize(input: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(input).map(|m| m.as_str())
}

#[pg_extern(immutable, parallel_safe)]
fn kaz_tokenize<'a>(input: &'a str) -> SetOfIterator<'a, &'a str> {
    SetOfIterator::new(tokenize(input))
}


#[cfg(any(test, feature = "pg_test"))]
#[pg_schema]
mod tests {
    use pgrx::prelude::*;

    #[pg_test]
    fn test_kaz_tokenize() -> Result<(), pgrx::spi::Error> {
        let words = Spi::get_one::<Vec<String>>(
            "SELECT array_agg(t) FROM kaz_tokenize('Сөздеріміз, сөзіңіз!') t",
        )?;
        assert_eq!(words, Some(vec!["Сөздеріміз".to_string(), "сөзіңіз".to_string()]));
        Ok(())
    }
}
