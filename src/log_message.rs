//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
use pgrx::prelude::*;

/// Label every `pg_log_message` record starts with.
pub(crate) const LOG_LABEL: &str = "pg_log_message";

pub(crate) fn log_line(message: &str) -> String {
    format!("{LOG_LABEL}: {message}")
}

/// Write `message` to the server log at `INFO`.
///
/// The argument is borrowed straight out of the text datum, so there is nothing to
/// release once the record has been emitted.  `STRICT` keeps NULLs from ever reaching us.
#[pg_extern]
fn pg_log_message(message: &str) {
    info!("{}", log_line(message));
}

#[cfg(test)]
mod unit_tests {
    use super::log_line;

    #[test]
    fn formats_hello() {
        assert_eq!(log_line("hello"), "pg_log_message: hello");
    }

    #[test]
    fn keeps_prefix_for_empty_message() {
        assert_eq!(log_line(""), "pg_log_message: ");
    }

    #[test]
    fn does_not_escape_or_truncate() {
        let message = "  100% 'quoted' \\ {braces} алма\t".repeat(64);
        let line = log_line(&message);
        assert_eq!(line.strip_prefix("pg_log_message: "), Some(message.as_str()));
    }
}

#[cfg(any(test, feature = "pg_test"))]
#[pg_schema]
mod tests {
    use crate::proptest::PgTestRunner;
    use pgrx::prelude::*;
    use proptest::prelude::*;

    #[pg_test]
    fn test_log_message_hello() {
        crate::log_message::pg_log_message("hello");
    }

    #[pg_test]
    fn test_log_message_empty() {
        crate::log_message::pg_log_message("");
    }

    #[pg_test]
    fn test_log_message_returns_void() -> Result<(), pgrx::spi::Error> {
        let kind = Spi::get_one::<String>("SELECT pg_typeof(pg_log_message('hello'))::text")?;
        assert_eq!(kind.as_deref(), Some("void"));
        Ok(())
    }

    #[pg_test]
    fn test_log_message_is_strict() -> Result<(), pgrx::spi::Error> {
        let strict = Spi::get_one::<bool>(
            "SELECT proisstrict FROM pg_proc WHERE proname = 'pg_log_message'",
        )?;
        assert_eq!(strict, Some(true));

        // the host short-circuits NULL input without calling in
        let logged = Spi::get_one::<bool>("SELECT pg_log_message(NULL) IS NULL")?;
        assert_eq!(logged, Some(true));
        Ok(())
    }

    #[pg_test]
    fn test_log_message_repeated_calls() -> Result<(), pgrx::spi::Error> {
        let calls = Spi::get_one::<i64>(
            "SELECT count(*) FROM (SELECT pg_log_message('same message') FROM generate_series(1, 5)) calls",
        )?;
        assert_eq!(calls, Some(5));
        Ok(())
    }

    #[pg_test]
    fn proptest_log_message_accepts_printable_text() {
        let mut proptest = PgTestRunner::default();
        let strat = "[[:print:]]{0,256}";
        proptest
            .run(&strat, |message| {
                let literal = message.replace('\'', "''");
                let kind = Spi::get_one::<String>(&format!(
                    "SELECT pg_typeof(pg_log_message('{literal}'))::text"
                ))
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(kind.as_deref(), Some("void"));
                Ok(())
            })
            .unwrap();
    }
}
