//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
//! Property tests that run inside a backend.
//!
//! Every case goes through SPI, so a case that raises an `ERROR` would otherwise abort the
//! whole test transaction.  [`PgTestRunner`] catches it and reports a failed case instead.
use pgrx::pg_sys::panic::CaughtError;
use pgrx::prelude::*;
use proptest::strategy::Strategy;
use proptest::test_runner::{Config, TestCaseError, TestCaseResult, TestError, TestRunner};
use std::panic::AssertUnwindSafe;

/// Round trips through SPI are slow; keep the default case count modest.
const SPI_CASES: u32 = 64;

pub struct PgTestRunner(TestRunner);

impl Default for PgTestRunner {
    fn default() -> Self {
        PgTestRunner::with_cases(SPI_CASES)
    }
}

impl PgTestRunner {
    pub fn with_cases(cases: u32) -> Self {
        PgTestRunner(TestRunner::new(Config::with_cases(cases)))
    }

    pub fn run<S: Strategy>(
        &mut self,
        strategy: &S,
        test: impl Fn(S::Value) -> TestCaseResult,
    ) -> Result<(), TestError<<S as Strategy>::Value>> {
        self.0.run(strategy, |value| {
            PgTryBuilder::new(AssertUnwindSafe(|| test(value)))
                .catch_others(|err| match err {
                    CaughtError::PostgresError(report)
                    | CaughtError::ErrorReport(report)
                    | CaughtError::RustPanic { ereport: report, .. } => {
                        Err(TestCaseError::fail(format!("case raised: {}", report.message())))
                    }
                })
                .execute()
        })
    }
}
