//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
//! `kaz_stem.*` configuration variables.
use pgrx::guc::*;
use pgrx::prelude::*;
use pgrx::PostgresGucEnum;

use crate::stemmer::{EarlyReturnPolicy, StemOptions};

#[derive(PostgresGucEnum, Clone, Copy, PartialEq, Debug)]
pub enum GucEarlyReturnPolicy {
    Always,
    IfLooksUninflected,
    Never,
}

impl From<GucEarlyReturnPolicy> for EarlyReturnPolicy {
    fn from(policy: GucEarlyReturnPolicy) -> Self {
        match policy {
            GucEarlyReturnPolicy::Always => EarlyReturnPolicy::Always,
            GucEarlyReturnPolicy::IfLooksUninflected => EarlyReturnPolicy::IfLooksUninflected,
            GucEarlyReturnPolicy::Never => EarlyReturnPolicy::Never,
        }
    }
}

pub static MAX_DEPTH: GucSetting<i32> = GucSetting::<i32>::new(4);
pub static EARLY_RETURN_POLICY: GucSetting<GucEarlyReturnPolicy> =
    GucSetting::<GucEarlyReturnPolicy>::new(GucEarlyReturnPolicy::IfLooksUninflected);
pub static TRACE: GucSetting<bool> = GucSetting::<bool>::new(false);

pub fn init() {
    GucRegistry::define_int_guc(
        "kaz_stem.max_depth",
        "Maximum number of suffixes stripped along one search path.",
        "Each level of the lemma search strips one inflectional suffix. Zero only checks the word itself.",
        &MAX_DEPTH,
        0,
        16,
        GucContext::Userset,
        GucFlags::default(),
    );
    GucRegistry::define_enum_guc(
        "kaz_stem.early_return_policy",
        "What kaz_stem does with a word that is already a lemma.",
        "Always returns it as-is, Never stems it anyway, IfLooksUninflected stems it only when a suffix plausibly matches.",
        &EARLY_RETURN_POLICY,
        GucContext::Userset,
        GucFlags::default(),
    );
    GucRegistry::define_bool_guc(
        "kaz_stem.trace",
        "Report every stemming decision at DEBUG1.",
        "Useful together with client_min_messages = debug1 when tuning the lemma table.",
        &TRACE,
        GucContext::Userset,
        GucFlags::default(),
    );
}

impl StemOptions {
    /// Snapshot the session's `kaz_stem.*` settings.
    pub fn from_gucs() -> Self {
        StemOptions {
            max_depth: MAX_DEPTH.get().max(0) as u32,
            policy: EARLY_RETURN_POLICY.get().into(),
            trace: TRACE.get(),
        }
    }
}

#[cfg(any(test, feature = "pg_test"))]
#[pg_schema]
mod tests {
    use crate::guc::*;
    use crate::stemmer::{EarlyReturnPolicy, StemOptions};
    use pgrx::prelude::*;

    #[pg_test]
    fn test_defaults() {
        let options = StemOptions::from_gucs();
        assert_eq!(options, StemOptions::default());
    }

    #[pg_test]
    fn test_settings_reach_options() {
        Spi::run("SET kaz_stem.max_depth = 2").expect("SPI failed");
        Spi::run("SET kaz_stem.early_return_policy = 'never'").expect("SPI failed");
        Spi::run("SET kaz_stem.trace = on").expect("SPI failed");

        let options = StemOptions::from_gucs();
        assert_eq!(options.max_depth, 2);
        assert_eq!(options.policy, EarlyReturnPolicy::Never);
        assert!(options.trace);
        assert_eq!(EARLY_RETURN_POLICY.get(), GucEarlyReturnPolicy::Never);
    }

    #[pg_test(error = "17 is outside the valid range for parameter \"kaz_stem.max_depth\" (0 .. 16)")]
    fn test_max_depth_is_bounded() {
        Spi::run("SET kaz_stem.max_depth = 17").expect("SPI failed");
    }
}
