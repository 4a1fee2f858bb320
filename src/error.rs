//LICENSE Portions Copyright 2019-2021 ZomboDB, LLC.
//LICENSE
//LICENSE Portions Copyright 2021-2023 Technology Concepts & Design, Inc.
//LICENSE
//LICENSE Portions Copyright 2023-2023 PgCentral Foundation, Inc. <contact@pgcentral.org>
//LICENSE
//LICENSE All rights reserved.
//LICENSE
//LICENSE Use of this source code is governed by the MIT license that can be found in the LICENSE file.
use thiserror::Error;

/// Errors raised by `kaz_stem` SQL functions.
///
/// pgrx reports the `Display` text as a Postgres `ERROR` when a `#[pg_extern]` returns `Err`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("endings document must be a JSON object of string arrays or a JSON array of strings, got {0}")]
    InvalidEndings(&'static str),

    #[error("could not read lemmas: {0}")]
    Spi(#[from] pgrx::spi::Error),
}
