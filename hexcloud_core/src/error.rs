// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! The engine has no external failure sources. Errors are limited to
//! rejected configuration and out-of-range placement lookups; a superseded
//! animation step is reported as [`StepOutcome::Stale`] instead.
//!
//! [`StepOutcome::Stale`]: crate::animation::StepOutcome::Stale

use thiserror::Error;

/// Errors reported by the hex-cloud engine.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    /// A configuration field is out of its valid domain.
    ///
    /// Returned at construction so that no NaN or infinite placement is ever
    /// published.
    #[error("invalid configuration: `{field}` = {value} ({reason})")]
    InvalidConfiguration {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// What the field requires.
        reason: &'static str,
    },
    /// A placement index outside `0..count` was requested.
    #[error("placement index {index} out of range (count {count})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of placements currently published.
        count: usize,
    },
}

/// Shorthand for results produced by this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
