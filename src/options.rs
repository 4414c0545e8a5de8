// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Options recognized when a facade is created.
//!
//! The options record is deserializable so that an embedding layer can pass
//! it straight through from JSON or TOML. Missing fields take their defaults.
//!
//! ```
//! use semigroup_enum::options::{BackendPreference, EnumerationOptions};
//!
//! let options = EnumerationOptions::default()
//!     .with_batch_size(128)
//!     .with_backend(BackendPreference::Generic);
//! assert!(options.validate().is_ok());
//! assert!(!options.report);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EnumerationError, Result};

/// Growth chunk per internal step when the caller does not say otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Which engine the selector may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendPreference {
    /// Fast engine for canonical encodings, generic engine otherwise.
    #[default]
    Auto,
    /// Always the generic engine.
    Generic,
}

/// Options for a facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerationOptions {
    /// Number of new elements requested from the engine per growth step.
    pub batch_size: usize,

    /// Log progress of every growth step at `info` level.
    pub report: bool,

    /// Whether operations may force the structure to be enumerated to completion.
    pub allow_full_enumeration: bool,

    /// Engine selection policy.
    pub backend: BackendPreference,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            report: false,
            allow_full_enumeration: true,
            backend: BackendPreference::Auto,
        }
    }
}

impl EnumerationOptions {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }

    pub fn with_full_enumeration(mut self, allow: bool) -> Self {
        self.allow_full_enumeration = allow;
        self
    }

    pub fn with_backend(mut self, backend: BackendPreference) -> Self {
        self.backend = backend;
        self
    }

    /// Reject option values no engine can run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(EnumerationError::InvalidArgument(
                "batch_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
