// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use park_slot_domain::DomainError;

/// Errors that can occur during engine operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated. This is a legitimate business
    /// refusal and maps to a caller-facing error.
    DomainViolation(DomainError),
    /// An internal invariant was broken. This is a programming error:
    /// it means the exclusion mechanism failed, not that the caller
    /// did anything wrong.
    InvariantViolation(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvariantViolation(msg) => write!(f, "Invariant violation: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
