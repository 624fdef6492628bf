// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment policy validation.
//!
//! This module enforces the shape of payment details before a booking
//! is attempted. The engine records payment details verbatim; all
//! policy lives here.

use park_slot_domain::PaymentMethod;
use thiserror::Error;

/// Payment policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentPolicyError {
    /// Online payments must carry a reference.
    #[error("Online payments require a payment reference")]
    MissingReference,

    /// The reference does not look like a UPI id.
    #[error("Payment reference '{reference}' is not a valid UPI id (expected name@provider)")]
    MalformedReference { reference: String },

    /// Cash payments must not carry a reference.
    #[error("Cash payments must not include a payment reference")]
    UnexpectedReference,
}

/// Payment policy configuration.
pub struct PaymentPolicy {
    /// Whether online references must look like a UPI id.
    pub require_upi_shape: bool,
}

impl Default for PaymentPolicy {
    fn default() -> Self {
        Self {
            require_upi_shape: true,
        }
    }
}

impl PaymentPolicy {
    /// Validates payment details against the policy.
    ///
    /// # Arguments
    ///
    /// * `method` - The payment method
    /// * `reference` - The payment reference, if any
    ///
    /// # Errors
    ///
    /// Returns a `PaymentPolicyError` if the details do not meet policy
    /// requirements.
    pub fn validate(
        &self,
        method: PaymentMethod,
        reference: Option<&str>,
    ) -> Result<(), PaymentPolicyError> {
        match (method, reference) {
            (PaymentMethod::Cash, None) => Ok(()),
            (PaymentMethod::Cash, Some(_)) => Err(PaymentPolicyError::UnexpectedReference),
            (PaymentMethod::Online, None) => Err(PaymentPolicyError::MissingReference),
            (PaymentMethod::Online, Some(reference)) => {
                let trimmed: &str = reference.trim();
                if trimmed.is_empty() {
                    return Err(PaymentPolicyError::MissingReference);
                }
                if self.require_upi_shape && !Self::looks_like_upi(trimmed) {
                    return Err(PaymentPolicyError::MalformedReference {
                        reference: trimmed.to_owned(),
                    });
                }
                Ok(())
            }
        }
    }

    /// Checks the `name@provider` shape: exactly one `@`, both parts
    /// non-empty, parts limited to alphanumerics, dots, and hyphens.
    fn looks_like_upi(reference: &str) -> bool {
        let mut parts = reference.split('@');
        let (Some(name), Some(provider), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };
        let part_ok = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        };
        part_ok(name) && part_ok(provider)
    }
}
