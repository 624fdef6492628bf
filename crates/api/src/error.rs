// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::payment_policy::PaymentPolicyError;
use park_slot::CoreError;
use park_slot_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Payment policy violation.
    PaymentPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PaymentPolicyViolation { message } => {
                write!(f, "Payment policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PaymentPolicyError> for ApiError {
    fn from(err: PaymentPolicyError) -> Self {
        Self::PaymentPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidLicensePlate(msg) => ApiError::InvalidInput {
            field: String::from("license_plate"),
            message: msg,
        },
        DomainError::InvalidPhoneNumber(msg) => ApiError::InvalidInput {
            field: String::from("phone_number"),
            message: msg,
        },
        DomainError::InvalidOwnerName(msg) => ApiError::InvalidInput {
            field: String::from("owner_name"),
            message: msg,
        },
        DomainError::InvalidVehicleType(msg) => ApiError::InvalidInput {
            field: String::from("vehicle_type"),
            message: msg,
        },
        DomainError::InvalidSlotType(msg) => ApiError::InvalidInput {
            field: String::from("slot_type"),
            message: msg,
        },
        DomainError::InvalidPaymentMethod(msg) => ApiError::InvalidInput {
            field: String::from("payment_method"),
            message: msg,
        },
        DomainError::InvalidSlotNumber { number } => ApiError::InvalidInput {
            field: String::from("slot_number"),
            message: format!("Invalid slot number: {number}. Must be a positive integer"),
        },
        DomainError::InvalidCoordinates {
            latitude,
            longitude,
        } => ApiError::InvalidInput {
            field: String::from("coordinates"),
            message: format!(
                "Coordinates ({latitude}, {longitude}) are outside the valid ranges [-90, 90] and [-180, 180]"
            ),
        },
        DomainError::InvalidRadius { radius_km } => ApiError::InvalidInput {
            field: String::from("radius_km"),
            message: format!("Invalid search radius: {radius_km}. Must be a positive number"),
        },
        DomainError::InvalidTimeWindow {
            start_time,
            end_time,
        } => ApiError::InvalidInput {
            field: String::from("end_time"),
            message: format!("End time {end_time} must be after start time {start_time}"),
        },
        DomainError::StartTimeInPast {
            start_time,
            grace_minutes,
        } => ApiError::InvalidInput {
            field: String::from("start_time"),
            message: format!(
                "Start time {start_time} is more than {grace_minutes} minutes in the past"
            ),
        },
        DomainError::SlotNotFound { slot_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Slot"),
            message: format!("Slot {slot_id} does not exist"),
        },
        DomainError::BookingNotFound { booking_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {booking_id} does not exist"),
        },
        DomainError::VehicleNotFound { license_plate } => ApiError::ResourceNotFound {
            resource_type: String::from("Vehicle"),
            message: format!("No booking exists for vehicle '{license_plate}'"),
        },
        DomainError::NoActiveBookingForPlate { license_plate } => ApiError::ResourceNotFound {
            resource_type: String::from("Active booking"),
            message: format!("Vehicle '{license_plate}' is not currently parked"),
        },
        DomainError::NoActiveBookingForSlot { slot_number } => ApiError::ResourceNotFound {
            resource_type: String::from("Active booking"),
            message: format!("Slot #{slot_number} is not currently occupied"),
        },
        DomainError::BookingNotActive { booking_number } => ApiError::DomainRuleViolation {
            rule: String::from("booking_active"),
            message: format!("Booking {booking_number} has already been completed or cancelled"),
        },
        DomainError::SlotOccupied { slot_number } => ApiError::DomainRuleViolation {
            rule: String::from("one_booking_per_slot"),
            message: format!("Slot #{slot_number} is already occupied"),
        },
        DomainError::VehicleAlreadyParked { license_plate } => ApiError::DomainRuleViolation {
            rule: String::from("one_booking_per_vehicle"),
            message: format!("Vehicle '{license_plate}' already has an active booking"),
        },
        DomainError::SlotUnavailable { slot_number } => ApiError::DomainRuleViolation {
            rule: String::from("slot_enabled"),
            message: format!("Slot #{slot_number} is not available for booking"),
        },
        DomainError::SlotUnderMaintenance { slot_number } => ApiError::DomainRuleViolation {
            rule: String::from("slot_serviceable"),
            message: format!("Slot #{slot_number} is under maintenance"),
        },
        DomainError::OccupiedSlotImmutable { slot_number } => ApiError::DomainRuleViolation {
            rule: String::from("occupied_slot_immutable"),
            message: format!("Slot #{slot_number} cannot be modified while occupied"),
        },
        DomainError::CannotDeleteOccupiedSlot { slot_number } => ApiError::DomainRuleViolation {
            rule: String::from("occupied_slot_undeletable"),
            message: format!("Slot #{slot_number} cannot be deleted while occupied"),
        },
        DomainError::CannotDisableOccupiedSlot { slot_number } => ApiError::DomainRuleViolation {
            rule: String::from("occupied_slot_enabled"),
            message: format!("Slot #{slot_number} cannot be disabled while occupied"),
        },
        DomainError::MissingPaymentReference => ApiError::InvalidInput {
            field: String::from("payment_reference"),
            message: String::from("Online payments require a payment reference"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvariantViolation(msg) => ApiError::Internal {
            message: format!("Invariant violation: {msg}"),
        },
    }
}
