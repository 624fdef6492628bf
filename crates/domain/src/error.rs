// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation and state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// License plate is empty or does not match the required pattern.
    InvalidLicensePlate(String),
    /// Phone number is not exactly 10 digits.
    InvalidPhoneNumber(String),
    /// Owner name is empty or invalid.
    InvalidOwnerName(String),
    /// Vehicle type string is not recognized.
    InvalidVehicleType(String),
    /// Slot type string is not recognized.
    InvalidSlotType(String),
    /// Payment method string is not recognized.
    InvalidPaymentMethod(String),
    /// Slot number must be a positive integer.
    InvalidSlotNumber {
        /// The invalid number value.
        number: u32,
    },
    /// Coordinates are outside the valid latitude/longitude ranges.
    InvalidCoordinates {
        /// The latitude value.
        latitude: f64,
        /// The longitude value.
        longitude: f64,
    },
    /// Search radius must be positive.
    InvalidRadius {
        /// The invalid radius in kilometres.
        radius_km: f64,
    },
    /// Requested schedule window has `end_time` not after `start_time`.
    InvalidTimeWindow {
        /// The requested start of the window.
        start_time: OffsetDateTime,
        /// The requested end of the window.
        end_time: OffsetDateTime,
    },
    /// Requested start time is in the past beyond the grace window.
    StartTimeInPast {
        /// The requested start time.
        start_time: OffsetDateTime,
        /// The grace window in minutes.
        grace_minutes: i64,
    },
    /// Slot does not exist.
    SlotNotFound {
        /// The slot identifier.
        slot_id: i64,
    },
    /// Booking does not exist.
    BookingNotFound {
        /// The booking identifier.
        booking_id: i64,
    },
    /// Vehicle has never been seen by the system.
    VehicleNotFound {
        /// The normalized license plate.
        license_plate: String,
    },
    /// No active booking exists for the given license plate.
    NoActiveBookingForPlate {
        /// The normalized license plate.
        license_plate: String,
    },
    /// No active booking exists on the given slot.
    NoActiveBookingForSlot {
        /// The externally visible slot number.
        slot_number: u32,
    },
    /// Booking exists but is no longer active.
    BookingNotActive {
        /// The booking number.
        booking_number: String,
    },
    /// Slot already has an active booking.
    SlotOccupied {
        /// The externally visible slot number.
        slot_number: u32,
    },
    /// Vehicle already has an active booking somewhere in the system.
    VehicleAlreadyParked {
        /// The normalized license plate.
        license_plate: String,
    },
    /// Slot is administratively disabled.
    SlotUnavailable {
        /// The externally visible slot number.
        slot_number: u32,
    },
    /// Slot is under maintenance and excluded from allocation.
    SlotUnderMaintenance {
        /// The externally visible slot number.
        slot_number: u32,
    },
    /// Occupied slots cannot have their type or floor edited.
    OccupiedSlotImmutable {
        /// The externally visible slot number.
        slot_number: u32,
    },
    /// Occupied slots cannot be deleted.
    CannotDeleteOccupiedSlot {
        /// The externally visible slot number.
        slot_number: u32,
    },
    /// Occupied slots cannot be disabled.
    CannotDisableOccupiedSlot {
        /// The externally visible slot number.
        slot_number: u32,
    },
    /// Online payments require a payment reference.
    MissingPaymentReference,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLicensePlate(msg) => write!(f, "Invalid license plate: {msg}"),
            Self::InvalidPhoneNumber(msg) => write!(f, "Invalid phone number: {msg}"),
            Self::InvalidOwnerName(msg) => write!(f, "Invalid owner name: {msg}"),
            Self::InvalidVehicleType(msg) => write!(f, "Invalid vehicle type: {msg}"),
            Self::InvalidSlotType(msg) => write!(f, "Invalid slot type: {msg}"),
            Self::InvalidPaymentMethod(msg) => write!(f, "Invalid payment method: {msg}"),
            Self::InvalidSlotNumber { number } => {
                write!(f, "Invalid slot number: {number}. Must be greater than 0")
            }
            Self::InvalidCoordinates {
                latitude,
                longitude,
            } => {
                write!(
                    f,
                    "Invalid coordinates ({latitude}, {longitude}): latitude must be within [-90, 90] and longitude within [-180, 180]"
                )
            }
            Self::InvalidRadius { radius_km } => {
                write!(f, "Invalid radius: {radius_km} km. Must be greater than 0")
            }
            Self::InvalidTimeWindow {
                start_time,
                end_time,
            } => {
                write!(
                    f,
                    "Invalid time window: end time {end_time} must be after start time {start_time}"
                )
            }
            Self::StartTimeInPast {
                start_time,
                grace_minutes,
            } => {
                write!(
                    f,
                    "Start time {start_time} is more than {grace_minutes} minutes in the past"
                )
            }
            Self::SlotNotFound { slot_id } => write!(f, "Slot {slot_id} not found"),
            Self::BookingNotFound { booking_id } => write!(f, "Booking {booking_id} not found"),
            Self::VehicleNotFound { license_plate } => {
                write!(f, "Vehicle '{license_plate}' not found")
            }
            Self::NoActiveBookingForPlate { license_plate } => {
                write!(f, "No active parking found for vehicle '{license_plate}'")
            }
            Self::NoActiveBookingForSlot { slot_number } => {
                write!(f, "No active booking on slot #{slot_number}")
            }
            Self::BookingNotActive { booking_number } => {
                write!(f, "Booking {booking_number} is not active")
            }
            Self::SlotOccupied { slot_number } => {
                write!(
                    f,
                    "Slot #{slot_number} is already occupied! Please select another slot"
                )
            }
            Self::VehicleAlreadyParked { license_plate } => {
                write!(f, "Vehicle '{license_plate}' is already parked")
            }
            Self::SlotUnavailable { slot_number } => {
                write!(f, "Slot #{slot_number} is currently disabled")
            }
            Self::SlotUnderMaintenance { slot_number } => {
                write!(f, "Slot #{slot_number} is under maintenance")
            }
            Self::OccupiedSlotImmutable { slot_number } => {
                write!(
                    f,
                    "Cannot edit type or floor of slot #{slot_number} while it is occupied"
                )
            }
            Self::CannotDeleteOccupiedSlot { slot_number } => {
                write!(f, "Cannot delete occupied slot #{slot_number}")
            }
            Self::CannotDisableOccupiedSlot { slot_number } => {
                write!(f, "Cannot disable occupied slot #{slot_number}")
            }
            Self::MissingPaymentReference => {
                write!(f, "Online payments require a payment reference")
            }
        }
    }
}

impl std::error::Error for DomainError {}
