// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod geo;
mod tariff;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use geo::{EARTH_RADIUS_KM, haversine_km};
pub use tariff::{FeeQuote, TAX_RATE, billable_hours, quote, quote_for_rate, rate, round2};
pub use types::{
    Booking, BookingId, BookingStatus, LicensePlate, Location, ParkingSlot, PaymentInfo,
    PaymentMethod, PhoneNumber, SlotId, SlotNumber, SlotType, Vehicle, VehicleType,
};
pub use validation::{
    validate_coordinates, validate_owner_name, validate_radius, validate_schedule_window,
};
