// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure fee calculation.
//!
//! The tariff is the single authority for money amounts. The estimate
//! shown at reservation time uses the requested schedule window; the
//! final charge at checkout uses the actual elapsed time against the
//! rate snapshot stored on the booking.

use crate::types::VehicleType;
use serde::{Deserialize, Serialize};

/// Tax applied on top of the base fee.
pub const TAX_RATE: f64 = 0.18;

/// A fee breakdown for a parking duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    /// Billable hours (duration rounded up, minimum 1).
    pub hours: u64,
    /// `hours * hourly_rate`.
    pub base_fee: f64,
    /// 18% of the base fee, rounded to 2 decimals.
    pub tax: f64,
    /// `base_fee + tax`, rounded to 2 decimals.
    pub total: f64,
}

/// Returns the hourly rate for a vehicle type in currency units per hour.
#[must_use]
pub const fn rate(vehicle_type: VehicleType) -> f64 {
    match vehicle_type {
        VehicleType::Bike => 10.0,
        VehicleType::Car => 20.0,
        VehicleType::Suv => 30.0,
        VehicleType::Truck => 50.0,
    }
}

/// Rounds a monetary value to 2 decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts a duration in minutes to billable hours.
///
/// Durations round up to the next whole hour with a minimum charge of
/// one hour.
#[must_use]
pub const fn billable_hours(duration_minutes: u64) -> u64 {
    let hours: u64 = duration_minutes.div_ceil(60);
    if hours < 1 { 1 } else { hours }
}

/// Quotes a fee for a vehicle type and duration.
///
/// # Arguments
///
/// * `vehicle_type` - The vehicle classification
/// * `duration_minutes` - The parking duration in minutes
#[must_use]
pub fn quote(vehicle_type: VehicleType, duration_minutes: u64) -> FeeQuote {
    quote_for_rate(rate(vehicle_type), duration_minutes)
}

/// Quotes a fee against an explicit hourly rate.
///
/// Checkout must use this with the booking's rate snapshot so that
/// tariff changes never alter an existing booking's charge.
#[must_use]
pub fn quote_for_rate(hourly_rate: f64, duration_minutes: u64) -> FeeQuote {
    let hours: u64 = billable_hours(duration_minutes);
    #[allow(clippy::cast_precision_loss)]
    let base_fee: f64 = round2(hours as f64 * hourly_rate);
    let tax: f64 = round2(base_fee * TAX_RATE);
    let total: f64 = round2(base_fee + tax);
    FeeQuote {
        hours,
        base_fee,
        tax,
        total,
    }
}
