// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::{Duration, OffsetDateTime};

/// Validates that an owner name is non-empty.
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace-only.
pub fn validate_owner_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidOwnerName(String::from(
            "Owner name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a requested schedule window.
///
/// The window must end after it starts, and must not start earlier than
/// `now - grace`. The window is advisory scheduling metadata; occupancy
/// begins at the actual check-in instant regardless.
///
/// # Arguments
///
/// * `start_time` - Requested window start
/// * `end_time` - Requested window end
/// * `now` - The current instant
/// * `grace` - How far in the past `start_time` may lie
///
/// # Errors
///
/// Returns an error if the window is inverted or starts too far in the
/// past.
pub fn validate_schedule_window(
    start_time: OffsetDateTime,
    end_time: OffsetDateTime,
    now: OffsetDateTime,
    grace: Duration,
) -> Result<(), DomainError> {
    if end_time <= start_time {
        return Err(DomainError::InvalidTimeWindow {
            start_time,
            end_time,
        });
    }
    if start_time < now - grace {
        return Err(DomainError::StartTimeInPast {
            start_time,
            grace_minutes: grace.whole_minutes(),
        });
    }
    Ok(())
}

/// Validates geographic coordinates.
///
/// # Errors
///
/// Returns an error if latitude is outside [-90, 90] or longitude is
/// outside [-180, 180], or either is not finite.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), DomainError> {
    let valid: bool = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude);
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidCoordinates {
            latitude,
            longitude,
        })
    }
}

/// Validates a proximity search radius.
///
/// # Errors
///
/// Returns an error if the radius is not a positive finite number.
pub fn validate_radius(radius_km: f64) -> Result<(), DomainError> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidRadius { radius_km })
    }
}
