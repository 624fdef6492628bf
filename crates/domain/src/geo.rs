// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Great-circle distance.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the haversine great-circle distance between two points in
/// kilometres.
///
/// Planar approximations are deliberately not used: their error grows
/// with distance and breaks radius semantics near the boundary.
///
/// # Arguments
///
/// * `lat1`, `lon1` - First point in degrees
/// * `lat2`, `lon2` - Second point in degrees
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat_delta: f64 = (lat2 - lat1).to_radians();
    let lon_delta: f64 = (lon2 - lon1).to_radians();

    let a: f64 = (lat_delta / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (lon_delta / 2.0).sin().powi(2);
    let c: f64 = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
