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
    clippy::all
)]

mod engine;
mod error;
mod queries;
mod registry;
mod state;

#[cfg(test)]
mod tests;

pub use engine::{
    BookingTransition, DEFAULT_GRACE, Engine, ReleaseResult, ReleaseTarget, ReserveRequest,
};
pub use error::CoreError;
pub use queries::{NearbySlot, ParkingReport, VehicleSearch};
pub use registry::{CreateSlot, SlotFilter, SlotPatch, SlotStatistics, SlotView};
