// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot registry operations: the administrative CRUD surface.
//!
//! Slot numbers are engine-assigned. On creation the smallest unused
//! positive number is taken, so numbers freed by deletion are reused
//! and the number space stays dense. Structural changes to a slot
//! (size class, floor) are refused while it is occupied; location
//! edits are always allowed.

use crate::engine::Engine;
use crate::error::CoreError;
use crate::state::EngineState;
use park_slot_domain::{DomainError, Location, ParkingSlot, SlotId, SlotType};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

/// Input for creating a slot. The number is assigned by the engine,
/// never supplied by the caller.
#[derive(Debug, Clone)]
pub struct CreateSlot {
    /// The physical size class.
    pub slot_type: SlotType,
    /// The floor this slot is on.
    pub floor_number: u16,
    /// Optional geographic location.
    pub location: Option<Location>,
}

/// A partial update to a slot's mutable fields. `None` leaves the
/// field unchanged; the slot number is immutable and not patchable.
#[derive(Debug, Clone, Default)]
pub struct SlotPatch {
    /// New size class.
    pub slot_type: Option<SlotType>,
    /// New floor number.
    pub floor_number: Option<u16>,
    /// New location. Replaces the existing location wholesale.
    pub location: Option<Location>,
    /// New availability flag.
    pub is_available: Option<bool>,
}

/// Filters for listing slots. All present criteria must match.
#[derive(Debug, Clone, Default)]
pub struct SlotFilter {
    /// Keep only slots of this size class.
    pub slot_type: Option<SlotType>,
    /// Keep only slots on this floor.
    pub floor_number: Option<u16>,
    /// Keep only slots in this city (case-insensitive).
    pub city: Option<String>,
    /// Keep only slots that could accept a vehicle right now: enabled,
    /// not under maintenance, and not occupied.
    pub only_free: bool,
}

/// A caller-facing view of a slot, with occupancy derived from the
/// booking ledger at read time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    /// The surrogate key.
    pub id: i64,
    /// The externally visible slot number.
    pub slot_number: u32,
    /// The physical size class.
    pub slot_type: SlotType,
    /// The floor this slot is on.
    pub floor_number: u16,
    /// Optional geographic location.
    pub location: Option<Location>,
    /// Administrative enable/disable flag.
    pub is_available: bool,
    /// Whether an active booking holds this slot right now.
    pub is_occupied: bool,
    /// `Some(reason)` while the slot is under maintenance.
    pub maintenance_reason: Option<String>,
    /// When the slot was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl SlotView {
    pub(crate) fn project(slot: &ParkingSlot, state: &EngineState) -> Self {
        Self {
            id: slot.id().value(),
            slot_number: slot.slot_number().value(),
            slot_type: slot.slot_type,
            floor_number: slot.floor_number,
            location: slot.location.clone(),
            is_available: slot.is_available,
            is_occupied: state.is_occupied(slot.id()),
            maintenance_reason: slot.maintenance_reason.clone(),
            created_at: slot.created_at(),
        }
    }
}

/// Aggregate counts over the whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatistics {
    /// Total number of slots.
    pub total: usize,
    /// Slots with an active booking.
    pub occupied: usize,
    /// Slots ready to accept a vehicle: enabled, not under
    /// maintenance, not occupied.
    pub free: usize,
    /// Slots administratively disabled.
    pub disabled: usize,
    /// Slots under maintenance.
    pub under_maintenance: usize,
    /// Small-class slots.
    pub small: usize,
    /// Medium-class slots.
    pub medium: usize,
    /// Large-class slots.
    pub large: usize,
}

/// Re-projects a slot known to exist, after a mutation released its
/// `get_mut` borrow.
fn project_existing(state: &EngineState, slot_id: SlotId) -> Result<SlotView, CoreError> {
    let slot: &ParkingSlot = state.slots.get(&slot_id).ok_or_else(|| {
        CoreError::InvariantViolation(format!("slot {slot_id} vanished mid-update"))
    })?;
    Ok(SlotView::project(slot, state))
}

impl Engine {
    /// Creates a new slot, assigning it the smallest unused number.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation only if the number space is
    /// exhausted.
    pub async fn create_slot(
        &self,
        input: CreateSlot,
        now: OffsetDateTime,
    ) -> Result<SlotView, CoreError> {
        let slot_id: SlotId = self.next_slot_id();
        let mut state = self.state().write().await;
        let slot_number = state.next_slot_number()?;
        let slot: ParkingSlot = ParkingSlot::new(
            slot_id,
            slot_number,
            input.slot_type,
            input.floor_number,
            input.location,
            now,
        );
        let view: SlotView = SlotView::project(&slot, &state);
        state.slots.insert(slot_id, slot);
        drop(state);
        info!(slot_number = %slot_number, slot_type = ?input.slot_type, "Created slot");
        Ok(view)
    }

    /// Applies a partial update to a slot's mutable fields.
    ///
    /// Location edits are always allowed; changes to the size class or
    /// floor, and disabling, are refused while the slot is occupied. An
    /// empty patch is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a not-found violation if the slot does not exist, or an
    /// occupied-slot violation for a refused field.
    pub async fn update_slot(
        &self,
        slot_id: SlotId,
        patch: SlotPatch,
    ) -> Result<SlotView, CoreError> {
        let mut state = self.state().write().await;
        let occupied: bool = state.is_occupied(slot_id);
        let slot = state
            .slots
            .get_mut(&slot_id)
            .ok_or(DomainError::SlotNotFound {
                slot_id: slot_id.value(),
            })?;
        if occupied && (patch.slot_type.is_some() || patch.floor_number.is_some()) {
            return Err(DomainError::OccupiedSlotImmutable {
                slot_number: slot.slot_number().value(),
            }
            .into());
        }
        if occupied && patch.is_available == Some(false) {
            return Err(DomainError::CannotDisableOccupiedSlot {
                slot_number: slot.slot_number().value(),
            }
            .into());
        }
        if let Some(slot_type) = patch.slot_type {
            slot.slot_type = slot_type;
        }
        if let Some(floor_number) = patch.floor_number {
            slot.floor_number = floor_number;
        }
        if let Some(location) = patch.location {
            slot.location = Some(location);
        }
        if let Some(is_available) = patch.is_available {
            slot.is_available = is_available;
        }
        let number: u32 = slot.slot_number().value();
        let view: SlotView = project_existing(&state, slot_id)?;
        drop(state);
        info!(slot_number = number, "Updated slot");
        Ok(view)
    }

    /// Deletes a slot, freeing its number for reuse.
    ///
    /// Completed and cancelled booking history referencing the slot is
    /// kept; only occupancy blocks deletion.
    ///
    /// # Errors
    ///
    /// Returns a not-found violation if the slot does not exist, or an
    /// occupied-slot violation if it currently holds a vehicle.
    pub async fn delete_slot(&self, slot_id: SlotId) -> Result<(), CoreError> {
        let mut state = self.state().write().await;
        let slot = state
            .slots
            .get(&slot_id)
            .ok_or(DomainError::SlotNotFound {
                slot_id: slot_id.value(),
            })?;
        let number: u32 = slot.slot_number().value();
        if state.is_occupied(slot_id) {
            return Err(DomainError::CannotDeleteOccupiedSlot {
                slot_number: number,
            }
            .into());
        }
        state.slots.remove(&slot_id);
        drop(state);
        info!(slot_number = number, "Deleted slot");
        Ok(())
    }

    /// Flips the administrative availability flag.
    ///
    /// # Errors
    ///
    /// Returns a not-found violation if the slot does not exist, or an
    /// occupied-slot violation when trying to disable a slot that
    /// currently holds a vehicle. Re-enabling is always allowed.
    pub async fn toggle_availability(&self, slot_id: SlotId) -> Result<SlotView, CoreError> {
        let mut state = self.state().write().await;
        let occupied: bool = state.is_occupied(slot_id);
        let slot = state
            .slots
            .get_mut(&slot_id)
            .ok_or(DomainError::SlotNotFound {
                slot_id: slot_id.value(),
            })?;
        if slot.is_available && occupied {
            return Err(DomainError::CannotDisableOccupiedSlot {
                slot_number: slot.slot_number().value(),
            }
            .into());
        }
        slot.is_available = !slot.is_available;
        let number: u32 = slot.slot_number().value();
        let enabled: bool = slot.is_available;
        let view: SlotView = project_existing(&state, slot_id)?;
        drop(state);
        info!(slot_number = number, enabled, "Toggled slot availability");
        Ok(view)
    }

    /// Sets or clears the maintenance reason on a slot.
    ///
    /// Independent of occupancy: a vehicle already parked in the slot
    /// stays until checkout, but a slot under maintenance is excluded
    /// from new allocation.
    ///
    /// # Errors
    ///
    /// Returns a not-found violation if the slot does not exist.
    pub async fn set_maintenance(
        &self,
        slot_id: SlotId,
        reason: Option<String>,
    ) -> Result<SlotView, CoreError> {
        let mut state = self.state().write().await;
        let slot = state
            .slots
            .get_mut(&slot_id)
            .ok_or(DomainError::SlotNotFound {
                slot_id: slot_id.value(),
            })?;
        slot.maintenance_reason = reason;
        let number: u32 = slot.slot_number().value();
        let servicing: bool = slot.is_under_maintenance();
        let view: SlotView = project_existing(&state, slot_id)?;
        drop(state);
        info!(slot_number = number, servicing, "Set slot maintenance");
        Ok(view)
    }

    /// Fetches a single slot with derived occupancy.
    ///
    /// # Errors
    ///
    /// Returns a not-found violation if the slot does not exist.
    pub async fn get_slot(&self, slot_id: SlotId) -> Result<SlotView, CoreError> {
        let state = self.state().read().await;
        let slot = state
            .slots
            .get(&slot_id)
            .ok_or(DomainError::SlotNotFound {
                slot_id: slot_id.value(),
            })?;
        Ok(SlotView::project(slot, &state))
    }

    /// Lists slots matching a filter, ordered by slot number.
    pub async fn list_slots(&self, filter: &SlotFilter) -> Vec<SlotView> {
        let state = self.state().read().await;
        let mut views: Vec<SlotView> = state
            .slots
            .values()
            .filter(|slot| {
                filter
                    .slot_type
                    .is_none_or(|slot_type| slot.slot_type == slot_type)
            })
            .filter(|slot| {
                filter
                    .floor_number
                    .is_none_or(|floor| slot.floor_number == floor)
            })
            .filter(|slot| {
                filter.city.as_ref().is_none_or(|city| {
                    slot.location.as_ref().is_some_and(|location| {
                        location
                            .city
                            .as_ref()
                            .is_some_and(|slot_city| slot_city.eq_ignore_ascii_case(city))
                    })
                })
            })
            .filter(|slot| {
                !filter.only_free
                    || (slot.is_available
                        && !slot.is_under_maintenance()
                        && !state.is_occupied(slot.id()))
            })
            .map(|slot| SlotView::project(slot, &state))
            .collect();
        views.sort_by_key(|view| view.slot_number);
        views
    }

    /// Computes aggregate counts over the whole registry.
    pub async fn slot_statistics(&self) -> SlotStatistics {
        let state = self.state().read().await;
        let mut stats: SlotStatistics = SlotStatistics {
            total: state.slots.len(),
            occupied: 0,
            free: 0,
            disabled: 0,
            under_maintenance: 0,
            small: 0,
            medium: 0,
            large: 0,
        };
        for slot in state.slots.values() {
            let occupied: bool = state.is_occupied(slot.id());
            if occupied {
                stats.occupied += 1;
            }
            if !slot.is_available {
                stats.disabled += 1;
            }
            if slot.is_under_maintenance() {
                stats.under_maintenance += 1;
            }
            if slot.is_available && !slot.is_under_maintenance() && !occupied {
                stats.free += 1;
            }
            match slot.slot_type {
                SlotType::Small => stats.small += 1,
                SlotType::Medium => stats.medium += 1,
                SlotType::Large => stats.large += 1,
            }
        }
        stats
    }

    /// Lists the distinct cities slots are located in, sorted.
    pub async fn list_cities(&self) -> Vec<String> {
        let state = self.state().read().await;
        let mut cities: Vec<String> = state
            .slots
            .values()
            .filter_map(|slot| slot.location.as_ref())
            .filter_map(|location| location.city.clone())
            .collect();
        cities.sort();
        cities.dedup();
        cities
    }
}
