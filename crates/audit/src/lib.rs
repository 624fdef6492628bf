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

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// a customer, an admin, or the system itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "customer", "admin", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// The kind of release that ended a booking.
///
/// Checkout and force-removal have identical state effect; they are
/// distinguished here, and only here, for the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    /// The customer checked out normally.
    Checkout,
    /// An admin removed a vehicle that never checked out itself.
    ForceRemove,
}

impl ReleaseKind {
    /// Returns the audit action name for this release kind.
    #[must_use]
    pub const fn action_name(self) -> &'static str {
        match self {
            Self::Checkout => "Checkout",
            Self::ForceRemove => "ForceRemove",
        }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`ReserveSlot`", "`ForceRemove`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of occupancy state at a point in time.
///
/// Captures enough to reconstruct what the exclusion section observed:
/// the slot, the plate involved, and the active-booking count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful engine mutation produces exactly one audit event.
/// Audit events capture who performed the action, what was performed,
/// and the occupancy state before and after the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        actor: Actor,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            action,
            before,
            after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("admin-1"), String::from("admin"));

        assert_eq!(actor.id, "admin-1");
        assert_eq!(actor.actor_type, "admin");
    }

    #[test]
    fn test_release_kind_action_names() {
        assert_eq!(ReleaseKind::Checkout.action_name(), "Checkout");
        assert_eq!(ReleaseKind::ForceRemove.action_name(), "ForceRemove");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("ReserveSlot"),
            Some(String::from("slot #5, plate MH12AB1234")),
        );

        assert_eq!(action.name, "ReserveSlot");
        assert_eq!(action.details, Some(String::from("slot #5, plate MH12AB1234")));
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("customer-9"), String::from("customer"));
        let action: Action = Action::new(String::from("ReserveSlot"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("slot=5,active=0"));
        let after: StateSnapshot = StateSnapshot::new(String::from("slot=5,active=1"));

        let event: AuditEvent =
            AuditEvent::new(actor.clone(), action.clone(), before.clone(), after.clone());

        assert_eq!(event.actor, actor);
        assert_eq!(event.action, action);
        assert_eq!(event.before, before);
        assert_eq!(event.after, after);
    }

    #[test]
    fn test_audit_event_equality() {
        let make = || {
            AuditEvent::new(
                Actor::new(String::from("admin-1"), String::from("admin")),
                Action::new(String::from("ForceRemove"), None),
                StateSnapshot::new(String::from("before")),
                StateSnapshot::new(String::from("after")),
            )
        };

        assert_eq!(make(), make());
    }
}
