//! The per-agent role stack.
//!
//! An agent runs exactly one role at a time (`act`). Temporarily switching to
//! another role pushes the current one onto `was`; finishing the detour pops
//! it back. `age` counts consecutive ticks spent in the current role and
//! resets on every transition.
//!
//! The fields are private. The only ways to change them are
//! [`RoleState::become_role`], [`RoleState::unbecome`], and the
//! planner-only [`RoleState::reassign`], so `was` can never be desynced from
//! `act` by a stray assignment.

use serde::{Deserialize, Serialize};
use swarm_types::Role;
use tracing::warn;

use crate::error::RoleError;
use crate::registry::RoleRegistry;

/// Current role, return stack, and time-in-role for one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleState {
    act: Role,
    #[serde(default)]
    was: Vec<Role>,
    #[serde(default)]
    age: u32,
}

impl RoleState {
    /// A fresh record running `act` with no history.
    pub const fn new(act: Role) -> Self {
        Self {
            act,
            was: Vec::new(),
            age: 0,
        }
    }

    /// A fresh record running `act` that will return through `was`
    /// (bottom of the stack first).
    pub const fn with_history(act: Role, was: Vec<Role>) -> Self {
        Self { act, was, age: 0 }
    }

    /// Restore a record that has already spent `age` ticks in its role.
    #[must_use]
    pub const fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    /// The role that runs this tick.
    pub const fn act(&self) -> Role {
        self.act
    }

    /// Roles to return to, bottom first.
    pub fn was(&self) -> &[Role] {
        &self.was
    }

    /// Consecutive ticks spent in the current role.
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// The role the agent was created for: the bottom of the stack, or the
    /// current role when the stack is empty.
    pub fn original_role(&self) -> Role {
        self.was.first().copied().unwrap_or(self.act)
    }

    /// Whether the agent is on a detour it can return from.
    pub fn has_history(&self) -> bool {
        !self.was.is_empty()
    }

    /// Switch to `role`, remembering the current one.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::Unregistered`] and leaves the record untouched if
    /// `role` has no handler.
    pub fn become_role(&mut self, role: Role, registry: &RoleRegistry) -> Result<(), RoleError> {
        if !registry.contains(role) {
            warn!(from = %self.act, to = %role, "refusing transition to unregistered role");
            return Err(RoleError::Unregistered(role));
        }
        self.was.push(self.act);
        self.act = role;
        self.age = 0;
        Ok(())
    }

    /// Return to the most recently remembered role and report it.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::EmptyHistory`] and leaves the record untouched
    /// when there is nothing to return to.
    pub fn unbecome(&mut self) -> Result<Role, RoleError> {
        let Some(previous) = self.was.pop() else {
            warn!(current = %self.act, "unbecome with empty role history");
            return Err(RoleError::EmptyHistory { current: self.act });
        };
        self.act = previous;
        self.age = 0;
        Ok(previous)
    }

    /// Pop the whole stack, ending in the original role. Returns the number
    /// of roles popped. An empty stack is left as it is, age included.
    pub fn unwind(&mut self) -> usize {
        let popped = self.was.len();
        if let Some(&original) = self.was.first() {
            self.act = original;
            self.age = 0;
            self.was.clear();
        }
        popped
    }

    /// Replace the current role without touching the stack.
    ///
    /// Reserved for the fleet planner's rebalancing. Behavior handlers only
    /// ever see `become_role` and `unbecome`.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::Unregistered`] and leaves the record untouched if
    /// `role` has no handler.
    pub fn reassign(&mut self, role: Role, registry: &RoleRegistry) -> Result<(), RoleError> {
        if !registry.contains(role) {
            warn!(from = %self.act, to = %role, "refusing reassignment to unregistered role");
            return Err(RoleError::Unregistered(role));
        }
        self.act = role;
        self.age = 0;
        Ok(())
    }

    /// Count one more tick in the current role.
    pub(crate) const fn advance_age(&mut self) {
        self.age = self.age.saturating_add(1);
    }
}
