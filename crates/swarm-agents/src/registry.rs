//! Role registry and per-tick dispatch.
//!
//! A [`RoleRegistry`] maps each [`Role`] to the [`RoleHandler`] that runs it.
//! [`work`] looks up an agent's current role, runs its handler once, and
//! advances the agent's time in role unless the handler transitioned.
//!
//! Handlers never touch [`AgentMemory`] directly. They get an
//! [`AgentContext`], which exposes the bindings they read and the two
//! transitions they may perform.

use std::collections::BTreeMap;

use swarm_types::{AgentId, EntityId, Role};
use swarm_world::World;
use tracing::warn;

use crate::error::DispatchError;
use crate::memory::AgentMemory;
use crate::roles::{BuildRole, HarvestRole, RefillRole, StoreRole, UpgradeRole};

/// Behavior run for an agent whose current role this is.
pub trait RoleHandler: Send + Sync {
    /// Act for one tick: at most one physical action, at most one transition.
    fn act(&self, agent: &mut AgentContext<'_>, world: &mut dyn World);
}

/// Maps roles to handlers.
#[derive(Clone, Default)]
pub struct RoleRegistry {
    handlers: BTreeMap<Role, &'static dyn RoleHandler>,
}

impl RoleRegistry {
    /// A registry with no roles.
    pub const fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// The five standard roles.
    pub fn standard() -> Self {
        Self::empty()
            .with(Role::Build, &BuildRole)
            .with(Role::Harvest, &HarvestRole)
            .with(Role::Refill, &RefillRole)
            .with(Role::Store, &StoreRole)
            .with(Role::Upgrade, &UpgradeRole)
    }

    /// Register `handler` for `role`, replacing any previous one.
    #[must_use]
    pub fn with(mut self, role: Role, handler: &'static dyn RoleHandler) -> Self {
        self.handlers.insert(role, handler);
        self
    }

    /// Whether `role` has a handler.
    pub fn contains(&self, role: Role) -> bool {
        self.handlers.contains_key(&role)
    }

    /// The handler for `role`.
    pub fn handler(&self, role: Role) -> Option<&'static dyn RoleHandler> {
        self.handlers.get(&role).copied()
    }

    /// Registered roles in order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.handlers.keys().copied()
    }
}

impl core::fmt::Debug for RoleRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.roles()).finish()
    }
}

/// What a handler may see and change about the agent it runs for.
#[derive(Debug)]
pub struct AgentContext<'a> {
    id: AgentId,
    memory: &'a mut AgentMemory,
    registry: &'a RoleRegistry,
    transitioned: bool,
}

impl<'a> AgentContext<'a> {
    /// Wrap an agent's memory for one handler invocation.
    pub const fn new(id: AgentId, memory: &'a mut AgentMemory, registry: &'a RoleRegistry) -> Self {
        Self {
            id,
            memory,
            registry,
            transitioned: false,
        }
    }

    /// The agent being run.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Read-only view of the agent's memory.
    pub const fn memory(&self) -> &AgentMemory {
        self.memory
    }

    /// The bound energy source.
    pub const fn source(&self) -> Option<EntityId> {
        self.memory.source
    }

    /// The bound refill structure.
    pub const fn storage(&self) -> Option<EntityId> {
        self.memory.storage
    }

    /// Rebind the energy source.
    pub const fn bind_source(&mut self, source: EntityId) {
        self.memory.source = Some(source);
    }

    /// Whether a transition happened during this invocation.
    pub const fn transitioned(&self) -> bool {
        self.transitioned
    }

    /// Switch to `role`, remembering the current one. A refused transition
    /// is logged by the role stack and leaves the agent as it was.
    pub fn become_role(&mut self, role: Role) {
        if self.memory.role.become_role(role, self.registry).is_ok() {
            self.transitioned = true;
        }
    }

    /// Return to the previous role. A refused return is logged by the role
    /// stack and leaves the agent as it was.
    pub fn unbecome(&mut self) {
        if self.memory.role.unbecome().is_ok() {
            self.transitioned = true;
        }
    }
}

/// Run one tick of `agent`'s current role.
///
/// Time in role advances by one unless the handler transitioned, in which
/// case the new role starts at zero.
///
/// # Errors
///
/// Returns [`DispatchError::Unregistered`] without running anything or
/// touching the record if the current role has no handler.
pub fn work(
    agent: AgentId,
    memory: &mut AgentMemory,
    world: &mut dyn World,
    registry: &RoleRegistry,
) -> Result<(), DispatchError> {
    let role = memory.role.act();
    let Some(handler) = registry.handler(role) else {
        warn!(agent = %agent, role = %role, "no handler for current role");
        return Err(DispatchError::Unregistered { agent, role });
    };

    let mut ctx = AgentContext::new(agent, memory, registry);
    handler.act(&mut ctx, world);
    let transitioned = ctx.transitioned();

    if !transitioned {
        memory.role.advance_age();
    }
    Ok(())
}
