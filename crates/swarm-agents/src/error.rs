//! Error types for the swarm-agents crate.
//!
//! Role transitions and dispatch fail with typed errors instead of silently
//! corrupting an agent's record. A failed transition leaves the record
//! exactly as it was.

use swarm_types::{AgentId, Role};

/// Errors raised by role-stack transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RoleError {
    /// The requested role has no handler in the registry.
    #[error("role {0} is not registered")]
    Unregistered(Role),

    /// `unbecome` was called with nothing to return to.
    #[error("cannot unbecome from {current}: role history is empty")]
    EmptyHistory {
        /// The role the agent keeps.
        current: Role,
    },
}

/// Errors raised while dispatching an agent's current role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The agent's current role has no handler.
    #[error("agent {agent} holds role {role}, which has no handler")]
    Unregistered {
        /// The agent that could not be dispatched.
        agent: AgentId,
        /// Its current role.
        role: Role,
    },
}
