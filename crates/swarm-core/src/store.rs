//! Persistent memory: per-agent records plus the planner's plan record.
//!
//! The store is a plain value passed into the planner and the tick cycle.
//! Neither of them removes records: dropping the memory of agents the world
//! no longer knows is the host's call, through [`MemoryStore::retain_live`].
//! Hosts persist the store as JSON:
//!
//! ```json
//! {
//!   "agents": { "<agent id>": { "role": { "act": "harvest", "was": [], "age": 3 } } },
//!   "plan": { "knownAgentRoles": ["harvest"], "plannedSpawns": ["harvest@250"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use swarm_agents::AgentMemory;
use swarm_types::{AgentId, PlanRecord};
use tracing::debug;

/// Errors raised while writing a memory snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The snapshot file could not be read or written.
    #[error("memory snapshot I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The store could not be encoded as JSON.
    #[error("memory snapshot could not be encoded: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Agent records keyed by id, plus the latest plan record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    agents: BTreeMap<AgentId, AgentMemory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    plan: Option<PlanRecord>,
}

impl MemoryStore {
    /// An empty store.
    pub const fn new() -> Self {
        Self {
            agents: BTreeMap::new(),
            plan: None,
        }
    }

    /// The record for `agent`.
    pub fn get(&self, agent: AgentId) -> Option<&AgentMemory> {
        self.agents.get(&agent)
    }

    /// Mutable access to the record for `agent`.
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentMemory> {
        self.agents.get_mut(&agent)
    }

    /// Store `memory` for `agent`, returning any record it replaces.
    pub fn insert(&mut self, agent: AgentId, memory: AgentMemory) -> Option<AgentMemory> {
        self.agents.insert(agent, memory)
    }

    /// Remove the record for `agent`.
    pub fn remove(&mut self, agent: AgentId) -> Option<AgentMemory> {
        self.agents.remove(&agent)
    }

    /// Whether `agent` has a record.
    pub fn contains(&self, agent: AgentId) -> bool {
        self.agents.contains_key(&agent)
    }

    /// Number of agent records.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether there are no agent records.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// All records in id order.
    pub fn records(&self) -> impl Iterator<Item = (AgentId, &AgentMemory)> {
        self.agents.iter().map(|(id, mem)| (*id, mem))
    }

    /// Drop records of agents not in `live`. Returns how many were dropped.
    pub fn retain_live(&mut self, live: &[AgentId]) -> usize {
        let before = self.agents.len();
        self.agents.retain(|id, _| live.contains(id));
        let dropped = before.saturating_sub(self.agents.len());
        if dropped > 0 {
            debug!(dropped, "pruned memory of dead agents");
        }
        dropped
    }

    /// The most recent plan record.
    pub const fn plan(&self) -> Option<&PlanRecord> {
        self.plan.as_ref()
    }

    /// Replace the plan record.
    pub fn set_plan(&mut self, record: PlanRecord) {
        self.plan = Some(record);
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the store to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] or [`StoreError::Io`].
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
