//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure the host loop can hit so the runner
//! can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: swarm_core::ConfigError,
    },

    /// The starting room could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: swarm_world::WorldError,
    },

    /// A tick could not run.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: swarm_core::TickError,
    },

    /// The memory snapshot could not be written.
    #[error("memory store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: swarm_core::StoreError,
    },
}
