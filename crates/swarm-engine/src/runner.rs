//! Paced tick loop.
//!
//! Runs [`run_tick`] on a fixed real-time interval until the configured
//! tick limit is reached or the process receives Ctrl-C. Before each tick
//! the host drops the memory of agents the world has removed.

use std::time::Duration;

use swarm_core::config::EngineConfig;
use swarm_core::{Colony, TickSummary, run_tick};
use swarm_world::{Clock, Spawner, World};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::error::EngineError;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// `max_ticks` ticks ran.
    MaxTicksReached,
    /// The operator interrupted the process.
    Interrupted,
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Why the loop stopped.
    pub end_reason: EndReason,
    /// Ticks executed.
    pub total_ticks: u64,
    /// Summary of the last tick, if any ran.
    pub final_summary: Option<TickSummary>,
}

/// Resolves on Ctrl-C. Never resolves if the signal cannot be watched.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "cannot listen for Ctrl-C, run until tick limit");
        std::future::pending::<()>().await;
    }
}

/// Drive `colony` against `world` until a stop condition is met.
///
/// A `max_ticks` of zero runs until interrupted. A `tick_interval_ms` of
/// zero is treated as one millisecond.
///
/// # Errors
///
/// Returns [`EngineError::Tick`] if a tick cannot be planned.
pub async fn run_colony<W>(
    colony: &mut Colony,
    world: &mut W,
    config: &EngineConfig,
) -> Result<RunResult, EngineError>
where
    W: World + Spawner + Clock,
{
    let mut interval = tokio::time::interval(Duration::from_millis(config.tick_interval_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = interrupted();
    tokio::pin!(shutdown);

    let mut total_ticks: u64 = 0;
    let mut final_summary = None;

    loop {
        if config.max_ticks > 0 && total_ticks >= config.max_ticks {
            info!(total_ticks, max_ticks = config.max_ticks, "Tick limit reached");
            return Ok(RunResult {
                end_reason: EndReason::MaxTicksReached,
                total_ticks,
                final_summary,
            });
        }

        tokio::select! {
            () = &mut shutdown => {
                info!(total_ticks, "Interrupt received");
                return Ok(RunResult {
                    end_reason: EndReason::Interrupted,
                    total_ticks,
                    final_summary,
                });
            }
            _ = interval.tick() => {}
        }

        colony.store.retain_live(&world.live_agents());
        let summary = run_tick(colony, world)?;
        total_ticks = total_ticks.saturating_add(1);
        final_summary = Some(summary);
    }
}

/// Log how a run ended.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Run ended"
    );

    if let Some(summary) = &result.final_summary {
        info!(
            tick = summary.tick,
            live_agents = summary.live_agents,
            planned = summary.planned,
            forced_transitions = summary.forced_transitions,
            "Final tick summary"
        );
    } else {
        warn!("Run ended with no ticks executed");
    }
}
