//! Periodic eviction of participants that stopped pinging.
//!
//! Each stale participant is removed and announced on its own; one failing
//! eviction never stops the others, and a failing sweep never stops the loop.

use std::{sync::Arc, time::Duration};

use futures_util::future::join_all;
use tokio::time::MissedTickBehavior;

use crate::{
    clock::Clock,
    db::{MessageBody, MessageKind, Participant},
    participants,
    store::{Store, StoreError},
    visibility::BROADCAST,
};

pub const DEPARTURE_TEXT: &str = "sai da sala...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaperConfig {
    pub interval: Duration,
    pub inactivity_timeout_ms: i64,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self { interval: Duration::from_secs(15), inactivity_timeout_ms: 10_000 }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub evicted: Vec<String>,
    pub failed: Vec<String>,
}

async fn evict(store: &impl Store, clock: &dyn Clock, participant: &Participant) -> Result<bool, StoreError> {
    // someone else got there first; they announce it
    if !store.delete_participant(&participant.name).await? {
        return Ok(false);
    }

    let notice = MessageBody {
        to: BROADCAST.to_owned(),
        text: DEPARTURE_TEXT.to_owned(),
        kind: MessageKind::Status,
    };
    store.insert_message(&participant.name, &notice, &clock.time_of_day()).await?;

    Ok(true)
}

/// One pass: evict everyone idle for longer than `inactivity_timeout_ms`.
///
/// Only the initial scan can fail the sweep as a whole.
pub async fn sweep(
    store: &impl Store,
    clock: &dyn Clock,
    inactivity_timeout_ms: i64,
) -> Result<SweepReport, StoreError> {
    let now = clock.now_millis();
    let stale: Vec<Participant> = store
        .list_participants()
        .await?
        .into_iter()
        .filter(|p| participants::is_stale(p, now, inactivity_timeout_ms))
        .collect();

    let mut evictions = Vec::with_capacity(stale.len());
    for participant in &stale {
        evictions.push(evict(store, clock, participant));
    }
    let outcomes = join_all(evictions).await;

    let mut report = SweepReport::default();
    for (participant, outcome) in stale.into_iter().zip(outcomes) {
        match outcome {
            Ok(true) => {
                tracing::info!(
                    name = %participant.name,
                    last_status = participant.last_status,
                    "evicted inactive participant"
                );
                report.evicted.push(participant.name);
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(name = %participant.name, error = %err, "failed to evict participant");
                report.failed.push(participant.name);
            }
        }
    }

    Ok(report)
}

/// Sweeps forever. The first sweep happens one full interval after start.
pub async fn run<S: Store>(store: S, clock: Arc<dyn Clock>, config: ReaperConfig) {
    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await;

    tracing::info!(interval = ?config.interval, timeout_ms = config.inactivity_timeout_ms, "reaper started");
    loop {
        interval.tick().await;

        match sweep(&store, clock.as_ref(), config.inactivity_timeout_ms).await {
            Ok(report) if report.evicted.is_empty() && report.failed.is_empty() => {}
            Ok(report) => {
                tracing::debug!(evicted = report.evicted.len(), failed = report.failed.len(), "sweep finished");
            }
            Err(err) => tracing::error!(error = %err, "sweep failed"),
        }
    }
}
