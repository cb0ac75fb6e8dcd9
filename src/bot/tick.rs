//! Tick loop - orchestrates one decision cycle
//!
//! fetch -> check status -> classify -> assign -> dispatch -> sleep
//!
//! Each tick rebuilds everything from a fresh snapshot; the only state that
//! survives between ticks is the RNG.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::api::transport::Transport;
use crate::bot::dispatch::dispatch;
use crate::core::config::BotConfig;
use crate::core::error::{ensure_ok, Result};
use crate::core::types::{GameTime, Location, UnitIndex};
use crate::game::assignment::{Assignment, AssignmentStrategy};
use crate::game::availability::available_locations;
use crate::game::classify::classify_units;
use crate::game::score::{score, status_line};
use crate::game::state::MoveResponse;

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Game time of the snapshot the decisions were based on
    pub now: GameTime,
    pub score: Option<f64>,
    /// Units that kept an available target
    pub satisfied: Vec<(UnitIndex, Location)>,
    /// Units that needed a target, whether or not they got one
    pub idle: Vec<UnitIndex>,
    /// Moves that were issued and accepted
    pub assignments: Vec<Assignment>,
    /// Plans the server returned for each accepted move, in issue order
    pub accepted: Vec<MoveResponse>,
}

impl TickReport {
    /// Idle units left without a target this tick
    pub fn unassigned(&self) -> Vec<UnitIndex> {
        self.idle
            .iter()
            .copied()
            .filter(|u| !self.assignments.iter().any(|a| a.unit == *u))
            .collect()
    }
}

/// The collector bot: a transport, a strategy and the RNG the strategy draws from
pub struct Bot<'a, T: Transport, S: AssignmentStrategy> {
    config: &'a BotConfig,
    transport: T,
    strategy: S,
    rng: ChaCha8Rng,
}

impl<'a, T: Transport, S: AssignmentStrategy> Bot<'a, T, S> {
    pub fn new(config: &'a BotConfig, transport: T, strategy: S, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            transport,
            strategy,
            rng,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run a single decision cycle without sleeping
    pub async fn tick(&mut self) -> Result<TickReport> {
        let game = self.transport.fetch_state().await?;
        ensure_ok(&game.status)?;

        println!("{}", status_line(&game.owned_resources));
        let score = score(&game.owned_resources);
        if score.is_none() {
            tracing::warn!(
                "Only {} resource types owned, score unavailable",
                game.owned_resources.len()
            );
        }

        let units = game.units_checked(self.config.unit_count)?;
        let available = available_locations(&game.resources, game.now);
        let total_available = available.len();
        let classification = classify_units(units, available)?;

        tracing::debug!(
            "t={} available={} satisfied={} idle={}",
            game.now,
            total_available,
            classification.satisfied.len(),
            classification.idle.len()
        );

        let assignments =
            self.strategy
                .assign(&classification.idle, classification.available, &mut self.rng);
        let accepted = dispatch(&self.transport, &assignments).await?;

        Ok(TickReport {
            now: game.now,
            score,
            satisfied: classification.satisfied,
            idle: classification.idle,
            assignments,
            accepted,
        })
    }

    /// Tick forever, sleeping a fixed interval after each tick
    ///
    /// Returns only when an error is fatal under the configured
    /// [`ErrorPolicy`](crate::core::config::ErrorPolicy).
    pub async fn run(&mut self) -> Result<()> {
        let mut failures: u32 = 0;

        loop {
            match self.tick().await {
                Ok(report) => {
                    failures = 0;
                    tracing::debug!(
                        "t={} issued {} moves, {} units left idle",
                        report.now,
                        report.assignments.len(),
                        report.unassigned().len()
                    );
                }
                Err(err) => {
                    failures += 1;
                    match self.config.error_policy.retry_delay(&err, failures) {
                        Some(delay) => {
                            tracing::warn!(
                                "Tick failed ({}), retry {} in {:?}",
                                err,
                                failures,
                                delay
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        None => return Err(err),
                    }
                }
            }

            tokio::time::sleep(self.config.tick_interval).await;
        }
    }
}

/// RNG for the assignment strategy: the configured seed, or the wall clock
pub fn seeded_rng(config: &BotConfig) -> ChaCha8Rng {
    let seed = config.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    tracing::info!("Assignment RNG seed: {}", seed);
    ChaCha8Rng::seed_from_u64(seed)
}
