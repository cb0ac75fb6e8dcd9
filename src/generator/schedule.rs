//! Resource schedule generation
//!
//! Two stages:
//! 1. Type schedule: decide, per time slot, which resource types spawn and
//!    for how many slots they stay.
//! 2. Placement: give each spawn a grid point that no other live resource
//!    occupies, a validity window and a weight.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{BotError, Result};
use crate::game::state::Resource;
use crate::generator::arcfour::Arcfour;

/// Rejected placements allowed before giving up on the type schedule
const MAX_PLACEMENT_TRIES: u32 = 1_000_000;

/// Side length of the map grid (coordinates run 0..=GRID_MAX)
const GRID_MAX: i32 = 30;

/// Reserved points: the four corners and the centre
const RESERVED_POINTS: [(i32, i32); 5] = [(0, 0), (0, 30), (15, 15), (30, 0), (30, 30)];

/// Generator input, read from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Game length in time units
    pub period: u64,
    /// Granularity of spawn times and durations
    pub resource_time_resolution: u64,
    /// Average number of live resources to reach
    pub target_num_resource: u64,
    /// Number of back-to-back passes guaranteeing a baseline at every slot
    pub min_num_resource: u64,
    /// Live resources a slot may hold before extra spawns avoid it
    pub max_num_resource: u64,
    /// Denominator for `WeightParam::start`
    pub weight_end: u64,
    pub types: Vec<TypeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub min_time: u64,
    pub max_time: u64,
    /// Relative spawn frequency
    pub probability: u64,
    pub weight_params: Vec<WeightParam>,
}

/// Weight distribution in effect from `start / weight_end` of the period on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightParam {
    pub start: u64,
    pub mu: f64,
    pub sigma: f64,
}

/// Generator output, served to the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    pub resource: Vec<Resource>,
    pub period: u64,
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        let res = self.resource_time_resolution;
        if self.period == 0 || res == 0 || self.period % res != 0 {
            return Err(BotError::Generator(format!(
                "period {} must be a positive multiple of resolution {}",
                self.period, res
            )));
        }
        if self.types.is_empty() {
            return Err(BotError::Generator("no resource types configured".into()));
        }
        for t in &self.types {
            if t.min_time % res != 0 || t.max_time % res != 0 {
                return Err(BotError::Generator(format!(
                    "type {}: times must be multiples of {}",
                    t.kind, res
                )));
            }
            if t.min_time == 0 || t.min_time > t.max_time || t.max_time > self.period {
                return Err(BotError::Generator(format!(
                    "type {}: need 0 < min_time <= max_time <= period",
                    t.kind
                )));
            }
            if t.weight_params.is_empty() {
                return Err(BotError::Generator(format!("type {}: no weight params", t.kind)));
            }
            if t.weight_params.windows(2).any(|w| w[0].start >= w[1].start) {
                return Err(BotError::Generator(format!(
                    "type {}: weight param starts must increase",
                    t.kind
                )));
            }
        }
        if self.total_probability() == 0 {
            return Err(BotError::Generator("type probabilities sum to zero".into()));
        }
        Ok(())
    }

    fn total_probability(&self) -> u64 {
        self.types.iter().map(|t| t.probability).sum()
    }

    fn slot_count(&self) -> usize {
        (self.period / self.resource_time_resolution) as usize
    }
}

/// Spawns per starting slot: (type index, duration in slots)
type TypeSchedule = AHashMap<usize, Vec<(usize, usize)>>;

/// Generate a full resource schedule
pub fn generate(config: &GeneratorConfig, rng: &mut Arcfour) -> Result<GeneratedSchedule> {
    config.validate()?;
    let schedule = generate_type_schedule(config, rng)?;
    let res = config.resource_time_resolution;

    let mut points = candidate_points();
    let mut releases: AHashMap<usize, Vec<(i32, i32)>> = AHashMap::new();
    let mut resource = Vec::new();

    for slot in 0..config.slot_count() {
        // A point is reusable from the slot its previous resource expires
        if let Some(freed) = releases.remove(&slot) {
            points.extend(freed);
        }

        let Some(spawns) = schedule.get(&slot) else {
            continue;
        };
        for &(type_idx, duration) in spawns {
            let id = resource.len() as u32 + 1;
            let pick = rng.next(points.len() as u64).map_err(|_| {
                BotError::Generator(format!("no free point left at slot {}", slot))
            })? as usize;
            let (x, y) = points.remove(pick);
            releases.entry(slot + duration).or_default().push((x, y));

            let t0 = slot as u64 * res;
            let t1 = (slot + duration) as u64 * res;
            let type_config = &config.types[type_idx];
            let param = select_weight_param(
                config.weight_end,
                &type_config.weight_params,
                t0,
                config.period,
            )
            .ok_or_else(|| {
                BotError::Generator(format!("type {}: no weight params", type_config.kind))
            })?;
            let weight = (rng.next_normal(param.mu, param.sigma).round_ties_even() as i64).max(1);

            resource.push(Resource {
                id,
                x,
                y,
                t0: t0 as i64,
                t1: t1 as i64,
                kind: type_config.kind.clone(),
                weight,
            });
        }
    }

    tracing::info!(
        "Generated {} resources over period {}",
        resource.len(),
        config.period
    );

    Ok(GeneratedSchedule {
        resource,
        period: config.period,
    })
}

fn candidate_points() -> Vec<(i32, i32)> {
    let mut points = Vec::with_capacity(((GRID_MAX + 1) * (GRID_MAX + 1)) as usize);
    for x in 0..=GRID_MAX {
        for y in 0..=GRID_MAX {
            if !RESERVED_POINTS.contains(&(x, y)) {
                points.push((x, y));
            }
        }
    }
    points
}

fn generate_type_schedule(config: &GeneratorConfig, rng: &mut Arcfour) -> Result<TypeSchedule> {
    let res = config.resource_time_resolution;
    let slots = config.slot_count();
    let total_probability = config.total_probability();
    let durations: Vec<(u64, u64)> = config
        .types
        .iter()
        .map(|t| (t.min_time / res, t.max_time / res))
        .collect();

    let mut counter = vec![0u64; slots];
    let mut covered: u64 = 0;
    let mut schedule = TypeSchedule::new();

    // Baseline: tile the whole timeline min_num_resource times
    for _ in 0..config.min_num_resource {
        let mut start = 0usize;
        while start < slots {
            let type_idx = random_type(rng, total_probability, &config.types)?;
            let (min, max) = durations[type_idx];
            let len = rng.next_range(min, max + 1)? as usize;
            if start + len > slots {
                start = slots - len;
            }
            schedule.entry(start).or_default().push((type_idx, len));
            covered += len as u64;
            for c in &mut counter[start..start + len] {
                *c += 1;
            }
            start += len;
        }
    }

    // Fill up to the target density, avoiding saturated slots
    let target = slots as u64 * config.target_num_resource;
    while covered < target {
        let type_idx = random_type(rng, total_probability, &config.types)?;
        let (min, max) = durations[type_idx];
        let len = rng.next_range(min, max + 1)? as usize;

        let mut placed = false;
        for _ in 0..MAX_PLACEMENT_TRIES {
            let start = rng.next((slots - len + 1) as u64)? as usize;
            if counter[start..start + len]
                .iter()
                .all(|&c| c < config.max_num_resource)
            {
                schedule.entry(start).or_default().push((type_idx, len));
                covered += len as u64;
                for c in &mut counter[start..start + len] {
                    *c += 1;
                }
                placed = true;
                break;
            }
        }
        if !placed {
            return Err(BotError::Generator(format!(
                "could not place a {}-slot span after {} tries",
                len, MAX_PLACEMENT_TRIES
            )));
        }
    }

    Ok(schedule)
}

fn random_type(rng: &mut Arcfour, total_probability: u64, types: &[TypeConfig]) -> Result<usize> {
    let mut roll = rng.next(total_probability)?;
    for (i, t) in types.iter().enumerate() {
        if roll < t.probability {
            return Ok(i);
        }
        roll -= t.probability;
    }
    Err(BotError::Generator("invalid type probability".into()))
}

/// Parameter whose segment contains `t0`; segments are compared as
/// `t0 / period` against `start / weight_end` without dividing
fn select_weight_param(
    weight_end: u64,
    params: &[WeightParam],
    t0: u64,
    period: u64,
) -> Option<&WeightParam> {
    for i in 1..params.len() {
        if t0 * weight_end < params[i].start * period {
            return Some(&params[i - 1]);
        }
    }
    params.last()
}
