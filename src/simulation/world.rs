//! The world: clock, scheduler, units, and the seeded RNG
//!
//! All randomness flows through one `ChaCha8Rng`, so a seed plus a
//! command sequence replays to an identical signal stream.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::ScenarioConfig;
use crate::core::error::{FirelineError, Result};
use crate::core::types::{Tick, UnitId, Vec2};
use crate::entity::character::Character;
use crate::entity::unit::Unit;
use crate::simulation::clock::GameClock;
use crate::simulation::events::CombatSignal;
use crate::simulation::scheduler::EventScheduler;
use crate::simulation::{state_machine, tick};

pub struct World {
    pub clock: GameClock,
    pub scheduler: EventScheduler,
    pub units: Vec<Unit>,
    pub rng: ChaCha8Rng,
    pub config: ScenarioConfig,
}

impl World {
    pub fn new(config: ScenarioConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            clock: GameClock::new(),
            scheduler: EventScheduler::new(),
            units: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        })
    }

    /// A world with default tuning, seeded for reproducibility
    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::new(ScenarioConfig::default(), seed)
    }

    pub fn now(&self) -> Tick {
        self.clock.current()
    }

    pub fn spawn_unit(&mut self, character: Character, position: Vec2) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        self.units.push(Unit::new(id, character, position));
        id
    }

    pub fn unit(&self, id: UnitId) -> Result<&Unit> {
        self.units
            .get(id.index())
            .ok_or(FirelineError::UnitNotFound(id))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Result<&mut Unit> {
        self.units
            .get_mut(id.index())
            .ok_or(FirelineError::UnitNotFound(id))
    }

    /// Order a unit to bring its weapon up to ready
    pub fn ready_weapon(&mut self, unit: UnitId) -> Result<()> {
        state_machine::ready_weapon(self, unit)
    }

    /// Order a unit to attack another; repeat to queue follow-up shots
    pub fn start_attack(&mut self, shooter: UnitId, target: UnitId) -> Result<()> {
        state_machine::start_attack(self, shooter, target)
    }

    /// Order a unit to move; incapacitated units ignore it
    pub fn move_unit(&mut self, unit: UnitId, destination: Vec2) -> Result<()> {
        self.unit_mut(unit)?.set_move_target(destination);
        Ok(())
    }

    /// Advance the simulation one tick
    pub fn run_tick(&mut self) -> Result<Vec<CombatSignal>> {
        tick::run_tick(self)
    }

    /// Tear the scenario down: clock to zero, queue and units emptied
    pub fn reset(&mut self) {
        self.clock.reset();
        self.scheduler.clear();
        self.units.clear();
    }
}
