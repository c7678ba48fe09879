//! The generation session.
//!
//! A [`Generator`] owns everything one run needs: the configuration, grid,
//! random source, walker population, chest records and the [`Sink`] that
//! receives notifications. Drivers call [`start_generation`] once and then
//! [`tick`] (or [`frame`] from a fixed-rate scheduler) until
//! [`is_complete`] reports `true`. [`run`] does all of that in one call.
//!
//! [`start_generation`]: Generator::start_generation
//! [`tick`]: Generator::tick
//! [`frame`]: Generator::frame
//! [`is_complete`]: Generator::is_complete
//! [`run`]: Generator::run

use log::{info, trace};
use pathwalk_core::{Grid, NullSink, Point, Sink, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collectibles::{CollectibleRecord, Collectibles};
use crate::config::{Config, TurnTable};
use crate::error::{Error, Result};
use crate::finalize::finalize;
use crate::pacer::Pacer;
use crate::population::Population;
use crate::walker::{WalkContext, Walker};

/// Where a session is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No run started yet.
    Idle,
    /// Walkers are carving.
    Walking,
    /// The map is finalized.
    Complete,
    /// The run was stopped before finalization.
    Cancelled,
}

/// Outcome of a finished run.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub floor_count: usize,
    pub walls: usize,
    pub ticks: u64,
    pub walkers_spawned: u64,
    pub weapon_chest: Option<CollectibleRecord>,
    pub ammo_chest: Option<CollectibleRecord>,
    pub player: Vec2,
}

/// A pathwalker generation session.
pub struct Generator<S: Sink = NullSink> {
    config: Config,
    turns: TurnTable,
    grid: Grid,
    rng: StdRng,
    population: Population,
    collectibles: Collectibles,
    sink: S,
    pacer: Pacer,
    ticks: u64,
    phase: Phase,
    summary: Option<Summary>,
}

impl<S: Sink> Generator<S> {
    /// Create an idle session. The configuration is checked right away.
    pub fn new(config: Config, sink: S) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.x_size, config.y_size, config.map_scale)?;
        Ok(Self {
            turns: TurnTable::new(&config),
            rng: StdRng::seed_from_u64(config.seed),
            pacer: Pacer::new(config.tick_interval),
            config,
            grid,
            population: Population::new(),
            collectibles: Collectibles::new(),
            sink,
            ticks: 0,
            phase: Phase::Idle,
            summary: None,
        })
    }

    /// Start a fresh run from an empty grid with one walker at its centre.
    ///
    /// Any run in progress is discarded. The random source is reseeded from
    /// the configuration, so restarting reproduces the same map.
    pub fn start_generation(&mut self) -> Result<()> {
        self.config.validate()?;
        if self.phase == Phase::Walking {
            self.population.destroy_all(&mut self.sink);
        }
        self.grid = Grid::new(self.config.x_size, self.config.y_size, self.config.map_scale)?;
        self.turns = TurnTable::new(&self.config);
        self.rng = StdRng::seed_from_u64(self.config.seed);
        self.population.clear();
        self.collectibles.clear();
        self.pacer.reset();
        self.ticks = 0;
        self.summary = None;

        self.sink
            .on_generation_started(self.grid.size(), self.grid.scale(), self.grid.origin());
        let start = Point::new(self.config.x_size / 2, self.config.y_size / 2);
        let distance = self.config.path_walker_distance;
        let first = self.context().spawn(start, distance);
        self.population.promote_pending();
        self.phase = Phase::Walking;
        info!(
            "generation started: {}x{} seed {} ({first} at {start}, one tick per {} frames)",
            self.config.x_size,
            self.config.y_size,
            self.config.seed,
            self.pacer.interval()
        );
        Ok(())
    }

    fn context(&mut self) -> WalkContext<'_, StdRng> {
        WalkContext {
            config: &self.config,
            turns: &self.turns,
            grid: &mut self.grid,
            rng: &mut self.rng,
            population: &mut self.population,
            collectibles: &mut self.collectibles,
            sink: &mut self.sink,
        }
    }

    /// Advance every live walker once, in insertion order, then admit the
    /// children they spawned. Finalizes the map when no walker remains.
    ///
    /// Returns whether the run is complete. Outside of a run this does
    /// nothing.
    pub fn tick(&mut self) -> Result<bool> {
        if self.phase != Phase::Walking {
            return Ok(self.is_complete());
        }
        let mut walkers = self.population.begin_tick();
        let mut ctx = self.context();
        let advanced = walkers.iter_mut().try_for_each(|w| w.advance(&mut ctx));
        self.population.end_tick(walkers);
        self.ticks += 1;
        if let Err(err) = advanced {
            self.phase = Phase::Cancelled;
            return Err(err.into());
        }
        trace!(
            "tick {}: {} walkers, {} floor tiles",
            self.ticks,
            self.population.len(),
            self.grid.floor_count()
        );
        if self.population.is_empty() {
            self.finish();
        }
        Ok(self.is_complete())
    }

    fn finish(&mut self) {
        let done = finalize(&mut self.grid, &mut self.collectibles, &mut self.sink);
        let summary = Summary {
            floor_count: self.grid.floor_count(),
            walls: done.walls,
            ticks: self.ticks,
            walkers_spawned: self.population.spawned(),
            weapon_chest: done.weapon_chest,
            ammo_chest: done.ammo_chest,
            player: done.player,
        };
        info!(
            "generation complete after {} ticks: {} floor, {} walls, {} walkers",
            summary.ticks, summary.floor_count, summary.walls, summary.walkers_spawned
        );
        self.summary = Some(summary);
        self.phase = Phase::Complete;
    }

    /// Scheduler callback. Ticks once every `tick_interval` calls.
    pub fn frame(&mut self) -> Result<bool> {
        if self.phase == Phase::Walking && self.pacer.frame() {
            return self.tick();
        }
        Ok(self.is_complete())
    }

    /// Drive a run to completion, starting one unless a run is already in
    /// progress.
    ///
    /// With `max_ticks` set, a run still walking after that many ticks is
    /// left unfinalized and [`Error::TickLimit`] is returned.
    pub fn run(&mut self, max_ticks: Option<u64>) -> Result<Summary> {
        if self.phase != Phase::Walking {
            self.start_generation()?;
        }
        loop {
            self.tick()?;
            if let Some(summary) = self.summary {
                return Ok(summary);
            }
            if let Some(limit) = max_ticks {
                if self.ticks >= limit {
                    return Err(Error::TickLimit(limit));
                }
            }
        }
    }

    /// Stop the current run without finalizing it.
    pub fn cancel(&mut self) {
        if self.phase != Phase::Walking {
            return;
        }
        self.population.destroy_all(&mut self.sink);
        self.phase = Phase::Cancelled;
        info!("generation cancelled after {} ticks", self.ticks);
    }

    /// Replace the configuration. A run in progress is cancelled; the new
    /// values apply from the next [`start_generation`](Self::start_generation).
    pub fn set_config(&mut self, config: Config) -> Result<()> {
        config.validate()?;
        self.cancel();
        self.pacer = Pacer::new(config.tick_interval);
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn collectibles(&self) -> &Collectibles {
        &self.collectibles
    }

    /// Walkers that the next tick will advance.
    pub fn live_walkers(&self) -> &[Walker] {
        self.population.live()
    }

    /// Ticks run so far in the current run.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Set once the run is complete.
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
