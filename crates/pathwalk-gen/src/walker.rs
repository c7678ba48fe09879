//! The pathwalker: an agent that carves a winding corridor.
//!
//! A [`Walker`] is `Active` until its step budget or the global floor budget
//! runs out, then `Terminated` for good. Each [`advance`](Walker::advance)
//! runs a fixed sequence whose order matters, since later phases read what
//! earlier ones changed:
//!
//! 1. carve the current cell;
//! 2. stop if the floor budget is exceeded;
//! 3. maybe spawn a child at the current cell;
//! 4. maybe carve a room;
//! 5. turn (turning back drops a weapon chest);
//! 6. stop if the step budget is spent;
//! 7. step forward.

use pathwalk_core::{Collectible, Direction, Grid, Point, Range, Sink, WalkerId};
use rand::{Rng, RngExt};

use crate::collectibles::Collectibles;
use crate::config::{Config, TurnTable};
use crate::population::Population;

pub use crate::config::Turn;

/// Roll a percentage in `1..=100`. A chance `c` hits when `roll <= c`.
#[inline]
pub fn roll(rng: &mut impl Rng) -> u32 {
    rng.random_range(1..=100u32)
}

#[inline]
fn hits(rng: &mut impl Rng, chance: u32) -> bool {
    roll(rng) <= chance
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WalkerState {
    Active,
    Terminated,
}

/// Everything a walker touches while it advances.
///
/// The generator builds one of these per tick from its own fields; walkers
/// hold no references between ticks.
pub struct WalkContext<'a, R: Rng> {
    pub config: &'a Config,
    pub turns: &'a TurnTable,
    pub grid: &'a mut Grid,
    pub rng: &'a mut R,
    pub population: &'a mut Population,
    pub collectibles: &'a mut Collectibles,
    pub sink: &'a mut dyn Sink,
}

impl<R: Rng> WalkContext<'_, R> {
    /// Queue a new walker at `pos`. It is advanced from the next tick on.
    pub fn spawn(&mut self, pos: Point, max_steps: u32) -> WalkerId {
        let facings = &self.config.initial_facings;
        let direction = facings[self.rng.random_range(0..facings.len())];
        self.population.spawn(pos, direction, max_steps, &mut *self.sink)
    }

    fn drop_chest(&mut self, pos: Point, kind: Collectible) -> pathwalk_core::Result<bool> {
        self.collectibles.drop_at(self.grid, pos, kind, &mut *self.sink)
    }
}

/// A corridor-carving agent.
#[derive(Clone, Debug, PartialEq)]
pub struct Walker {
    id: WalkerId,
    position: Point,
    direction: Direction,
    steps: u32,
    max_steps: u32,
    state: WalkerState,
}

impl Walker {
    pub fn new(id: WalkerId, position: Point, direction: Direction, max_steps: u32) -> Self {
        Self {
            id,
            position,
            direction,
            steps: 0,
            max_steps,
            state: WalkerState::Active,
        }
    }

    #[inline]
    pub fn id(&self) -> WalkerId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[inline]
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    #[inline]
    pub fn state(&self) -> WalkerState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == WalkerState::Active
    }

    /// Run one update. Does nothing once terminated.
    pub fn advance<R: Rng>(&mut self, ctx: &mut WalkContext<'_, R>) -> pathwalk_core::Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        self.steps += 1;
        ctx.sink.on_walker_moved(self.id, self.position);

        ctx.grid.carve_floor(self.position, &mut *ctx.sink)?;
        if ctx.grid.floor_count() > ctx.config.max_floor_count {
            return self.terminate(ctx);
        }

        self.maybe_spawn_child(ctx);
        self.maybe_carve_room(ctx)?;
        self.turn(ctx)?;

        if self.steps >= self.max_steps {
            self.terminate(ctx)?;
        }
        self.move_forward(ctx.grid.bounds());
        Ok(())
    }

    /// Children inherit half the parent's budget, rounded down, so a
    /// one-step walker gets a child with no budget that stops on its first
    /// update. A walker with no budget has nothing to halve and never spawns.
    fn maybe_spawn_child<R: Rng>(&mut self, ctx: &mut WalkContext<'_, R>) {
        if !hits(&mut *ctx.rng, ctx.config.child_spawn_chance) || self.max_steps == 0 {
            return;
        }
        let child = ctx.spawn(self.position, self.max_steps / 2);
        log::debug!("{} spawned {child} at {}", self.id, self.position);
    }

    /// Carve a `room_size_x x room_size_y` rectangle whose lower corner is
    /// the current cell, clipped to the grid. The facing does not matter.
    fn maybe_carve_room<R: Rng>(&mut self, ctx: &mut WalkContext<'_, R>) -> pathwalk_core::Result<()> {
        if !hits(&mut *ctx.rng, ctx.config.room_spawn_chance) {
            return Ok(());
        }
        let size = Point::new(ctx.config.room_size_x, ctx.config.room_size_y);
        let room = Range::with_size(self.position, size).intersect(ctx.grid.bounds());
        for p in room {
            ctx.grid.carve_floor(p, &mut *ctx.sink)?;
        }
        Ok(())
    }

    fn turn<R: Rng>(&mut self, ctx: &mut WalkContext<'_, R>) -> pathwalk_core::Result<()> {
        match ctx.turns.pick(roll(&mut *ctx.rng)) {
            None | Some(Turn::Forward) => {}
            Some(Turn::Left) => self.direction = self.direction.left(),
            Some(Turn::Right) => self.direction = self.direction.right(),
            Some(Turn::Backward) => {
                self.direction = self.direction.reverse();
                ctx.drop_chest(self.position, Collectible::WeaponChest)?;
            }
        }
        Ok(())
    }

    /// Drop the guaranteed ammo chest and stop for good.
    fn terminate<R: Rng>(&mut self, ctx: &mut WalkContext<'_, R>) -> pathwalk_core::Result<()> {
        ctx.drop_chest(self.position, Collectible::AmmoChest)?;
        self.state = WalkerState::Terminated;
        ctx.sink.on_walker_destroyed(self.id);
        log::debug!(
            "{} terminated at {} after {}/{} steps",
            self.id,
            self.position,
            self.steps,
            self.max_steps
        );
        Ok(())
    }

    /// One step in the current direction. A step off the map is not taken.
    fn move_forward(&mut self, bounds: Range) {
        let next = self.position.step(self.direction);
        if bounds.contains(next) {
            self.position = next;
        }
    }
}
