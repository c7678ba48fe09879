//! The [`Sink`] trait, where generation decisions are reported.
//!
//! The generator never renders anything itself. Every carve, wall, chest and
//! walker lifecycle change is forwarded to a sink as a fire-and-forget
//! notification; the generator never reads anything back.

use std::fmt;

use crate::geom::{Point, Vec2};
use crate::tile::Collectible;

/// Identifier of a walker, unique within one generation run and increasing
/// in spawn order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkerId(pub u64);

impl fmt::Display for WalkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "walker#{}", self.0)
    }
}

/// Receiver of generation notifications. Every method defaults to a no-op so
/// implementors only override what they draw.
pub trait Sink {
    /// A new run started on a `size` grid; `origin` is the world-space
    /// reference point (where a camera would be centred).
    fn on_generation_started(&mut self, _size: Point, _scale: f64, _origin: Vec2) {}

    fn on_floor_carved(&mut self, _pos: Point) {}

    fn on_wall_placed(&mut self, _pos: Point) {}

    fn on_collectible_placed(&mut self, _pos: Point, _kind: Collectible) {}

    /// A collectible was discarded by the retention pass.
    fn on_collectible_removed(&mut self, _pos: Point, _kind: Collectible) {}

    fn on_walker_spawned(&mut self, _id: WalkerId, _pos: Point) {}

    /// Called at the start of each walker update with its current cell.
    fn on_walker_moved(&mut self, _id: WalkerId, _pos: Point) {}

    fn on_walker_destroyed(&mut self, _id: WalkerId) {}

    fn on_player_placed(&mut self, _pos: Vec2) {}

    /// Finalization is done; the grid is in its final state.
    fn on_generation_complete(&mut self) {}
}

/// A sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Sink for NullSink {}

impl Sink for () {}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn on_generation_started(&mut self, size: Point, scale: f64, origin: Vec2) {
        (**self).on_generation_started(size, scale, origin)
    }
    fn on_floor_carved(&mut self, pos: Point) {
        (**self).on_floor_carved(pos)
    }
    fn on_wall_placed(&mut self, pos: Point) {
        (**self).on_wall_placed(pos)
    }
    fn on_collectible_placed(&mut self, pos: Point, kind: Collectible) {
        (**self).on_collectible_placed(pos, kind)
    }
    fn on_collectible_removed(&mut self, pos: Point, kind: Collectible) {
        (**self).on_collectible_removed(pos, kind)
    }
    fn on_walker_spawned(&mut self, id: WalkerId, pos: Point) {
        (**self).on_walker_spawned(id, pos)
    }
    fn on_walker_moved(&mut self, id: WalkerId, pos: Point) {
        (**self).on_walker_moved(id, pos)
    }
    fn on_walker_destroyed(&mut self, id: WalkerId) {
        (**self).on_walker_destroyed(id)
    }
    fn on_player_placed(&mut self, pos: Vec2) {
        (**self).on_player_placed(pos)
    }
    fn on_generation_complete(&mut self) {
        (**self).on_generation_complete()
    }
}

/// One recorded notification.
#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    Started { size: Point, scale: f64, origin: Vec2 },
    FloorCarved(Point),
    WallPlaced(Point),
    CollectiblePlaced(Point, Collectible),
    CollectibleRemoved(Point, Collectible),
    WalkerSpawned(WalkerId, Point),
    WalkerMoved(WalkerId, Point),
    WalkerDestroyed(WalkerId),
    PlayerPlaced(Vec2),
    Complete,
}

/// A sink that keeps every notification in order. Useful for tests and for
/// replaying a run step by step.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the events matching a predicate.
    pub fn count(&self, f: impl Fn(&SinkEvent) -> bool) -> usize {
        self.events.iter().filter(|e| f(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Sink for RecordingSink {
    fn on_generation_started(&mut self, size: Point, scale: f64, origin: Vec2) {
        self.events.push(SinkEvent::Started {
            size,
            scale,
            origin,
        });
    }
    fn on_floor_carved(&mut self, pos: Point) {
        self.events.push(SinkEvent::FloorCarved(pos));
    }
    fn on_wall_placed(&mut self, pos: Point) {
        self.events.push(SinkEvent::WallPlaced(pos));
    }
    fn on_collectible_placed(&mut self, pos: Point, kind: Collectible) {
        self.events.push(SinkEvent::CollectiblePlaced(pos, kind));
    }
    fn on_collectible_removed(&mut self, pos: Point, kind: Collectible) {
        self.events.push(SinkEvent::CollectibleRemoved(pos, kind));
    }
    fn on_walker_spawned(&mut self, id: WalkerId, pos: Point) {
        self.events.push(SinkEvent::WalkerSpawned(id, pos));
    }
    fn on_walker_moved(&mut self, id: WalkerId, pos: Point) {
        self.events.push(SinkEvent::WalkerMoved(id, pos));
    }
    fn on_walker_destroyed(&mut self, id: WalkerId) {
        self.events.push(SinkEvent::WalkerDestroyed(id));
    }
    fn on_player_placed(&mut self, pos: Vec2) {
        self.events.push(SinkEvent::PlayerPlaced(pos));
    }
    fn on_generation_complete(&mut self) {
        self.events.push(SinkEvent::Complete);
    }
}
