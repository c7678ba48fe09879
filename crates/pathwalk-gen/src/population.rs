//! The live-walker set.
//!
//! Walkers live in insertion order. Children spawned during a tick go to a
//! pending queue and join the live set only when the tick ends, so a child
//! is never advanced in the tick that created it and the live list is never
//! appended to while it is being iterated.

use pathwalk_core::{Direction, Point, Sink, WalkerId};

use crate::walker::Walker;

#[derive(Debug, Default, Clone)]
pub struct Population {
    live: Vec<Walker>,
    pending: Vec<Walker>,
    next_id: u64,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every walker and restart ids from zero.
    pub fn clear(&mut self) {
        self.live.clear();
        self.pending.clear();
        self.next_id = 0;
    }

    /// Create a walker and queue it. It becomes live at the end of the
    /// current tick (or on [`promote_pending`](Self::promote_pending)).
    pub fn spawn(
        &mut self,
        pos: Point,
        direction: Direction,
        max_steps: u32,
        sink: &mut dyn Sink,
    ) -> WalkerId {
        let id = WalkerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Walker::new(id, pos, direction, max_steps));
        sink.on_walker_spawned(id, pos);
        id
    }

    /// Walkers advanced by the current tick, in insertion order.
    pub fn live(&self) -> &[Walker] {
        &self.live
    }

    /// Walkers waiting for the next tick.
    pub fn pending(&self) -> &[Walker] {
        &self.pending
    }

    /// Number of walkers, live or pending.
    pub fn len(&self) -> usize {
        self.live.len() + self.pending.len()
    }

    /// Whether every walker has terminated.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.pending.is_empty()
    }

    /// Total walkers created since the last [`clear`](Self::clear).
    pub fn spawned(&self) -> u64 {
        self.next_id
    }

    /// Move the live walkers out for a tick. Hand them back with
    /// [`end_tick`](Self::end_tick).
    pub fn begin_tick(&mut self) -> Vec<Walker> {
        std::mem::take(&mut self.live)
    }

    /// Take back the walkers of a tick, drop the terminated ones, then
    /// append the children spawned during the tick.
    pub fn end_tick(&mut self, mut walkers: Vec<Walker>) {
        walkers.retain(Walker::is_active);
        walkers.append(&mut self.live);
        self.live = walkers;
        self.promote_pending();
    }

    /// Make every pending walker live.
    pub fn promote_pending(&mut self) {
        self.live.append(&mut self.pending);
    }

    /// Remove every walker, reporting each one to the sink.
    pub fn destroy_all(&mut self, sink: &mut dyn Sink) {
        for w in self.live.drain(..).chain(self.pending.drain(..)) {
            sink.on_walker_destroyed(w.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwalk_core::{NullSink, RecordingSink, SinkEvent};

    #[test]
    fn spawned_walkers_wait_for_the_tick_boundary() {
        let mut pop = Population::new();
        let a = pop.spawn(Point::new(1, 1), Direction::Up, 4, &mut NullSink);
        pop.promote_pending();
        assert_eq!(pop.live().len(), 1);

        let walkers = pop.begin_tick();
        let b = pop.spawn(Point::new(2, 2), Direction::Left, 2, &mut NullSink);
        assert!(pop.live().is_empty());
        assert_eq!(pop.len(), 1);
        pop.end_tick(walkers);

        let ids: Vec<_> = pop.live().iter().map(Walker::id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(pop.pending().is_empty());
        assert_eq!(pop.spawned(), 2);
    }

    #[test]
    fn ids_increase_in_spawn_order() {
        let mut pop = Population::new();
        let mut sink = RecordingSink::new();
        let a = pop.spawn(Point::ZERO, Direction::Up, 1, &mut sink);
        let b = pop.spawn(Point::ZERO, Direction::Up, 1, &mut sink);
        assert!(a < b);
        assert_eq!(sink.events[1], SinkEvent::WalkerSpawned(b, Point::ZERO));
        pop.clear();
        assert_eq!(pop.spawn(Point::ZERO, Direction::Up, 1, &mut sink), WalkerId(0));
    }

    #[test]
    fn destroy_all_reports_every_walker() {
        let mut pop = Population::new();
        pop.spawn(Point::ZERO, Direction::Up, 1, &mut NullSink);
        pop.promote_pending();
        pop.spawn(Point::ZERO, Direction::Down, 1, &mut NullSink);
        let mut sink = RecordingSink::new();
        pop.destroy_all(&mut sink);
        assert!(pop.is_empty());
        assert_eq!(sink.count(|e| matches!(e, SinkEvent::WalkerDestroyed(_))), 2);
    }
}
