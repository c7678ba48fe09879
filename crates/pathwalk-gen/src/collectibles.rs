//! Placed chests and the furthest-chest retention policy.

use pathwalk_core::{Collectible, Grid, Point, Sink};

/// A chest that was successfully placed on a floor tile.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectibleRecord {
    pub kind: Collectible,
    pub pos: Point,
    /// World-space distance from the map origin at placement time.
    pub distance: f64,
}

/// Every chest placed during a run, in placement order.
#[derive(Debug, Default, Clone)]
pub struct Collectibles {
    records: Vec<CollectibleRecord>,
}

impl Collectibles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Place a chest on the grid and track it. Returns `Ok(false)` and
    /// tracks nothing when the cell is not floor.
    pub fn drop_at(
        &mut self,
        grid: &mut Grid,
        pos: Point,
        kind: Collectible,
        sink: &mut dyn Sink,
    ) -> pathwalk_core::Result<bool> {
        if !grid.place_collectible(pos, kind, sink)? {
            return Ok(false);
        }
        let distance = grid.world(pos).distance(grid.origin());
        self.records.push(CollectibleRecord {
            kind,
            pos,
            distance,
        });
        Ok(true)
    }

    pub fn records(&self) -> &[CollectibleRecord] {
        &self.records
    }

    /// Records of one kind, in placement order.
    pub fn of_kind(&self, kind: Collectible) -> impl Iterator<Item = &CollectibleRecord> + '_ {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index (into [`records`](Self::records)) of the furthest chest of
    /// `kind`. Ties go to the first one placed.
    pub fn furthest(&self, kind: Collectible) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, r) in self.records.iter().enumerate() {
            if r.kind != kind {
                continue;
            }
            match best {
                Some((_, d)) if r.distance <= d => {}
                _ => best = Some((i, r.distance)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Keep only the furthest chest of `kind` and discard the others.
    ///
    /// Discarded chests are reported to the sink and their tile tag is
    /// cleared, unless the tile now shows a different chest or the kept
    /// chest sits on the same tile. Returns the kept record.
    pub fn retain_furthest(
        &mut self,
        kind: Collectible,
        grid: &mut Grid,
        sink: &mut dyn Sink,
    ) -> Option<CollectibleRecord> {
        let keep = self.furthest(kind)?;
        let kept = self.records[keep];
        let mut removed = 0;
        let mut i = 0;
        self.records.retain(|r| {
            let idx = i;
            i += 1;
            if r.kind != kind || idx == keep {
                return true;
            }
            sink.on_collectible_removed(r.pos, r.kind);
            if r.pos != kept.pos
                && grid.at(r.pos).and_then(|t| t.collectible) == Some(kind)
            {
                grid.clear_collectible(r.pos);
            }
            removed += 1;
            false
        });
        log::debug!(
            "kept {kind} at {} ({:.2} from origin), discarded {removed}",
            kept.pos,
            kept.distance
        );
        Some(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwalk_core::{NullSink, RecordingSink, SinkEvent};

    fn floor_grid(cells: &[Point]) -> Grid {
        let mut g = Grid::new(10, 10, 1.0).unwrap();
        for &p in cells {
            g.carve_floor(p, &mut NullSink).unwrap();
        }
        g
    }

    #[test]
    fn drop_requires_floor() {
        let mut g = floor_grid(&[Point::new(5, 5)]);
        let mut c = Collectibles::new();
        assert!(!c.drop_at(&mut g, Point::new(1, 1), Collectible::AmmoChest, &mut NullSink).unwrap());
        assert!(c.drop_at(&mut g, Point::new(5, 5), Collectible::AmmoChest, &mut NullSink).unwrap());
        assert_eq!(c.len(), 1);
        assert_eq!(c.records()[0].distance, 0.0);
    }

    #[test]
    fn keeps_only_the_furthest() {
        let cells = [Point::new(5, 6), Point::new(8, 5), Point::new(5, 3)];
        let mut g = floor_grid(&cells);
        let mut c = Collectibles::new();
        for p in cells {
            c.drop_at(&mut g, p, Collectible::WeaponChest, &mut NullSink).unwrap();
        }
        c.drop_at(&mut g, Point::new(5, 6), Collectible::AmmoChest, &mut NullSink)
            .unwrap();

        let mut sink = RecordingSink::new();
        let kept = c
            .retain_furthest(Collectible::WeaponChest, &mut g, &mut sink)
            .unwrap();
        assert_eq!(kept.pos, Point::new(8, 5));
        assert_eq!(c.of_kind(Collectible::WeaponChest).count(), 1);
        assert_eq!(c.of_kind(Collectible::AmmoChest).count(), 1);
        assert_eq!(
            sink.events,
            vec![
                SinkEvent::CollectibleRemoved(Point::new(5, 6), Collectible::WeaponChest),
                SinkEvent::CollectibleRemoved(Point::new(5, 3), Collectible::WeaponChest),
            ]
        );
        // (5, 6) shows the ammo chest placed on top, so its tag survives.
        assert_eq!(
            g.at(Point::new(5, 6)).unwrap().collectible,
            Some(Collectible::AmmoChest)
        );
        assert_eq!(g.at(Point::new(5, 3)).unwrap().collectible, None);
        assert_eq!(
            g.at(Point::new(8, 5)).unwrap().collectible,
            Some(Collectible::WeaponChest)
        );
    }

    #[test]
    fn ties_go_to_first_seen() {
        let cells = [Point::new(5, 7), Point::new(7, 5), Point::new(3, 5)];
        let mut g = floor_grid(&cells);
        let mut c = Collectibles::new();
        for p in cells {
            c.drop_at(&mut g, p, Collectible::AmmoChest, &mut NullSink).unwrap();
        }
        let kept = c
            .retain_furthest(Collectible::AmmoChest, &mut g, &mut NullSink)
            .unwrap();
        assert_eq!(kept.pos, Point::new(5, 7));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn nothing_to_retain() {
        let mut g = floor_grid(&[]);
        let mut c = Collectibles::new();
        assert_eq!(c.retain_furthest(Collectible::WeaponChest, &mut g, &mut NullSink), None);
        assert!(c.is_empty());
    }

    #[test]
    fn duplicates_on_the_kept_tile_keep_the_tag() {
        let mut g = floor_grid(&[Point::new(5, 5), Point::new(5, 8)]);
        let mut c = Collectibles::new();
        for p in [Point::new(5, 8), Point::new(5, 5), Point::new(5, 8)] {
            c.drop_at(&mut g, p, Collectible::WeaponChest, &mut NullSink).unwrap();
        }
        let kept = c
            .retain_furthest(Collectible::WeaponChest, &mut g, &mut NullSink)
            .unwrap();
        assert_eq!(kept.pos, Point::new(5, 8));
        assert_eq!(c.len(), 1);
        assert_eq!(
            g.at(Point::new(5, 8)).unwrap().collectible,
            Some(Collectible::WeaponChest)
        );
        assert_eq!(g.at(Point::new(5, 5)).unwrap().collectible, None);
    }
}
