//! End-of-run pass: chest retention, player placement and walls.

use pathwalk_core::{Collectible, Grid, Sink, Vec2};

use crate::collectibles::{CollectibleRecord, Collectibles};

/// What finalization kept and built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finalized {
    pub weapon_chest: Option<CollectibleRecord>,
    pub ammo_chest: Option<CollectibleRecord>,
    /// Walls placed by the enclosure pass.
    pub walls: usize,
    /// World position the player is placed at: the map origin.
    pub player: Vec2,
}

/// Finish a run once every walker has terminated.
///
/// Keeps the furthest weapon chest and then the furthest ammo chest, places
/// the player at the origin, encloses the floor with walls and finally
/// reports completion. Runs exactly once per generation.
pub fn finalize(grid: &mut Grid, collectibles: &mut Collectibles, sink: &mut dyn Sink) -> Finalized {
    let weapon_chest = collectibles.retain_furthest(Collectible::WeaponChest, grid, sink);
    let ammo_chest = collectibles.retain_furthest(Collectible::AmmoChest, grid, sink);
    let player = grid.origin();
    sink.on_player_placed(player);
    let walls = grid.enclose(sink);
    sink.on_generation_complete();
    Finalized {
        weapon_chest,
        ammo_chest,
        walls,
        player,
    }
}
