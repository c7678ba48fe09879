//! Pathwalker dungeon generation: walkers, population control, finalization.
//!
//! A [`Generator`] seeds one [`Walker`] at the centre of an empty grid. Every
//! tick each live walker carves its cell, may spawn a child or carve a room,
//! turns, may drop a chest, and steps. When the last walker terminates the
//! map is finalized: only the furthest chest of each kind survives and the
//! floor is enclosed with walls.

pub mod collectibles;
pub mod config;
pub mod error;
pub mod finalize;
pub mod generator;
pub mod pacer;
pub mod population;
pub mod walker;

pub use collectibles::{CollectibleRecord, Collectibles};
pub use config::{Config, TurnTable};
pub use error::{ConfigError, Error, Result};
pub use finalize::{Finalized, finalize};
pub use generator::{Generator, Phase, Summary};
pub use pacer::Pacer;
pub use population::Population;
pub use walker::{Turn, WalkContext, Walker, WalkerState};
