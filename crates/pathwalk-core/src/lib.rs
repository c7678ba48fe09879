//! Core types for pathwalker dungeon generation.
//!
//! This crate provides the foundational types shared by the generator and
//! its front-ends: geometry primitives, tagged tiles, the grid authority that
//! walkers mutate, and the [`Sink`] notification trait used to forward every
//! tile and entity decision to a renderer.

pub mod error;
pub mod geom;
pub mod grid;
pub mod sink;
pub mod tile;

pub use error::{Error, Result};
pub use geom::{Direction, Point, Range, Vec2};
pub use grid::Grid;
pub use sink::{NullSink, SinkEvent, RecordingSink, Sink, WalkerId};
pub use tile::{Collectible, Tile, TileKind};
