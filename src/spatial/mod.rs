//! Spatial data structures
//!
//! This module contains:
//! - Cardinal directions and their socket order
//! - Socket labels, tile variants and rotation expansion

/// Cardinal directions and neighbor offsets
pub mod direction;
/// Socket labels, tile variants and the tile catalog
pub mod tiles;

pub use direction::Direction;
pub use tiles::{SocketLabel, TileCatalog};
