//! Terrain map packing library
//!
//! Converts hand-authored PNG terrain maps into the packed per-tile byte
//! format, WebP preview, and manifest numbers consumed by the game runtime.

pub mod downsample;
pub mod generator;
pub mod pack;
pub mod regions;
pub mod terrain;
pub mod thumbnail;
pub mod tilemap;
pub mod water;
