//! Bit packing of terrain grids into the runtime's per-tile byte format.
//!
//! One byte per tile at offset `y * width + x`:
//!
//! - bit 7: land
//! - bit 6: shoreline
//! - bit 5: ocean
//! - bits 4..0: clamped magnitude (land elevation, or water distance / 2)
//!
//! Downstream consumers index by this exact layout; do not reorder.

use crate::terrain::Terrain;
use crate::tilemap::Tilemap;

pub const LAND_BIT: u8 = 0b1000_0000;
pub const SHORELINE_BIT: u8 = 0b0100_0000;
pub const OCEAN_BIT: u8 = 0b0010_0000;
pub const MAGNITUDE_MASK: u8 = 0b0001_1111;

/// Pack a single tile into its byte representation.
pub fn pack_tile(tile: &Terrain) -> u8 {
    let mut packed = 0u8;

    if tile.is_land() {
        packed |= LAND_BIT;
    }
    if tile.shoreline {
        packed |= SHORELINE_BIT;
    }
    if tile.ocean {
        packed |= OCEAN_BIT;
    }

    // Magnitudes stay real-valued through the pipeline; ceil and clamp only
    // happen here. Water distances are halved to fit the 5-bit field.
    let magnitude = if tile.is_land() {
        tile.magnitude.ceil().min(31.0)
    } else {
        (tile.magnitude / 2.0).ceil().min(31.0)
    };
    packed |= magnitude as u8 & MAGNITUDE_MASK;

    packed
}

/// Pack a whole grid. Returns the byte array (length `width * height`,
/// indexed `y * width + x`) and the number of land tiles.
pub fn pack_terrain(terrain: &Tilemap<Terrain>) -> (Vec<u8>, usize) {
    let mut data = vec![0u8; terrain.width * terrain.height];
    let mut num_land_tiles = 0;

    for x in 0..terrain.width {
        for y in 0..terrain.height {
            let tile = terrain.get(x, y);
            if tile.is_land() {
                num_land_tiles += 1;
            }
            data[y * terrain.width + x] = pack_tile(tile);
        }
    }

    (data, num_land_tiles)
}
