//! Semantic 2x downsampling of terrain grids.
//!
//! Averaging would erase thin coastlines, so the reduction is biased toward
//! water: if any source tile of a 2x2 block is water, the output tile is
//! water. Applied twice this yields the quarter-resolution grid.

use crate::terrain::Terrain;
use crate::tilemap::Tilemap;

/// Reduce a grid to half resolution.
///
/// Each output tile is a verbatim copy of one source tile from its 2x2
/// block: the last-scanned water tile if the block contains water, else the
/// last-scanned land tile. The scan runs x-outer, y-inner ascending so the
/// packed output is reproducible byte for byte.
pub fn downsample(terrain: &Tilemap<Terrain>) -> Tilemap<Terrain> {
    let mini_width = terrain.width / 2;
    let mini_height = terrain.height / 2;
    let mut mini: Tilemap<Terrain> = Tilemap::new(mini_width, mini_height);

    for x in 0..terrain.width {
        for y in 0..terrain.height {
            let mini_x = x / 2;
            let mini_y = y / 2;
            if mini_x >= mini_width || mini_y >= mini_height {
                continue;
            }

            let src = *terrain.get(x, y);
            // Water always overwrites; land only until water has been seen.
            if src.is_water() || !mini.get(mini_x, mini_y).is_water() {
                mini.set(mini_x, mini_y, src);
            }
        }
    }

    mini
}
