//! Connected-component analysis over the terrain grid.
//!
//! Hand-authored maps pick up stray pixels from anti-aliased brushes;
//! single-tile islands and puddles are noise as far as the runtime is
//! concerned, so components below a size threshold get flipped to the
//! opposite type before the rest of the pipeline runs.

use std::collections::VecDeque;

use crate::terrain::{Terrain, TerrainType};
use crate::tilemap::Tilemap;

/// Land components smaller than this are flipped to water.
pub const MIN_ISLAND_SIZE: usize = 30;

/// A maximal 4-connected component of same-typed tiles.
pub struct Region {
    pub tiles: Vec<(usize, usize)>,
}

impl Region {
    pub fn size(&self) -> usize {
        self.tiles.len()
    }
}

/// Find all maximal 4-connected components of the given type.
/// Components are returned in raster-scan order of their first tile.
pub fn find_regions(terrain: &Tilemap<Terrain>, of_type: TerrainType) -> Vec<Region> {
    let mut visited = Tilemap::new_with(terrain.width, terrain.height, false);
    let mut regions = Vec::new();

    for y in 0..terrain.height {
        for x in 0..terrain.width {
            if terrain.get(x, y).terrain_type != of_type || *visited.get(x, y) {
                continue;
            }
            regions.push(Region {
                tiles: collect_region(terrain, &mut visited, x, y),
            });
        }
    }

    regions
}

/// BFS flood fill from a seed tile, collecting every connected tile of the
/// seed's type. Marks tiles visited as it goes.
fn collect_region(
    terrain: &Tilemap<Terrain>,
    visited: &mut Tilemap<bool>,
    x: usize,
    y: usize,
) -> Vec<(usize, usize)> {
    let target = terrain.get(x, y).terrain_type;
    let mut tiles = Vec::new();
    let mut queue = VecDeque::new();

    queue.push_back((x, y));
    visited.set(x, y, true);

    while let Some((cx, cy)) = queue.pop_front() {
        tiles.push((cx, cy));

        for (nx, ny) in terrain.neighbors(cx, cy) {
            if !*visited.get(nx, ny) && terrain.get(nx, ny).terrain_type == target {
                visited.set(nx, ny, true);
                queue.push_back((nx, ny));
            }
        }
    }

    tiles
}

/// Flip land components smaller than [`MIN_ISLAND_SIZE`] to water.
///
/// Runs before water analysis so the new water is classified as part of the
/// surrounding body. No-op when `remove_small` is false (test fixtures keep
/// their tiny islands).
pub fn remove_small_islands(terrain: &mut Tilemap<Terrain>, remove_small: bool) {
    if !remove_small {
        return;
    }

    let mut removed = 0;
    for region in find_regions(terrain, TerrainType::Land) {
        if region.size() >= MIN_ISLAND_SIZE {
            continue;
        }
        removed += 1;
        for (x, y) in region.tiles {
            terrain.set(x, y, Terrain::water());
        }
    }

    println!(
        "Removed {} islands smaller than {} tiles",
        removed, MIN_ISLAND_SIZE
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_grid(width: usize, height: usize) -> Tilemap<Terrain> {
        Tilemap::new_with(width, height, Terrain::water())
    }

    #[test]
    fn finds_disjoint_components() {
        let mut terrain = water_grid(8, 8);
        // Two land blobs separated by water.
        terrain.set(0, 0, Terrain::land(0.0));
        terrain.set(1, 0, Terrain::land(0.0));
        terrain.set(5, 5, Terrain::land(0.0));

        let land = find_regions(&terrain, TerrainType::Land);
        assert_eq!(land.len(), 2);
        let mut sizes: Vec<usize> = land.iter().map(|r| r.size()).collect();
        sizes.sort();
        assert_eq!(sizes, vec![1, 2]);

        let water = find_regions(&terrain, TerrainType::Water);
        assert_eq!(water.len(), 1);
        assert_eq!(water[0].size(), 64 - 3);
    }

    #[test]
    fn diagonals_do_not_connect() {
        let mut terrain = water_grid(4, 4);
        terrain.set(0, 0, Terrain::land(0.0));
        terrain.set(1, 1, Terrain::land(0.0));

        assert_eq!(find_regions(&terrain, TerrainType::Land).len(), 2);
    }

    #[test]
    fn small_islands_are_flipped_to_water() {
        let mut terrain = water_grid(16, 16);
        // 5x5 island: 25 tiles, below the threshold.
        for y in 2..7 {
            for x in 2..7 {
                terrain.set(x, y, Terrain::land(10.0));
            }
        }

        remove_small_islands(&mut terrain, true);

        for (_, _, cell) in terrain.iter() {
            assert!(cell.is_water());
            assert_eq!(cell.magnitude, 0.0);
        }
    }

    #[test]
    fn islands_at_threshold_survive() {
        let mut terrain = water_grid(16, 16);
        // 6x5 island: exactly 30 tiles.
        for y in 2..7 {
            for x in 2..8 {
                terrain.set(x, y, Terrain::land(10.0));
            }
        }

        remove_small_islands(&mut terrain, true);

        assert!(terrain.get(2, 2).is_land());
        let land = find_regions(&terrain, TerrainType::Land);
        assert_eq!(land.len(), 1);
        assert_eq!(land[0].size(), 30);
    }

    #[test]
    fn removal_disabled_is_a_no_op() {
        let mut terrain = water_grid(8, 8);
        terrain.set(3, 3, Terrain::land(0.0));

        remove_small_islands(&mut terrain, false);

        assert!(terrain.get(3, 3).is_land());
    }
}
