//! Water-body classification, shoreline detection, and distance-to-land.
//!
//! The largest connected water body is the ocean; everything else is a
//! lake. Small lakes are filled in (on real maps), shoreline flags are
//! recomputed from scratch, and every water tile gets its Manhattan
//! distance to the nearest land written into its magnitude.

use std::collections::VecDeque;

use crate::regions::{find_regions, Region};
use crate::terrain::{Terrain, TerrainType};
use crate::tilemap::Tilemap;

/// Non-ocean water bodies smaller than this are converted to land.
pub const MIN_LAKE_SIZE: usize = 200;

/// Classify water bodies, then refresh shorelines and water distances.
///
/// After this the grid's `type` fields are frozen; only shoreline flags and
/// water magnitudes are written by later steps.
pub fn process_water(terrain: &mut Tilemap<Terrain>, remove_small: bool) {
    let mut bodies = find_regions(terrain, TerrainType::Water);
    bodies.sort_by(|a, b| b.size().cmp(&a.size()));

    if let Some(ocean) = bodies.first() {
        for &(x, y) in &ocean.tiles {
            terrain.get_mut(x, y).ocean = true;
        }
        println!("Identified ocean with {} water tiles", ocean.size());

        if remove_small {
            let filled = fill_small_lakes(terrain, &bodies[1..]);
            println!(
                "Converted {} lakes smaller than {} tiles to land",
                filled, MIN_LAKE_SIZE
            );
        }
    } else {
        println!("No water bodies found in the map");
    }

    let shoreline_waters = process_shorelines(terrain);
    distance_to_land(terrain, &shoreline_waters);
}

/// Convert lakes under [`MIN_LAKE_SIZE`] to flat land. `lakes` must not
/// include the ocean.
fn fill_small_lakes(terrain: &mut Tilemap<Terrain>, lakes: &[Region]) -> usize {
    let mut filled = 0;
    for lake in lakes {
        if lake.size() >= MIN_LAKE_SIZE {
            continue;
        }
        filled += 1;
        for &(x, y) in &lake.tiles {
            terrain.set(x, y, Terrain::land(0.0));
        }
    }
    filled
}

/// Recompute the shoreline flag of every tile: set iff any 4-neighbour has
/// the opposite type. Returns the water tiles on the shoreline, which seed
/// the distance transform.
pub fn process_shorelines(terrain: &mut Tilemap<Terrain>) -> Vec<(usize, usize)> {
    let mut shoreline_waters = Vec::new();

    for x in 0..terrain.width {
        for y in 0..terrain.height {
            let own_type = terrain.get(x, y).terrain_type;
            let on_shore = terrain
                .neighbors(x, y)
                .into_iter()
                .any(|(nx, ny)| terrain.get(nx, ny).terrain_type != own_type);

            terrain.get_mut(x, y).shoreline = on_shore;
            if on_shore && own_type == TerrainType::Water {
                shoreline_waters.push((x, y));
            }
        }
    }

    shoreline_waters
}

/// Multi-source BFS from the shoreline water tiles, writing each water
/// tile's Manhattan distance to the nearest land into its magnitude.
/// Land magnitudes are untouched.
pub fn distance_to_land(terrain: &mut Tilemap<Terrain>, shoreline_waters: &[(usize, usize)]) {
    let mut visited = Tilemap::new_with(terrain.width, terrain.height, false);
    let mut queue = VecDeque::new();

    for &(x, y) in shoreline_waters {
        visited.set(x, y, true);
        terrain.get_mut(x, y).magnitude = 0.0;
        queue.push_back((x, y, 0u32));
    }

    while let Some((x, y, dist)) = queue.pop_front() {
        for (nx, ny) in terrain.neighbors(x, y) {
            if *visited.get(nx, ny) || !terrain.get(nx, ny).is_water() {
                continue;
            }
            visited.set(nx, ny, true);
            terrain.get_mut(nx, ny).magnitude = f64::from(dist + 1);
            queue.push_back((nx, ny, dist + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn land_grid(width: usize, height: usize) -> Tilemap<Terrain> {
        Tilemap::new_with(width, height, Terrain::land(0.0))
    }

    /// Left `split` columns land, rest water.
    fn split_grid(width: usize, height: usize, split: usize) -> Tilemap<Terrain> {
        let mut terrain = land_grid(width, height);
        for y in 0..height {
            for x in split..width {
                terrain.set(x, y, Terrain::water());
            }
        }
        terrain
    }

    #[test]
    fn largest_body_becomes_ocean() {
        let mut terrain = split_grid(16, 16, 8);
        // A small lake inside the land half.
        terrain.set(2, 2, Terrain::water());
        terrain.set(3, 2, Terrain::water());

        process_water(&mut terrain, false);

        assert!(terrain.get(12, 8).ocean);
        assert!(!terrain.get(2, 2).ocean);
        assert!(!terrain.get(0, 0).ocean);
    }

    #[test]
    fn small_lakes_are_filled_on_real_maps() {
        let mut terrain = split_grid(16, 16, 8);
        terrain.set(2, 2, Terrain::water());
        terrain.set(3, 2, Terrain::water());

        process_water(&mut terrain, true);

        assert!(terrain.get(2, 2).is_land());
        assert!(terrain.get(3, 2).is_land());
        // Ocean survives untouched.
        assert!(terrain.get(12, 8).is_water());
    }

    #[test]
    fn lakes_at_threshold_survive() {
        // 20x10 lake of exactly 200 tiles inside a large land mass, plus a
        // bigger ocean strip on the right.
        let mut terrain = split_grid(64, 32, 40);
        for y in 10..20 {
            for x in 5..25 {
                terrain.set(x, y, Terrain::water());
            }
        }

        process_water(&mut terrain, true);

        assert!(terrain.get(10, 15).is_water());
        assert!(!terrain.get(10, 15).ocean);
        assert!(terrain.get(50, 15).ocean);
    }

    #[test]
    fn no_water_sets_no_ocean() {
        let mut terrain = land_grid(8, 8);
        process_water(&mut terrain, true);

        for (_, _, cell) in terrain.iter() {
            assert!(!cell.ocean);
            assert!(!cell.shoreline);
        }
    }

    #[test]
    fn shoreline_flags_both_sides_of_the_divide() {
        let mut terrain = split_grid(16, 16, 8);
        process_water(&mut terrain, false);

        for y in 0..16 {
            assert!(terrain.get(7, y).shoreline, "land side at y={}", y);
            assert!(terrain.get(8, y).shoreline, "water side at y={}", y);
            assert!(!terrain.get(6, y).shoreline);
            assert!(!terrain.get(9, y).shoreline);
        }
    }

    #[test]
    fn shoreline_recompute_clears_stale_flags() {
        let mut terrain = land_grid(8, 8);
        terrain.get_mut(4, 4).shoreline = true;

        let seeds = process_shorelines(&mut terrain);

        assert!(seeds.is_empty());
        assert!(!terrain.get(4, 4).shoreline);
    }

    #[test]
    fn water_magnitude_is_manhattan_distance_to_land() {
        let mut terrain = split_grid(16, 16, 8);
        process_water(&mut terrain, false);

        for y in 0..16 {
            for x in 8..16 {
                let expected = (x - 8) as f64;
                assert_eq!(terrain.get(x, y).magnitude, expected, "at ({}, {})", x, y);
            }
        }
        // Land magnitudes untouched.
        assert_eq!(terrain.get(0, 0).magnitude, 0.0);
    }

    #[test]
    fn distance_rings_around_an_island() {
        // Single land tile in water: distance grows in rings around it.
        let mut terrain = Tilemap::new_with(9, 9, Terrain::water());
        terrain.set(4, 4, Terrain::land(0.0));

        process_water(&mut terrain, false);

        assert_eq!(terrain.get(4, 3).magnitude, 0.0); // shoreline water
        assert_eq!(terrain.get(4, 2).magnitude, 1.0);
        assert_eq!(terrain.get(2, 4).magnitude, 1.0);
        assert_eq!(terrain.get(0, 4).magnitude, 3.0);
        assert_eq!(terrain.get(0, 0).magnitude, 7.0);
    }
}
