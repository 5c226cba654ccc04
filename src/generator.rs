//! End-to-end pipeline for a single map image.
//!
//! Takes raw PNG bytes and produces the packed grids at full, half, and
//! quarter resolution plus the WebP preview. Purely in-memory; the batch
//! driver owns all filesystem concerns.

use thiserror::Error;

use crate::downsample::downsample;
use crate::pack::pack_terrain;
use crate::regions::remove_small_islands;
use crate::terrain::{decode_terrain, Terrain};
use crate::thumbnail::{encode_webp, render_thumbnail, THUMBNAIL_SCALE};
use crate::tilemap::Tilemap;
use crate::water::process_water;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to decode PNG: {0}")]
    Decode(#[from] image::ImageError),
    #[error("map is {width}x{height} after truncation; both axes must be at least 4 pixels")]
    Dimensions { width: usize, height: usize },
    #[error("failed to encode thumbnail: {0}")]
    Encode(String),
}

pub struct GeneratorArgs<'a> {
    pub name: &'a str,
    pub image: &'a [u8],
    /// Strip small islands and lakes. Off for test fixture maps, which are
    /// authored exactly.
    pub remove_small: bool,
}

/// One packed grid plus its manifest numbers.
pub struct MapInfo {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub num_land_tiles: usize,
}

impl MapInfo {
    fn from_grid(terrain: &Tilemap<Terrain>) -> Self {
        let (data, num_land_tiles) = pack_terrain(terrain);
        Self {
            data,
            width: terrain.width,
            height: terrain.height,
            num_land_tiles,
        }
    }
}

/// Everything produced for one map: full grid, half (`map4x`), quarter
/// (`map16x`), and the thumbnail bytes.
pub struct MapResult {
    pub map: MapInfo,
    pub map4x: MapInfo,
    pub map16x: MapInfo,
    pub thumbnail: Vec<u8>,
}

/// Run the full pipeline for one map.
pub fn generate_map(args: GeneratorArgs) -> Result<MapResult, GenerateError> {
    let mut terrain = decode_terrain(args.image)?;
    println!(
        "Processing map: {} ({}x{})",
        args.name, terrain.width, terrain.height
    );

    remove_small_islands(&mut terrain, args.remove_small);
    process_water(&mut terrain, args.remove_small);

    let terrain4x = downsample(&terrain);
    let terrain16x = downsample(&terrain4x);

    let thumb = render_thumbnail(&terrain4x, THUMBNAIL_SCALE);
    let thumbnail = encode_webp(&thumb)?;

    Ok(MapResult {
        map: MapInfo::from_grid(&terrain),
        map4x: MapInfo::from_grid(&terrain4x),
        map16x: MapInfo::from_grid(&terrain16x),
        thumbnail,
    })
}
