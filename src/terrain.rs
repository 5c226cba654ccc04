//! Terrain cell model and PNG pixel classification.
//!
//! Source maps are hand-authored PNGs where only the alpha and blue
//! channels carry signal: low alpha (or the reserved blue value) marks
//! water, and the blue channel encodes land elevation.

use crate::generator::GenerateError;
use crate::tilemap::Tilemap;

/// Alpha values below this are water.
pub const WATER_ALPHA_MAX: u8 = 20;
/// Exact blue value reserved for water regardless of alpha.
pub const WATER_BLUE_KEY: u8 = 106;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TerrainType {
    #[default]
    Land,
    Water,
}

/// One cell of the terrain grid.
///
/// `magnitude` is an elevation in [0, 30] for land; for water it holds the
/// Manhattan distance to the nearest land cell once the distance transform
/// has run.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terrain {
    pub terrain_type: TerrainType,
    pub shoreline: bool,
    pub ocean: bool,
    pub magnitude: f64,
}

impl Terrain {
    pub fn water() -> Self {
        Self {
            terrain_type: TerrainType::Water,
            ..Self::default()
        }
    }

    pub fn land(magnitude: f64) -> Self {
        Self {
            terrain_type: TerrainType::Land,
            magnitude,
            ..Self::default()
        }
    }

    pub fn is_land(&self) -> bool {
        self.terrain_type == TerrainType::Land
    }

    pub fn is_water(&self) -> bool {
        self.terrain_type == TerrainType::Water
    }
}

/// Classify one pixel from its 8-bit blue and alpha samples.
pub fn classify_pixel(blue: u8, alpha: u8) -> Terrain {
    if alpha < WATER_ALPHA_MAX || blue == WATER_BLUE_KEY {
        return Terrain::water();
    }

    // Land elevation from the blue channel's 140-200 band, mapped to 0-30.
    let mag = (f64::from(blue).clamp(140.0, 200.0) - 140.0) / 2.0;
    Terrain::land(mag)
}

/// Decode a PNG into the initial terrain grid.
///
/// Width and height are truncated to the nearest lower multiple of 4 so the
/// half- and quarter-resolution grids divide evenly. 16-bit channels are
/// reduced to 8 bits by taking the high byte.
pub fn decode_terrain(png_bytes: &[u8]) -> Result<Tilemap<Terrain>, GenerateError> {
    let img = image::load_from_memory(png_bytes)?;
    let rgba = img.into_rgba16();

    let width = rgba.width() as usize;
    let height = rgba.height() as usize;
    let width = width - width % 4;
    let height = height - height % 4;

    if width == 0 || height == 0 {
        return Err(GenerateError::Dimensions { width, height });
    }

    let mut terrain = Tilemap::new(width, height);
    for x in 0..width {
        for y in 0..height {
            let px = rgba.get_pixel(x as u32, y as u32);
            let blue = (px.0[2] >> 8) as u8;
            let alpha = (px.0[3] >> 8) as u8;
            terrain.set(x, y, classify_pixel(blue, alpha));
        }
    }

    Ok(terrain)
}
