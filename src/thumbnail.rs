//! Thumbnail colourisation and WebP encoding.
//!
//! The palette is part of the observable contract with the map browser:
//! water pixels are fully transparent and shaded by depth, land pixels are
//! opaque and ramp from plains through highlands to snow-capped mountains.

use image::{Rgba, RgbaImage};

use crate::generator::GenerateError;
use crate::terrain::Terrain;
use crate::tilemap::Tilemap;

/// The thumbnail samples the half-resolution grid at this scale.
pub const THUMBNAIL_SCALE: f64 = 0.5;
/// Lossy WebP quality for the preview.
pub const WEBP_QUALITY: f32 = 45.0;

fn channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Map one terrain tile to its thumbnail colour.
pub fn thumbnail_color(tile: &Terrain) -> Rgba<u8> {
    if tile.is_water() {
        if tile.shoreline {
            return Rgba([100, 143, 255, 0]);
        }
        // Deeper water is darker; the shade bottoms out at distance 20.
        let adj = 11.0 - (tile.magnitude / 2.0).min(10.0) - 10.0;
        return Rgba([
            channel((70.0 + adj).max(0.0)),
            channel((132.0 + adj).max(0.0)),
            channel((180.0 + adj).max(0.0)),
            0,
        ]);
    }

    if tile.shoreline {
        return Rgba([204, 203, 158, 255]);
    }

    let m = tile.magnitude;
    if m < 10.0 {
        // Plains.
        Rgba([190, channel(220.0 - 2.0 * m), 138, 255])
    } else if m < 20.0 {
        // Highlands.
        Rgba([
            channel(200.0 + 2.0 * m),
            channel(183.0 + 2.0 * m),
            channel(138.0 + 2.0 * m),
            255,
        ])
    } else {
        // Mountains.
        let v = channel((230.0 + m / 2.0).floor());
        Rgba([v, v, v, 255])
    }
}

/// Render the terrain grid into an RGBA thumbnail, nearest-neighbour
/// sampled at `scale`. Output dimensions are at least 1x1.
pub fn render_thumbnail(terrain: &Tilemap<Terrain>, scale: f64) -> RgbaImage {
    let src_width = terrain.width;
    let src_height = terrain.height;

    let target_width = ((src_width as f64 * scale).floor() as u32).max(1);
    let target_height = ((src_height as f64 * scale).floor() as u32).max(1);

    let mut img = RgbaImage::new(target_width, target_height);
    for x in 0..target_width {
        for y in 0..target_height {
            let src_x = ((f64::from(x) / scale).floor() as usize).min(src_width - 1);
            let src_y = ((f64::from(y) / scale).floor() as usize).min(src_height - 1);
            img.put_pixel(x, y, thumbnail_color(terrain.get(src_x, src_y)));
        }
    }

    img
}

/// Encode the thumbnail as lossy WebP at [`WEBP_QUALITY`].
pub fn encode_webp(img: &RgbaImage) -> Result<Vec<u8>, GenerateError> {
    let encoder = webp::Encoder::from_rgba(img.as_raw(), img.width(), img.height());
    let encoded = encoder
        .encode_simple(false, WEBP_QUALITY)
        .map_err(|e| GenerateError::Encode(format!("{e:?}")))?;
    Ok(encoded.to_vec())
}
