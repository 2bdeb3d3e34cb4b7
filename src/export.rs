//! Preview rendering for the demo binary.
//!
//! The generation core hands its outputs to a rendering layer; this is the
//! minimal in-repo consumer. Sea is flat blue, mainland a green-to-gray
//! elevation ramp, capitals and cities are dot markers.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::map::IslandMap;

const SEA_COLOR: [u8; 3] = [24, 52, 110];
const CAPITAL_COLOR: [u8; 3] = [220, 40, 40];
const CITY_COLOR: [u8; 3] = [240, 220, 60];

/// Render a generated map to an RGB image at field resolution.
pub fn render_map(map: &IslandMap) -> RgbImage {
    let elevation = &map.elevation;
    let mut img: RgbImage =
        ImageBuffer::new(elevation.width() as u32, elevation.height() as u32);

    for y in 0..elevation.height() {
        for x in 0..elevation.width() {
            let v = elevation.field().get(x, y);
            let color = if v == 0.0 { SEA_COLOR } else { land_color(v) };
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    for &(x, y) in &map.settlements.cities {
        draw_dot(&mut img, x, y, 1, CITY_COLOR);
    }
    for &(x, y) in &map.settlements.capitals {
        draw_dot(&mut img, x, y, 3, CAPITAL_COLOR);
    }

    img
}

/// Render and write a PNG.
pub fn export_map(map: &IslandMap, path: &str) -> Result<(), image::ImageError> {
    render_map(map).save(path)
}

/// Lowlands green, highlands gray, ramped by elevation.
fn land_color(elevation: f64) -> [u8; 3] {
    let t = elevation.clamp(0.0, 1.0);
    let r = (60.0 + 140.0 * t) as u8;
    let g = (140.0 + 60.0 * t) as u8;
    let b = (60.0 + 120.0 * t) as u8;
    [r, g, b]
}

fn draw_dot(img: &mut RgbImage, x: f64, y: f64, radius: i64, color: [u8; 3]) {
    let cx = x.round() as i64;
    let cy = y.round() as i64;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let px = cx + dx;
            let py = cy + dy;
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, Rgb(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MapConfig, NoiseSpec};

    #[test]
    fn test_render_matches_field_resolution() {
        let config = MapConfig::new(
            NoiseSpec::Spectral {
                amplitude: 1.0,
                spectral_index: -3.0,
            },
            30,
        );
        let map = IslandMap::generate(&config, 0).unwrap();
        let img = render_map(&map);
        assert_eq!(img.width(), map.elevation.width() as u32);
        assert_eq!(img.height(), map.elevation.height() as u32);
    }
}
