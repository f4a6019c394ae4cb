// Screen light colour from a frame of the showreel.
// The app feeds a single still, so the light is static and does not animate.

use crate::tools::srgb_to_linear;
use glam::{UVec2, Vec3};

/// Sampling grid used for the average, matches a 16:9 frame
pub const SAMPLE_GRID: UVec2 = UVec2::new(16, 9);

/// Average linear colour of an RGBA8 sRGB frame.
///
/// The frame is point-sampled on a [`SAMPLE_GRID`] of cell centres, averaged
/// in sRGB space and then converted to linear. Returns `None` for an empty
/// frame or a buffer shorter than `width * height * 4`.
pub fn average_frame_color(rgba: &[u8], width: u32, height: u32) -> Option<Vec3> {
    if width == 0 || height == 0 || rgba.len() < (width as usize) * (height as usize) * 4 {
        return None;
    }

    let mut sum = Vec3::ZERO;
    for gy in 0..SAMPLE_GRID.y {
        for gx in 0..SAMPLE_GRID.x {
            let px = ((gx as f32 + 0.5) / SAMPLE_GRID.x as f32 * width as f32) as usize;
            let py = ((gy as f32 + 0.5) / SAMPLE_GRID.y as f32 * height as f32) as usize;
            let px = px.min(width as usize - 1);
            let py = py.min(height as usize - 1);
            let i = (py * width as usize + px) * 4;
            sum += Vec3::new(rgba[i] as f32, rgba[i + 1] as f32, rgba[i + 2] as f32);
        }
    }

    let count = (SAMPLE_GRID.x * SAMPLE_GRID.y) as f32;
    let srgb = sum / (255.0 * count);
    Some(Vec3::new(
        srgb_to_linear(srgb.x),
        srgb_to_linear(srgb.y),
        srgb_to_linear(srgb.z),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        (0..width * height)
            .flat_map(|_| [rgb[0], rgb[1], rgb[2], 255])
            .collect()
    }

    #[test]
    fn test_solid_white_is_one() {
        let frame = solid(32, 18, [255, 255, 255]);
        let c = average_frame_color(&frame, 32, 18).unwrap();
        assert!((c - Vec3::ONE).length() < 1e-5);
    }

    #[test]
    fn test_solid_colour_is_linearized() {
        let frame = solid(64, 36, [128, 0, 255]);
        let c = average_frame_color(&frame, 64, 36).unwrap();

        assert!((c.x - srgb_to_linear(128.0 / 255.0)).abs() < 1e-5);
        assert_eq!(c.y, 0.0);
        assert!((c.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_half_split_frame_averages() {
        // Left half white, right half black
        let (w, h) = (32u32, 18u32);
        let frame: Vec<u8> = (0..w * h)
            .flat_map(|i| if i % w < w / 2 { [255, 255, 255, 255] } else { [0, 0, 0, 255] })
            .collect();

        let c = average_frame_color(&frame, w, h).unwrap();

        assert!((c.x - srgb_to_linear(0.5)).abs() < 1e-4, "r was {}", c.x);
    }

    #[test]
    fn test_small_frame_is_sampled() {
        let frame = solid(2, 2, [255, 0, 0]);
        let c = average_frame_color(&frame, 2, 2).unwrap();
        assert!((c.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_bad_buffers() {
        assert_eq!(average_frame_color(&[], 0, 0), None);
        assert_eq!(average_frame_color(&[0; 8], 4, 4), None);
    }
}
