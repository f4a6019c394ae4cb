use bevy::input::mouse::MouseScrollUnit;
use bevy::math::UVec2;
use meadowsim::page::ScreenRect;

/// Page scroll in pixels for one wheel message. Positive scrolls down.
pub fn wheel_scroll_pixels(unit: MouseScrollUnit, y: f32, line_pixels: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => -y * line_pixels,
        MouseScrollUnit::Pixel => -y,
    }
}

/// Logical section rectangle to a physical viewport inside the window.
///
/// Returns `(position, size)` or `None` when nothing of the section is left
/// after rounding and clamping.
pub fn physical_viewport(rect: ScreenRect, scale_factor: f32, window: UVec2) -> Option<(UVec2, UVec2)> {
    if window.x == 0 || window.y == 0 {
        return None;
    }
    let left = (rect.left * scale_factor).round().max(0.0) as u32;
    let top = (rect.top * scale_factor).round().max(0.0) as u32;
    let right = ((rect.right() * scale_factor).round().max(0.0) as u32).min(window.x);
    let bottom = ((rect.bottom() * scale_factor).round().max(0.0) as u32).min(window.y);
    if right <= left || bottom <= top {
        return None;
    }
    Some((UVec2::new(left, top), UVec2::new(right - left, bottom - top)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MouseScrollUnit::Line, 1.0, 40.0, -40.0)]
    #[case(MouseScrollUnit::Line, -3.0, 40.0, 120.0)]
    #[case(MouseScrollUnit::Pixel, -25.0, 40.0, 25.0)]
    fn test_wheel_scroll_pixels(
        #[case] unit: MouseScrollUnit,
        #[case] y: f32,
        #[case] line: f32,
        #[case] expected: f32,
    ) {
        assert_eq!(wheel_scroll_pixels(unit, y, line), expected);
    }

    #[test]
    fn test_physical_viewport_scales_and_clamps() {
        let rect = ScreenRect {
            left: 0.0,
            top: 150.0,
            width: 800.0,
            height: 1800.0,
        };

        let (pos, size) = physical_viewport(rect, 2.0, UVec2::new(1600, 1200)).unwrap();

        assert_eq!(pos, UVec2::new(0, 300));
        assert_eq!(size, UVec2::new(1600, 900));
    }

    #[rstest]
    #[case(ScreenRect { left: 0.0, top: 600.0, width: 800.0, height: 600.0 })]
    #[case(ScreenRect { left: 0.0, top: 10.0, width: 800.0, height: 0.2 })]
    fn test_physical_viewport_empty(#[case] rect: ScreenRect) {
        assert_eq!(physical_viewport(rect, 1.0, UVec2::new(800, 600)), None);
    }

    #[test]
    fn test_physical_viewport_zero_window() {
        let rect = ScreenRect {
            left: 0.0,
            top: 0.0,
            width: 10.0,
            height: 10.0,
        };
        assert_eq!(physical_viewport(rect, 1.0, UVec2::ZERO), None);
    }
}
