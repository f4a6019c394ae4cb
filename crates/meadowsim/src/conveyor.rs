// Scroll to conveyor offset mapping

pub const MIN_LOOPS: f32 = 1.0;
pub const MAX_LOOPS: f32 = 12.0;
/// 1000 px of scroll moves the ground by one plane length
pub const DEFAULT_NORM_PER_PIXEL: f32 = 0.0005;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConveyorMode {
    /// Whole-page progress in [0, 1] times the number of plane loops
    Progress { loops: f32 },
    /// Raw scroll pixels times a fixed rate
    PerPixel { norm_per_pixel: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConveyorMapper {
    mode: ConveyorMode,
    offset_norm: f32,
}

impl ConveyorMapper {
    pub fn progress(loops: f32) -> Self {
        Self {
            mode: ConveyorMode::Progress {
                loops: loops.clamp(MIN_LOOPS, MAX_LOOPS),
            },
            offset_norm: 0.0,
        }
    }

    pub fn per_pixel(norm_per_pixel: f32) -> Self {
        Self {
            mode: ConveyorMode::PerPixel { norm_per_pixel },
            offset_norm: 0.0,
        }
    }

    pub fn mode(&self) -> ConveyorMode {
        self.mode
    }

    /// Loop count in progress mode, `None` in per-pixel mode
    pub fn loops(&self) -> Option<f32> {
        match self.mode {
            ConveyorMode::Progress { loops } => Some(loops),
            ConveyorMode::PerPixel { .. } => None,
        }
    }

    /// Update the offset from the page scroll.
    ///
    /// `scroll_px` is the scroll position and `scrollable_px` the page height
    /// minus the viewport height.
    pub fn map_scroll(&mut self, scroll_px: f32, scrollable_px: f32) -> f32 {
        self.offset_norm = match self.mode {
            ConveyorMode::Progress { loops } => {
                let ratio = (scroll_px / scrollable_px.max(1.0)).clamp(0.0, 1.0);
                ratio * loops
            }
            ConveyorMode::PerPixel { norm_per_pixel } => scroll_px * norm_per_pixel,
        };
        self.offset_norm
    }

    /// Normalized offset, 1.0 = one plane length
    pub fn offset_norm(&self) -> f32 {
        self.offset_norm
    }

    pub fn offset_world(&self, extent_z: f32) -> f32 {
        self.offset_norm * extent_z
    }

    /// World z of a prop with base z `base_z`. Props are not wrapped.
    pub fn prop_z(&self, base_z: f32, extent_z: f32) -> f32 {
        if !extent_z.is_finite() || extent_z <= 1e-5 {
            return base_z;
        }
        base_z - self.offset_world(extent_z)
    }

    /// Change the loop count. Returns true when the value changed and the
    /// blade layout has to be rebuilt. Switches per-pixel mode to progress.
    pub fn set_loops(&mut self, loops: f32) -> bool {
        let next = loops.clamp(MIN_LOOPS, MAX_LOOPS);
        match self.mode {
            ConveyorMode::Progress { loops: current } if (next - current).abs() < 1e-6 => false,
            _ => {
                self.mode = ConveyorMode::Progress { loops: next };
                true
            }
        }
    }
}

impl Default for ConveyorMapper {
    fn default() -> Self {
        Self::progress(MIN_LOOPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1000.0, 2.0, 0.0)]
    #[case(500.0, 1000.0, 2.0, 1.0)]
    #[case(1000.0, 1000.0, 2.0, 2.0)]
    #[case(5000.0, 1000.0, 2.0, 2.0)]
    #[case(-10.0, 1000.0, 2.0, 0.0)]
    #[case(10.0, 0.0, 1.0, 1.0)]
    fn test_progress_mapping(
        #[case] scroll: f32,
        #[case] scrollable: f32,
        #[case] loops: f32,
        #[case] expected: f32,
    ) {
        let mut mapper = ConveyorMapper::progress(loops);
        let offset = mapper.map_scroll(scroll, scrollable);
        assert!((offset - expected).abs() < 1e-6, "offset was {}", offset);
    }

    #[test]
    fn test_per_pixel_mapping() {
        let mut mapper = ConveyorMapper::per_pixel(DEFAULT_NORM_PER_PIXEL);
        assert!((mapper.map_scroll(1000.0, 0.0) - 0.5).abs() < 1e-6);
        assert!((mapper.map_scroll(2000.0, 0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_prop_z_moves_without_wrap() {
        let mut mapper = ConveyorMapper::progress(4.0);
        mapper.map_scroll(1000.0, 1000.0);

        assert!((mapper.prop_z(-10.0, 30.0) - -130.0).abs() < 1e-4);
    }

    #[test]
    fn test_prop_z_ignores_degenerate_extent() {
        let mut mapper = ConveyorMapper::progress(1.0);
        mapper.map_scroll(1000.0, 1000.0);

        assert_eq!(mapper.prop_z(3.0, 0.0), 3.0);
        assert_eq!(mapper.prop_z(3.0, f32::NAN), 3.0);
    }

    #[rstest]
    #[case(1.0, 1.0, false, 1.0)]
    #[case(1.0, 2.5, true, 2.5)]
    #[case(1.0, 40.0, true, 12.0)]
    #[case(1.0, 0.0, false, 1.0)]
    #[case(12.0, 13.0, false, 12.0)]
    fn test_set_loops(
        #[case] start: f32,
        #[case] next: f32,
        #[case] changed: bool,
        #[case] expected: f32,
    ) {
        let mut mapper = ConveyorMapper::progress(start);
        assert_eq!(mapper.set_loops(next), changed);
        assert_eq!(mapper.loops(), Some(expected));
    }

    #[test]
    fn test_set_loops_leaves_per_pixel_mode() {
        let mut mapper = ConveyorMapper::per_pixel(DEFAULT_NORM_PER_PIXEL);
        assert!(mapper.set_loops(3.0));
        assert_eq!(mapper.mode(), ConveyorMode::Progress { loops: 3.0 });
    }
}
