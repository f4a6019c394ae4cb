//! Virtual scrolling page.
//!
//! The window shows a tall page made of stacked sections: the hero section
//! holding the mountain vignette, then the grass section. Heights are given in
//! viewport units so the page reflows on resize. All rectangles are in
//! logical pixels with y pointing down, like window cursor positions.

use glam::Vec2;

/// Axis-aligned rectangle in window space, y down
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }

    /// Overlap with another rectangle, `None` when empty
    pub fn intersect(&self, other: &ScreenRect) -> Option<ScreenRect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(ScreenRect {
            left,
            top,
            width: right - left,
            height: bottom - top,
        })
    }

    /// Window point to NDC of this rectangle (x right, y up, -1..1 inside)
    pub fn to_ndc(&self, point: Vec2) -> Vec2 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Vec2::new((point.x - self.left) / w * 2.0 - 1.0, 1.0 - (point.y - self.top) / h * 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Grass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Hero height in viewport heights
    hero_height: f32,
    /// Grass height in viewport heights
    grass_height: f32,
    viewport: Vec2,
    scroll: f32,
}

impl PageLayout {
    pub fn new(hero_height: f32, grass_height: f32) -> Self {
        Self {
            hero_height: hero_height.max(0.0),
            grass_height: grass_height.max(0.0),
            viewport: Vec2::ONE,
            scroll: 0.0,
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Resize the window. Scroll stays in range for the new page height.
    pub fn set_viewport(&mut self, size: Vec2) {
        self.viewport = size.max(Vec2::ONE);
        self.scroll = self.scroll.clamp(0.0, self.scrollable());
    }

    pub fn page_height(&self) -> f32 {
        (self.hero_height + self.grass_height) * self.viewport.y
    }

    /// Largest scroll position
    pub fn scrollable(&self) -> f32 {
        (self.page_height() - self.viewport.y).max(0.0)
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Set the scroll position, clamped to the page
    pub fn set_scroll(&mut self, scroll: f32) -> f32 {
        if scroll.is_finite() {
            self.scroll = scroll.clamp(0.0, self.scrollable());
        }
        self.scroll
    }

    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.set_scroll(self.scroll + delta)
    }

    /// Whole-page progress in [0, 1]
    pub fn scroll_ratio(&self) -> f32 {
        let scrollable = self.scrollable();
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scroll / scrollable).clamp(0.0, 1.0)
    }

    /// How far the hero has scrolled out, in [0, 1]
    pub fn hero_progress(&self) -> f32 {
        let hero = (self.hero_height * self.viewport.y).max(1.0);
        (self.scroll / hero).clamp(0.0, 1.0)
    }

    /// On-screen rectangle of a section at the current scroll, may extend
    /// past the window
    pub fn section_rect(&self, section: Section) -> ScreenRect {
        let (offset, height) = match section {
            Section::Hero => (0.0, self.hero_height),
            Section::Grass => (self.hero_height, self.grass_height),
        };
        ScreenRect {
            left: 0.0,
            top: offset * self.viewport.y - self.scroll,
            width: self.viewport.x,
            height: height * self.viewport.y,
        }
    }

    /// Part of a section inside the window, `None` when scrolled out
    pub fn visible_rect(&self, section: Section) -> Option<ScreenRect> {
        let window = ScreenRect {
            left: 0.0,
            top: 0.0,
            width: self.viewport.x,
            height: self.viewport.y,
        };
        self.section_rect(section).intersect(&window)
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(1.0, 3.0)
    }
}
