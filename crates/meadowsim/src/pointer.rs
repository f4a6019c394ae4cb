// Pointer / touch input to wind brush

use crate::solver::Brush;
use glam::{Mat4, Vec2, Vec3};

/// Squared length below which pointer motion counts as no motion
pub const MIN_DIRECTION_LENGTH_SQ: f32 = 1e-6;

/// When the tracker is allowed to inject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// Any pointer over the surface injects
    #[default]
    Hover,
    /// Only a held touch injects
    Touch,
}

/// Raw input, positions in NDC of the tracked surface (x right, y up, -1..1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved { ndc: Vec2 },
    TouchStart { ndc: Vec2 },
    TouchMoved { ndc: Vec2 },
    TouchEnd,
    /// Pointer left the tracked surface
    Left,
    FocusLost,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

/// What the tracker needs from a camera to build pick rays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRay {
    pub world_from_clip: Mat4,
    pub origin: Vec3,
}

impl CameraRay {
    pub fn new(world_from_view: Mat4, clip_from_view: Mat4) -> Self {
        Self {
            world_from_clip: world_from_view * clip_from_view.inverse(),
            origin: world_from_view.w_axis.truncate(),
        }
    }

    /// Ray from the camera through a point in NDC.
    ///
    /// Unprojects at depth 0.5, which is a finite point for both standard
    /// and infinite reverse-z perspective projections.
    pub fn ray(&self, ndc: Vec2) -> Option<Ray> {
        let far = self.world_from_clip.project_point3(ndc.extend(0.5));
        let direction = (far - self.origin).try_normalize()?;
        Some(Ray {
            origin: self.origin,
            direction,
        })
    }
}

/// Finite ground rectangle at y = 0 centred on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    /// World size (x, z)
    pub extent: Vec2,
}

impl GroundPlane {
    pub fn new(extent: Vec2) -> Self {
        Self { extent }
    }

    /// Hit point of `ray` on the rectangle, `None` when it misses
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        if ray.direction.y.abs() < 1e-6 {
            return None;
        }
        let t = -ray.origin.y / ray.direction.y;
        if t < 0.0 {
            return None;
        }
        let point = ray.origin + ray.direction * t;
        if !point.is_finite() {
            return None;
        }
        let half = self.extent * 0.5;
        if point.x.abs() > half.x || point.z.abs() > half.y {
            return None;
        }
        Some(point)
    }

    /// Field UV of a ground point, clamped to [0, 1]
    pub fn uv(&self, point: Vec3) -> Vec2 {
        let extent = self.extent.max(Vec2::splat(1e-5));
        Vec2::new(point.x / extent.x + 0.5, point.z / extent.y + 0.5).clamp(Vec2::ZERO, Vec2::ONE)
    }
}

/// Turns pointer events into one brush per frame
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    activation: Activation,
    ndc: Option<Vec2>,
    touching: bool,
    last_hit: Option<Vec3>,
    uv: Option<Vec2>,
    direction: Vec2,
}

impl PointerTracker {
    pub fn new(activation: Activation) -> Self {
        Self {
            activation,
            ..Default::default()
        }
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved { ndc } => self.ndc = Some(ndc),
            PointerEvent::TouchStart { ndc } | PointerEvent::TouchMoved { ndc } => {
                self.ndc = Some(ndc);
                self.touching = true;
            }
            PointerEvent::TouchEnd => {
                self.touching = false;
                if self.activation == Activation::Touch {
                    self.reset();
                }
            }
            PointerEvent::Left | PointerEvent::FocusLost => {
                self.ndc = None;
                self.touching = false;
                self.reset();
            }
        }
    }

    /// True when the current input may inject
    pub fn is_active(&self) -> bool {
        match self.activation {
            Activation::Hover => self.ndc.is_some(),
            Activation::Touch => self.touching && self.ndc.is_some(),
        }
    }

    /// Resolve this frame's brush.
    ///
    /// Direction is the world XZ movement of the ground hit since the last
    /// sample, zero on the first hit after a reset.
    pub fn sample(&mut self, camera: &CameraRay, ground: &GroundPlane) -> Option<Brush> {
        self.direction = Vec2::ZERO;

        let hit = match self.ndc {
            Some(ndc) if self.is_active() => camera.ray(ndc).and_then(|ray| ground.intersect(&ray)),
            _ => None,
        };

        let Some(point) = hit else {
            self.reset();
            return None;
        };

        if let Some(last) = self.last_hit {
            let delta = Vec2::new(point.x - last.x, point.z - last.z);
            if delta.length_squared() > MIN_DIRECTION_LENGTH_SQ {
                self.direction = delta;
            }
        }
        self.last_hit = Some(point);

        let uv = ground.uv(point);
        self.uv = Some(uv);
        Some(Brush::new(uv, self.direction))
    }

    /// UV of the last hit, `None` while inactive
    pub fn uv(&self) -> Option<Vec2> {
        self.uv
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    fn reset(&mut self) {
        self.last_hit = None;
        self.uv = None;
        self.direction = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENT: Vec2 = Vec2::new(30.0, 30.0);

    fn top_down() -> CameraRay {
        let eye = Vec3::new(0.0, 20.0, 0.0);
        let view_from_world = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::NEG_Z);
        let clip_from_view = Mat4::perspective_infinite_reverse_rh(75f32.to_radians(), 1.0, 0.1);
        CameraRay::new(view_from_world.inverse(), clip_from_view)
    }

    fn ground() -> GroundPlane {
        GroundPlane::new(EXTENT)
    }

    #[test]
    fn test_centre_ray_hits_ground_centre() {
        let ray = top_down().ray(Vec2::ZERO).unwrap();
        let hit = ground().intersect(&ray).unwrap();

        assert!(hit.length() < 1e-3, "hit was {:?}", hit);
        assert!((ground().uv(hit) - Vec2::splat(0.5)).length() < 1e-4);
    }

    #[test]
    fn test_screen_up_maps_to_far_side() {
        // Camera up is -z, so the top of the screen looks at negative z
        let ray = top_down().ray(Vec2::new(0.0, 0.5)).unwrap();
        let hit = ground().intersect(&ray).unwrap();

        assert!(hit.z < 0.0);
        assert!(hit.x.abs() < 1e-3);
    }

    #[test]
    fn test_ray_missing_bounds_gives_none() {
        let small = GroundPlane::new(Vec2::splat(1.0));
        let ray = top_down().ray(Vec2::new(0.9, 0.9)).unwrap();
        assert_eq!(small.intersect(&ray), None);
    }

    #[test]
    fn test_ray_parallel_or_away_gives_none() {
        let parallel = Ray {
            origin: Vec3::new(0.0, 1.0, 0.0),
            direction: Vec3::X,
        };
        let away = Ray {
            origin: Vec3::new(0.0, 1.0, 0.0),
            direction: Vec3::Y,
        };
        assert_eq!(ground().intersect(&parallel), None);
        assert_eq!(ground().intersect(&away), None);
    }

    #[test]
    fn test_first_sample_has_no_direction() {
        let mut tracker = PointerTracker::new(Activation::Hover);
        tracker.handle(PointerEvent::Moved { ndc: Vec2::ZERO });

        let brush = tracker.sample(&top_down(), &ground()).unwrap();

        assert_eq!(brush.direction, Vec2::ZERO);
        assert!((brush.uv - Vec2::splat(0.5)).length() < 1e-4);
    }

    #[test]
    fn test_second_sample_yields_world_delta() {
        let mut tracker = PointerTracker::new(Activation::Hover);
        let camera = top_down();
        tracker.handle(PointerEvent::Moved { ndc: Vec2::ZERO });
        tracker.sample(&camera, &ground());

        tracker.handle(PointerEvent::Moved {
            ndc: Vec2::new(0.2, 0.0),
        });
        let brush = tracker.sample(&camera, &ground()).unwrap();

        assert!(brush.direction.x > 0.0);
        assert!(brush.direction.y.abs() < 1e-3);
    }

    #[test]
    fn test_still_pointer_has_zero_direction() {
        let mut tracker = PointerTracker::new(Activation::Hover);
        let camera = top_down();
        tracker.handle(PointerEvent::Moved {
            ndc: Vec2::new(0.1, 0.1),
        });
        tracker.sample(&camera, &ground());

        let brush = tracker.sample(&camera, &ground()).unwrap();

        assert_eq!(brush.direction, Vec2::ZERO);
    }

    #[test]
    fn test_leaving_clears_state() {
        let mut tracker = PointerTracker::new(Activation::Hover);
        let camera = top_down();
        tracker.handle(PointerEvent::Moved { ndc: Vec2::ZERO });
        tracker.sample(&camera, &ground());

        tracker.handle(PointerEvent::Left);

        assert_eq!(tracker.sample(&camera, &ground()), None);
        assert_eq!(tracker.uv(), None);
        assert_eq!(tracker.direction(), Vec2::ZERO);
    }

    #[test]
    fn test_focus_loss_restarts_direction() {
        let mut tracker = PointerTracker::new(Activation::Hover);
        let camera = top_down();
        tracker.handle(PointerEvent::Moved { ndc: Vec2::ZERO });
        tracker.sample(&camera, &ground());
        tracker.handle(PointerEvent::FocusLost);

        tracker.handle(PointerEvent::Moved {
            ndc: Vec2::new(0.3, 0.0),
        });
        let brush = tracker.sample(&camera, &ground()).unwrap();

        assert_eq!(brush.direction, Vec2::ZERO);
    }

    #[test]
    fn test_touch_mode_needs_held_touch() {
        let mut tracker = PointerTracker::new(Activation::Touch);
        let camera = top_down();

        tracker.handle(PointerEvent::Moved { ndc: Vec2::ZERO });
        assert_eq!(tracker.sample(&camera, &ground()), None);

        tracker.handle(PointerEvent::TouchStart { ndc: Vec2::ZERO });
        assert!(tracker.sample(&camera, &ground()).is_some());

        tracker.handle(PointerEvent::TouchEnd);
        assert_eq!(tracker.sample(&camera, &ground()), None);
    }
}
