use bevy::input::touch::TouchPhase;
use bevy::math::{Vec2, Vec3};
use bevy_grass::BladeShape;
use meadowsim::config::{GrassConfig, PropInstance};
use meadowsim::displacement::BladeUniforms;
use meadowsim::page::ScreenRect;
use meadowsim::pointer::PointerEvent;
use meadowsim::VelocityField;

/// Cursor position in window space to a tracker event for the grass viewport
pub fn cursor_event(position: Vec2, viewport: Option<ScreenRect>) -> PointerEvent {
    match viewport {
        Some(rect) if rect.contains(position) => PointerEvent::Moved {
            ndc: rect.to_ndc(position),
        },
        _ => PointerEvent::Left,
    }
}

/// Touch to a tracker event. A touch that starts outside the viewport is
/// ignored, one that moves out of it ends.
pub fn touch_event(phase: TouchPhase, position: Vec2, viewport: Option<ScreenRect>) -> Option<PointerEvent> {
    let inside = viewport.filter(|rect| rect.contains(position));
    match (phase, inside) {
        (TouchPhase::Started, Some(rect)) => Some(PointerEvent::TouchStart {
            ndc: rect.to_ndc(position),
        }),
        (TouchPhase::Moved, Some(rect)) => Some(PointerEvent::TouchMoved {
            ndc: rect.to_ndc(position),
        }),
        (TouchPhase::Started, None) => None,
        (TouchPhase::Moved, None) | (TouchPhase::Ended, _) | (TouchPhase::Canceled, _) => {
            Some(PointerEvent::TouchEnd)
        }
    }
}

/// Raw bytes of the field as `Rg32Float` texels, row by row
pub fn field_bytes(field: &VelocityField) -> Vec<u8> {
    bytemuck::cast_slice(field.cells()).to_vec()
}

pub fn blade_shape(config: &GrassConfig) -> BladeShape {
    BladeShape {
        width: config.blade_width,
        height: config.blade_height,
        segments: config.blade_segments,
        taper: config.taper,
    }
}

pub fn blade_uniforms(config: &GrassConfig, plane_extent: Vec2, scroll_offset_norm: f32, time: f32) -> BladeUniforms {
    BladeUniforms {
        time,
        turbulence_amplitude: config.turbulence_amplitude,
        turbulence_frequency: config.turbulence_frequency,
        damping: config.damping,
        wind_strength: config.wind_strength,
        glow_threshold: config.glow_threshold,
        glow_boost: config.glow_boost,
        blade_height: config.blade_height,
        plane_extent,
        scroll_offset_norm,
    }
}

/// Euler XYZ in degrees to radians
pub fn prop_rotation(instance: &PropInstance) -> Vec3 {
    Vec3::from_array(instance.rotation).map(f32::to_radians)
}
