use crate::view::Domain1D;

pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Normalized position of `value` inside `domain`, clamped to 0..=1.
///
/// Returns `None` for a zero-width or non-finite domain, where the position
/// is undefined.
pub fn position_in(domain: Domain1D, value: f32) -> Option<f32> {
    if !domain.is_valid() || !value.is_finite() {
        return None;
    }
    let pos = 1.0 - (domain.max - value) / domain.span();
    Some(pos.clamp(0.0, 1.0))
}
