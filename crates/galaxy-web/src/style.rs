// Inline-style strings for drift particles and stars. Kept free of web-sys so
// host tests can include this file directly.

#[inline]
pub fn px(v: f32) -> String {
    format!("{v}px")
}

#[inline]
pub fn percent(v: f32) -> String {
    format!("{v}%")
}

#[inline]
pub fn drift_transform(y: f32, z: f32) -> String {
    format!("translate3d(0, {y}px, {z}px)")
}

pub fn glow_text_shadow(color: &str) -> String {
    format!("0 0 15px {color}, 0 0 25px {color}, 2px 2px 6px rgba(0,0,0,0.9)")
}

#[inline]
pub fn opacity_transition(fade_ms: f64) -> String {
    format!("opacity {}s", fade_ms / 1000.0)
}

#[inline]
pub fn centre_offset(v: f32) -> String {
    format!("calc(50% + {v}px)")
}

#[inline]
pub fn translate_z(z: f32) -> String {
    format!("translateZ({z}px)")
}

#[inline]
pub fn seconds(v: f32) -> String {
    format!("{v}s")
}
