//! Static spiral starfield placed behind the drift field.

use crate::device::TierProfile;
use rand::Rng;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Offsets from the field centre, px.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub opacity: f32,
    pub twinkle_delay_sec: f32,
}

struct StarfieldShape {
    radius_span: f32,
    radius_min: f32,
    spiral_height: f32,
    vertical_scatter: f32,
    depth_norm: f32,
}

impl StarfieldShape {
    fn for_profile(profile: &TierProfile) -> Self {
        if profile.tier.is_compact() {
            Self {
                radius_span: 800.0,
                radius_min: 200.0,
                spiral_height: 100.0,
                vertical_scatter: 1000.0,
                depth_norm: 800.0,
            }
        } else {
            Self {
                radius_span: 1500.0,
                radius_min: 300.0,
                spiral_height: 150.0,
                vertical_scatter: 2000.0,
                depth_norm: 1200.0,
            }
        }
    }
}

pub fn generate_starfield<R: Rng + ?Sized>(profile: &TierProfile, rng: &mut R) -> Vec<Star> {
    let shape = StarfieldShape::for_profile(profile);
    (0..profile.star_count)
        .map(|_| {
            let angle = rng.gen::<f32>() * PI * 10.0;
            let radius = rng.gen::<f32>() * shape.radius_span + shape.radius_min;
            let y = angle.sin() * shape.spiral_height
                + (rng.gen::<f32>() - 0.5) * shape.vertical_scatter;
            let z = angle.sin() * radius * 0.5;
            Star {
                x: angle.cos() * radius,
                y,
                z,
                opacity: (1.0 - z.abs() / shape.depth_norm).max(0.1),
                twinkle_delay_sec: rng.gen::<f32>() * 3.0,
            }
        })
        .collect()
}
