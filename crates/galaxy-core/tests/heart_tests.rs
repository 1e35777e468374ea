// Host-side tests for the heart curve, stamp outline and emitter loop.

use galaxy_core::{
    ease_out_cubic, heart_outline, point_on_heart, with_length, DeviceTier, HeartEmitter,
    HeartParticle, HeartSettings, TierProfile,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

fn desktop_settings() -> HeartSettings {
    HeartSettings::for_tier(&TierProfile::for_tier(DeviceTier::Desktop))
}

#[test]
fn heart_curve_is_closed() {
    let a = point_on_heart(-PI);
    let b = point_on_heart(PI);
    assert!((a - b).length() < 1e-3, "{a:?} vs {b:?}");
}

#[test]
fn heart_curve_known_points() {
    let top = point_on_heart(0.0);
    assert!(top.x.abs() < 1e-5);
    assert!((top.y - 75.0).abs() < 1e-3);

    let tip = point_on_heart(PI);
    assert!(tip.x.abs() < 1e-3);
    assert!((tip.y + 145.0).abs() < 1e-3);
}

#[test]
fn heart_curve_is_mirror_symmetric() {
    for i in 1..50 {
        let t = i as f32 * 0.06;
        let l = point_on_heart(-t);
        let r = point_on_heart(t);
        assert!((l.x + r.x).abs() < 1e-3);
        assert!((l.y - r.y).abs() < 1e-3);
    }
}

#[test]
fn with_length_rescales_and_keeps_direction() {
    let v = with_length(Vec2::new(3.0, 4.0), 10.0);
    assert!((v - Vec2::new(6.0, 8.0)).length() < 1e-4);
    assert_eq!(with_length(Vec2::ZERO, 10.0), Vec2::ZERO);
}

#[test]
fn ease_out_passes_through_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert!((ease_out_cubic(1.0) - 1.0).abs() < 1e-6);
    assert!(ease_out_cubic(0.5) > 0.5);
}

#[test]
fn sprite_size_grows_from_zero_to_stamp_size() {
    let settings = desktop_settings();
    let mut p = HeartParticle::default();

    let born = settings.sprite_for(&p);
    assert_eq!(born.size, 0.0);
    assert_eq!(born.alpha, 1.0);

    p.age = settings.duration;
    let dead = settings.sprite_for(&p);
    assert!((dead.size - settings.size).abs() < 1e-5);
    assert!(dead.alpha.abs() < 1e-6);
}

#[test]
fn outline_stays_inside_stamp_and_closes() {
    let size = 8.0;
    let outline = heart_outline(size);
    assert!(outline.len() > 600);
    for p in &outline {
        assert!(p.x >= 0.0 && p.x <= size, "{p:?}");
        assert!(p.y >= 0.0 && p.y <= size, "{p:?}");
    }
    let first = outline[0];
    let last = outline[outline.len() - 1];
    assert!((first - last).length() < 0.05);
}

#[test]
fn settings_follow_tier() {
    let compact = HeartSettings::for_tier(&TierProfile::for_tier(DeviceTier::Small));
    assert_eq!(compact.length, 5000);
    assert_eq!(compact.velocity, 50.0);
    assert_eq!(compact.size, 6.0);

    let desktop = desktop_settings();
    assert_eq!(desktop.length, 10000);
    assert_eq!(desktop.velocity, 80.0);
    assert_eq!(desktop.effect, -1.3);
    assert_eq!(desktop.duration, 4.0);
    assert_eq!(desktop.rate(), 2500.0);
}

#[test]
fn first_frame_emits_nothing() {
    let mut emitter = HeartEmitter::new(desktop_settings());
    let mut rng = StdRng::seed_from_u64(1);
    let mut sprites = Vec::new();
    emitter.frame(1_000.0, Vec2::new(800.0, 600.0), &mut rng, &mut sprites);
    assert!(sprites.is_empty());
    assert_eq!(emitter.pool().active_len(), 0);
}

#[test]
fn frame_emits_rate_times_dt() {
    let mut emitter = HeartEmitter::new(desktop_settings());
    let mut rng = StdRng::seed_from_u64(2);
    let mut sprites = Vec::new();
    let canvas = Vec2::new(800.0, 600.0);
    emitter.frame(0.0, canvas, &mut rng, &mut sprites);
    emitter.frame(500.0, canvas, &mut rng, &mut sprites);

    assert_eq!(sprites.len(), 1250);
    for s in &sprites {
        assert!((s.alpha - 0.875).abs() < 1e-4);
        assert!(s.size > 0.0 && s.size < 8.0);
    }
}

#[test]
fn emit_count_rounds_up_and_caps_at_pool_size() {
    let emitter = HeartEmitter::new(desktop_settings());
    assert_eq!(emitter.emit_count(0.0), 0);
    assert_eq!(emitter.emit_count(0.0001), 1);
    assert_eq!(emitter.emit_count(1000.0), 10000);
}

#[test]
fn emitted_particle_moves_outward_at_configured_speed() {
    let settings = desktop_settings();
    let mut emitter = HeartEmitter::new(settings);
    let mut rng = StdRng::seed_from_u64(3);
    let canvas = Vec2::new(1000.0, 800.0);
    emitter.emit_one(canvas, &mut rng);

    let p = emitter.pool().iter_active().next().copied().expect("one particle");
    assert!((p.velocity.length() - settings.velocity).abs() < 1e-3);
    assert!((p.acceleration - p.velocity * settings.effect).length() < 1e-3);
    // Velocity points away from the canvas centre.
    let offset = p.position - canvas / 2.0;
    assert!(offset.dot(p.velocity) > 0.0);
}

#[test]
fn long_run_keeps_pool_bounded() {
    let settings = HeartSettings {
        length: 200,
        ..desktop_settings()
    };
    let mut emitter = HeartEmitter::new(settings);
    let mut rng = StdRng::seed_from_u64(4);
    let mut sprites = Vec::new();
    let mut now = 0.0;
    for _ in 0..600 {
        emitter.frame(now, Vec2::new(400.0, 400.0), &mut rng, &mut sprites);
        assert!(sprites.len() < 200);
        now += 16.0;
    }
    assert!(!sprites.is_empty());
}
