// Host-side tests for the speed multiplier, drag/pinch camera and tiers.

use galaxy_core::{
    generate_starfield, CameraTransform, DeviceTier, Interaction, SpeedMultiplier, TierProfile,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn speed_multiplier_follows_press_and_release() {
    let mut speed = SpeedMultiplier::default();
    assert_eq!(speed.get(), 1.3);
    speed.hold();
    assert_eq!(speed.get(), 1.7);
    speed.release();
    assert_eq!(speed.get(), 1.0);
}

#[test]
fn mouse_drag_rotates_with_tier_sensitivity() {
    let mut input = Interaction::new(0.5);
    input.pointer_move(Vec2::new(50.0, 50.0));
    assert!(input.take_camera_update().is_none());

    input.pointer_down(Vec2::ZERO);
    input.pointer_move(Vec2::new(10.0, 20.0));
    let cam = input.take_camera_update().expect("camera changed");
    assert_eq!(cam.rotation_y, 5.0);
    assert_eq!(cam.rotation_x, -10.0);
    assert!(input.take_camera_update().is_none());

    input.pointer_up();
    input.pointer_move(Vec2::new(100.0, 100.0));
    assert!(input.take_camera_update().is_none());
}

#[test]
fn single_touch_drag_uses_touch_sensitivity() {
    let mut input = Interaction::new(0.5);
    input.touch_start(&[Vec2::ZERO]);
    assert_eq!(input.speed.get(), 1.7);
    input.touch_move(&[Vec2::new(10.0, -10.0)]);
    let cam = input.camera();
    assert!((cam.rotation_y - 3.0).abs() < 1e-5);
    assert!((cam.rotation_x - 3.0).abs() < 1e-5);
    input.touch_end();
    assert_eq!(input.speed.get(), 1.0);
    assert!(!input.is_dragging());
}

#[test]
fn pinch_scales_relative_to_start_and_clamps() {
    let mut input = Interaction::new(0.3);
    input.touch_start(&[Vec2::ZERO, Vec2::new(100.0, 0.0)]);
    assert!(!input.is_dragging());

    input.touch_move(&[Vec2::ZERO, Vec2::new(150.0, 0.0)]);
    assert!((input.camera().scale - 1.5).abs() < 1e-5);

    input.touch_move(&[Vec2::ZERO, Vec2::new(300.0, 0.0)]);
    assert_eq!(input.camera().scale, 2.0);

    input.touch_move(&[Vec2::ZERO, Vec2::new(10.0, 0.0)]);
    assert_eq!(input.camera().scale, 0.5);
}

#[test]
fn second_pinch_starts_from_current_scale() {
    let mut input = Interaction::new(0.3);
    input.touch_start(&[Vec2::ZERO, Vec2::new(100.0, 0.0)]);
    input.touch_move(&[Vec2::ZERO, Vec2::new(150.0, 0.0)]);
    input.touch_end();

    input.touch_start(&[Vec2::ZERO, Vec2::new(100.0, 0.0)]);
    input.touch_move(&[Vec2::ZERO, Vec2::new(120.0, 0.0)]);
    assert!((input.camera().scale - 1.8).abs() < 1e-5);
}

#[test]
fn coincident_pinch_start_is_ignored() {
    let mut input = Interaction::new(0.3);
    input.touch_start(&[Vec2::ONE, Vec2::ONE]);
    input.touch_move(&[Vec2::ZERO, Vec2::new(100.0, 0.0)]);
    assert_eq!(input.camera().scale, 1.0);
    assert!(input.take_camera_update().is_none());
}

#[test]
fn camera_css_matches_container_transform() {
    assert_eq!(
        CameraTransform::default().to_css(),
        "translate(-50%, -50%) rotateX(0deg) rotateY(0deg) scale(1)"
    );
    let cam = CameraTransform {
        rotation_x: -12.5,
        rotation_y: 30.0,
        scale: 1.5,
    };
    assert_eq!(
        cam.to_css(),
        "translate(-50%, -50%) rotateX(-12.5deg) rotateY(30deg) scale(1.5)"
    );
}

#[test]
fn tier_detection_thresholds() {
    assert_eq!(DeviceTier::detect(400.0, false), DeviceTier::Small);
    assert_eq!(DeviceTier::detect(480.0, false), DeviceTier::Small);
    assert_eq!(DeviceTier::detect(481.0, false), DeviceTier::Mobile);
    assert_eq!(DeviceTier::detect(768.0, false), DeviceTier::Mobile);
    assert_eq!(DeviceTier::detect(1024.0, true), DeviceTier::Mobile);
    assert_eq!(DeviceTier::detect(1024.0, false), DeviceTier::Desktop);
}

#[test]
fn tier_profiles_carry_budgets() {
    let mobile = TierProfile::for_tier(DeviceTier::Mobile);
    assert_eq!(mobile.max_particles, 200);
    assert_eq!(mobile.spawn_interval_ms, 100.0);
    assert_eq!(mobile.initial_burst, 20);

    let desktop = TierProfile::for_tier(DeviceTier::Desktop);
    assert_eq!(desktop.max_particles, 300);
    assert_eq!(desktop.spawn_interval_ms, 120.0);
    assert_eq!(desktop.initial_burst, 15);
    assert_eq!(desktop.depth_range, 500.0);
    assert_eq!(desktop.depth_norm, 400.0);
}

#[test]
fn starfield_values_stay_in_range() {
    let profile = TierProfile::for_tier(DeviceTier::Mobile);
    let mut rng = StdRng::seed_from_u64(5);
    let stars = generate_starfield(&profile, &mut rng);
    assert_eq!(stars.len(), 350);
    for s in &stars {
        assert!(s.opacity >= 0.1 && s.opacity <= 1.0);
        assert!((0.0..3.0).contains(&s.twinkle_delay_sec));
        assert!(s.z.abs() <= 500.0);
    }
}
