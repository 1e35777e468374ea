// Host-side tests for the drift-particle field: spawning, envelopes and
// the per-frame update list.

use galaxy_core::{
    depth_opacity, drift_y, image_opacity, text_opacity, DeviceTier, DriftField, DriftKind,
    DriftVisual, SceneConfig, SceneEvent, TierProfile, MAX_CATCH_UP_TICKS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config(messages: &[&str], icons: &[&str], images: &[&str]) -> SceneConfig {
    SceneConfig {
        messages: messages.iter().map(|s| s.to_string()).collect(),
        icons: icons.iter().map(|s| s.to_string()).collect(),
        images: images.iter().map(|s| s.to_string()).collect(),
        ..SceneConfig::default()
    }
}

fn small_field() -> DriftField {
    DriftField::new(TierProfile::for_tier(DeviceTier::Small), 800.0, 0.0)
}

#[test]
fn text_envelope_ramps_in_holds_and_ramps_out() {
    assert_eq!(text_opacity(0.0, 0.8), 0.0);
    assert!((text_opacity(0.05, 0.8) - 0.5).abs() < 1e-5);
    assert_eq!(text_opacity(0.5, 0.8), 0.8);
    assert!((text_opacity(0.95, 0.8) - 0.5).abs() < 1e-4);
    assert!(text_opacity(0.9999, 0.8) < 0.01);
}

#[test]
fn image_envelope_uses_tighter_window() {
    assert_eq!(image_opacity(0.0), 0.0);
    assert!((image_opacity(0.025) - 0.5).abs() < 1e-5);
    assert_eq!(image_opacity(0.07), 1.0);
    assert_eq!(image_opacity(0.93), 1.0);
    assert!(image_opacity(0.9999) < 0.01);
}

#[test]
fn depth_opacity_has_a_floor() {
    assert_eq!(depth_opacity(0.0, 250.0), 1.0);
    assert!((depth_opacity(125.0, 250.0) - 0.5).abs() < 1e-6);
    assert_eq!(depth_opacity(-250.0, 250.0), 0.4);
    assert_eq!(depth_opacity(150.0, 250.0), 0.4);
}

#[test]
fn vertical_travel_spans_viewport_plus_margins() {
    assert_eq!(drift_y(0.0, 800.0), -150.0);
    assert_eq!(drift_y(1.0, 800.0), 950.0);
    assert_eq!(drift_y(0.5, 800.0), 400.0);
}

#[test]
fn spawning_never_exceeds_tier_capacity() {
    let cfg = config(&["hi"], &["♥"], &["a.jpg"]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(7);
    let mut events = Vec::new();
    for _ in 0..500 {
        field.spawn_random(&cfg, 1.3, &mut rng, &mut events);
        assert!(field.len() <= 150);
    }
    assert_eq!(field.len(), 150);
    assert!(field.spawn_text_or_icon(&cfg, 1.3, &mut rng, &mut events).is_none());
    assert!(field.spawn_image(&cfg, 1.3, &mut rng, &mut events).is_none());
}

#[test]
fn without_images_only_text_and_icons_spawn() {
    let cfg = config(&["hi"], &["♥"], &[]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(8);
    let mut events = Vec::new();
    for _ in 0..100 {
        assert!(field.spawn_image(&cfg, 1.3, &mut rng, &mut events).is_none());
        field.spawn_random(&cfg, 1.3, &mut rng, &mut events);
    }
    let mut saw_icon = false;
    let mut saw_text = false;
    for p in field.particles() {
        match &p.visual {
            DriftVisual::Text { text, .. } => {
                assert_eq!(text, "hi");
                saw_text = true;
            }
            DriftVisual::Icon { glyph, .. } => {
                assert_eq!(glyph, "♥");
                saw_icon = true;
            }
            DriftVisual::Image { .. } => panic!("image spawned without images"),
        }
    }
    assert!(saw_icon && saw_text);
}

#[test]
fn spawned_particles_respect_position_depth_and_font_ranges() {
    let profile = TierProfile::for_tier(DeviceTier::Desktop);
    let cfg = config(&["hello"], &[], &[]);
    let mut field = DriftField::new(profile, 800.0, 0.0);
    let mut rng = StdRng::seed_from_u64(9);
    let mut events = Vec::new();
    for _ in 0..200 {
        field.spawn_text_or_icon(&cfg, 1.3, &mut rng, &mut events);
    }
    for p in field.particles() {
        assert!((0.0..100.0).contains(&p.x_percent));
        assert!(p.z.abs() <= 250.0);
        assert!((3.0..5.0).contains(&p.duration_sec));
        assert!(p.base_opacity >= 0.4 && p.base_opacity <= 1.0);
        assert_eq!(p.kind(), DriftKind::Text);
        if let DriftVisual::Text { font_px, .. } = p.visual {
            assert!((18.0..26.0).contains(&font_px));
        }
    }
}

#[test]
fn empty_icon_list_falls_back_to_messages() {
    let cfg = config(&["only text"], &[], &[]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(10);
    let mut events = Vec::new();
    for _ in 0..50 {
        field.spawn_text_or_icon(&cfg, 1.3, &mut rng, &mut events);
    }
    assert_eq!(field.len(), 50);
    assert!(field.particles().iter().all(|p| p.kind() == DriftKind::Text));
}

#[test]
fn image_particles_stay_within_width_range() {
    let cfg = config(&[], &[], &["a.jpg", "b.jpg"]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(11);
    let mut events = Vec::new();
    for _ in 0..40 {
        field.spawn_image(&cfg, 1.3, &mut rng, &mut events);
    }
    for p in field.particles() {
        match &p.visual {
            DriftVisual::Image { url, width_px } => {
                assert!(url == "a.jpg" || url == "b.jpg");
                assert!((60.0..100.0).contains(width_px));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn particle_lifecycle_binds_start_on_first_frame_and_retires() {
    let cfg = config(&["hi"], &[], &[]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(12);
    let mut events = Vec::new();
    let id = field
        .spawn_text_or_icon(&cfg, 1.0, &mut rng, &mut events)
        .expect("spawn");
    assert!(matches!(events[0], SceneEvent::DriftSpawned { id: spawned, .. } if spawned == id));
    assert_eq!(field.particles()[0].start_ms(), None);

    events.clear();
    field.update(5_000.0, &mut events);
    assert_eq!(field.particles()[0].start_ms(), Some(5_000.0));
    match events[0] {
        SceneEvent::DriftMoved { y, opacity, .. } => {
            assert_eq!(y, -150.0);
            assert_eq!(opacity, 0.0);
        }
        ref other => panic!("unexpected {other:?}"),
    }

    let span = field.particles()[0].duration_sec as f64 * 1000.0;
    events.clear();
    field.update(5_000.0 + span + 1.0, &mut events);
    assert_eq!(events, vec![SceneEvent::DriftRetired { id }]);
    assert!(field.is_empty());
}

#[test]
fn speed_multiplier_is_captured_at_spawn() {
    let cfg = config(&["hi"], &[], &[]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(13);
    let mut events = Vec::new();
    field.spawn_text_or_icon(&cfg, 1.7, &mut rng, &mut events);
    field.update(0.0, &mut events);

    let p = &field.particles()[0];
    let elapsed = p.duration_sec as f64 * 1000.0;
    assert!((p.progress(elapsed) - 1.0 / 1.7).abs() < 1e-4);
}

#[test]
fn freeze_stops_text_and_lets_images_finish() {
    let cfg = config(&["hi"], &[], &["a.jpg"]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(14);
    let mut events = Vec::new();
    field.spawn_text_or_icon(&cfg, 1.3, &mut rng, &mut events);
    field.spawn_image(&cfg, 1.3, &mut rng, &mut events);
    field.update(0.0, &mut events);

    field.freeze();
    assert!(field.spawn_text_or_icon(&cfg, 1.3, &mut rng, &mut events).is_none());

    events.clear();
    field.update(100.0, &mut events);
    assert_eq!(field.len(), 1);
    assert_eq!(field.particles()[0].kind(), DriftKind::Image);
    assert!(events
        .iter()
        .any(|e| matches!(e, SceneEvent::DriftRetired { .. })));

    // Image spawning is not gated by the freeze.
    assert!(field.spawn_image(&cfg, 1.3, &mut rng, &mut events).is_some());
}

#[test]
fn schedule_runs_burst_then_periodic_ticks() {
    let cfg = config(&["hi"], &["♥"], &[]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(15);
    let mut events = Vec::new();

    field.run_schedule(0.0, &cfg, 1.3, &mut rng, &mut events);
    assert_eq!(field.len(), 1);

    let mut now = 0.0;
    while now < 1_200.0 {
        now += 10.0;
        field.run_schedule(now, &cfg, 1.3, &mut rng, &mut events);
    }
    // 20 burst spawns at 60 ms spacing plus 12 ticks at 100 ms.
    assert_eq!(field.len(), 32);
}

#[test]
fn frozen_schedule_stops_periodic_spawns() {
    let cfg = config(&["hi"], &[], &[]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(16);
    let mut events = Vec::new();
    field.run_schedule(2_000.0, &cfg, 1.3, &mut rng, &mut events);
    let before = field.len();
    field.freeze();
    field.run_schedule(5_000.0, &cfg, 1.3, &mut rng, &mut events);
    assert_eq!(field.len(), before);
}

#[test]
fn slow_frames_keep_the_periodic_spawn_rate() {
    let cfg = config(&["hi"], &[], &[]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(17);
    let mut events = Vec::new();
    let mut now = 0.0;
    field.run_schedule(now, &cfg, 1.3, &mut rng, &mut events);
    while now < 2_000.0 {
        now += 200.0;
        field.run_schedule(now, &cfg, 1.3, &mut rng, &mut events);
    }
    // 20 burst spawns plus one per 100 ms tick, two per 200 ms frame.
    assert_eq!(field.len(), 40);
}

#[test]
fn long_stall_catches_up_a_bounded_amount_then_resyncs() {
    let cfg = config(&["hi"], &[], &[]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(18);
    let mut events = Vec::new();
    field.run_schedule(0.0, &cfg, 1.3, &mut rng, &mut events);
    field.run_schedule(10_000.0, &cfg, 1.3, &mut rng, &mut events);
    assert_eq!(field.len(), 20 + MAX_CATCH_UP_TICKS);

    field.run_schedule(10_050.0, &cfg, 1.3, &mut rng, &mut events);
    assert_eq!(field.len(), 20 + MAX_CATCH_UP_TICKS);
    field.run_schedule(10_100.0, &cfg, 1.3, &mut rng, &mut events);
    assert_eq!(field.len(), 21 + MAX_CATCH_UP_TICKS);
}

#[test]
fn viewport_height_is_fixed_per_particle_at_spawn() {
    let cfg = config(&["hi"], &[], &[]);
    let mut field = small_field();
    let mut rng = StdRng::seed_from_u64(19);
    let mut events = Vec::new();
    let first = field
        .spawn_text_or_icon(&cfg, 1.0, &mut rng, &mut events)
        .expect("spawn");
    field.update(0.0, &mut events);

    field.set_viewport_height(400.0);
    assert_eq!(field.viewport_height(), 400.0);
    let second = field
        .spawn_text_or_icon(&cfg, 1.0, &mut rng, &mut events)
        .expect("spawn");

    let old = &field.particles()[0];
    let new = &field.particles()[1];
    assert_eq!((old.id, new.id), (first, second));
    assert_eq!(old.viewport_height, 800.0);
    assert_eq!(new.viewport_height, 400.0);
    assert_eq!(old.y_at(1.0), 950.0);
    assert_eq!(new.y_at(1.0), 550.0);
}
