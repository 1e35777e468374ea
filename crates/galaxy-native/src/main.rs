use anyhow::Context;
use std::path::PathBuf;

use galaxy_core::{AnimationSession, HeartPhase, HeartSprite, SceneConfig, SceneEvent, Viewport};
use glam::Vec2;

const FRAME_MS: f64 = 1000.0 / 60.0;
const DEFAULT_WIDTH: f32 = 1280.0;
const DEFAULT_HEIGHT: f32 = 800.0;
const DEFAULT_SECONDS: f64 = 20.0;

struct Args {
    scene: Option<PathBuf>,
    width: f32,
    height: f32,
    seconds: f64,
}

impl Args {
    /// `[scene.json] [width] [height] [seconds]`; `-` or a missing path means the demo scene.
    fn parse() -> anyhow::Result<Self> {
        let mut it = std::env::args().skip(1);
        let scene = it.next().filter(|s| s != "-").map(PathBuf::from);
        let width = match it.next() {
            Some(v) => v.parse().with_context(|| format!("width {v:?}"))?,
            None => DEFAULT_WIDTH,
        };
        let height = match it.next() {
            Some(v) => v.parse().with_context(|| format!("height {v:?}"))?,
            None => DEFAULT_HEIGHT,
        };
        let seconds = match it.next() {
            Some(v) => v.parse().with_context(|| format!("seconds {v:?}"))?,
            None => DEFAULT_SECONDS,
        };
        Ok(Self {
            scene,
            width,
            height,
            seconds,
        })
    }
}

fn load_scene(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    let Some(path) = path else {
        log::info!("no scene file given; using the demo scene");
        return Ok(SceneConfig::demo());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    // Accept either a bare scene or the API's `{ "data": ... }` envelope.
    SceneConfig::from_api_response(&json)
        .or_else(|_| SceneConfig::from_json(&json))
        .with_context(|| format!("parsing {}", path.display()))
}

#[derive(Default)]
struct Stats {
    spawned: usize,
    retired: usize,
    peak_live: usize,
    peak_sprites: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse()?;
    let config = load_scene(args.scene.as_ref())?;
    let canvas = Vec2::new(args.width, args.height);
    let mut session = AnimationSession::new(
        config,
        Viewport::new(args.width, args.height),
        false,
        0.0,
        0x6a1a_c7e5,
    );
    log::info!("stars: {}", session.stars().len());

    let frames = (args.seconds * 1000.0 / FRAME_MS).ceil() as u64;
    let mut events = Vec::new();
    let mut sprites: Vec<HeartSprite> = Vec::new();
    let mut stats = Stats::default();

    for frame in 0..=frames {
        let now = frame as f64 * FRAME_MS;
        events.clear();
        session.tick(now, &mut events);
        for ev in &events {
            match ev {
                SceneEvent::DriftSpawned { .. } => stats.spawned += 1,
                SceneEvent::DriftRetired { .. } => stats.retired += 1,
                SceneEvent::DriftMoved { .. } | SceneEvent::CameraChanged(_) => {}
                other => log::info!("t={:.0}ms {:?}", now, other),
            }
        }

        if session.heart_phase() == HeartPhase::Armed && session.double_click(now) {
            log::info!("t={now:.0}ms synthetic double click latched the heart");
        }
        session.heart_frame(now, canvas, &mut sprites);

        stats.peak_live = stats.peak_live.max(session.drift().len());
        stats.peak_sprites = stats.peak_sprites.max(sprites.len());
        if frame % 60 == 0 {
            log::info!(
                "t={:>5.0}ms live={} pool={} sprites={}",
                now,
                session.drift().len(),
                session.heart().map_or(0, |h| h.pool().active_len()),
                sprites.len()
            );
        }
    }

    log::info!(
        "done: spawned={} retired={} peak_live={} (cap {}) peak_sprites={}",
        stats.spawned,
        stats.retired,
        stats.peak_live,
        session.profile().max_particles,
        stats.peak_sprites
    );
    Ok(())
}
