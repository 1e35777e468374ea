#![cfg(target_arch = "wasm32")]
use galaxy_core::{AnimationSession, Viewport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod loader;
mod overlay;
mod render;
mod style;

use constants::{GALAXY_ID, HEART_CANVAS_ID, HEART_TEXT_ID};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("galaxy-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::show_error(&document);
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = loader::load_scene(&window).await?;
    overlay::hide_loading(&document);

    if let Some(el) = dom::html_by_id(&document, HEART_TEXT_ID) {
        el.set_text_content(Some(&config.text_heart));
    }
    let galaxy = dom::html_by_id(&document, GALAXY_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{GALAXY_ID}"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(HEART_CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{HEART_CANVAS_ID}"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let (width, height) = dom::viewport_size();
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let particle_color = config.colors.clone();
    let mut session = AnimationSession::new(
        config,
        Viewport::new(width, height),
        dom::coarse_pointer(),
        instant::now(),
        seed,
    );
    let profile = *session.profile();

    audio::init_song(&document, session.config(), profile.tier.is_compact());
    render::create_stars(&document, &galaxy, &session.stars());

    let heart = render::HeartCanvas::new(
        &document,
        canvas,
        profile.heart_stamp_size,
        profile.heart_pool_length,
    )?;
    let drift = render::DriftLayer::new(document.clone(), galaxy.clone(), &particle_color);

    let session = Rc::new(RefCell::new(session));
    let resized = Rc::new(Cell::new(false));
    events::wire_input_handlers(events::InputWiring {
        window: window.clone(),
        document: document.clone(),
        session: session.clone(),
        resized: resized.clone(),
    });

    frame::start_loop(frame::FrameContext {
        session,
        document,
        galaxy,
        drift,
        heart,
        resized,
        events: Vec::with_capacity(64),
        heart_running: false,
    });
    Ok(())
}
