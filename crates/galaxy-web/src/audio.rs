use crate::constants::{AUDIO_ID, SONG_VOLUME};
use crate::overlay;
use galaxy_core::SceneConfig;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const UNLOCK_EVENTS: [&str; 3] = ["touchstart", "touchend", "click"];

async fn try_play(audio: &web::HtmlAudioElement) -> bool {
    match audio.play() {
        Ok(promise) => JsFuture::from(promise).await.is_ok(),
        Err(_) => false,
    }
}

/// Attach the configured song to the page's `<audio>` element and start it.
///
/// Desktop browsers get an immediate autoplay attempt. Compact devices wait
/// for the first touch/click, since they reject unprompted playback.
pub fn init_song(document: &web::Document, config: &SceneConfig, compact: bool) {
    let Some(url) = config.song_url() else {
        return;
    };
    let Some(audio) = document
        .get_element_by_id(AUDIO_ID)
        .and_then(|el| el.dyn_into::<web::HtmlAudioElement>().ok())
    else {
        log::warn!("[audio] missing #{AUDIO_ID}; song skipped");
        return;
    };
    audio.set_src(&url);
    audio.set_loop(true);
    audio.set_preload("metadata");
    audio.set_volume(SONG_VOLUME);
    log::info!("[audio] song={url}");

    if compact {
        wire_unlock_on_interaction(document, &audio);
        let doc = document.clone();
        let on_error = Closure::wrap(Box::new(move || {
            overlay::show_audio_error(&doc);
        }) as Box<dyn FnMut()>);
        let _ = audio.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
        on_error.forget();
    } else {
        let doc = document.clone();
        spawn_local(async move {
            if !try_play(&audio).await {
                log::info!("[audio] autoplay refused; offering manual play");
                overlay::show_manual_play(&doc, &audio);
            }
        });
    }
}

fn wire_unlock_on_interaction(document: &web::Document, audio: &web::HtmlAudioElement) {
    let fired = Rc::new(Cell::new(false));
    let handler: Rc<Cell<Option<js_sys::Function>>> = Rc::new(Cell::new(None));

    let doc = document.clone();
    let audio = audio.clone();
    let handler_inner = handler.clone();
    let closure = Closure::wrap(Box::new(move || {
        if fired.replace(true) {
            return;
        }
        if let Some(f) = handler_inner.take() {
            for ev in UNLOCK_EVENTS {
                let _ = doc.remove_event_listener_with_callback(ev, &f);
            }
        }
        let audio = audio.clone();
        let doc = doc.clone();
        spawn_local(async move {
            if try_play(&audio).await {
                overlay::hide_manual_play(&doc);
            } else {
                overlay::show_manual_play(&doc, &audio);
            }
        });
    }) as Box<dyn FnMut()>);

    let f: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    for ev in UNLOCK_EVENTS {
        let _ = document
            .add_event_listener_with_callback_and_add_event_listener_options(ev, &f, &opts);
    }
    handler.set(Some(f));
    closure.forget();
}
