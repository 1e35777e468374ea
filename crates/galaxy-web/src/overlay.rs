//! Screens and transient banners layered over the scene.
//!
//! Every banner is created at most once (looked up by id first) and removal
//! checks that the node is still attached, so an auto-expiry racing a manual
//! dismiss is harmless.

use crate::constants::{
    AUDIO_ERROR_ID, AUDIO_ERROR_LIFETIME_MS, ERROR_SCREEN_ID, HINT_ID, LOADING_SCREEN_ID,
    MANUAL_PLAY_FADE_MS, MANUAL_PLAY_ID, MANUAL_PLAY_LIFETIME_MS,
};
use crate::dom;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const BANNER_CSS: &str = "position: fixed; top: 20px; left: 50%; transform: translateX(-50%); \
     z-index: 1001; color: white; font-family: 'Orbitron', sans-serif;";

#[inline]
pub fn hide_loading(document: &web::Document) {
    dom::set_display(document, LOADING_SCREEN_ID, "none");
}

pub fn show_error(document: &web::Document) {
    hide_loading(document);
    dom::set_display(document, ERROR_SCREEN_ID, "flex");
}

#[inline]
fn remove_if_attached(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.remove();
    }
}

/// Show the double-click hint; `on_click` fires if the user taps it.
pub fn show_hint(document: &web::Document, on_click: impl FnMut() + 'static) {
    if document.get_element_by_id(HINT_ID).is_some() {
        return;
    }
    let Ok(tip) = dom::create_html(document, "div") else {
        return;
    };
    tip.set_id(HINT_ID);
    tip.set_class_name("double-click-tip");
    tip.set_text_content(Some("Double-tap the screen 💖"));
    dom::add_click_listener(&tip, on_click);
    if let Some(body) = document.body() {
        let _ = body.append_child(&tip);
    }
}

#[inline]
pub fn hide_hint(document: &web::Document) {
    remove_if_attached(document, HINT_ID);
}

/// Fallback when autoplay is refused.
pub fn show_manual_play(document: &web::Document, audio: &web::HtmlAudioElement) {
    if document.get_element_by_id(MANUAL_PLAY_ID).is_some() {
        return;
    }
    let Ok(button) = dom::create_html(document, "button") else {
        return;
    };
    button.set_id(MANUAL_PLAY_ID);
    button.set_text_content(Some("🎵 Play music"));
    let _ = button.style().set_css_text(&format!(
        "{BANNER_CSS} background: linear-gradient(45deg, #ff6b9d, #4ecdc4); border: none; \
         padding: 12px 24px; border-radius: 25px; font-weight: 600; cursor: pointer; \
         box-shadow: 0 4px 15px rgba(0,0,0,0.3);"
    ));

    let audio = audio.clone();
    let button_click = button.clone();
    dom::add_click_listener(&button, move || {
        let audio = audio.clone();
        let button = button_click.clone();
        spawn_local(async move {
            let played = match audio.play() {
                Ok(promise) => JsFuture::from(promise).await.is_ok(),
                Err(_) => false,
            };
            if played {
                dom::set_style(&button, "display", "none");
            } else {
                log::warn!("[audio] manual play failed");
                button.set_text_content(Some("❌ Playback failed"));
                dom::set_style(&button, "background", "#ff4757");
            }
        });
    });
    if let Some(body) = document.body() {
        let _ = body.append_child(&button);
    }

    dom::set_timeout(MANUAL_PLAY_LIFETIME_MS, move || {
        if !button.is_connected() {
            return;
        }
        dom::set_style(&button, "transition", "opacity 0.5s");
        dom::set_style(&button, "opacity", "0");
        dom::set_timeout(MANUAL_PLAY_FADE_MS, move || button.remove());
    });
}

pub fn hide_manual_play(document: &web::Document) {
    if let Some(el) = dom::html_by_id(document, MANUAL_PLAY_ID) {
        dom::set_style(&el, "display", "none");
    }
}

pub fn show_audio_error(document: &web::Document) {
    if document.get_element_by_id(AUDIO_ERROR_ID).is_some() {
        return;
    }
    let Ok(banner) = dom::create_html(document, "div") else {
        return;
    };
    banner.set_id(AUDIO_ERROR_ID);
    banner.set_text_content(Some("⚠️ Could not load the song"));
    let _ = banner.style().set_css_text(&format!(
        "{BANNER_CSS} background: rgba(255, 71, 87, 0.9); padding: 8px 16px; \
         border-radius: 15px; font-size: 12px;"
    ));
    if let Some(body) = document.body() {
        let _ = body.append_child(&banner);
    }
    let doc = document.clone();
    dom::set_timeout(AUDIO_ERROR_LIFETIME_MS, move || {
        remove_if_attached(&doc, AUDIO_ERROR_ID)
    });
}
