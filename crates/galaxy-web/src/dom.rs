use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn html_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn create_html(document: &web::Document, tag: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{tag}>: {:?}", e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow::anyhow!("<{tag}> is not an HtmlElement"))
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

#[inline]
pub fn set_display(document: &web::Document, id: &str, display: &str) {
    if let Some(el) = html_by_id(document, id) {
        set_style(&el, "display", display);
    }
}

/// Viewport size in CSS pixels.
pub fn viewport_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width as f32, height as f32)
}

pub fn coarse_pointer() -> bool {
    web::window()
        .and_then(|w| w.match_media("(pointer: coarse)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Match the canvas backing store to its laid-out size.
pub fn sync_canvas_to_client(canvas: &web::HtmlCanvasElement) {
    canvas.set_width(canvas.client_width().max(1) as u32);
    canvas.set_height(canvas.client_height().max(1) as u32);
}

/// One-shot timer; the callback runs at most once.
pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
    if let Some(w) = web::window() {
        let cb = Closure::once_into_js(f);
        let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
    }
}

#[inline]
pub fn add_click_listener(el: &web::EventTarget, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
