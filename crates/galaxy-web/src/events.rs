use crate::constants::ORIENTATION_RELOAD_DELAY_MS;
use crate::dom;
use galaxy_core::{AnimationSession, Viewport};
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

// Browser gestures that would scroll or zoom the page instead of the scene.
const SUPPRESSED_EVENTS: [&str; 4] = ["wheel", "gesturestart", "gesturechange", "gestureend"];

pub struct InputWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub session: Rc<RefCell<AnimationSession>>,
    /// Set on resize; the frame loop resizes the heart canvas and clears it.
    pub resized: Rc<Cell<bool>>,
}

#[inline]
fn mouse_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn touch_points(ev: &web::TouchEvent) -> Vec<Vec2> {
    let list = ev.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        .collect()
}

fn non_passive() -> web::AddEventListenerOptions {
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    opts
}

fn listen<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    name: &str,
    opts: Option<&web::AddEventListenerOptions>,
    handler: impl FnMut(E) + 'static,
) -> js_sys::Function {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let f: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
    let _ = match opts {
        Some(o) => target.add_event_listener_with_callback_and_add_event_listener_options(name, &f, o),
        None => target.add_event_listener_with_callback(name, &f),
    };
    closure.forget();
    f
}

pub fn wire_input_handlers(w: InputWiring) {
    let doc: &web::EventTarget = w.document.as_ref();
    let opts = non_passive();

    // Mouse drag + hold-to-accelerate
    {
        let s = w.session.clone();
        listen(doc, "mousedown", None, move |ev: web::MouseEvent| {
            s.borrow_mut().pointer_down(mouse_pos(&ev));
        });
        let s = w.session.clone();
        listen(doc, "mousemove", None, move |ev: web::MouseEvent| {
            s.borrow_mut().pointer_move(mouse_pos(&ev));
        });
        let s = w.session.clone();
        listen(doc, "mouseup", None, move |_: web::MouseEvent| {
            s.borrow_mut().pointer_up();
        });
    }

    // Touch drag + pinch
    {
        let s = w.session.clone();
        listen(doc, "touchstart", Some(&opts), move |ev: web::TouchEvent| {
            ev.prevent_default();
            s.borrow_mut().touch_start(&touch_points(&ev));
        });
        let s = w.session.clone();
        listen(doc, "touchmove", Some(&opts), move |ev: web::TouchEvent| {
            ev.prevent_default();
            s.borrow_mut().touch_move(&touch_points(&ev));
        });
        let s = w.session.clone();
        listen(doc, "touchend", Some(&opts), move |_: web::TouchEvent| {
            s.borrow_mut().touch_end();
        });
    }

    for name in SUPPRESSED_EVENTS {
        listen(doc, name, Some(&opts), move |ev: web::Event| ev.prevent_default());
    }

    wire_heart_trigger(doc, &w.session);

    // Resize moves the exit line for new drift spawns and resizes the heart canvas
    {
        let s = w.session.clone();
        let resized = w.resized.clone();
        let win: &web::EventTarget = w.window.as_ref();
        listen(win, "resize", None, move |_: web::Event| {
            let (width, height) = dom::viewport_size();
            s.borrow_mut().set_viewport(Viewport::new(width, height));
            resized.set(true);
        });
    }

    {
        let win: &web::EventTarget = w.window.as_ref();
        listen(win, "orientationchange", None, move |_: web::Event| {
            dom::set_timeout(ORIENTATION_RELOAD_DELAY_MS, || {
                if let Some(w) = web::window() {
                    let _ = w.location().reload();
                }
            });
        });
    }
}

/// Double-click (desktop) and double-tap (touch) both feed the trigger. The
/// trigger ignores input until it is armed, so the listeners go in at startup
/// and come out again once the transition has latched.
fn wire_heart_trigger(doc: &web::EventTarget, session: &Rc<RefCell<AnimationSession>>) {
    let installed: Rc<RefCell<Vec<(&'static str, js_sys::Function)>>> =
        Rc::new(RefCell::new(Vec::with_capacity(2)));

    let detach = {
        let installed = installed.clone();
        let doc = doc.clone();
        move || {
            for (name, f) in installed.borrow_mut().drain(..) {
                let _ = doc.remove_event_listener_with_callback(name, &f);
            }
            log::info!("[trigger] gesture listeners removed");
        }
    };

    let s = session.clone();
    let on_latch = detach.clone();
    let dbl = listen(doc, "dblclick", None, move |_: web::MouseEvent| {
        let latched = s.borrow_mut().double_click(instant::now());
        if latched {
            on_latch();
        }
    });

    let s = session.clone();
    let on_latch = detach;
    let tap = listen(doc, "touchend", None, move |_: web::TouchEvent| {
        let latched = s.borrow_mut().tap(instant::now());
        if latched {
            on_latch();
        }
    });

    installed.borrow_mut().extend([("dblclick", dbl), ("touchend", tap)]);
}
