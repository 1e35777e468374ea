use crate::constants::HEART_CONTAINER_ID;
use crate::dom;
use crate::overlay;
use crate::render::{DriftLayer, HeartCanvas};
use galaxy_core::{AnimationSession, SceneEvent};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: Rc<RefCell<AnimationSession>>,
    pub document: web::Document,
    pub galaxy: web::HtmlElement,
    pub drift: DriftLayer,
    pub heart: HeartCanvas,
    pub resized: Rc<Cell<bool>>,

    pub events: Vec<SceneEvent>,
    pub heart_running: bool,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = instant::now();
        self.events.clear();
        self.session.borrow_mut().tick(now, &mut self.events);

        let events = std::mem::take(&mut self.events);
        for ev in &events {
            self.apply(ev);
        }
        self.events = events;

        if self.resized.replace(false) {
            self.heart.resize();
        }
        if self.heart_running {
            let size = self.heart.size();
            let drew = self
                .session
                .borrow_mut()
                .heart_frame(now, size, &mut self.heart.sprites);
            if drew {
                self.heart.draw();
            }
        }
    }

    fn apply(&mut self, ev: &SceneEvent) {
        match ev {
            SceneEvent::DriftSpawned {
                id,
                visual,
                x_percent,
                base_opacity,
            } => self.drift.spawn(*id, visual, *x_percent, *base_opacity),
            SceneEvent::DriftMoved { id, y, z, opacity } => self.drift.moved(*id, *y, *z, *opacity),
            SceneEvent::DriftRetired { id } => self.drift.retire(*id),
            SceneEvent::HintShown => {
                let s = self.session.clone();
                overlay::show_hint(&self.document, move || s.borrow_mut().dismiss_hint());
            }
            SceneEvent::HintDismissed => overlay::hide_hint(&self.document),
            SceneEvent::DriftFrozen { fade_ms } => {
                log::info!("[frame] fading {} drift elements", self.drift.len());
                self.drift.fade_all(*fade_ms);
            }
            SceneEvent::HeartActivated => {
                if let Some(container) = dom::html_by_id(&self.document, HEART_CONTAINER_ID) {
                    let _ = container.class_list().add_1("active");
                }
                // The canvas only gets a layout size once its container is shown.
                self.heart.resize();
                self.heart_running = true;
            }
            SceneEvent::CameraChanged(camera) => {
                dom::set_style(&self.galaxy, "transform", &camera.to_css());
            }
        }
    }
}

/// Drive `ctx.frame()` from requestAnimationFrame for the page's lifetime.
pub fn start_loop(mut ctx: FrameContext) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
