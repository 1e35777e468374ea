//! Display side of the scene: DOM elements for drift particles and stars, and
//! the Canvas2D heart.

use crate::dom;
use crate::style;
use fnv::FnvHashMap;
use galaxy_core::{heart_outline, DriftVisual, HeartSprite, ParticleId, Star, HEART_FILL_COLOR};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Mirrors the session's live drift particles as absolutely positioned
/// elements inside the galaxy container.
pub struct DriftLayer {
    document: web::Document,
    container: web::HtmlElement,
    color: String,
    shadow: String,
    elements: FnvHashMap<ParticleId, web::HtmlElement>,
    /// Set once the field freezes; retired elements then linger for the fade.
    fade_ms: Option<f64>,
}

impl DriftLayer {
    pub fn new(document: web::Document, container: web::HtmlElement, color: &str) -> Self {
        Self {
            document,
            container,
            color: color.to_string(),
            shadow: style::glow_text_shadow(color),
            elements: FnvHashMap::default(),
            fade_ms: None,
        }
    }

    pub fn spawn(&mut self, id: ParticleId, visual: &DriftVisual, x_percent: f32, opacity: f32) {
        let el = match self.build(visual) {
            Ok(el) => el,
            Err(e) => {
                log::error!("[drift] element for {id}: {e:?}");
                return;
            }
        };
        dom::set_style(&el, "left", &style::percent(x_percent));
        dom::set_style(&el, "opacity", &opacity.to_string());
        let _ = self.container.append_child(&el);
        self.elements.insert(id, el);
    }

    fn build(&self, visual: &DriftVisual) -> anyhow::Result<web::HtmlElement> {
        match visual {
            DriftVisual::Text { text, font_px } => self.text_element(text, *font_px),
            DriftVisual::Icon { glyph, font_px } => self.text_element(glyph, *font_px),
            DriftVisual::Image { url, width_px } => {
                let img = web::HtmlImageElement::new()
                    .map_err(|e| anyhow::anyhow!("new image: {:?}", e))?;
                img.set_src(url);
                img.set_class_name("text-particle image-particle");
                let el: web::HtmlElement = img.unchecked_into();
                dom::set_style(&el, "width", &style::px(*width_px));
                dom::set_style(&el, "height", "auto");
                dom::set_style(&el, "border-radius", "15px");
                dom::set_style(&el, "box-shadow", "0 4px 24px rgba(0,0,0,0.18)");
                dom::set_style(&el, "background", "#fff");
                Ok(el)
            }
        }
    }

    fn text_element(&self, text: &str, font_px: f32) -> anyhow::Result<web::HtmlElement> {
        let el = dom::create_html(&self.document, "div")?;
        el.set_class_name("text-particle");
        el.set_text_content(Some(text));
        dom::set_style(&el, "color", &self.color);
        dom::set_style(&el, "text-shadow", &self.shadow);
        dom::set_style(&el, "font-size", &style::px(font_px));
        Ok(el)
    }

    pub fn moved(&self, id: ParticleId, y: f32, z: f32, opacity: f32) {
        if let Some(el) = self.elements.get(&id) {
            dom::set_style(el, "transform", &style::drift_transform(y, z));
            // Once the field is fading, the CSS transition owns opacity.
            if self.fade_ms.is_none() {
                dom::set_style(el, "opacity", &opacity.to_string());
            }
        }
    }

    pub fn retire(&mut self, id: ParticleId) {
        let Some(el) = self.elements.remove(&id) else {
            return;
        };
        match self.fade_ms {
            Some(ms) => dom::set_timeout(ms as i32, move || el.remove()),
            None => el.remove(),
        }
    }

    pub fn fade_all(&mut self, fade_ms: f64) {
        self.fade_ms = Some(fade_ms);
        let transition = style::opacity_transition(fade_ms);
        for el in self.elements.values() {
            dom::set_style(el, "transition", &transition);
            dom::set_style(el, "opacity", "0");
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

pub fn create_stars(document: &web::Document, container: &web::HtmlElement, stars: &[Star]) {
    for s in stars {
        let Ok(el) = dom::create_html(document, "div") else {
            continue;
        };
        el.set_class_name("star");
        dom::set_style(&el, "left", &style::centre_offset(s.x));
        dom::set_style(&el, "top", &style::centre_offset(s.y));
        dom::set_style(&el, "transform", &style::translate_z(s.z));
        dom::set_style(&el, "animation-delay", &style::seconds(s.twinkle_delay_sec));
        dom::set_style(&el, "opacity", &s.opacity.to_string());
        let _ = container.append_child(&el);
    }
    log::info!("[stars] placed {}", stars.len());
}

fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("getContext: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow::anyhow!("not a 2d context"))
}

/// Pre-rendered heart stamp plus the board it is stamped onto every frame.
pub struct HeartCanvas {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    stamp: web::HtmlCanvasElement,
    pub sprites: Vec<HeartSprite>,
}

impl HeartCanvas {
    pub fn new(
        document: &web::Document,
        canvas: web::HtmlCanvasElement,
        stamp_size: f32,
        capacity: usize,
    ) -> anyhow::Result<Self> {
        let ctx = context_2d(&canvas)?;
        let stamp = render_stamp(document, stamp_size)?;
        dom::sync_canvas_to_client(&canvas);
        Ok(Self {
            canvas,
            ctx,
            stamp,
            sprites: Vec::with_capacity(capacity),
        })
    }

    #[inline]
    pub fn size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    pub fn resize(&self) {
        dom::sync_canvas_to_client(&self.canvas);
    }

    pub fn draw(&self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
        for s in &self.sprites {
            let size = s.size as f64;
            if size <= 0.0 {
                continue;
            }
            self.ctx.set_global_alpha(s.alpha as f64);
            let _ = self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                &self.stamp,
                s.x as f64 - size / 2.0,
                s.y as f64 - size / 2.0,
                size,
                size,
            );
        }
        self.ctx.set_global_alpha(1.0);
    }
}

fn render_stamp(document: &web::Document, size: f32) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("not a canvas"))?;
    canvas.set_width(size as u32);
    canvas.set_height(size as u32);
    let ctx = context_2d(&canvas)?;

    let outline = heart_outline(size);
    ctx.begin_path();
    if let Some((first, rest)) = outline.split_first() {
        ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            ctx.line_to(p.x as f64, p.y as f64);
        }
    }
    ctx.close_path();
    ctx.set_fill_style_str(HEART_FILL_COLOR);
    ctx.fill();
    Ok(canvas)
}
