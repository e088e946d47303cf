//! 2D canvas drawing of cities and tours.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;

use crate::error::{GalaxyError, GalaxyResult};
use crate::tsp::{City, Tour, LAYOUT_EXTENT};
use crate::visualizer::Renderer;

const BACKGROUND: &str = "rgba(15, 23, 42, 0.9)";
const GRID: &str = "rgba(255, 255, 255, 0.1)";
const GRID_SPACING: f64 = 50.0;
const ACCENT: &str = "#22d3ee";
const ORIGIN_CITY: &str = "#0ea5e9";
const CITY: &str = "#06b6d4";
const HIGHLIGHT: &str = "#8b5cf6";
const TITLE: &str = "OPTIMIZATION VISUALIZATION";

/// [`Renderer`] on a `<canvas>` 2D context.
pub struct CanvasRenderer {
    canvas: web_sys::HtmlCanvasElement,
    ctx: web_sys::CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Wrap `canvas`, sizing its backing store to the displayed size.
    pub fn new(canvas: web_sys::HtmlCanvasElement) -> GalaxyResult<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| GalaxyError::dom("getContext('2d') failed"))?
            .ok_or_else(|| GalaxyError::dom("canvas has no 2d context"))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .map_err(|_| GalaxyError::dom("unexpected canvas context type"))?;

        let (w, h) = (canvas.offset_width(), canvas.offset_height());
        if w > 0 && h > 0 {
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
        }

        Ok(Self { canvas, ctx })
    }

    fn size(&self) -> (f64, f64) {
        (
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }

    /// Layout coordinates to canvas pixels.
    fn project(&self, city: &City) -> (f64, f64) {
        let (w, h) = self.size();
        (city.x / LAYOUT_EXTENT * w, city.y / LAYOUT_EXTENT * h)
    }

    fn circle(&self, x: f64, y: f64, radius: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
        self.ctx.fill();
    }
}

impl Renderer for CanvasRenderer {
    fn draw_background(&mut self) {
        let (w, h) = self.size();
        let ctx = &self.ctx;

        ctx.set_shadow_blur(0.0);
        ctx.set_fill_style_str(BACKGROUND);
        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_stroke_style_str(GRID);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        let mut x = 0.0;
        while x <= w {
            ctx.move_to(x, 0.0);
            ctx.line_to(x, h);
            x += GRID_SPACING;
        }
        let mut y = 0.0;
        while y <= h {
            ctx.move_to(0.0, y);
            ctx.line_to(w, y);
            y += GRID_SPACING;
        }
        ctx.stroke();

        ctx.set_fill_style_str(ACCENT);
        ctx.set_font("20px Orbitron, sans-serif");
        ctx.set_text_align("center");
        ctx.set_shadow_color(ACCENT);
        ctx.set_shadow_blur(10.0);
        let _ = ctx.fill_text(TITLE, w / 2.0, 40.0);
        ctx.set_shadow_blur(0.0);
    }

    fn draw_cities(&mut self, cities: &[City]) {
        for (i, city) in cities.iter().enumerate() {
            let (x, y) = self.project(city);
            let color = if i == 0 { ORIGIN_CITY } else { CITY };

            self.ctx.set_fill_style_str(color);
            self.ctx.set_shadow_color(color);
            self.ctx.set_shadow_blur(15.0);
            self.circle(x, y, 8.0);

            self.ctx.set_shadow_blur(0.0);
            self.ctx.set_fill_style_str("#ffffff");
            self.ctx.set_font("12px 'Exo 2', sans-serif");
            self.ctx.set_text_align("center");
            let _ = self.ctx.fill_text(&city.id.to_string(), x, y - 15.0);
        }
    }

    fn draw_tour(&mut self, cities: &[City], tour: &Tour) {
        let mut points = tour
            .as_slice()
            .iter()
            .filter_map(|&idx| cities.get(idx))
            .map(|c| self.project(c));
        let Some((x0, y0)) = points.next() else {
            return;
        };

        self.ctx.set_stroke_style_str(ACCENT);
        self.ctx.set_line_width(3.0);
        self.ctx.set_shadow_color(ACCENT);
        self.ctx.set_shadow_blur(10.0);
        self.ctx.begin_path();
        self.ctx.move_to(x0, y0);
        for (x, y) in points {
            self.ctx.line_to(x, y);
        }
        self.ctx.stroke();
        self.ctx.set_shadow_blur(0.0);
    }

    fn highlight_city(&mut self, city: &City) {
        let (x, y) = self.project(city);
        self.ctx.set_fill_style_str(HIGHLIGHT);
        self.ctx.set_shadow_color(HIGHLIGHT);
        self.ctx.set_shadow_blur(20.0);
        self.circle(x, y, 12.0);
        self.ctx.set_shadow_blur(0.0);
    }
}
