//! 2D canvas painter
//!
//! Images that failed to load (or have not decoded yet) are replaced by flat
//! placeholder rectangles so a frame never fails.

use std::collections::HashMap;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::{DrawList, RenderSink};
use crate::consts::*;
use crate::sim::{Lane, SpriteKey};

const SKY_COLOR: &str = "#7ec8e3";
const PLAYER_PLACEHOLDER: &str = "#0f0";
const BOTTOM_OBSTACLE: &str = "#f00";
const TOP_OBSTACLE: &str = "#c0392b";
const TEXT_COLOR: &str = "#fff";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    background: HtmlImageElement,
    sprites: HashMap<SpriteKey, HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(
        ctx: CanvasRenderingContext2d,
        background: HtmlImageElement,
        sprites: HashMap<SpriteKey, HtmlImageElement>,
    ) -> Self {
        Self {
            ctx,
            background,
            sprites,
        }
    }

    fn usable(img: &HtmlImageElement) -> bool {
        img.complete() && img.natural_height() != 0
    }

    fn draw_background(&self, x: f32) {
        let (w, h) = (PLAYFIELD_WIDTH as f64, PLAYFIELD_HEIGHT as f64);
        if Self::usable(&self.background) {
            for offset in [0.0, w] {
                let _ = self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        &self.background,
                        x as f64 + offset,
                        0.0,
                        w,
                        h,
                    );
            }
        } else {
            self.ctx.set_fill_style_str(SKY_COLOR);
            self.ctx.fill_rect(0.0, 0.0, w, h);
        }
    }

    fn draw_player(&self, frame: &DrawList) {
        let r = frame.player;
        match self.sprites.get(&frame.sprite) {
            Some(img) if Self::usable(img) => {
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    r.x as f64,
                    r.y as f64,
                    r.w as f64,
                    r.h as f64,
                );
            }
            _ => {
                self.ctx.set_fill_style_str(PLAYER_PLACEHOLDER);
                self.ctx
                    .fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
            }
        }
    }
}

impl RenderSink for CanvasRenderer {
    fn present(&mut self, frame: &DrawList) {
        self.draw_background(frame.background_x);

        for lane in &frame.lanes {
            self.ctx.set_fill_style_str(match lane.lane {
                Lane::Bottom => BOTTOM_OBSTACLE,
                Lane::Top => TOP_OBSTACLE,
            });
            for r in &lane.rects {
                self.ctx
                    .fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
            }
        }

        self.draw_player(frame);

        self.ctx.set_fill_style_str(TEXT_COLOR);
        for overlay in &frame.overlays {
            self.ctx.set_font(&format!("{}px Arial", overlay.font_px));
            let _ = self
                .ctx
                .fill_text(&overlay.text, overlay.x as f64, overlay.y as f64);
        }
    }
}
