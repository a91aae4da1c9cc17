use crate::board::{SlotLayout, TextSlot};
use coarsetime::Instant;
use macroquad::prelude::*;

mod scoreboard;

/// Draws the board each frame. Holds the overlay's palette; all element
/// placement comes from the board itself.
pub struct PageRenderer {
    pub text_color: Color,
    pub highlight_color: Color,
    pub caption_color: Color,
    pub panel_color: Color,
    pub accent_color: Color,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self {
            text_color: WHITE,
            highlight_color: GOLD,
            caption_color: GRAY,
            panel_color: Color::new(0.04f32, 0.05f32, 0.12f32, 0.85f32),
            accent_color: RED,
        }
    }
}

impl PageRenderer {
    /// Slot text in the highlight color while its change emphasis is live,
    /// the normal text color otherwise.
    fn draw_slot(&self, slot: &TextSlot, now: Instant) {
        let color = if slot.is_highlighted(now) {
            self.highlight_color
        } else {
            self.text_color
        };
        draw_centered_text(&slot.text, &slot.layout, color);
    }
}

/// Draw `text` with its center on `layout.x`, baseline at `layout.y`.
pub fn draw_centered_text(text: &str, layout: &SlotLayout, color: Color) {
    let width = measure_text(text, None, layout.font_size, 1.0).width;
    draw_text_ex(
        text,
        layout.x - width / 2f32,
        layout.y,
        TextParams {
            font_size: layout.font_size,
            color,
            ..Default::default()
        },
    );
}
