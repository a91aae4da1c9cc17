use super::{PageRenderer, draw_centered_text};
use crate::board::{Marker, ScoreBoard, SlotLayout, Tag};
use coarsetime::Instant;
use macroquad::prelude::*;

impl PageRenderer {
    /// The single overlay page: a lower-third panel with every configured
    /// element of the board drawn at its layout position.
    pub fn scoreboard_display(&self, board: &ScoreBoard, now: Instant) {
        draw_rectangle(330f32, 860f32, 1260f32, 200f32, self.panel_color);

        for slot in [&board.home_name, &board.away_name].into_iter().flatten() {
            draw_centered_text(&slot.text, &slot.layout, self.text_color);
        }

        for slot in [
            &board.home_score,
            &board.away_score,
            &board.game_time,
            &board.shot_clock,
        ]
        .into_iter()
        .flatten()
        {
            self.draw_slot(slot, now);
        }

        if let Some(slot) = &board.period {
            draw_centered_text(&slot.text, &slot.layout, self.text_color);
        }

        for (slot, caption) in [
            (&board.home_fouls, "FOULS"),
            (&board.away_fouls, "FOULS"),
            (&board.home_timeouts, "TO"),
            (&board.away_timeouts, "TO"),
        ] {
            if let Some(slot) = slot {
                draw_centered_text(&slot.text, &slot.layout, self.text_color);
                self.draw_caption(caption, &slot.layout);
            }
        }

        if let Some(marker) = &board.pause_marker {
            self.draw_marker(marker);
        }
        for marker in [&board.home_possession, &board.away_possession]
            .into_iter()
            .flatten()
        {
            self.draw_marker(marker);
        }

        if let Some(tag) = &board.overtime_tag {
            self.draw_tag(tag, "OT");
        }
        if let Some(tag) = &board.final_tag {
            self.draw_tag(tag, "FINAL");
        }
    }

    fn draw_caption(&self, caption: &str, layout: &SlotLayout) {
        let caption_layout = SlotLayout {
            x: layout.x,
            y: layout.y - layout.font_size as f32,
            font_size: 16,
        };
        draw_centered_text(caption, &caption_layout, self.caption_color);
    }

    fn draw_marker(&self, marker: &Marker) {
        if marker.visible {
            draw_circle(
                marker.layout.x,
                marker.layout.y,
                marker.layout.radius,
                self.accent_color,
            );
        }
    }

    fn draw_tag(&self, tag: &Tag, label: &str) {
        if tag.visible {
            draw_centered_text(label, &tag.layout, self.highlight_color);
        }
    }
}
