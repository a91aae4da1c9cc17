use coarsetime::{Duration, Instant};
use scoreboard_common::game_snapshot::{ScoreboardSnapshot, Side};
use serde::{Deserialize, Serialize};

const SCORE_HIGHLIGHT_MS: u64 = 500;
const TIME_HIGHLIGHT_MS: u64 = 300;
const SHOT_CLOCK_HIGHLIGHT_MS: u64 = 400;

/// Placement of a text element. `x` is the horizontal center of the text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotLayout {
    pub x: f32,
    pub y: f32,
    pub font_size: u16,
}

/// Placement of a dot-style indicator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayout {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Which overlay elements exist and where they sit. An element left out of
/// the layout gets no slot on the board, and updates to it are skipped
/// without affecting any other element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub home_name: Option<SlotLayout>,
    pub away_name: Option<SlotLayout>,
    pub home_score: Option<SlotLayout>,
    pub away_score: Option<SlotLayout>,
    pub game_time: Option<SlotLayout>,
    pub period: Option<SlotLayout>,
    pub home_fouls: Option<SlotLayout>,
    pub away_fouls: Option<SlotLayout>,
    pub home_timeouts: Option<SlotLayout>,
    pub away_timeouts: Option<SlotLayout>,
    pub shot_clock: Option<SlotLayout>,
    pub pause_marker: Option<MarkerLayout>,
    pub home_possession: Option<MarkerLayout>,
    pub away_possession: Option<MarkerLayout>,
    pub overtime_tag: Option<SlotLayout>,
    pub final_tag: Option<SlotLayout>,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            home_name: Some(SlotLayout {
                x: 480f32,
                y: 985f32,
                font_size: 48,
            }),
            away_name: Some(SlotLayout {
                x: 1440f32,
                y: 985f32,
                font_size: 48,
            }),
            home_score: Some(SlotLayout {
                x: 780f32,
                y: 1005f32,
                font_size: 96,
            }),
            away_score: Some(SlotLayout {
                x: 1140f32,
                y: 1005f32,
                font_size: 96,
            }),
            game_time: Some(SlotLayout {
                x: 960f32,
                y: 985f32,
                font_size: 64,
            }),
            period: Some(SlotLayout {
                x: 960f32,
                y: 1040f32,
                font_size: 36,
            }),
            home_fouls: Some(SlotLayout {
                x: 480f32,
                y: 1045f32,
                font_size: 28,
            }),
            away_fouls: Some(SlotLayout {
                x: 1440f32,
                y: 1045f32,
                font_size: 28,
            }),
            home_timeouts: Some(SlotLayout {
                x: 620f32,
                y: 1045f32,
                font_size: 28,
            }),
            away_timeouts: Some(SlotLayout {
                x: 1300f32,
                y: 1045f32,
                font_size: 28,
            }),
            shot_clock: Some(SlotLayout {
                x: 960f32,
                y: 925f32,
                font_size: 48,
            }),
            pause_marker: Some(MarkerLayout {
                x: 1056f32,
                y: 965f32,
                radius: 10f32,
            }),
            home_possession: Some(MarkerLayout {
                x: 370f32,
                y: 975f32,
                radius: 8f32,
            }),
            away_possession: Some(MarkerLayout {
                x: 1550f32,
                y: 975f32,
                radius: 8f32,
            }),
            overtime_tag: Some(SlotLayout {
                x: 870f32,
                y: 885f32,
                font_size: 32,
            }),
            final_tag: Some(SlotLayout {
                x: 1050f32,
                y: 885f32,
                font_size: 32,
            }),
        }
    }
}

/// A text element on the board. The stored text doubles as the comparison
/// source for change detection: an update reads it back before overwriting.
#[derive(Debug, Clone)]
pub struct TextSlot {
    pub layout: SlotLayout,
    pub text: String,
    highlight: Option<(Instant, Duration)>,
}

impl TextSlot {
    fn new(layout: SlotLayout) -> Self {
        Self {
            layout,
            text: String::new(),
            highlight: None,
        }
    }

    fn with_text(layout: SlotLayout, text: &str) -> Self {
        Self {
            layout,
            text: text.to_string(),
            highlight: None,
        }
    }

    /// A slot stays highlighted for a fixed span after its last text change.
    /// Another change within that span restarts the span.
    pub fn is_highlighted(&self, now: Instant) -> bool {
        self.highlight
            .is_some_and(|(changed_at, span)| now.duration_since(changed_at) < span)
    }
}

#[derive(Debug, Clone)]
pub struct Marker {
    pub layout: MarkerLayout,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct Tag {
    pub layout: SlotLayout,
    pub visible: bool,
}

/// The full overlay state: one optional slot per element, plus the last
/// snapshot applied. Written only by the render thread.
pub struct ScoreBoard {
    pub home_name: Option<TextSlot>,
    pub away_name: Option<TextSlot>,
    pub home_score: Option<TextSlot>,
    pub away_score: Option<TextSlot>,
    pub game_time: Option<TextSlot>,
    pub period: Option<TextSlot>,
    pub home_fouls: Option<TextSlot>,
    pub away_fouls: Option<TextSlot>,
    pub home_timeouts: Option<TextSlot>,
    pub away_timeouts: Option<TextSlot>,
    pub shot_clock: Option<TextSlot>,
    pub pause_marker: Option<Marker>,
    pub home_possession: Option<Marker>,
    pub away_possession: Option<Marker>,
    pub overtime_tag: Option<Tag>,
    pub final_tag: Option<Tag>,
    pub last_applied: Option<ScoreboardSnapshot>,
}

impl ScoreBoard {
    /// The team labels are written here, once, and never touched by
    /// [`apply_snapshot`](Self::apply_snapshot).
    pub fn new(layout: &BoardLayout, home_label: &str, away_label: &str) -> Self {
        Self {
            home_name: layout.home_name.map(|l| TextSlot::with_text(l, home_label)),
            away_name: layout.away_name.map(|l| TextSlot::with_text(l, away_label)),
            home_score: layout.home_score.map(TextSlot::new),
            away_score: layout.away_score.map(TextSlot::new),
            game_time: layout.game_time.map(TextSlot::new),
            period: layout.period.map(TextSlot::new),
            home_fouls: layout.home_fouls.map(TextSlot::new),
            away_fouls: layout.away_fouls.map(TextSlot::new),
            home_timeouts: layout.home_timeouts.map(TextSlot::new),
            away_timeouts: layout.away_timeouts.map(TextSlot::new),
            shot_clock: layout.shot_clock.map(TextSlot::new),
            pause_marker: layout.pause_marker.map(|layout| Marker {
                layout,
                visible: false,
            }),
            home_possession: layout.home_possession.map(|layout| Marker {
                layout,
                visible: false,
            }),
            away_possession: layout.away_possession.map(|layout| Marker {
                layout,
                visible: false,
            }),
            overtime_tag: layout.overtime_tag.map(|layout| Tag {
                layout,
                visible: false,
            }),
            final_tag: layout.final_tag.map(|layout| Tag {
                layout,
                visible: false,
            }),
            last_applied: None,
        }
    }

    /// Mirror one snapshot onto the board. Scores, the game clock, and the
    /// shot clock only change (and light up) when their rendered text
    /// differs; the period, fouls, and timeouts are overwritten outright.
    pub fn apply_snapshot(&mut self, snapshot: ScoreboardSnapshot, now: Instant) {
        set_diffed(
            &mut self.home_score,
            snapshot.home_score.to_string(),
            SCORE_HIGHLIGHT_MS,
            now,
        );
        set_diffed(
            &mut self.away_score,
            snapshot.away_score.to_string(),
            SCORE_HIGHLIGHT_MS,
            now,
        );
        set_diffed(
            &mut self.game_time,
            snapshot.time_display(),
            TIME_HIGHLIGHT_MS,
            now,
        );
        set_plain(&mut self.period, snapshot.period_name.clone());
        set_plain(&mut self.home_fouls, snapshot.home_fouls.to_string());
        set_plain(&mut self.away_fouls, snapshot.away_fouls.to_string());
        set_plain(&mut self.home_timeouts, snapshot.home_timeouts.to_string());
        set_plain(&mut self.away_timeouts, snapshot.away_timeouts.to_string());
        set_diffed(
            &mut self.shot_clock,
            snapshot.shot_clock_display(),
            SHOT_CLOCK_HIGHLIGHT_MS,
            now,
        );

        let possession = snapshot.possession_side();
        set_marker(&mut self.pause_marker, snapshot.is_paused());
        set_marker(&mut self.home_possession, possession == Some(Side::Home));
        set_marker(&mut self.away_possession, possession == Some(Side::Away));
        set_tag(&mut self.overtime_tag, snapshot.is_overtime);
        set_tag(&mut self.final_tag, snapshot.is_finished);

        self.last_applied = Some(snapshot);
    }
}

fn set_diffed(slot: &mut Option<TextSlot>, text: String, highlight_ms: u64, now: Instant) {
    // Element absent from the layout, nothing to update
    let Some(slot) = slot else { return };
    if slot.text != text {
        slot.text = text;
        slot.highlight = Some((now, Duration::from_millis(highlight_ms)));
    }
}

fn set_plain(slot: &mut Option<TextSlot>, text: String) {
    let Some(slot) = slot else { return };
    slot.text = text;
}

fn set_marker(marker: &mut Option<Marker>, visible: bool) {
    let Some(marker) = marker else { return };
    marker.visible = visible;
}

fn set_tag(tag: &mut Option<Tag>, visible: bool) {
    let Some(tag) = tag else { return };
    tag.visible = visible;
}
