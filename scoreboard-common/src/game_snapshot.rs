use core::fmt;
use serde::{Deserialize, Serialize};

/// Shown on the shot clock whenever the feed has nothing to display there.
pub const SHOT_CLOCK_PLACEHOLDER: &str = "--";

/// A scoreboard field as it appears on the wire. The feed is loose about
/// numeric fields and may send any of them as a JSON number or a string;
/// the display only ever uses the string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FieldValue {
    /// Numeric zero or an empty string, the values the shot clock replaces
    /// with [`SHOT_CLOCK_PLACEHOLDER`].
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Int(n) => *n == 0,
            Self::Float(x) => *x == 0.0,
            Self::Text(s) => s.is_empty(),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Home => write!(f, "Home"),
            Self::Away => write!(f, "Away"),
        }
    }
}

/// One full scoreboard snapshot, as sent on both the event stream and the
/// one-shot state endpoint. A payload missing any of the non-optional fields
/// fails to deserialize and is dropped whole by the receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardSnapshot {
    pub home_score: FieldValue,
    pub away_score: FieldValue,
    pub time_minutes: FieldValue,
    pub time_seconds: FieldValue,
    pub period_name: String,
    pub home_fouls: FieldValue,
    pub away_fouls: FieldValue,
    pub home_timeouts: FieldValue,
    pub away_timeouts: FieldValue,
    #[serde(default)]
    pub shot_clock: Option<FieldValue>,
    #[serde(default)]
    pub game_state: Option<String>,
    #[serde(default)]
    pub possession: Option<String>,
    #[serde(default)]
    pub is_overtime: bool,
    #[serde(default)]
    pub is_finished: bool,
}

/// Format the game clock. A minutes value carrying a decimal point is the
/// server's sub-minute "seconds.tenths" display and is shown verbatim;
/// otherwise minutes and seconds are zero padded to two digits each.
pub fn time_display(minutes: &FieldValue, seconds: &FieldValue) -> String {
    let minutes = minutes.to_string();
    if minutes.contains('.') {
        return minutes;
    }
    format!("{:0>2}:{:0>2}", minutes, seconds.to_string())
}

impl ScoreboardSnapshot {
    pub fn time_display(&self) -> String {
        time_display(&self.time_minutes, &self.time_seconds)
    }

    /// Shot clock text, with absent, zero, and empty values all collapsing
    /// to the placeholder.
    pub fn shot_clock_display(&self) -> String {
        match &self.shot_clock {
            Some(value) if !value.is_blank() => value.to_string(),
            _ => SHOT_CLOCK_PLACEHOLDER.to_string(),
        }
    }

    /// `"paused"` is the only value that pauses the display; anything else,
    /// including an absent field, counts as running.
    pub fn is_paused(&self) -> bool {
        self.game_state.as_deref() == Some("paused")
    }

    pub fn possession_side(&self) -> Option<Side> {
        match self
            .possession
            .as_deref()?
            .to_ascii_lowercase()
            .as_str()
        {
            "home" => Some(Side::Home),
            "away" => Some(Side::Away),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn snapshot() -> ScoreboardSnapshot {
        ScoreboardSnapshot {
            home_score: 10.into(),
            away_score: 8.into(),
            time_minutes: "5".into(),
            time_seconds: "30".into(),
            period_name: "Q2".to_string(),
            home_fouls: 2.into(),
            away_fouls: 3.into(),
            home_timeouts: 1.into(),
            away_timeouts: 2.into(),
            shot_clock: Some("14".into()),
            game_state: Some("running".to_string()),
            possession: None,
            is_overtime: false,
            is_finished: false,
        }
    }

    #[test]
    fn test_time_display() {
        assert_eq!(time_display(&"5".into(), &"3".into()), "05:03");
        assert_eq!(time_display(&"5".into(), &"30".into()), "05:30");
        assert_eq!(time_display(&10.into(), &7.into()), "10:07");
        assert_eq!(time_display(&0.into(), &0.into()), "00:00");
        // Sub-minute mode: the minutes field is already the full display
        assert_eq!(time_display(&"45.3".into(), &"0".into()), "45.3");
        assert_eq!(time_display(&FieldValue::Float(9.8), &59.into()), "9.8");
    }

    #[test]
    fn test_shot_clock_display() {
        let mut snap = snapshot();
        assert_eq!(snap.shot_clock_display(), "14");
        snap.shot_clock = Some(24.into());
        assert_eq!(snap.shot_clock_display(), "24");
        snap.shot_clock = Some("".into());
        assert_eq!(snap.shot_clock_display(), "--");
        snap.shot_clock = Some(0.into());
        assert_eq!(snap.shot_clock_display(), "--");
        snap.shot_clock = None;
        assert_eq!(snap.shot_clock_display(), "--");
    }

    #[test]
    fn test_paused_detection() {
        let mut snap = snapshot();
        assert!(!snap.is_paused());
        snap.game_state = Some("paused".to_string());
        assert!(snap.is_paused());
        snap.game_state = Some("Paused".to_string());
        assert!(!snap.is_paused());
        snap.game_state = Some(String::new());
        assert!(!snap.is_paused());
        snap.game_state = None;
        assert!(!snap.is_paused());
    }

    #[test]
    fn test_possession_side() {
        let mut snap = snapshot();
        assert_eq!(snap.possession_side(), None);
        snap.possession = Some("Home".to_string());
        assert_eq!(snap.possession_side(), Some(Side::Home));
        snap.possession = Some("away".to_string());
        assert_eq!(snap.possession_side(), Some(Side::Away));
        snap.possession = Some("None".to_string());
        assert_eq!(snap.possession_side(), None);
    }

    #[test]
    fn test_deser_full_payload() {
        let payload = r#"{"home_score":10,"away_score":8,"time_minutes":"5",
            "time_seconds":"30","period_name":"Q2","home_fouls":2,"away_fouls":3,
            "home_timeouts":1,"away_timeouts":2,"shot_clock":"14","game_state":"running"}"#;
        let snap: ScoreboardSnapshot = serde_json::from_str(payload).unwrap();
        assert_eq!(snap.home_score.to_string(), "10");
        assert_eq!(snap.away_score.to_string(), "8");
        assert_eq!(snap.time_display(), "05:30");
        assert_eq!(snap.period_name, "Q2");
        assert_eq!(snap.shot_clock_display(), "14");
        assert!(!snap.is_paused());
        assert_eq!(snap.possession_side(), None);
        assert!(!snap.is_overtime);
        assert!(!snap.is_finished);
    }

    #[test]
    fn test_deser_loose_field_types() {
        // Scores as strings, clock as numbers
        let payload = r#"{"home_score":"10","away_score":"8","time_minutes":5,
            "time_seconds":30,"period_name":"Q2","home_fouls":"2","away_fouls":"3",
            "home_timeouts":"1","away_timeouts":"2"}"#;
        let snap: ScoreboardSnapshot = serde_json::from_str(payload).unwrap();
        assert_eq!(snap.home_score, FieldValue::Text("10".to_string()));
        assert_eq!(snap.time_minutes, FieldValue::Int(5));
        assert_eq!(snap.time_display(), "05:30");
        assert_eq!(snap.shot_clock, None);
        assert_eq!(snap.game_state, None);
    }

    #[test]
    fn test_deser_rejects_bad_payloads() {
        assert!(serde_json::from_str::<ScoreboardSnapshot>("not json").is_err());
        assert!(serde_json::from_str::<ScoreboardSnapshot>("{}").is_err());
        // Missing away_score
        let payload = r#"{"home_score":10,"time_minutes":"5","time_seconds":"30",
            "period_name":"Q2","home_fouls":2,"away_fouls":3,"home_timeouts":1,
            "away_timeouts":2}"#;
        assert!(serde_json::from_str::<ScoreboardSnapshot>(payload).is_err());
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Int(0).to_string(), "0");
        assert_eq!(FieldValue::Float(45.3).to_string(), "45.3");
        assert_eq!(FieldValue::Text("OT".to_string()).to_string(), "OT");
        assert!(FieldValue::Int(0).is_blank());
        assert!(FieldValue::Text(String::new()).is_blank());
        assert!(!FieldValue::Text("0".to_string()).is_blank());
        assert!(!FieldValue::Int(24).is_blank());
    }
}
