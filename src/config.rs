use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::style::Style;
use crate::tools::Mode;

/// Settings restored between runs. The drawing itself is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SketchConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Fill color of a blank canvas, also used by the eraser
    pub background: Color32,
    /// Maximum number of undo steps kept, unbounded if `None`
    pub history_limit: Option<usize>,
    pub style: Style,
    pub mode: Mode,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color32::WHITE,
            history_limit: None,
            style: Style::default(),
            mode: Mode::Free,
        }
    }
}

impl SketchConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_history_limit(self, limit: usize) -> Self {
        Self {
            history_limit: Some(limit),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: SketchConfig = serde_json::from_str(r#"{ "width": 320 }"#).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.background, Color32::WHITE);
        assert_eq!(config.history_limit, None);
        assert_eq!(config.mode, Mode::Free);
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = SketchConfig {
            mode: Mode::Triangle,
            ..SketchConfig::with_size(100, 50).with_history_limit(20)
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SketchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
