use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{SketchError, SketchResult};

/// Smallest line width the size slider offers
pub const MIN_LINE_WIDTH: f32 = 1.0;
/// Largest line width the size slider offers
pub const MAX_LINE_WIDTH: f32 = 50.0;

/// Stroke settings shared by every tool. Not part of the undo history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub stroke_color: Color32,
    pub line_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_color: Color32::BLACK,
            line_width: 2.0,
        }
    }
}

impl Style {
    pub fn new(stroke_color: Color32, line_width: f32) -> Self {
        Self {
            stroke_color,
            line_width,
        }
    }

    /// Same width, different color. Used by the eraser to paint with the background.
    pub fn with_color(self, stroke_color: Color32) -> Self {
        Self {
            stroke_color,
            ..self
        }
    }

    /// Set the stroke color from a color spec such as `#ff8800` or `white`.
    /// On error the current color is kept.
    pub fn set_color(&mut self, spec: &str) -> SketchResult<()> {
        self.stroke_color = parse_color(spec)?;
        Ok(())
    }

    /// Set the line width, clamped to the slider range.
    /// Non-finite or non-positive widths are rejected and the current width is kept.
    pub fn set_line_width(&mut self, width: f32) -> SketchResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(SketchError::InvalidLineWidth(width));
        }
        self.line_width = width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH);
        Ok(())
    }
}

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or a small set of CSS color names.
pub fn parse_color(spec: &str) -> SketchResult<Color32> {
    let trimmed = spec.trim();
    let invalid = || SketchError::InvalidColor(spec.to_owned());

    if let Some(hex) = trimmed.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        return match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16).ok_or_else(invalid)? as u8;
                    rgb[i] = v * 17;
                }
                Ok(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
            }
            6 => Ok(Color32::from_rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Ok(Color32::from_rgba_unmultiplied(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        };
    }

    let color = match trimmed.to_ascii_lowercase().as_str() {
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        "yellow" => Color32::from_rgb(255, 255, 0),
        "orange" => Color32::from_rgb(255, 165, 0),
        "purple" => Color32::from_rgb(128, 0, 128),
        "gray" | "grey" => Color32::from_rgb(128, 128, 128),
        _ => return Err(invalid()),
    };
    Ok(color)
}

/// Format a color as `#rrggbb`, the form the color picker hands back.
pub fn color_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
