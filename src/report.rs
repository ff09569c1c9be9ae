/// Text and JSON rendering of one mix computation.

use serde::Serialize;

use crate::mix::{Channel, PixelColor, PumpProportions};

/// Everything shown for a selected pixel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixReport {
    pub x: u32,
    pub y: u32,
    pub color: PixelColor,
    pub hex: String,
    pub pumps: PumpProportions,
}

impl MixReport {
    pub fn new(x: u32, y: u32, color: PixelColor) -> Self {
        Self {
            x,
            y,
            color,
            hex: color.hex(),
            pumps: PumpProportions::from_color(color),
        }
    }

    pub fn extracted_line(&self) -> String {
        format!("Extracted Color (R, G, B): {}", self.color)
    }

    pub fn pump_line(&self, channel: Channel) -> String {
        format!(
            "{} {} Pump: {:.2}%",
            channel.marker(),
            channel.label(),
            self.pumps.get(channel)
        )
    }

    pub fn pump_lines(&self) -> Vec<String> {
        Channel::ALL.iter().map(|c| self.pump_line(*c)).collect()
    }

    /// Plain text block for non-interactive output.
    pub fn to_text(&self) -> String {
        let mut out = Vec::new();
        out.push(format!("Pixel: ({}, {})", self.x, self.y));
        out.push(self.extracted_line());
        out.push(format!("Hex: {}", self.hex));
        out.push("Pump Simulation (RGB Proportions)".to_string());
        out.extend(self.pump_lines());
        out.join("\n")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
