/// Chart specification and rendered output types.

use crate::mix::{Channel, PumpProportions};

/// Output image dimensions for the bar chart (pixels).
pub const CHART_WIDTH: u32 = 640;
pub const CHART_HEIGHT: u32 = 480;
/// Edge length of the mixed color swatch (pixels).
pub const SWATCH_SIZE: u32 = 150;

pub const CHART_TITLE: &str = "RGB Pump Contribution";
pub const Y_AXIS_LABEL: &str = "Pump Strength (%)";

/// A single labeled bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: (u8, u8, u8),
}

/// Fully specified bar chart ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub bars: Vec<Bar>,
    pub y_min: f64,
    pub y_max: f64,
    pub title: String,
    pub y_label: String,
}

impl BarChartSpec {
    /// Three pump bars on a fixed 0..100 axis.
    pub fn pump_contribution(pumps: &PumpProportions) -> Self {
        let bars = Channel::ALL
            .iter()
            .map(|c| Bar {
                label: c.label().to_string(),
                value: pumps.get(*c),
                color: c.bar_rgb(),
            })
            .collect();
        Self {
            bars,
            y_min: 0.0,
            y_max: 100.0,
            title: CHART_TITLE.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
        }
    }
}

/// A rendered PNG image.
#[derive(Debug, Clone)]
pub struct RenderedPlot {
    pub png_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}
