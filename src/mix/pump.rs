/// Simulated pump mixing: each channel's share of the total intensity.

use crate::mix::color::PixelColor;
use serde::Serialize;

/// One of the three dispensing pumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }

    /// Marker shown in front of the pump line.
    pub fn marker(self) -> &'static str {
        match self {
            Channel::Red => "\u{1f534}",
            Channel::Green => "\u{1f7e2}",
            Channel::Blue => "\u{1f535}",
        }
    }

    /// Bar color for the chart. Green is the darker named "green", not pure #00ff00.
    pub fn bar_rgb(self) -> (u8, u8, u8) {
        match self {
            Channel::Red => (255, 0, 0),
            Channel::Green => (0, 128, 0),
            Channel::Blue => (0, 0, 255),
        }
    }
}

/// Percentage split of a pixel's channels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PumpProportions {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl PumpProportions {
    /// Split `color` into channel percentages.
    ///
    /// A zero total is divided as if it were 1, so black yields 0/0/0 rather than NaN.
    pub fn from_color(color: PixelColor) -> Self {
        let total = match color.total() {
            0 => 1.0,
            t => t as f64,
        };
        Self {
            red: (color.r as f64 / total) * 100.0,
            green: (color.g as f64 / total) * 100.0,
            blue: (color.b as f64 / total) * 100.0,
        }
    }

    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Values in Red, Green, Blue order.
    pub fn values(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }

    pub fn sum(&self) -> f64 {
        self.red + self.green + self.blue
    }
}

impl From<PixelColor> for PumpProportions {
    fn from(color: PixelColor) -> Self {
        Self::from_color(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_all_zero() {
        let p = PumpProportions::from_color(PixelColor::new(0, 0, 0));
        assert_eq!(p.red, 0.0);
        assert_eq!(p.green, 0.0);
        assert_eq!(p.blue, 0.0);
        assert!(!p.red.is_nan() && !p.green.is_nan() && !p.blue.is_nan());
    }

    #[test]
    fn test_half_quarter_quarter() {
        let p = PumpProportions::from_color(PixelColor::new(100, 50, 50));
        assert_eq!(p.red, 50.0);
        assert_eq!(p.green, 25.0);
        assert_eq!(p.blue, 25.0);
    }

    #[test]
    fn test_single_channel() {
        let p = PumpProportions::from_color(PixelColor::new(0, 0, 7));
        assert_eq!(p.values(), [0.0, 0.0, 100.0]);
    }

    #[test]
    fn test_sum_is_hundred() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(15) {
                for b in (0..=255u16).step_by(5) {
                    let c = PixelColor::new(r as u8, g as u8, b as u8);
                    if c.total() == 0 {
                        continue;
                    }
                    let p = PumpProportions::from_color(c);
                    assert!((p.sum() - 100.0).abs() < 1e-9, "{:?} -> {:?}", c, p);
                    let total = c.total() as f64;
                    assert!((p.red - 100.0 * r as f64 / total).abs() < 1e-9);
                    assert!((p.green - 100.0 * g as f64 / total).abs() < 1e-9);
                    assert!((p.blue - 100.0 * b as f64 / total).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_non_negative() {
        let p = PumpProportions::from_color(PixelColor::new(1, 0, 254));
        assert!(p.values().iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_recompute_is_bit_identical() {
        let c = PixelColor::new(33, 77, 201);
        let a = PumpProportions::from_color(c);
        let b = PumpProportions::from_color(c);
        for (x, y) in a.values().iter().zip(b.values().iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
        assert_eq!(c.hex(), c.hex());
    }

    #[test]
    fn test_channel_order_and_labels() {
        let labels: Vec<&str> = Channel::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Red", "Green", "Blue"]);
    }
}
