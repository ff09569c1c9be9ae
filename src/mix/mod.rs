pub mod color;
pub mod pump;

pub use color::PixelColor;
pub use pump::{PumpProportions, Channel};
