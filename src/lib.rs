pub mod mix;
pub mod persistence;
pub mod picture;
pub mod plot;
pub mod report;
pub mod tui;
