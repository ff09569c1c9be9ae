use image::DynamicImage;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::StatefulImage;
use std::cell::RefCell;

use crate::mix::PixelColor;
use crate::plot::render::{render_bar_chart, render_swatch};
use crate::plot::types::BarChartSpec;
use crate::report::MixReport;
use crate::tui::theme::Theme;

/// An image shown in the terminal, with its protocol state cached across frames.
pub struct ImageSlot {
    image: DynamicImage,
    state: RefCell<Option<StatefulProtocol>>,
}

impl ImageSlot {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            state: RefCell::new(None),
        }
    }

    pub fn from_png(png_bytes: &[u8]) -> Result<Self, image::ImageError> {
        Ok(Self::new(image::load_from_memory(png_bytes)?))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Draw into `area`, encoding for the terminal on first use.
    pub fn render(&self, frame: &mut Frame, area: Rect, picker: &Picker) {
        let mut state = self.state.borrow_mut();
        let protocol = state.get_or_insert_with(|| picker.new_resize_protocol(self.image.clone()));
        frame.render_stateful_widget(StatefulImage::default(), area, protocol);
    }
}

/// Everything drawn for the current pixel. Rebuilt whenever the pixel changes.
pub struct MixView {
    pub report: MixReport,
    pub chart_spec: BarChartSpec,
    pub chart: Result<ImageSlot, String>,
    pub swatch: Result<ImageSlot, String>,
}

impl MixView {
    pub fn build(x: u32, y: u32, color: PixelColor, swatch_size: u32) -> Self {
        let report = MixReport::new(x, y, color);
        let chart_spec = BarChartSpec::pump_contribution(&report.pumps);
        let chart = render_bar_chart(&chart_spec)
            .map_err(|e| e.to_string())
            .and_then(|p| ImageSlot::from_png(&p.png_bytes).map_err(|e| e.to_string()));
        let swatch = render_swatch(color, swatch_size)
            .map_err(|e| e.to_string())
            .and_then(|p| ImageSlot::from_png(&p.png_bytes).map_err(|e| e.to_string()));
        if let Err(e) = &chart {
            tracing::error!(error = %e, "chart render failed");
        }
        if let Err(e) = &swatch {
            tracing::error!(error = %e, "swatch render failed");
        }
        Self {
            report,
            chart_spec,
            chart,
            swatch,
        }
    }
}

/// Show an inline error in place of an image.
pub fn render_image_error(frame: &mut Frame, area: Rect, what: &str, err: &str) {
    frame.render_widget(
        Paragraph::new(Span::styled(format!("[{} error: {}]", what, err), Theme::error())),
        area,
    );
}
