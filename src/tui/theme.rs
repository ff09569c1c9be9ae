use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub fn status_bar() -> Style {
        Style::default()
            .fg(Color::Reset)
            .bg(Color::DarkGray)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn input_text() -> Style {
        Style::default()
    }

    pub fn output_label() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn output_value() -> Style {
        Style::default()
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Blue)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn panel_title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn hint() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    /// Foreground in the exact pixel color.
    pub fn pixel(r: u8, g: u8, b: u8) -> Style {
        Style::default().fg(Color::Rgb(r, g, b))
    }
}
