use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use image::DynamicImage;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use ratatui_image::picker::Picker;
use std::path::{Path, PathBuf};

use crate::mix::Channel;
use crate::persistence;
use crate::persistence::config::Config;
use crate::picture::{load_image, LoadedImage, Selection};
use crate::tui::event::is_quit;
use crate::tui::help::{HelpPanel, HELP_SECTIONS};
use crate::tui::input::{NumberInput, PathInput};
use crate::tui::output::{render_image_error, ImageSlot, MixView};
use crate::tui::status::render_status_bar;
use crate::tui::theme::Theme;

pub const TITLE: &str = "\u{1f3a8} SimuColorMix";
pub const SUBTITLE: &str = "IoT-based Real-Time Color Recognition & RGB Mixing Simulator";
pub const DESCRIPTION: &str =
    "Upload an image, select pixel coordinates, extract RGB values and simulate virtual pump mixing.";
pub const UPLOAD_PROMPT: &str = "Please upload an image to begin.";

/// Extracted color panel: triple, hex, heading, one line per pump, two borders.
const COLOR_PANEL_ROWS: u16 = 3 + Channel::ALL.len() as u16 + 2;
/// Terminal rows given to the swatch panel (including borders).
const SWATCH_ROWS: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Path,
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Info(String),
    Error(String),
}

/// A loaded image together with its coordinate selection and outputs.
pub struct Loaded {
    pub image: LoadedImage,
    pub selection: Selection,
    pub preview: ImageSlot,
    pub view: Option<MixView>,
}

pub struct App {
    pub path_input: PathInput,
    pub x_input: NumberInput,
    pub y_input: NumberInput,
    pub focus: Focus,
    pub loaded: Option<Loaded>,
    pub message: Option<Message>,
    pub should_quit: bool,
    pub picker: Option<Picker>,
    pub help: HelpPanel,
    pub config: Config,
    /// Where the recent image list is saved; `None` keeps it in memory only.
    pub recent_file: Option<PathBuf>,
}

impl App {
    pub fn new(picker: Option<Picker>, recent: Vec<String>, config: Config) -> Self {
        Self {
            path_input: PathInput::new(recent),
            x_input: NumberInput::default(),
            y_input: NumberInput::default(),
            focus: Focus::Path,
            loaded: None,
            message: None,
            should_quit: false,
            picker,
            help: HelpPanel::new(),
            config,
            recent_file: None,
        }
    }

    pub fn with_recent_file(mut self, path: Option<PathBuf>) -> Self {
        self.recent_file = path;
        self
    }

    /// Load the image at `path`, replacing the current one on success.
    /// On failure the previous image stays and the error is shown.
    pub fn open(&mut self, path: &Path) -> bool {
        match load_image(path) {
            Ok(image) => {
                let (w, h) = image.dimensions();
                tracing::info!(path = %path.display(), width = w, height = h, "image loaded");

                let selection = Selection::for_dimensions(w, h, self.config.default_coordinate);
                let preview = ImageSlot::new(DynamicImage::ImageRgb8(image.pixels.clone()));
                self.loaded = Some(Loaded {
                    image,
                    selection,
                    preview,
                    view: None,
                });
                self.path_input.set_text(&path.to_string_lossy());
                self.remember(path);
                self.message = None;
                self.refresh();
                true
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "image load failed");
                self.message = Some(Message::Error(err.to_string()));
                false
            }
        }
    }

    /// Move the selection to (x, y), clamped to the image.
    pub fn select(&mut self, x: u32, y: u32) {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.selection.set_x(x);
            loaded.selection.set_y(y);
        }
        self.refresh();
    }

    /// Recompute every output for the current selection.
    fn refresh(&mut self) {
        let swatch_size = self.config.swatch_size;
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        let (x, y) = (loaded.selection.x(), loaded.selection.y());
        self.x_input.sync(x);
        self.y_input.sync(y);

        let unchanged = loaded
            .view
            .as_ref()
            .is_some_and(|v| v.report.x == x && v.report.y == y);
        if unchanged {
            return;
        }
        loaded.view = loaded.image.pixel_at(x, y).map(|color| {
            tracing::debug!(x, y, color = %color.hex(), "pixel selected");
            MixView::build(x, y, color, swatch_size)
        });
    }

    fn remember(&mut self, path: &Path) {
        let entry = path.to_string_lossy();
        persistence::recent::remember(&mut self.path_input.recent, &entry, self.config.recent_limit);
        if let Some(file) = &self.recent_file {
            persistence::recent::save_recent_to(file, &self.path_input.recent);
        }
    }

    /// Handle a key event. Returns true if the screen should be redrawn.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if is_quit(&key) {
            self.should_quit = true;
            return true;
        }

        if self.help.visible {
            return self.handle_key_help(key);
        }

        match key {
            KeyEvent { code: KeyCode::Char('h'), modifiers: KeyModifiers::CONTROL, .. }
            | KeyEvent { code: KeyCode::F(1), .. } => {
                self.help.toggle();
                true
            }
            KeyEvent { code: KeyCode::BackTab, .. } => {
                self.cycle_focus(false);
                true
            }
            KeyEvent { code: KeyCode::Tab, modifiers, .. } => {
                self.cycle_focus(!modifiers.contains(KeyModifiers::SHIFT));
                true
            }
            KeyEvent { code: KeyCode::Esc, .. } => self.message.take().is_some(),
            _ => match self.focus {
                Focus::Path => self.handle_key_path(key),
                Focus::X | Focus::Y => self.handle_key_coordinate(key),
            },
        }
    }

    /// Key handling when the help panel is visible.
    fn handle_key_help(&mut self, key: KeyEvent) -> bool {
        match key {
            KeyEvent { code: KeyCode::Esc, .. }
            | KeyEvent { code: KeyCode::Char('h'), modifiers: KeyModifiers::CONTROL, .. }
            | KeyEvent { code: KeyCode::F(1), .. } => {
                self.help.toggle();
                true
            }
            KeyEvent { code: KeyCode::Up, .. } | KeyEvent { code: KeyCode::Char('k'), .. } => {
                self.help.scroll_up(1);
                true
            }
            KeyEvent { code: KeyCode::Down, .. } | KeyEvent { code: KeyCode::Char('j'), .. } => {
                self.help.scroll_down(1);
                true
            }
            KeyEvent { code: KeyCode::PageUp, .. } => {
                self.help.scroll_up(10);
                true
            }
            KeyEvent { code: KeyCode::PageDown, .. } => {
                self.help.scroll_down(10);
                true
            }
            // Any other key closes help
            _ => {
                self.help.visible = false;
                true
            }
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        self.commit_coordinate();
        if self.loaded.is_none() {
            self.focus = Focus::Path;
            return;
        }
        self.focus = match (self.focus, forward) {
            (Focus::Path, true) | (Focus::Y, false) => Focus::X,
            (Focus::X, true) | (Focus::Path, false) => Focus::Y,
            (Focus::Y, true) | (Focus::X, false) => Focus::Path,
        };
    }

    fn handle_key_path(&mut self, key: KeyEvent) -> bool {
        let input = &mut self.path_input;
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {
                let path = input.resolved_path();
                if path.is_empty() {
                    self.message = Some(Message::Info(UPLOAD_PROMPT.to_string()));
                } else {
                    self.open(Path::new(&path));
                }
            }
            (KeyCode::Up, _) => input.recent_up(),
            (KeyCode::Down, _) => input.recent_down(),
            (KeyCode::Left, _) => input.move_left(),
            (KeyCode::Right, _) => input.move_right(),
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => input.move_home(),
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => input.move_end(),
            (KeyCode::Backspace, _) => input.backspace(),
            (KeyCode::Delete, _) => input.delete(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => input.clear(),
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => input.kill_line(),
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => input.kill_segment_back(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => input.insert(c),
            _ => return false,
        }
        true
    }

    fn handle_key_coordinate(&mut self, key: KeyEvent) -> bool {
        let step = match key.code {
            KeyCode::Up | KeyCode::Char('+') => Some(1),
            KeyCode::Down | KeyCode::Char('-') => Some(-1),
            KeyCode::PageUp => Some(10),
            KeyCode::PageDown => Some(-10),
            KeyCode::Home => Some(i64::MIN / 2),
            KeyCode::End => Some(i64::MAX / 2),
            _ => None,
        };
        if let Some(delta) = step {
            self.step_focused(delta);
            return true;
        }

        let field = match self.focus {
            Focus::X => &mut self.x_input,
            Focus::Y => &mut self.y_input,
            Focus::Path => return false,
        };
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => field.push_digit(c),
            KeyCode::Backspace => field.backspace(),
            KeyCode::Enter => self.commit_coordinate(),
            _ => return false,
        }
        true
    }

    fn step_focused(&mut self, delta: i64) {
        let focus = self.focus;
        if let Some(loaded) = self.loaded.as_mut() {
            match focus {
                Focus::X => loaded.selection.step_x(delta),
                Focus::Y => loaded.selection.step_y(delta),
                Focus::Path => return,
            }
        }
        self.refresh();
    }

    /// Apply a typed coordinate. An empty or invalid draft reverts to the current value.
    fn commit_coordinate(&mut self) {
        let edit = match self.focus {
            Focus::X => self.x_input.take_edit(),
            Focus::Y => self.y_input.take_edit(),
            Focus::Path => return,
        };
        if let Some(loaded) = self.loaded.as_mut() {
            if let Some(value) = edit {
                match self.focus {
                    Focus::X => loaded.selection.set_x(value),
                    _ => loaded.selection.set_y(value),
                }
            }
            self.x_input.sync(loaded.selection.x());
            self.y_input.sync(loaded.selection.y());
        }
        self.refresh();
    }

    /// Render the full UI.
    pub fn render(&mut self, frame: &mut Frame) {
        let outer = Layout::vertical([
            Constraint::Length(1), // Status bar
            Constraint::Length(3), // Header
            Constraint::Length(3), // Controls
            Constraint::Length(1), // Message
            Constraint::Min(5),    // Outputs
        ])
        .split(frame.area());

        let file = self
            .loaded
            .as_ref()
            .map(|l| (l.image.file_name(), l.image.width(), l.image.height()));
        let graphics = match &self.picker {
            Some(p) => format!("graphics: {:?}", p.protocol_type()),
            None => "graphics: text only".to_string(),
        };
        render_status_bar(
            frame,
            outer[0],
            file.as_ref().map(|(n, w, h)| (n.as_str(), *w, *h)),
            &graphics,
        );

        self.render_header(frame, outer[1]);
        self.render_controls(frame, outer[2]);
        self.render_message(frame, outer[3]);

        if self.loaded.is_some() {
            self.render_outputs(frame, outer[4]);
        } else {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border());
            let prompt = Paragraph::new(Span::styled(format!("\u{2139} {}", UPLOAD_PROMPT), Theme::info()))
                .block(block);
            frame.render_widget(prompt, outer[4]);
        }

        if self.help.visible {
            self.render_help(frame, frame.area());
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(TITLE, Theme::title())),
            Line::from(Span::styled(SUBTITLE, Theme::subtitle())),
            Line::from(Span::styled(DESCRIPTION, Theme::hint())),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::horizontal([
            Constraint::Percentage(60),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(area);

        let border = |focus: Focus| {
            if self.focus == focus {
                Theme::border_focused()
            } else {
                Theme::border()
            }
        };

        let path_block = Block::default()
            .borders(Borders::ALL)
            .border_style(border(Focus::Path))
            .title(" Upload an Image (jpg, jpeg, png) ");
        let path_inner = path_block.inner(cols[0]);
        frame.render_widget(path_block, cols[0]);
        let width = path_inner.width as usize;
        let start = self.path_input.scroll_start(width);
        let visible: String = self.path_input.text.chars().skip(start).take(width).collect();
        frame.render_widget(
            Paragraph::new(Span::styled(visible, Theme::input_text())),
            path_inner,
        );

        let ranges = self.loaded.as_ref().map(|l| (l.selection.x_range(), l.selection.y_range()));
        let fields = [
            (Focus::X, "X (Width)", &self.x_input, ranges.map(|r| r.0)),
            (Focus::Y, "Y (Height)", &self.y_input, ranges.map(|r| r.1)),
        ];
        for ((focus, label, input, range), col) in fields.into_iter().zip([cols[1], cols[2]]) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border(focus))
                .title(format!(" {} ", label));
            let inner = block.inner(col);
            frame.render_widget(block, col);
            let style = if input.dirty { Theme::output_label() } else { Theme::input_text() };
            let mut spans = vec![Span::styled(input.text.as_str(), style)];
            if let Some((lo, hi)) = range {
                spans.push(Span::styled(format!("  {}..{}", lo, hi), Theme::hint()));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), inner);
        }

        if self.focus == Focus::Path && !self.help.visible {
            let cursor = self.path_input.cursor_column() - start;
            frame.set_cursor_position((path_inner.x + cursor as u16, path_inner.y));
        }
    }

    fn render_message(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.message {
            Some(Message::Error(e)) => Span::styled(format!(" {}", e), Theme::error()),
            Some(Message::Info(i)) => Span::styled(format!(" {}", i), Theme::info()),
            None => Span::styled(" Tab: next field  F1: help  Ctrl-D: quit", Theme::hint()),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_outputs(&self, frame: &mut Frame, area: Rect) {
        let Some(loaded) = self.loaded.as_ref() else {
            return;
        };

        let cols = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(area);
        let left = Layout::vertical([
            Constraint::Length(self.config.preview_height + 2),
            Constraint::Length(COLOR_PANEL_ROWS),
            Constraint::Min(0),
        ])
        .split(cols[0]);
        let right = Layout::vertical([
            Constraint::Min(self.config.chart_height + 2),
            Constraint::Length(SWATCH_ROWS),
        ])
        .split(cols[1]);

        self.render_preview(frame, left[0], loaded);
        match &loaded.view {
            Some(view) => {
                self.render_color(frame, left[1], view);
                self.render_chart(frame, right[0], view);
                self.render_swatch(frame, right[1], view);
            }
            None => {
                let msg = format!(
                    "no pixel at ({}, {})",
                    loaded.selection.x(),
                    loaded.selection.y()
                );
                frame.render_widget(Paragraph::new(Span::styled(msg, Theme::error())), left[1]);
            }
        }
    }

    fn panel(title: &str) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(format!(" {} ", title), Theme::panel_title()))
    }

    fn render_preview(&self, frame: &mut Frame, area: Rect, loaded: &Loaded) {
        let block = Self::panel("Uploaded Image");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.picker {
            Some(picker) => loaded.preview.render(frame, inner, picker),
            None => {
                let (w, h) = loaded.preview.dimensions();
                let text = format!("[{} {}x{}: image display requires Kitty/iTerm2/Sixel]", loaded.image.file_name(), w, h);
                frame.render_widget(
                    Paragraph::new(Span::styled(text, Theme::hint())).wrap(Wrap { trim: true }),
                    inner,
                );
            }
        }
    }

    fn render_color(&self, frame: &mut Frame, area: Rect, view: &MixView) {
        let block = Self::panel("Extracted Color");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let report = &view.report;
        let c = report.color;
        let mut lines = vec![
            Line::from(Span::styled(report.extracted_line(), Theme::output_label())),
            Line::from(vec![
                Span::styled("\u{2588}\u{2588}\u{2588}\u{2588} ", Theme::pixel(c.r, c.g, c.b)),
                Span::styled(report.hex.clone(), Theme::output_value()),
            ]),
            Line::from(Span::styled("Pump Simulation (RGB Proportions)", Theme::panel_title())),
        ];
        for line in report.pump_lines() {
            lines.push(Line::from(Span::styled(line, Theme::output_value())));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, view: &MixView) {
        let spec = &view.chart_spec;
        let block = Self::panel(&spec.title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);
        frame.render_widget(
            Paragraph::new(Span::styled(format!("{} [{:.0}..{:.0}]", spec.y_label, spec.y_min, spec.y_max), Theme::hint())),
            rows[0],
        );

        match (&self.picker, &view.chart) {
            (Some(picker), Ok(slot)) => {
                slot.render(frame, rows[1], picker);
                let slots = Layout::horizontal(vec![Constraint::Ratio(1, spec.bars.len().max(1) as u32); spec.bars.len()])
                    .split(rows[2]);
                for (bar, slot_area) in spec.bars.iter().zip(slots.iter()) {
                    let (r, g, b) = bar.color;
                    frame.render_widget(
                        Paragraph::new(Span::styled(bar.label.clone(), Theme::pixel(r, g, b)))
                            .alignment(ratatui::layout::Alignment::Center),
                        *slot_area,
                    );
                }
            }
            (Some(_), Err(e)) => render_image_error(frame, rows[1], "chart", e),
            (None, _) => self.render_native_chart(frame, rows[1].union(rows[2]), view),
        }
    }

    /// Text-mode bar chart for terminals without a graphics protocol.
    fn render_native_chart(&self, frame: &mut Frame, area: Rect, view: &MixView) {
        let spec = &view.chart_spec;
        let bars: Vec<Bar> = spec
            .bars
            .iter()
            .map(|bar| {
                let (r, g, b) = bar.color;
                Bar::default()
                    .value(bar.value.round() as u64)
                    .text_value(format!("{:.2}%", bar.value))
                    .label(Line::from(bar.label.clone()))
                    .style(Style::default().fg(Color::Rgb(r, g, b)))
            })
            .collect();

        let bar_width = (area.width / spec.bars.len().max(1) as u16).saturating_sub(2).max(1);
        let chart = BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(2)
            .max(spec.y_max as u64)
            .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
        frame.render_widget(chart, area);
    }

    fn render_swatch(&self, frame: &mut Frame, area: Rect, view: &MixView) {
        let block = Self::panel("Mixed Output Color");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let c = view.report.color;
        match (&self.picker, &view.swatch) {
            (Some(picker), Ok(slot)) => slot.render(frame, inner, picker),
            (Some(_), Err(e)) => render_image_error(frame, inner, "swatch", e),
            (None, _) => {
                // Terminal cells are about twice as tall as wide
                let width = (inner.height * 2).min(inner.width);
                let fill = Rect { width, ..inner };
                frame.render_widget(Block::default().style(Style::default().bg(Color::Rgb(c.r, c.g, c.b))), fill);
            }
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        // 80% of screen, centered
        let w = (area.width * 4 / 5).max(40).min(area.width);
        let h = (area.height * 4 / 5).max(10).min(area.height);
        let x = area.x + (area.width.saturating_sub(w)) / 2;
        let y = area.y + (area.height.saturating_sub(h)) / 2;
        let popup_area = Rect { x, y, width: w, height: h };

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused())
            .title(Span::styled(
                " Help: Esc to close, \u{2191}/\u{2193} to scroll ",
                Theme::panel_title(),
            ));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut lines: Vec<Line<'static>> = Vec::new();
        for &(title, content) in HELP_SECTIONS {
            lines.push(Line::from(Span::styled(
                format!(" {} ", title),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for text_line in content.lines() {
                lines.push(Line::from(format!("  {}", text_line)));
            }
            lines.push(Line::from(""));
        }

        // Clamp scroll
        let visible = inner.height as usize;
        let max_scroll = lines.len().saturating_sub(visible);
        let scroll = self.help.scroll.min(max_scroll);

        let visible_lines: Vec<Line> = lines.into_iter().skip(scroll).take(visible).collect();
        frame.render_widget(Paragraph::new(visible_lines), inner);
    }
}
