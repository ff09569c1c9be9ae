/// Help panel overlay with scrollable sections.

pub struct HelpPanel {
    pub visible: bool,
    pub scroll: usize,
}

impl HelpPanel {
    pub fn new() -> Self {
        Self {
            visible: false,
            scroll: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.scroll = 0;
        }
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll += n;
    }
}

impl Default for HelpPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Help content: (section_title, content_text)
pub static HELP_SECTIONS: &[(&str, &str)] = &[
    ("Quick Start", "\
Type the path of a JPEG or PNG image and press Enter.
Move to the X / Y fields with Tab and pick a pixel.
The color, pump proportions, chart and swatch follow
every change."),

    ("Pump Simulation", "\
Each pump's strength is its channel's share of R + G + B:

  red%   = R / (R + G + B) * 100

A black pixel (0, 0, 0) runs no pump at all: 0% / 0% / 0%."),

    ("Path Field", "\
  Enter        load image
  Up/Down      recent images
  Ctrl-A/E     start / end of line
  Ctrl-K       kill to end of line
  Ctrl-U       clear line
  Ctrl-W       delete back one path segment"),

    ("Coordinate Fields", "\
  Up/Down      +1 / -1
  PageUp/Down  +10 / -10
  Home/End     first / last pixel
  0-9          type a value, Enter to apply
               (values past the edge are clamped)"),

    ("Keybindings", "\
  Tab          next field
  Shift-Tab    previous field
  Ctrl-H / F1  toggle help panel
  Ctrl-D       quit
  Esc          dismiss popup"),
];
