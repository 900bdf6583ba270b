//! Styling: map a cell colour to output escapes (24-bit ANSI, 256-colour ANSI, or plain).

use crate::colour::Hsv;

/// Something that can wrap a cell in colour codes.
pub trait Theme {
    /// Prefix to emit before a cell painted `colour`, inverted if `inverse`.
    fn prefix(&self, colour: Hsv, inverse: bool) -> String;
    /// Suffix to emit after the cell (e.g. reset).
    fn suffix(&self) -> &str;

    /// Append `text` to `out`, wrapped in this theme's codes.
    fn paint_into(&self, out: &mut String, text: &str, colour: Hsv, inverse: bool) {
        out.push_str(&self.prefix(colour, inverse));
        out.push_str(text);
        out.push_str(self.suffix());
    }
}

/// How colours are written to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// `38;2;r;g;b` escapes.
    TrueColor,
    /// Nearest entry of the 6x6x6 colour cube.
    Ansi256,
    /// No escapes at all.
    Plain,
}

/// When to colour output (`--color`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Default ANSI theme for terminal output.
#[derive(Debug)]
pub struct AnsiTheme {
    palette: Palette,
    reset: String,
}

impl AnsiTheme {
    #[must_use]
    pub fn truecolor() -> Self {
        Self { palette: Palette::TrueColor, reset: "\x1b[0m".into() }
    }

    #[must_use]
    pub fn ansi256() -> Self {
        Self { palette: Palette::Ansi256, reset: "\x1b[0m".into() }
    }

    /// No ANSI codes (plain text).
    #[must_use]
    pub fn none() -> Self {
        Self { palette: Palette::Plain, reset: String::new() }
    }

    /// Pick a theme from the colour mode, the `NO_COLOR` / `COLORTERM`
    /// environment values, and whether stdout is a terminal.
    #[must_use]
    pub fn select(
        mode: ColorMode,
        no_color: Option<&str>,
        colorterm: Option<&str>,
        is_tty: bool,
    ) -> Self {
        let enabled = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_tty && no_color.is_none_or(str::is_empty),
        };
        if !enabled {
            return Self::none();
        }
        match colorterm {
            Some("truecolor" | "24bit") => Self::truecolor(),
            _ => Self::ansi256(),
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }
}

fn cube_index(rgb: (u8, u8, u8)) -> u8 {
    let step = |c: u8| ((f64::from(c) / 255.0) * 5.0).round() as u8;
    16 + 36 * step(rgb.0) + 6 * step(rgb.1) + step(rgb.2)
}

impl Theme for AnsiTheme {
    fn prefix(&self, colour: Hsv, inverse: bool) -> String {
        let inv = if inverse { "\x1b[7m" } else { "" };
        match self.palette {
            Palette::Plain => String::new(),
            Palette::TrueColor => {
                let (r, g, b) = colour.to_rgb();
                format!("\x1b[38;2;{r};{g};{b}m{inv}")
            }
            Palette::Ansi256 => {
                let n = cube_index(colour.to_rgb());
                format!("\x1b[38;5;{n}m{inv}")
            }
        }
    }

    fn suffix(&self) -> &str {
        self.reset.as_str()
    }
}
