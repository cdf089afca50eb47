//! Terminal styling for reports: colors, bold text and the rounded box.
//!
//! Reports are assembled as [`Line`]s of role-tagged spans and only painted
//! at the end, so widths are always measured on the visible text.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

/// What a piece of text is, which decides how it gets painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Station,
    Label,
    Value,
    Header,
    TafHeader,
    Separator,
    Border,
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
}

impl Role {
    fn rgb(self) -> (u8, u8, u8) {
        match self {
            Role::Station | Role::Value => (0xf3, 0xf4, 0xf6),
            Role::Label => (0x9c, 0xa3, 0xaf),
            Role::Header => (0x60, 0xa5, 0xfa),
            Role::TafHeader => (0xa7, 0x8b, 0xfa),
            Role::Separator | Role::Border => (0x4b, 0x55, 0x63),
            Role::Vfr => (0x22, 0xc5, 0x5e),
            Role::Mvfr => (0xea, 0xb3, 0x08),
            Role::Ifr => (0xef, 0x44, 0x44),
            Role::Lifr => (0xd9, 0x46, 0xef),
        }
    }

    fn bold(self) -> bool {
        matches!(
            self,
            Role::Station
                | Role::Header
                | Role::TafHeader
                | Role::Vfr
                | Role::Mvfr
                | Role::Ifr
                | Role::Lifr
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    text: String,
    role: Role,
}

/// One line of report text made of styled spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, role: Role, text: impl Into<String>) -> Self {
        self.spans.push(Span { text: text.into(), role });
        self
    }

    /// Display width in terminal columns, ignoring styling.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }

    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Whether output is painted. `Theme::plain()` leaves text untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn colored() -> Self {
        Self::new(true)
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, role: Role, text: &str) -> String {
        if !self.color || text.is_empty() {
            return text.to_string();
        }

        let (r, g, b) = role.rgb();
        let styled = text.truecolor(r, g, b);
        if role.bold() { styled.bold().to_string() } else { styled.to_string() }
    }

    pub fn render_line(&self, line: &Line) -> String {
        line.spans.iter().map(|s| self.paint(s.role, &s.text)).collect()
    }

    /// Wrap lines in a rounded border with one column of padding on each side.
    pub fn boxed(&self, lines: &[Line]) -> String {
        let inner = lines.iter().map(Line::width).max().unwrap_or(0);
        let rule = "─".repeat(inner + 2);

        let mut out = Vec::with_capacity(lines.len() + 2);
        out.push(self.paint(Role::Border, &format!("╭{rule}╮")));
        for line in lines {
            let fill = " ".repeat(inner - line.width());
            out.push(format!(
                "{} {}{} {}",
                self.paint(Role::Border, "│"),
                self.render_line(line),
                fill,
                self.paint(Role::Border, "│"),
            ));
        }
        out.push(self.paint(Role::Border, &format!("╰{rule}╯")));

        out.join("\n")
    }
}
