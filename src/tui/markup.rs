//! Console markup → ratatui `Text` renderer.
//!
//! Log lines and toasts are written with inline tags:
//!
//! ```text
//! [bold]Screenshot saved: [green]'/tmp/shot.svg'
//! by [italic]Someone[/]
//! [bold white on red]Alert[/bold white on red] resumes normal style
//! ```
//!
//! Tags stack. `[/]` closes the most recent tag, `[/tag]` the most recent
//! matching one, and tags left open run to the end of the text. `\[` is a
//! literal bracket. Anything in brackets that isn't a recognised style is
//! kept as literal text, so `[1, 2]` survives untouched.
//!
//! With highlighting on, spans that don't set their own foreground get
//! repr-style coloring: quoted strings, numbers, and `true`/`false`/`None`.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Render markup into styled lines. `\n` starts a new line; open tags carry over.
pub fn render(content: &str, base: Style, highlight: bool) -> Text<'static> {
    let mut w = Writer::new(base, highlight);
    let mut rest = content;

    while let Some(pos) = rest.find(['[', '\\']) {
        w.text(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("\\[") {
            w.text("[");
            rest = after;
            continue;
        }
        if tail.starts_with('\\') {
            w.text("\\");
            rest = &tail[1..];
            continue;
        }

        // tail starts with '['
        match tail.find(']') {
            Some(end) if w.tag(&tail[1..end]) => rest = &tail[end + 1..],
            _ => {
                w.text("[");
                rest = &tail[1..];
            }
        }
    }
    w.text(rest);
    w.finish()
}

/// Render markup that is known to be a single line.
pub fn render_line(content: &str, base: Style, highlight: bool) -> Line<'static> {
    let text = render(content, base, highlight);
    let mut lines = text.lines.into_iter();
    let mut first = lines.next().unwrap_or_default();
    for line in lines {
        first.spans.push(Span::styled(" ", base));
        first.spans.extend(line.spans);
    }
    first
}

/// Remove markup, leaving the plain text.
pub fn strip(content: &str) -> String {
    render(content, Style::default(), false)
        .lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|s| s.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    lines: Vec<Line<'static>>,
    base: Style,
    highlight: bool,
    /// Open tags with the style overlay each one applied.
    stack: Vec<(String, Style)>,
}

impl Writer {
    fn new(base: Style, highlight: bool) -> Self {
        Self {
            lines: vec![Line::default()],
            base,
            highlight,
            stack: vec![],
        }
    }

    fn style(&self) -> Style {
        self.stack
            .iter()
            .fold(self.base, |acc, (_, overlay)| acc.patch(*overlay))
    }

    /// True if an open tag explicitly set the foreground.
    fn has_explicit_fg(&self) -> bool {
        self.stack.iter().any(|(_, overlay)| overlay.fg.is_some())
    }

    fn text(&mut self, text: &str) {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.push_segment(first);
        }
        for part in parts {
            self.lines.push(Line::default());
            self.push_segment(part);
        }
    }

    fn push_segment(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let style = self.style();
        let spans = if self.highlight && !self.has_explicit_fg() {
            highlight_spans(text, style)
        } else {
            vec![Span::styled(text.to_string(), style)]
        };
        if let Some(line) = self.lines.last_mut() {
            for span in spans {
                // Merge with the previous span when styles match
                match line.spans.last_mut() {
                    Some(prev) if prev.style == span.style => {
                        prev.content = format!("{}{}", prev.content, span.content).into();
                    }
                    _ => line.spans.push(span),
                }
            }
        }
    }

    /// Handle the inside of `[...]`. Returns false if it isn't a valid tag.
    fn tag(&mut self, inner: &str) -> bool {
        let inner = inner.trim();
        if let Some(name) = inner.strip_prefix('/') {
            let name = name.trim();
            if name.is_empty() {
                return self.stack.pop().is_some();
            }
            return match self.stack.iter().rposition(|(tag, _)| tag == name) {
                Some(idx) => {
                    self.stack.remove(idx);
                    true
                }
                None => false,
            };
        }
        match parse_style(inner) {
            Some(overlay) => {
                self.stack.push((inner.to_string(), overlay));
                true
            }
            None => false,
        }
    }

    fn finish(self) -> Text<'static> {
        Text::from(self.lines)
    }
}

// ── Style parsing ───────────────────────────────────────────────────────────

/// Parse a tag body like `bold green on black`. Returns None on any unknown word.
fn parse_style(tag: &str) -> Option<Style> {
    let mut style = Style::default();
    let mut words = tag.split_whitespace().peekable();
    words.peek()?;

    while let Some(word) = words.next() {
        let word = word.to_ascii_lowercase();
        if word == "on" {
            let color = parse_color(&words.next()?.to_ascii_lowercase())?;
            style = style.bg(color);
        } else if let Some(modifier) = parse_modifier(&word) {
            style = style.add_modifier(modifier);
        } else if let Some(color) = parse_color(&word) {
            style = style.fg(color);
        } else {
            return None;
        }
    }
    Some(style)
}

fn parse_modifier(word: &str) -> Option<Modifier> {
    match word {
        "bold" | "b" => Some(Modifier::BOLD),
        "italic" | "i" => Some(Modifier::ITALIC),
        "underline" | "u" => Some(Modifier::UNDERLINED),
        "dim" => Some(Modifier::DIM),
        "reverse" => Some(Modifier::REVERSED),
        "strike" | "s" => Some(Modifier::CROSSED_OUT),
        "blink" => Some(Modifier::SLOW_BLINK),
        _ => None,
    }
}

fn parse_color(word: &str) -> Option<Color> {
    if let Some(hex) = word.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let n = u32::from_str_radix(hex, 16).ok()?;
        return Some(Color::Rgb((n >> 16) as u8, (n >> 8) as u8, n as u8));
    }
    let color = match word {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "bright_black" | "dark_gray" | "dark_grey" => Color::DarkGray,
        "bright_red" => Color::LightRed,
        "bright_green" => Color::LightGreen,
        "bright_yellow" => Color::LightYellow,
        "bright_blue" => Color::LightBlue,
        "bright_magenta" => Color::LightMagenta,
        "bright_cyan" => Color::LightCyan,
        "bright_white" => Color::White,
        _ => return None,
    };
    Some(color)
}

// ── Highlighting ────────────────────────────────────────────────────────────

const STRING_COLOR: Color = Color::Green;
const NUMBER_COLOR: Color = Color::Cyan;

/// Split `text` into spans, coloring quoted strings, numbers, and constants.
fn highlight_spans(text: &str, style: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            spans.push(Span::styled(std::mem::take(plain), style));
        }
    };

    while i < chars.len() {
        let c = chars[i];
        let prev_is_word = i > 0 && is_word_char(chars[i - 1]);

        // Quoted string: runs to the matching quote on the same segment
        if (c == '\'' || c == '"')
            && !prev_is_word
            && let Some(len) = chars[i + 1..].iter().position(|&q| q == c)
        {
            flush(&mut plain, &mut spans);
            let quoted: String = chars[i..=i + 1 + len].iter().collect();
            spans.push(Span::styled(quoted, style.fg(STRING_COLOR)));
            i += len + 2;
            continue;
        }

        // Number: digits with an optional fractional part, not glued to a word
        if c.is_ascii_digit() && !prev_is_word {
            let mut end = i;
            while end < chars.len() && chars[end].is_ascii_digit() {
                end += 1;
            }
            if end + 1 < chars.len() && chars[end] == '.' && chars[end + 1].is_ascii_digit() {
                end += 1;
                while end < chars.len() && chars[end].is_ascii_digit() {
                    end += 1;
                }
            }
            if end == chars.len() || !is_word_char(chars[end]) {
                flush(&mut plain, &mut spans);
                let number: String = chars[i..end].iter().collect();
                spans.push(Span::styled(
                    number,
                    style.fg(NUMBER_COLOR).add_modifier(Modifier::BOLD),
                ));
                i = end;
                continue;
            }
        }

        // Constants
        if c.is_ascii_alphabetic() && !prev_is_word {
            let mut end = i;
            while end < chars.len() && is_word_char(chars[end]) {
                end += 1;
            }
            let word: String = chars[i..end].iter().collect();
            if matches!(word.as_str(), "true" | "false" | "True" | "False" | "None") {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(word, style.add_modifier(Modifier::ITALIC)));
            } else {
                plain.push_str(&word);
            }
            i = end;
            continue;
        }

        plain.push(c);
        i += 1;
    }
    flush(&mut plain, &mut spans);
    spans
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
