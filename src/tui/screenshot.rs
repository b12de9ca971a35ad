//! # Screenshots
//!
//! Turns a drawn ratatui `Buffer` into a standalone SVG and writes it to
//! disk off the event loop.
//!
//! ```text
//! Effect::CaptureScreenshot ─► clone last buffer ─► spawn_capture
//!                                                     │ spawn_blocking
//!                                                     ▼
//!                                        render_svg + save (.tmp, rename)
//!                                                     │
//!                          Action::ScreenshotSaved / ScreenshotFailed ◄┘
//! ```
//!
//! The SVG draws one `<rect>` per run of equal background and one `<text>`
//! per run of equally styled cells. Each text run carries `textLength`, so
//! columns line up no matter which monospace font the viewer picks.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use log::{debug, info, warn};
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier};
use tokio::task::JoinHandle;
use unicode_width::UnicodeWidthStr;

use crate::core::action::Action;
use crate::core::clock::Moment;
use crate::tui::theme::Palette;

const CELL_WIDTH: u32 = 10;
const LINE_HEIGHT: u32 = 20;
const FONT_SIZE: u32 = 16;
const PADDING: u32 = 16;
const TITLE_BAR: u32 = 32;

/// Everything needed to write one screenshot.
pub struct CaptureRequest {
    pub id: u64,
    pub buffer: Buffer,
    pub title: String,
    pub palette: Palette,
    pub dir: PathBuf,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CellStyle {
    fg: String,
    bg: String,
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    dim: bool,
}

/// One horizontal run of cells sharing a style.
struct Run {
    column: u32,
    columns: u32,
    text: String,
    style: CellStyle,
}

/// Render `buffer` as an SVG document framed like a terminal window.
pub fn render_svg(buffer: &Buffer, title: &str, palette: &Palette) -> String {
    let area = buffer.area;
    let cols = area.width as u32;
    let rows = area.height as u32;
    let width = cols * CELL_WIDTH + PADDING * 2;
    let height = rows * LINE_HEIGHT + TITLE_BAR + PADDING * 2;
    let background = hex(palette.background, palette.background);
    let chrome = hex(palette.surface, palette.surface);
    let foreground = hex(palette.foreground, palette.foreground);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" xml:space="preserve">"#
    );
    let _ = writeln!(
        svg,
        r#"<style>text {{ font-family: "Fira Code", "DejaVu Sans Mono", monospace; font-size: {FONT_SIZE}px; }}</style>"#
    );
    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{width}" height="{height}" rx="8" fill="{chrome}"/>"#
    );
    for (i, dot) in ["#ff5f57", "#febc2e", "#28c840"].iter().enumerate() {
        let cx = PADDING + i as u32 * 20;
        let _ = writeln!(svg, r#"<circle cx="{cx}" cy="16" r="6" fill="{dot}"/>"#);
    }
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="21" fill="{foreground}" text-anchor="middle">{}</text>"#,
        width / 2,
        escape_xml(title)
    );

    let origin_x = PADDING;
    let origin_y = TITLE_BAR + PADDING / 2;
    let _ = writeln!(
        svg,
        r#"<rect x="{origin_x}" y="{origin_y}" width="{}" height="{}" fill="{background}"/>"#,
        cols * CELL_WIDTH,
        rows * LINE_HEIGHT
    );

    for row in 0..area.height {
        let runs = row_runs(buffer, row, palette);
        let y = origin_y + row as u32 * LINE_HEIGHT;

        for run in merge_backgrounds(&runs) {
            if run.1 == background {
                continue;
            }
            let _ = writeln!(
                svg,
                r#"<rect x="{}" y="{y}" width="{}" height="{LINE_HEIGHT}" fill="{}"/>"#,
                origin_x + run.0 * CELL_WIDTH,
                run.2 * CELL_WIDTH,
                run.1
            );
        }

        let baseline = y + LINE_HEIGHT - 5;
        for run in runs.iter().filter(|r| !r.text.trim().is_empty()) {
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{baseline}" textLength="{}" lengthAdjust="spacingAndGlyphs" fill="{}"{}>{}</text>"#,
                origin_x + run.column * CELL_WIDTH,
                run.columns * CELL_WIDTH,
                run.style.fg,
                text_attributes(&run.style),
                escape_xml(&run.text)
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Split one buffer row into runs of identical style.
fn row_runs(buffer: &Buffer, row: u16, palette: &Palette) -> Vec<Run> {
    let area = buffer.area;
    let mut runs: Vec<Run> = Vec::new();
    let mut skip = 0usize;

    for col in 0..area.width {
        // Cells hidden behind a wide grapheme
        if skip > 0 {
            skip -= 1;
            continue;
        }
        let cell = &buffer[(area.x + col, area.y + row)];
        let symbol = if cell.symbol().is_empty() { " " } else { cell.symbol() };
        let columns = symbol.width().max(1);
        skip = columns - 1;

        let (mut fg, mut bg) = (
            hex(cell.fg, palette.foreground),
            hex(cell.bg, palette.background),
        );
        if cell.modifier.contains(Modifier::REVERSED) {
            std::mem::swap(&mut fg, &mut bg);
        }
        let style = CellStyle {
            fg,
            bg,
            bold: cell.modifier.contains(Modifier::BOLD),
            italic: cell.modifier.contains(Modifier::ITALIC),
            underline: cell.modifier.contains(Modifier::UNDERLINED),
            strike: cell.modifier.contains(Modifier::CROSSED_OUT),
            dim: cell.modifier.contains(Modifier::DIM),
        };

        match runs.last_mut() {
            Some(run) if run.style == style => {
                run.text.push_str(symbol);
                run.columns += columns as u32;
            }
            _ => runs.push(Run {
                column: col as u32,
                columns: columns as u32,
                text: symbol.to_string(),
                style,
            }),
        }
    }
    runs
}

/// Collapse text runs into `(column, background, columns)` spans.
fn merge_backgrounds(runs: &[Run]) -> Vec<(u32, String, u32)> {
    let mut spans: Vec<(u32, String, u32)> = Vec::new();
    for run in runs {
        match spans.last_mut() {
            Some(span) if span.1 == run.style.bg => span.2 += run.columns,
            _ => spans.push((run.column, run.style.bg.clone(), run.columns)),
        }
    }
    spans
}

fn text_attributes(style: &CellStyle) -> String {
    let mut attrs = String::new();
    if style.bold {
        attrs.push_str(r#" font-weight="bold""#);
    }
    if style.italic {
        attrs.push_str(r#" font-style="italic""#);
    }
    match (style.underline, style.strike) {
        (true, true) => attrs.push_str(r#" text-decoration="underline line-through""#),
        (true, false) => attrs.push_str(r#" text-decoration="underline""#),
        (false, true) => attrs.push_str(r#" text-decoration="line-through""#),
        (false, false) => {}
    }
    if style.dim {
        attrs.push_str(r#" opacity="0.6""#);
    }
    attrs
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// `#rrggbb` for `color`; `Reset` resolves to `fallback`.
fn hex(color: Color, fallback: Color) -> String {
    let (r, g, b) = rgb(color).or_else(|| rgb(fallback)).unwrap_or((0, 0, 0));
    format!("#{r:02x}{g:02x}{b:02x}")
}

const ANSI: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    let index = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => return Some((r, g, b)),
        Color::Indexed(i) => return Some(indexed(i)),
        Color::Black => 0,
        Color::Red => 1,
        Color::Green => 2,
        Color::Yellow => 3,
        Color::Blue => 4,
        Color::Magenta => 5,
        Color::Cyan => 6,
        Color::Gray => 7,
        Color::DarkGray => 8,
        Color::LightRed => 9,
        Color::LightGreen => 10,
        Color::LightYellow => 11,
        Color::LightBlue => 12,
        Color::LightMagenta => 13,
        Color::LightCyan => 14,
        Color::White => 15,
    };
    Some(ANSI[index])
}

/// xterm 256-color palette.
fn indexed(i: u8) -> (u8, u8, u8) {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    match i {
        0..=15 => ANSI[i as usize],
        16..=231 => {
            let i = (i - 16) as usize;
            (LEVELS[i / 36], LEVELS[(i / 6) % 6], LEVELS[i % 6])
        }
        _ => {
            let level = 8 + (i - 232) * 10;
            (level, level, level)
        }
    }
}

/// Write `svg` to `dir/file_name` via `.tmp` + rename. Returns the absolute path.
pub fn save(dir: &Path, file_name: &str, svg: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, svg)?;
    if let Err(e) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    debug!("Wrote {} bytes to {}", svg.len(), path.display());
    path.canonicalize()
}

/// Render and save on the blocking pool, reporting back through `tx`.
///
/// Aborting the returned handle drops the report; the file may still be
/// written if the blocking part already started.
pub fn spawn_capture(request: CaptureRequest, tx: mpsc::Sender<Action>) -> JoinHandle<()> {
    let id = request.id;
    info!("Spawning screenshot capture (id={})", id);
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || {
            let svg = render_svg(&request.buffer, &request.title, &request.palette);
            save(&request.dir, &request.file_name, &svg)
        })
        .await;

        let now = Moment::now();
        let action = match result {
            Ok(Ok(path)) => Action::ScreenshotSaved { id, path, now },
            Ok(Err(e)) => {
                warn!("Screenshot {} failed: {}", id, e);
                Action::ScreenshotFailed {
                    id,
                    error: e.to_string(),
                    now,
                }
            }
            Err(e) => {
                warn!("Screenshot task {} did not finish: {}", id, e);
                Action::ScreenshotFailed {
                    id,
                    error: e.to_string(),
                    now,
                }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send screenshot result (id={}): receiver dropped", id);
        }
    })
}

/// Runs at most one capture at a time. Starting a new one aborts the
/// previous task so only the latest result is reported.
pub struct ScreenshotWorker {
    tx: mpsc::Sender<Action>,
    handle: Option<JoinHandle<()>>,
}

impl ScreenshotWorker {
    pub fn new(tx: mpsc::Sender<Action>) -> Self {
        Self { tx, handle: None }
    }

    pub fn start(&mut self, request: CaptureRequest) {
        if let Some(previous) = self.handle.take() {
            if !previous.is_finished() {
                debug!("Superseding in-flight screenshot for id={}", request.id);
            }
            previous.abort();
        }
        self.handle = Some(spawn_capture(request, self.tx.clone()));
    }

    /// Handle of the capture currently running, if any.
    #[cfg(test)]
    pub fn take_handle(&mut self) -> Option<JoinHandle<()>> {
        self.handle.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    fn palette() -> Palette {
        Palette::for_theme(Theme::Dark)
    }

    #[test]
    fn test_svg_is_well_formed_document() {
        let buffer = Buffer::empty(Rect::new(0, 0, 10, 2));
        let svg = render_svg(&buffer, "TUI Base", &palette());
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains(">TUI Base</text>"));
        // 10 cols * 10px + 2 * 16px padding
        assert!(svg.contains("width=\"132\""));
    }

    #[test]
    fn test_text_is_escaped_and_styled() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 12, 1));
        buffer.set_string(
            0,
            0,
            "a<b & \"c\"",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        );
        let svg = render_svg(&buffer, "t", &palette());
        assert!(svg.contains("a&lt;b &amp; &quot;c&quot;"));
        assert!(svg.contains("fill=\"#800000\" font-weight=\"bold\""));
    }

    #[test]
    fn test_title_is_escaped() {
        let buffer = Buffer::empty(Rect::new(0, 0, 4, 1));
        let svg = render_svg(&buffer, "<Tom & Jerry>", &palette());
        assert!(svg.contains("&lt;Tom &amp; Jerry&gt;"));
    }

    #[test]
    fn test_wide_characters_span_two_columns() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 8, 1));
        buffer.set_string(0, 0, "你好x", Style::default().fg(Color::Blue));
        let svg = render_svg(&buffer, "t", &palette());
        assert!(svg.contains("textLength=\"50\""));
        assert!(svg.contains(">你好x</text>"));
    }

    #[test]
    fn test_background_runs_emit_rects() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 6, 1));
        buffer.set_string(2, 0, "  ", Style::default().bg(Color::Rgb(1, 2, 3)));
        let svg = render_svg(&buffer, "t", &palette());
        assert!(svg.contains("width=\"20\" height=\"20\" fill=\"#010203\""));
        // Whitespace-only runs produce no <text>
        assert_eq!(svg.matches("<text").count(), 1);
    }

    #[test]
    fn test_reversed_swaps_colors() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 3, 1));
        buffer.set_string(
            0,
            0,
            "x",
            Style::default()
                .fg(Color::Rgb(255, 0, 0))
                .bg(Color::Rgb(0, 0, 255))
                .add_modifier(Modifier::REVERSED),
        );
        let svg = render_svg(&buffer, "t", &palette());
        assert!(svg.contains("fill=\"#ff0000\"/>"));
        assert!(svg.contains("fill=\"#0000ff\">x</text>"));
    }

    #[test]
    fn test_reset_uses_palette() {
        let p = palette();
        assert_eq!(hex(Color::Reset, p.foreground), "#e0e0e0");
        assert_eq!(hex(Color::Indexed(196), p.foreground), "#ff0000");
        assert_eq!(hex(Color::Indexed(232), p.foreground), "#080808");
        assert_eq!(hex(Color::Cyan, p.foreground), "#008080");
    }

    #[test]
    fn test_save_writes_file_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shots");
        let path = save(&nested, "screenshot_test.svg", "<svg></svg>").unwrap();
        assert!(path.is_absolute());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg></svg>");
        assert!(!nested.join("screenshot_test.tmp").exists());
    }

    #[test]
    fn test_save_removes_tmp_when_rename_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the file should go
        let blocker = dir.path().join("screenshot_test.svg");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "").unwrap();

        assert!(save(dir.path(), "screenshot_test.svg", "<svg></svg>").is_err());
        assert!(!dir.path().join("screenshot_test.tmp").exists());
    }

    #[tokio::test]
    async fn test_spawn_capture_reports_saved() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = mpsc::channel();
        let request = CaptureRequest {
            id: 7,
            buffer: Buffer::empty(Rect::new(0, 0, 4, 2)),
            title: "t".to_string(),
            palette: palette(),
            dir: dir.path().to_path_buf(),
            file_name: "shot.svg".to_string(),
        };
        spawn_capture(request, tx).await.unwrap();

        match rx.try_recv().unwrap() {
            Action::ScreenshotSaved { id, path, .. } => {
                assert_eq!(id, 7);
                assert!(fs::read_to_string(path).unwrap().starts_with("<svg"));
            }
            other => panic!("expected ScreenshotSaved, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_spawn_capture_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the directory should be
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "x").unwrap();

        let (tx, rx) = mpsc::channel();
        let request = CaptureRequest {
            id: 3,
            buffer: Buffer::empty(Rect::new(0, 0, 2, 1)),
            title: "t".to_string(),
            palette: palette(),
            dir: blocker,
            file_name: "shot.svg".to_string(),
        };
        spawn_capture(request, tx).await.unwrap();
        assert!(matches!(
            rx.try_recv().unwrap(),
            Action::ScreenshotFailed { id: 3, .. }
        ));
    }

    #[tokio::test]
    async fn test_worker_supersedes_previous_capture() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = mpsc::channel();
        let mut worker = ScreenshotWorker::new(tx);
        for id in [1, 2] {
            worker.start(CaptureRequest {
                id,
                buffer: Buffer::empty(Rect::new(0, 0, 2, 1)),
                title: "t".to_string(),
                palette: palette(),
                dir: dir.path().to_path_buf(),
                file_name: format!("shot_{id}.svg"),
            });
        }
        worker.take_handle().unwrap().await.unwrap();

        let ids: Vec<u64> = rx
            .try_iter()
            .map(|action| match action {
                Action::ScreenshotSaved { id, .. } => id,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(ids, vec![2]);
    }
}
