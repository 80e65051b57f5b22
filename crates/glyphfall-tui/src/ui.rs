//! UI rendering
//!
//! Paints the App's latest [`RenderedFrame`] into a ratatui buffer. Pure: no
//! I/O, the terminal driver decides when to draw.

use glyphfall_core::{Color, FrameCell, RenderedFrame};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Position, Rect},
    style::{self, Modifier, Style},
    widgets::Widget,
};

use crate::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    frame.render_widget(RainWidget::new(app.frame()), frame.area());
}

/// Widget painting a [`RenderedFrame`] cell for cell, clipped to the area.
pub struct RainWidget<'a> {
    frame: &'a RenderedFrame,
}

impl<'a> RainWidget<'a> {
    /// Widget for `frame`.
    pub fn new(frame: &'a RenderedFrame) -> Self {
        Self { frame }
    }
}

impl Widget for RainWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row, line) in (0..area.height).zip(self.frame.lines()) {
            for (col, cell) in (0..area.width).zip(line) {
                let position = Position::new(area.x + col, area.y + row);
                if let Some(target) = buf.cell_mut(position) {
                    target.set_char(cell.glyph).set_style(cell_style(cell));
                }
            }
        }
    }
}

fn cell_style(cell: &FrameCell) -> Style {
    let style = Style::default().fg(terminal_color(cell.color));
    if cell.bold { style.add_modifier(Modifier::BOLD) } else { style }
}

fn terminal_color(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Yellow => style::Color::Yellow,
        Color::Blue => style::Color::Blue,
        Color::Magenta => style::Color::Magenta,
        Color::Cyan => style::Color::Cyan,
        Color::White => style::Color::White,
    }
}

#[cfg(test)]
mod tests {
    use glyphfall_app::{AppEvent, Settings};
    use glyphfall_core::Config;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    /// Buffer contents with blanks shown as dots.
    fn text(buf: &Buffer) -> String {
        let width = usize::from(buf.area.width);
        buf.content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol().replace(' ', ".")).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with_message(message: &str) -> App {
        let settings = Settings {
            config: Config { message: Some(message.into()), ..Config::default() },
            ..Settings::default()
        };
        let mut app = App::with_seed(settings, 10, 10, 0).unwrap();
        app.handle(AppEvent::Resize(10, 10)).unwrap();
        app
    }

    #[test]
    fn overlay_snapshot() {
        let app = app_with_message("hi");
        let mut terminal = Terminal::new(TestBackend::new(10, 10)).unwrap();

        terminal.draw(|frame| render(frame, &app)).unwrap();

        insta::assert_snapshot!(text(terminal.backend().buffer()), @r"
        ..........
        ..........
        ..........
        ..........
        ..........
        ....hi....
        ..........
        ..........
        ..........
        ..........
        ");
    }

    #[test]
    fn cells_carry_frame_styles() {
        let mut app = App::with_seed(Settings::default(), 20, 12, 11).unwrap();
        for _ in 0..40 {
            app.handle(AppEvent::Tick).unwrap();
        }
        let area = Rect::new(0, 0, 20, 12);
        let mut buf = Buffer::empty(area);

        RainWidget::new(app.frame()).render(area, &mut buf);

        for row in 0..12 {
            for col in 0..20 {
                let expected = app.frame().cell(row, col).copied().unwrap();
                let painted = &buf[(col, row)];
                assert_eq!(painted.symbol(), expected.glyph.to_string());
                assert_eq!(painted.fg, terminal_color(expected.color));
                assert_eq!(painted.modifier.contains(Modifier::BOLD), expected.bold);
            }
        }
    }

    #[test]
    fn heads_are_bold_white_when_bold() {
        let settings = Settings {
            config: Config { bold: glyphfall_core::BoldMode::All, ..Config::default() },
            ..Settings::default()
        };
        let mut app = App::with_seed(settings, 20, 12, 5).unwrap();
        for _ in 0..30 {
            app.handle(AppEvent::Tick).unwrap();
        }

        let heads: Vec<&FrameCell> =
            app.frame().lines().flatten().filter(|cell| cell.head).collect();
        assert!(!heads.is_empty());
        assert!(heads.iter().all(|cell| cell.bold && cell.color == Color::White));
        assert_eq!(cell_style(heads[0]), Style::default().fg(style::Color::White).bold());
    }

    #[test]
    fn widget_clips_to_small_area() {
        let app = app_with_message("hi");
        let area = Rect::new(0, 0, 6, 6);
        let mut buf = Buffer::empty(area);

        RainWidget::new(app.frame()).render(area, &mut buf);

        assert_eq!(text(&buf).lines().count(), 6);
        assert_eq!(buf.area, area);
    }

    #[test]
    fn widget_respects_area_offset() {
        let app = app_with_message("hi");
        let mut buf = Buffer::empty(Rect::new(0, 0, 14, 12));

        RainWidget::new(app.frame()).render(Rect::new(2, 1, 10, 10), &mut buf);

        assert_eq!(buf[(6, 6)].symbol(), "h");
        assert_eq!(buf[(7, 6)].symbol(), "i");
    }
}
