//! Modal dialog builder
//!
//! Every modal of the app (create form, make-directory, upload) is built
//! from labelled fields, an inline error list and a help line.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const LABEL_WIDTH: usize = 12;

/// Builder for modal dialogs
pub struct DialogBuilder<'a> {
    title: &'a str,
    lines: Vec<Line<'a>>,
    width: u16,
    border_color: Color,
}

impl<'a> DialogBuilder<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            lines: Vec::new(),
            width: 56,
            border_color: Color::Cyan,
        }
    }

    pub fn width(mut self, w: u16) -> Self {
        self.width = w;
        self
    }

    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.lines.push(Line::from(text.into()));
        self
    }

    pub fn empty_line(mut self) -> Self {
        self.lines.push(Line::from(""));
        self
    }

    /// A `label: value` row; the focused row gets a marker and bold label
    pub fn field(mut self, label: &str, value: Vec<Span<'a>>, focused: bool) -> Self {
        let marker = if focused { "\u{25B6} " } else { "  " }; // ▶
        let label_style = if focused {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut spans = vec![
            Span::raw(marker),
            Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
        ];
        spans.extend(value);
        self.lines.push(Line::from(spans));
        self
    }

    /// Validation or server messages, in order; any error turns the border red
    pub fn errors(mut self, errors: &[String]) -> Self {
        if !errors.is_empty() {
            self.border_color = Color::Red;
        }
        for error in errors {
            self.lines.push(Line::from(Span::styled(
                format!("  \u{2717} {}", error), // ✗
                Style::default().fg(Color::Red),
            )));
        }
        self
    }

    pub fn help(mut self, text: &'a str) -> Self {
        self.lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )));
        self
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Render centered in `area`
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let height = (self.lines.len() as u16) + 2;
        let dialog_area = centered_rect(self.width, height, area);

        frame.render_widget(Clear, dialog_area);

        let dialog = Paragraph::new(self.lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.border_color)),
            );

        frame.render_widget(dialog, dialog_area);
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Rectangle anchored at (`x`, `y`), shifted left/up to stay inside `area`
pub fn anchored_rect(x: u16, y: u16, width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let right = area.x + area.width;
    let bottom = area.y + area.height;
    Rect {
        x: x.clamp(area.x, right - width),
        y: y.clamp(area.y, bottom - height),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let centered = centered_rect(40, 20, Rect::new(0, 0, 100, 50));
        assert_eq!(centered, Rect::new(30, 15, 40, 20));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let centered = centered_rect(50, 30, Rect::new(0, 0, 30, 20));
        assert_eq!(centered, Rect::new(0, 0, 30, 20));
    }

    #[test]
    fn test_anchored_rect_stays_inside() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(anchored_rect(10, 5, 16, 4, area), Rect::new(10, 5, 16, 4));
        assert_eq!(anchored_rect(75, 22, 16, 4, area), Rect::new(64, 20, 16, 4));
    }

    #[test]
    fn test_builder_collects_lines() {
        let builder = DialogBuilder::new("New server")
            .width(60)
            .field("Name", vec![Span::raw("mc-test")], true)
            .errors(&["Invalid port".to_string(), "Invalid difficulty".to_string()])
            .empty_line()
            .help("Enter: Create  Esc: Cancel");

        assert_eq!(builder.width, 60);
        assert_eq!(builder.line_count(), 5);
        assert_eq!(builder.border_color, Color::Red);
    }

    #[test]
    fn test_border_stays_cyan_without_errors() {
        let builder = DialogBuilder::new("New directory")
            .field("Name", vec![Span::raw("world")], true)
            .errors(&[]);
        assert_eq!(builder.border_color, Color::Cyan);
        assert_eq!(builder.line_count(), 1);
    }

    #[test]
    fn test_error_border_is_drawn_red() {
        let backend = ratatui::backend::TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                DialogBuilder::new("Oops")
                    .width(30)
                    .errors(&["Invalid port".to_string()])
                    .render(frame, frame.size());
            })
            .unwrap();

        let area = centered_rect(30, 3, Rect::new(0, 0, 40, 10));
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.get(area.x, area.y).fg, Color::Red);
    }
}
