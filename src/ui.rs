use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::script::{Screen, FIXATION, RECALL_QUESTION};
use crate::stimuli::OptionPair;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: u32 = 2;
pub const FLASH_COLOR: Color = Color::Rgb(230, 230, 230);
const FLASH_WIDTH: u16 = 2;
const FLASH_HEIGHT: u16 = 1;

/// One frame of the stage: the current screen drawn on the logical canvas
pub struct StageView<'a> {
    pub screen: &'a Screen,
    pub canvas: (u16, u16),
}

/// Largest centered rect of `area` with the canvas' pixel aspect ratio
pub fn canvas_rect(area: Rect, canvas: (u16, u16)) -> Rect {
    let (cw, ch) = (canvas.0.max(1) as u32, canvas.1.max(1) as u32);
    let (aw, ah) = (area.width as u32, area.height as u32);

    let mut height = ah.min(aw * ch / (cw * CELL_ASPECT));
    let mut width = aw.min(height * cw * CELL_ASPECT / ch);
    if width == 0 || height == 0 {
        width = aw;
        height = ah;
    }

    Rect {
        x: area.x + ((aw - width) / 2) as u16,
        y: area.y + ((ah - height) / 2) as u16,
        width: width as u16,
        height: height as u16,
    }
}

fn option_text(label: char, pair: &OptionPair) -> String {
    format!("{label}. {} / {}", pair[0], pair[1])
}

fn lines(screen: &Screen) -> Vec<Line<'static>> {
    match screen {
        Screen::Banner(text) | Screen::Cue(text) | Screen::Word(text) => {
            vec![Line::from(text.clone())]
        }
        Screen::Fixation => vec![Line::from(FIXATION)],
        Screen::Recall { first, second } => vec![
            Line::from(RECALL_QUESTION),
            Line::from(""),
            Line::from(option_text('a', first)),
            Line::from(option_text('b', second)),
        ],
        Screen::SyncFlash | Screen::Blank => Vec::new(),
    }
}

impl Widget for StageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let canvas = canvas_rect(area, self.canvas);
        Block::default()
            .style(Style::default().bg(Color::White))
            .render(canvas, buf);

        if let Screen::SyncFlash = self.screen {
            let square = Rect {
                x: canvas.x + canvas.width.saturating_sub(FLASH_WIDTH) / 2,
                y: canvas.y + canvas.height.saturating_sub(FLASH_HEIGHT) / 2,
                width: FLASH_WIDTH.min(canvas.width),
                height: FLASH_HEIGHT.min(canvas.height),
            };
            Block::default()
                .style(Style::default().bg(FLASH_COLOR))
                .render(square, buf);
            return;
        }

        let text = lines(self.screen);
        if text.is_empty() {
            return;
        }

        let text_height = (text.len() as u16).min(canvas.height);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(canvas.height.saturating_sub(text_height) / 2),
                Constraint::Length(text_height),
                Constraint::Min(0),
            ])
            .split(canvas);

        Paragraph::new(text)
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(screen: &Screen, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(
                    StageView {
                        screen,
                        canvas: (800, 600),
                    },
                    f.area(),
                )
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_canvas_rect_keeps_aspect_and_centers() {
        let rect = canvas_rect(Rect::new(0, 0, 120, 30), (800, 600));
        assert_eq!(rect.height, 30);
        assert_eq!(rect.width, 80);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 0);

        let wide_limited = canvas_rect(Rect::new(0, 0, 40, 30), (800, 600));
        assert_eq!(wide_limited.width, 40);
        assert_eq!(wide_limited.height, 15);
        assert_eq!(wide_limited.y, 7);
    }

    #[test]
    fn test_word_is_rendered_black_on_white() {
        let buf = draw(&Screen::Word("chat".into()), 80, 24);
        assert!(buffer_text(&buf).contains("chat"));

        let cell = buf
            .content()
            .iter()
            .find(|c| c.symbol() == "c")
            .unwrap();
        assert_eq!(cell.fg, Color::Black);
        assert_eq!(cell.bg, Color::White);
    }

    #[test]
    fn test_recall_shows_question_and_both_options() {
        let screen = Screen::Recall {
            first: ["chat".into(), "chien".into()],
            second: ["souris".into(), "rat".into()],
        };
        let text = buffer_text(&draw(&screen, 100, 30));
        assert!(text.contains("Quel"));
        assert!(text.contains("a. chat / chien"));
        assert!(text.contains("b. souris / rat"));
    }

    #[test]
    fn test_sync_flash_draws_gray_square() {
        let buf = draw(&Screen::SyncFlash, 80, 30);
        let gray = buf.content().iter().filter(|c| c.bg == FLASH_COLOR).count();
        assert_eq!(gray, (FLASH_WIDTH * FLASH_HEIGHT) as usize);
    }

    #[test]
    fn test_blank_is_plain_canvas() {
        let buf = draw(&Screen::Blank, 80, 30);
        assert!(buffer_text(&buf).trim().is_empty());
        assert!(buf.content().iter().any(|c| c.bg == Color::White));
    }
}
