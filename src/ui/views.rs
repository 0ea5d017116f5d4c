//! Per-screen rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::screens::screen_a::ScreenAController;
use crate::screens::screen_b::ScreenBController;
use crate::screens::Screen;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_TEXT, INPUT_BORDER, MUTED_TEXT};

/// Render `screen` into `area`. Returns where the text cursor belongs, if the
/// screen has an input field.
pub fn render_screen(screen: &Screen, area: Rect, buf: &mut Buffer) -> Option<Position> {
    match screen {
        Screen::ScreenA(controller) => render_screen_a(controller, area, buf),
        Screen::ScreenB(controller) => {
            render_screen_b(controller, area, buf);
            None
        }
    }
}

fn screen_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
}

fn render_screen_a(controller: &ScreenAController, area: Rect, buf: &mut Buffer) -> Option<Position> {
    let block = screen_block("Screen A");
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width < 4 || inner.height < 5 {
        return None;
    }

    let [prompt, input, counter] = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(inner);

    Paragraph::new("Type some text and press Enter to open Screen B.")
        .style(Style::default().fg(HEADER_TEXT))
        .wrap(Wrap { trim: true })
        .render(prompt, buf);

    let state = controller.state().value();
    let input_block = Block::default()
        .title(Span::styled(" Text ", Style::default().fg(MUTED_TEXT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(INPUT_BORDER));
    let field = input_block.inner(input);
    let text_width = u16::try_from(Line::from(state.text.as_str()).width()).unwrap_or(u16::MAX);
    // Keep the tail of long input visible.
    let scroll = text_width.saturating_sub(field.width.saturating_sub(1));
    Paragraph::new(state.text.as_str())
        .style(Style::default().fg(HEADER_TEXT))
        .scroll((0, scroll))
        .block(input_block)
        .render(input, buf);

    let chars = state.char_count();
    let noun = if chars == 1 { "character" } else { "characters" };
    Paragraph::new(Line::from(Span::styled(
        format!("{chars} {noun}"),
        Style::default().fg(MUTED_TEXT),
    )))
    .render(counter, buf);

    if field.width == 0 || field.height == 0 {
        return None;
    }
    let cursor_x = field.x + (text_width - scroll).min(field.width.saturating_sub(1));
    Some(Position::new(cursor_x, field.y))
}

fn render_screen_b(controller: &ScreenBController, area: Rect, buf: &mut Buffer) {
    let block = screen_block("Screen B");
    let inner = block.inner(area);
    block.render(area, buf);

    let value = if controller.text().is_empty() {
        Span::styled(
            "(nothing)",
            Style::default().fg(MUTED_TEXT).add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(
            controller.text().to_string(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("You entered:", Style::default().fg(HEADER_TEXT))),
        Line::from(""),
        Line::from(value),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to go back.",
            Style::default().fg(MUTED_TEXT),
        )),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner.inner(Margin::new(1, 0)), buf);
}
