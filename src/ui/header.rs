use crate::screens::ScreenStack;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Breadcrumb of the navigation stack.
pub struct Header;

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, stack: &ScreenStack) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let active_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);

        let mut spans = vec![Span::styled("  ", text_style)];
        for (idx, child) in stack.back_stack.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled("  ›  ", separator_style));
            }
            spans.push(Span::styled(child.configuration.title(), text_style));
        }
        if !stack.back_stack.is_empty() {
            spans.push(Span::styled("  ›  ", separator_style));
        }
        spans.push(Span::styled(stack.active.configuration.title(), active_style));
        spans.push(Span::styled("  │  ", separator_style));
        spans.push(Span::styled(format!("depth {}", stack.len()), text_style));

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
