//! Conversation list

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use super::helpers::{spinner, truncate_string};
use super::theme::{
    COLOR_ACCENT, COLOR_ASSISTANT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_HEADER,
    COLOR_SELECTED_BG, COLOR_SPINNER,
};
use crate::app::{App, Focus};

pub fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Sidebar && app.chat.renaming.is_none();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            COLOR_BORDER_FOCUSED
        } else {
            COLOR_BORDER
        }))
        .title(Span::styled(
            " Conversations ",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [button_area, list_area, user_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("+ New Consultation", Style::default().fg(COLOR_ACCENT)),
            Span::styled("  Ctrl+N", Style::default().fg(COLOR_DIM)),
        ])),
        button_area,
    );

    let width = list_area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .chat
        .conversations
        .iter()
        .map(|conversation| {
            if let Some(rename) = app
                .chat
                .renaming
                .as_ref()
                .filter(|r| r.conversation_id == conversation.id)
            {
                return ListItem::new(Line::from(vec![
                    Span::raw(truncate_string(&rename.title, width.saturating_sub(1))),
                    Span::styled("█", Style::default().fg(COLOR_ACCENT)),
                ]));
            }

            let mut spans = Vec::new();
            if app.chat.is_streaming(&conversation.id) {
                spans.push(Span::styled(
                    format!("{} ", spinner(app.tick_count)),
                    Style::default().fg(COLOR_SPINNER),
                ));
            }
            let active = app.chat.active_id.as_deref() == Some(conversation.id.as_str());
            let style = if active {
                Style::default().fg(COLOR_ASSISTANT)
            } else {
                Style::default()
            };
            spans.push(Span::styled(
                truncate_string(conversation.display_title(), width),
                style,
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("No conversations yet").style(Style::default().fg(COLOR_DIM)),
            list_area,
        );
    } else {
        let list = List::new(items)
            .highlight_style(Style::default().bg(COLOR_SELECTED_BG))
            .highlight_symbol("▸ ");
        let mut state = ListState::default().with_selected(Some(app.chat.selected));
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    if let Some(email) = app.user_email() {
        frame.render_widget(
            Paragraph::new(truncate_string(email, inner.width as usize))
                .style(Style::default().fg(COLOR_DIM)),
            user_area,
        );
    }
}
