//! Login and signup screen

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::helpers::{centered_rect, spinner};
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_ERROR, COLOR_HEADER,
    COLOR_NOTICE, COLOR_SPINNER,
};
use crate::app::App;
use crate::state::{AuthField, AuthMode};

const FORM_WIDTH: u16 = 56;
const FORM_HEIGHT: u16 = 16;

pub fn render_auth_screen(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Outer block with double border
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer_block, area);

    let form = &app.auth_form;
    let dialog_area = centered_rect(area.inner(Margin::new(2, 1)), FORM_WIDTH, FORM_HEIGHT);
    let dialog_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            format!(" {} ", form.mode.title()),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = dialog_block.inner(dialog_area);
    frame.render_widget(dialog_block, dialog_area);

    let [_, email_area, password_area, message_area, hints_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(2),
        Constraint::Length(2),
    ])
    .areas(inner.inner(Margin::new(2, 0)));

    render_field(
        frame,
        email_area,
        "Email",
        &form.email,
        form.field == AuthField::Email,
    );
    render_field(
        frame,
        password_area,
        "Password",
        &form.masked_password(),
        form.field == AuthField::Password,
    );

    let message = if form.submitting {
        let verb = match form.mode {
            AuthMode::Login => "Signing in...",
            AuthMode::Signup => "Creating account...",
        };
        Line::from(vec![
            Span::styled(spinner(app.tick_count), Style::default().fg(COLOR_SPINNER)),
            Span::raw(" "),
            Span::raw(verb),
        ])
    } else if let Some(error) = &form.error {
        Line::styled(format!("✗ {}", error), Style::default().fg(COLOR_ERROR))
    } else if let Some(notice) = &form.notice {
        Line::styled(format!("✓ {}", notice), Style::default().fg(COLOR_NOTICE))
    } else {
        Line::default()
    };
    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        message_area,
    );

    let switch_hint = match form.mode {
        AuthMode::Login => "[Ctrl+S] Create an account",
        AuthMode::Signup => "[Ctrl+S] Have an account? Sign in",
    };
    let hints = Text::from(vec![
        Line::from("[Tab] Next field  [Enter] Submit  [Esc] Quit"),
        Line::from(switch_hint),
    ]);
    frame.render_widget(
        Paragraph::new(hints)
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center),
        hints_area,
    );
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused {
        COLOR_BORDER_FOCUSED
    } else {
        COLOR_BORDER
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", label));
    let inner = block.inner(area);

    let mut spans = vec![Span::styled(value.to_string(), Style::default().fg(COLOR_ACCENT))];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(COLOR_ACCENT)));
    }
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
