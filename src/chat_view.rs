use crate::app::App;
use crate::chat_message::render_message;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .margin(1)
        .split(size);

    let chat_vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(2),
            Constraint::Length(3),
        ])
        .split(horizontal_chunks[0]);

    draw_messages(f, app, chat_vertical_chunks[0]);

    app.status_indicator.update_spinner();
    app.status_indicator.render(f, chat_vertical_chunks[1]);

    draw_input(f, app, chat_vertical_chunks[2]);
    draw_profile(f, app, horizontal_chunks[1]);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    if app.transcript.is_empty() {
        draw_greeting(f, app, area);
        return;
    }

    let mut lines = Vec::new();
    for message in app.transcript.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, area));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    // Clamp and write back so scroll keys continue from the visible offset.
    if app.chat_scroll > max_scroll {
        app.chat_scroll = max_scroll;
    }

    let msgs_para = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: true });
    f.render_widget(msgs_para.scroll((app.chat_scroll, 0)), area);
}

fn draw_greeting(f: &mut Frame, app: &App, area: Rect) {
    let greeting = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Hi {}! 👋", app.profile.name),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "How can I help you with your studies today?",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(
        Paragraph::new(greeting)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let prefix = if app.command_index.is_some() {
        "↑ "
    } else {
        "→ "
    };
    let prefix_style = if app.command_index.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = if app.input.is_empty() && !app.awaiting_reply {
        Line::from(vec![
            Span::styled(prefix, prefix_style),
            Span::styled(
                "Ask me anything about your studies...",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            ),
        ])
    } else {
        let input_style = if app.awaiting_reply {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(prefix, prefix_style),
            Span::styled(app.input.clone(), input_style),
        ])
    };

    let visible_width = area.width.saturating_sub(2);
    let text_width = app.input.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        },
    );

    if let Some(idx) = app.command_index {
        let history_text = format!(" [History {}/{}] ", idx + 1, app.command_history.len());
        let indicator_width = history_text.width() as u16;
        let indicator_x = area.x + area.width - indicator_width;

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                history_text,
                Style::default().fg(Color::Yellow).bg(Color::Black),
            ))),
            Rect {
                x: indicator_x,
                y: area.y + 1,
                width: indicator_width,
                height: 1,
            },
        );
    }

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );

    // The cursor is only meaningful while input is accepted.
    if !app.awaiting_reply {
        let cursor_x = area.x + 2 + text_width - scroll_offset;
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_profile(f: &mut Frame, app: &App, area: Rect) {
    let profile = &app.profile;
    let label = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(Color::DarkGray);

    let mut lines = Vec::new();
    let mut section = |name: &str, text: String| {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(name.to_string(), label)));
        lines.push(Line::from(Span::styled(text, value)));
    };

    section("Schedule:", profile.schedule.clone());
    section("Academic Performance:", profile.formatted_marks());
    section("Interests:", profile.interests.join(", "));
    section("Learning Preferences:", profile.likes.join(", "));
    section("Learning Challenges:", profile.dislikes.join(", "));
    section("About:", profile.description.clone());

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {}'s Profile ", profile.name))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(card, area);
}
