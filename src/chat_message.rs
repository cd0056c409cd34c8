use crate::transcript::{Message, Sender};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Renders one message as a bubble: a header with the time of day, the
/// wrapped body, and a closing rail. User messages are indented and warm,
/// bot messages flush-left and green.
pub fn render_message(message: &Message, area: Rect) -> Vec<Line<'static>> {
    let style = base_style(message.sender);
    let indent = indent_for(message.sender);
    let mut lines = Vec::new();

    render_header(message, &mut lines, style, indent);
    render_content(message, &mut lines, area, style, indent);
    render_footer(&mut lines, style, indent);

    lines
}

fn base_style(sender: Sender) -> Style {
    Style::default().fg(match sender {
        Sender::User => Color::Rgb(255, 223, 128),
        Sender::Bot => Color::Rgb(144, 238, 144),
    })
}

fn indent_for(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "  ",
        Sender::Bot => "",
    }
}

fn render_header(message: &Message, lines: &mut Vec<Line<'static>>, style: Style, indent: &str) {
    let timestamp = message.timestamp.format("%H:%M").to_string();
    let tag = match message.sender {
        Sender::User => "you",
        Sender::Bot => "mentor",
    };

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─".to_string(), style),
        Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        Span::styled(" ".to_string(), style),
        Span::styled(tag.to_string(), style.add_modifier(Modifier::BOLD)),
    ]));
}

fn render_content(
    message: &Message,
    lines: &mut Vec<Line<'static>>,
    area: Rect,
    style: Style,
    indent: &str,
) {
    let wrap_width = (area.width as usize).saturating_sub(4).max(1);

    for paragraph in message.content.lines() {
        if paragraph.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│".to_string(), style),
            ]));
            continue;
        }
        for wrapped_line in wrap(paragraph, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped_line.to_string(), style),
            ]));
        }
    }
}

fn render_footer(lines: &mut Vec<Line<'static>>, style: Style, indent: &str) {
    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));
}
