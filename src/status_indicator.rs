use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Animated three-dot typing indicator shown while a reply is pending.
#[derive(Debug)]
pub struct StatusIndicator {
    thinking: bool,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self {
            thinking: false,
            spinner_idx: 0,
        }
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dot_frames = ["●∙∙", "∙●∙", "∙∙●"];
        let (dots, text) = if self.thinking {
            (
                dot_frames[self.spinner_idx % dot_frames.len()],
                "Mentor is typing",
            )
        } else {
            ("   ", "")
        };

        let status = Line::from(vec![
            Span::styled(dots, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(text, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(
            Paragraph::new(status).alignment(ratatui::layout::Alignment::Left),
            Rect {
                x: area.x,
                y: area.y + 1,
                width: area.width,
                height: 1,
            },
        );
    }
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self::new()
    }
}
