//! Terminal UI rendering — layout, tab bar, styled output, and activity panel.
//!
//! The output panel takes its colors from the active art style's palette,
//! so a jackpot spin restyles the workspace the way the original browser
//! surface recolored the page.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::agents::AgentRole;
use crate::constants::APP_VERSION;
use crate::styles::{ART_STYLES, ArtStyle, rgb};

use super::{App, Tab};

impl App {
    /// Render the full TUI frame.
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(8),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.draw_status_bar(frame, chunks[0]);
        self.draw_tab_bar(frame, chunks[1]);
        self.draw_output(frame, chunks[2]);
        self.draw_activity(frame, chunks[3]);
        self.draw_input(frame, chunks[4]);
    }

    /// The art style currently applied to the workspace.
    pub(crate) fn current_style(&self) -> &'static ArtStyle {
        &ART_STYLES[self.style_index]
    }

    /// Which agent role backs the active tab, if any.
    fn active_role(&self) -> Option<AgentRole> {
        match self.tab {
            Tab::Summary => Some(AgentRole::Summarizer),
            Tab::Guidance => Some(AgentRole::GuidanceExpert),
            Tab::Notes => Some(AgentRole::NoteKeeper),
            Tab::Config => None,
        }
    }

    // ── Status bar ───────────────────────────────────────────────────

    fn draw_status_bar(&self, frame: &mut Frame<'_>, area: Rect) {
        let t = self.lang.text();
        let style = self.current_style();

        let mut spans = vec![
            Span::styled(
                format!("{} v{APP_VERSION}", t.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Agent: ", Style::default().fg(Color::DarkGray)),
        ];
        match self.active_role() {
            Some(role) => {
                let profile = self.agents.get(role);
                spans.push(Span::styled(
                    profile.name.clone(),
                    Style::default().fg(Color::Magenta),
                ));
                spans.push(Span::styled(
                    format!("  {}", profile.model_name),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            None => spans.push(Span::styled("—", Style::default().fg(Color::DarkGray))),
        }

        // Jackpot readout: the cycling reel while spinning, the landed
        // style otherwise.
        spans.push(Span::styled("  Style: ", Style::default().fg(Color::DarkGray)));
        if self.jackpot.is_spinning() {
            let reel = &ART_STYLES[self.jackpot.display_index()];
            spans.push(Span::styled(
                format!("🎰 {}", reel.name),
                Style::default().fg(Color::Yellow),
            ));
        } else {
            spans.push(Span::styled(
                style.name,
                Style::default().fg(rgb(style.palette.accent)),
            ));
        }

        if self.pending.is_some() {
            spans.push(Span::styled(
                format!("  ⚡ {}", t.generating),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    // ── Tab bar ──────────────────────────────────────────────────────

    fn draw_tab_bar(&self, frame: &mut Frame<'_>, area: Rect) {
        let style = self.current_style();
        let mut spans = Vec::new();
        for tab in Tab::ALL {
            let title = tab.title(self.lang);
            if tab == self.tab {
                spans.push(Span::styled(
                    format!(" {title} "),
                    Style::default()
                        .fg(rgb(style.palette.background))
                        .bg(rgb(style.palette.accent))
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    format!(" {title} "),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    // ── Output panel ─────────────────────────────────────────────────

    fn draw_output(&self, frame: &mut Frame<'_>, area: Rect) {
        let t = self.lang.text();
        let style = self.current_style();
        let body = match self.tab {
            Tab::Config => self.agents.to_pretty_json(),
            tab => self.outputs[tab.index()].clone(),
        };
        let placeholder = body.is_empty();
        let text = if placeholder {
            let hint = match self.tab {
                Tab::Summary => format!("{} → /generate", t.generate),
                Tab::Guidance => format!("{} → /synthesize", t.synthesize),
                Tab::Notes => format!("{} → /magic <id>", t.magic),
                Tab::Config => "/config load <path>".to_string(),
            };
            format!("Result will appear here... ({hint})")
        } else {
            body
        };

        let text_style = if placeholder {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(rgb(style.palette.text))
                .bg(rgb(style.palette.background))
        };

        let title = format!(" {} ", self.tab.title(self.lang));
        let panel = Paragraph::new(text)
            .style(text_style)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(rgb(style.palette.primary)))
                    .title(Span::styled(
                        title,
                        Style::default()
                            .fg(rgb(style.palette.primary))
                            .add_modifier(Modifier::BOLD),
                    )),
            );
        frame.render_widget(panel, area);
    }

    // ── Activity log ─────────────────────────────────────────────────

    fn draw_activity(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(2) as usize;

        // Build the log paragraph with wrapping so we can query its
        // rendered line count (ratatui 0.30 native API).
        let log_lines: Vec<Line> = self.logs.iter().map(|l| l.render()).collect();
        let log_paragraph = Paragraph::new(Text::from(log_lines)).wrap(Wrap { trim: true });

        let total_visual = log_paragraph.line_count(inner_width);
        let max_scroll = total_visual.saturating_sub(inner_height);

        // Clamp scroll_offset (lines from the bottom) to valid range.
        if (self.scroll_offset as usize) > max_scroll {
            self.scroll_offset = max_scroll as u16;
        }
        let top_row = max_scroll.saturating_sub(self.scroll_offset as usize) as u16;

        let scroll_indicator = if self.scroll_offset > 0 {
            format!(" Activity [↑{}] ", self.scroll_offset)
        } else {
            " Activity ".to_string()
        };

        let log_panel = log_paragraph
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(scroll_indicator),
            )
            .scroll((top_row, 0));
        frame.render_widget(log_panel, area);
    }

    // ── Input prompt ─────────────────────────────────────────────────

    fn draw_input(&self, frame: &mut Frame<'_>, area: Rect) {
        let input_panel = Paragraph::new(self.input.as_str())
            .block(Block::default().borders(Borders::ALL).title(" Command "));
        frame.render_widget(input_panel, area);

        let input_width = area.width.saturating_sub(2) as usize;
        let cursor = self.cursor.min(input_width);
        frame.set_cursor_position(Position::new(area.x + 1 + cursor as u16, area.y + 1));
    }
}
