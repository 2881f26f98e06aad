use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, Gauge, GraphType, Paragraph, Widget},
};

use crate::clock::ClockState;
use crate::session::Session;

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

/// Chart bounds leave breathing room around the unit-square path.
const CHART_BOUND: f64 = 1.5;

impl Widget for &Session {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = self.frame_now();
        let config = self.config();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let path_style = Style::default().fg(Color::Blue);
        let marker_style = Style::default().fg(Color::Cyan).patch(bold_style);
        let start_style = Style::default().fg(Color::Green);
        let end_style = Style::default().fg(Color::Red);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(1),    // chart
                Constraint::Length(1), // cycle progress gauge
                Constraint::Length(1), // phase / timer / speed line
                Constraint::Length(1), // technique guide
                Constraint::Length(1), // key help
            ])
            .split(area);

        let header = Paragraph::new(Span::styled(config.pattern.name(), bold_style))
            .alignment(Alignment::Center);
        header.render(chunks[0], buf);

        let start_point = [frame.start_anchor];
        let end_point = [frame.end_anchor];
        let current_point = [frame.position];

        // Draw order matters: the moving dot goes last so it stays on
        // top of the path and the anchor stars.
        let datasets = vec![
            Dataset::default()
                .name("pattern")
                .marker(Marker::Braille)
                .style(path_style)
                .graph_type(GraphType::Line)
                .data(frame.points),
            Dataset::default()
                .name("start")
                .marker(Marker::Dot)
                .style(start_style)
                .graph_type(GraphType::Scatter)
                .data(&start_point),
            Dataset::default()
                .name("end")
                .marker(Marker::Dot)
                .style(end_style)
                .graph_type(GraphType::Scatter)
                .data(&end_point),
            Dataset::default()
                .name("you")
                .marker(Marker::Block)
                .style(marker_style)
                .graph_type(GraphType::Scatter)
                .data(&current_point),
        ];

        let chart = Chart::new(datasets)
            .x_axis(Axis::default().bounds([-CHART_BOUND, CHART_BOUND]))
            .y_axis(Axis::default().bounds([-CHART_BOUND, CHART_BOUND]));
        chart.render(chunks[1], buf);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
            .ratio(frame.progress.clamp(0.0, 1.0))
            .label(Span::styled(
                format!("{:.0}%", frame.progress * 100.0),
                bold_style,
            ));
        gauge.render(chunks[2], buf);

        let status = match self.clock_state() {
            ClockState::Stopped => "Press (space) to begin".to_string(),
            ClockState::Paused => format!(
                "Paused - {} - {:.0}s left - {:.1}x",
                frame.phase,
                frame.remaining_secs.ceil(),
                config.speed
            ),
            ClockState::Playing => format!(
                "{} - {:.0}s left - {:.1}x",
                frame.phase,
                frame.remaining_secs.ceil(),
                config.speed
            ),
        };
        let status_line = Paragraph::new(Span::styled(status, bold_style))
            .alignment(Alignment::Center);
        status_line.render(chunks[3], buf);

        let guide = Paragraph::new(Span::styled(config.pattern.guide(), italic_style))
            .alignment(Alignment::Center);
        guide.render(chunks[4], buf);

        let help = Paragraph::new(Span::styled(
            "(space) start/pause  (r) reset  (c/w/s) pattern  (↑/↓) duration  (←/→) speed  (esc) quit",
            dim_style,
        ))
        .alignment(Alignment::Center);
        help.render(chunks[5], buf);
    }
}
