//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Wrap,
};

use super::runtime::{App, GRID_COLUMNS};
use super::style;

/// Height of one device card row.
const CARD_HEIGHT: u16 = 4;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Length(3),  // metrics
            Constraint::Min(8),     // sensors + devices
            Constraint::Length(12), // chart
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_metrics(frame, app, chunks[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(chunks[2]);
    render_sensors(frame, app, middle[0]);
    render_devices(frame, app, middle[1]);

    render_chart(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

/// Header bar: preset name, history fill, refresh speed, drift state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (icon, label) = if app.drifting {
        ("▶", "LIVE")
    } else {
        ("‖", "HOLD")
    };
    let history = app.session.history();

    let header = Line::from(vec![
        Span::styled(
            " ⚡ SMART POWER LOAD BALANCER ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ samples {}/{} │ {}ms │ {icon} {label} ",
            history.len(),
            history.capacity(),
            app.tick_interval_ms(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Live power, power saved and load status boxes.
fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let s = &app.snapshot;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let power = Paragraph::new(Line::from(Span::styled(
        format!(" {:.1} W", s.power_w),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().title(" Live Power Usage ").borders(Borders::ALL));
    frame.render_widget(power, cols[0]);

    let mut saved = vec![Span::styled(
        format!(" {} W", s.saved_w),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if s.saved_w > 0 {
        saved.push(Span::styled(
            format!("  ↓ -{}", s.saved_w),
            Style::default().fg(style::ACTIVE),
        ));
    }
    let saved = Paragraph::new(Line::from(saved))
        .block(Block::default().title(" Power Saved ").borders(Borders::ALL));
    frame.render_widget(saved, cols[1]);

    let status = Paragraph::new(Line::from(Span::styled(
        format!(" STATUS: {} LOAD", s.prediction),
        Style::default()
            .fg(style::status_color(&s.prediction))
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().title(" Grid ").borders(Borders::ALL));
    frame.render_widget(status, cols[2]);
}

/// Voltage and amperage gauges plus the circuit diagram line.
fn render_sensors(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(2),
        ])
        .split(area);

    let reading = app.snapshot.reading;
    let sensors = &app.config().sensors;

    let voltage = Gauge::default()
        .block(Block::default().title(" Voltage (V) ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::VOLTAGE_COLOR))
        .ratio(style::gauge_ratio(
            reading.voltage,
            sensors.voltage.min,
            sensors.voltage.max,
        ))
        .label(format!("{:.1} V", reading.voltage));
    frame.render_widget(voltage, chunks[0]);

    let amperage = Gauge::default()
        .block(Block::default().title(" Amperage (A) ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::AMPERAGE_COLOR))
        .ratio(style::gauge_ratio(
            reading.amperage,
            sensors.amperage.min,
            sensors.amperage.max,
        ))
        .label(format!("{:.2} A", reading.amperage));
    frame.render_widget(amperage, chunks[1]);

    let asset_style = if app.asset.is_missing() {
        Style::default().fg(style::WARNING)
    } else {
        Style::default()
    };
    let asset = Paragraph::new(Line::from(Span::styled(app.asset.describe(), asset_style)))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Virtual Hardware Model ")
                .borders(Borders::ALL),
        );
    frame.render_widget(asset, chunks[2]);
}

/// Four-column grid of device cards with ACTIVE/SHED badges.
fn render_devices(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Devices ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let devices = &app.snapshot.devices;
    if devices.is_empty() {
        frame.render_widget(
            Paragraph::new("  No devices tracked. Press 'a' to add one."),
            inner,
        );
        return;
    }

    let rows = devices.len().div_ceil(GRID_COLUMNS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows])
        .split(inner);

    for (row_idx, row) in devices.chunks(GRID_COLUMNS).enumerate() {
        let Some(&row_area) = row_areas.get(row_idx) else {
            break;
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(row_area);

        for (col_idx, device) in row.iter().enumerate() {
            let idx = row_idx * GRID_COLUMNS + col_idx;
            let border = if idx == app.selected {
                Style::default().fg(style::SELECTED)
            } else {
                Style::default()
            };
            let (badge, color) = if device.active {
                ("🟢 ACTIVE", style::ACTIVE)
            } else {
                ("🔴 SHED", style::SHED)
            };
            let lines = vec![
                Line::from(format!(
                    "{} ({})",
                    device.profile.category, device.profile.priority
                )),
                Line::from(Span::styled(
                    badge,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
            ];
            let card = Paragraph::new(lines).block(
                Block::default()
                    .title(format!(" {} {} ", device.profile.emoji, device.name))
                    .borders(Borders::ALL)
                    .border_style(border),
            );
            frame.render_widget(card, cells[col_idx]);
        }
    }
}

/// Power consumption history chart.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let history = app.session.history();
    let t0 = history.iter().next().map_or(0.0, |s| s.timestamp);
    let data: Vec<(f64, f64)> = history
        .iter()
        .map(|s| (s.timestamp - t0, f64::from(s.power_w)))
        .collect();

    let y_bounds = style::auto_bounds_y(&data);
    let x_hi = data.last().map_or(1.0, |p| p.0).max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("Power")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::POWER_COLOR))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" 📊 Power Consumption History ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("s")
                .bounds([0.0, x_hi])
                .labels(vec!["0".to_string(), format!("{x_hi:.0}")]),
        )
        .y_axis(
            Axis::default()
                .title("W")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.0}", y_bounds[0]),
                    format!("{:.0}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Footer with keybinding hints, or the add-device prompt.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(buf) = &app.input {
        Line::from(vec![
            Span::styled(" Add device: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{buf}_")),
            Span::styled(
                "  (Enter: add, Esc: cancel)",
                Style::default().fg(style::FOOTER_FG),
            ),
        ])
    } else {
        Line::from(Span::styled(
            " q:Quit  ↑/↓:Volts  ←/→:Amps  a:Add  Tab:Select  d:Remove  \
             Space:Drift  +/-:Speed  1/2/3:Preset  r:Reset",
            Style::default().fg(style::FOOTER_FG),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
