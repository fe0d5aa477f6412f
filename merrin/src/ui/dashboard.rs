//! The fixed two-column dashboard: bold labels on the left, values from
//! column 17, one row per GPU card. Unavailable metrics read "Unavailable".

use merrin_metrics::{GpuVram, MemoryInfo, Snapshot, Temperature, UptimeInfo};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::Thresholds;
use crate::ui::theme::{self, UNAVAILABLE, VALUE_COL};

pub fn draw_dashboard(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    snap: Option<&Snapshot>,
    th: &Thresholds,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let body = match snap {
        Some(s) => dashboard_lines(s, th),
        None => vec![Line::from(Span::styled("Collecting metrics...", theme::hint()))],
    };
    f.render_widget(Paragraph::new(body), rows[0]);
    f.render_widget(
        Paragraph::new(Span::styled("press 'q' to quit", theme::hint())),
        rows[1],
    );
}

pub fn dashboard_lines(s: &Snapshot, th: &Thresholds) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(8);

    if let Some(header) = header_text(s) {
        lines.push(Line::from(Span::styled(header, theme::label())));
    }

    lines.push(row(
        "CPU Utilization:",
        s.cpu_usage
            .map(|v| (format!("{v:.2}%"), severity(v, th.cpu_usage_pct))),
    ));
    lines.push(row(
        "CPU Temperature:",
        s.cpu_temp.as_ref().map(|t| temp_value(t, th.cpu_temp_c)),
    ));

    match &s.gpu_usage {
        Some(cards) if !cards.is_empty() => {
            for (i, (card, vram)) in cards.iter().enumerate() {
                let label = if i == 0 { "GPU VRAM Usage:" } else { "" };
                lines.push(row(label, Some(gpu_value(card, vram, th.gpu_vram_pct))));
            }
        }
        _ => lines.push(row("GPU VRAM Usage:", None)),
    }

    lines.push(row(
        "GPU Temperature:",
        s.gpu_temp.as_ref().map(|t| temp_value(t, th.gpu_temp_c)),
    ));
    lines.push(row(
        "RAM:",
        s.memory.as_ref().map(|m| memory_value(m, th.memory_pct)),
    ));
    lines.push(row("Uptime:", s.uptime.as_ref().map(uptime_value)));
    lines
}

fn header_text(s: &Snapshot) -> Option<String> {
    let (user, host) = (s.user.as_deref()?, s.hostname.as_deref()?);
    let when = s
        .taken_at
        .map(|t| format!(" | {}", t.format("%-m/%-d/%Y %H:%M:%S")))
        .unwrap_or_default();
    Some(format!("{user}@{host}{when}"))
}

fn row(label: &'static str, value: Option<(String, Style)>) -> Line<'static> {
    let (text, style) = value.unwrap_or_else(|| (UNAVAILABLE.to_string(), theme::normal()));
    Line::from(vec![
        Span::styled(format!("{label:<width$}", width = VALUE_COL), theme::label()),
        Span::styled(text, style),
    ])
}

fn severity(value: f64, threshold: f64) -> Style {
    if value >= threshold {
        theme::warning()
    } else {
        theme::normal()
    }
}

fn temp_value(t: &Temperature, threshold: f64) -> (String, Style) {
    (format!("{:.1} C", t.celsius), severity(t.celsius, threshold))
}

fn gpu_value(card: &str, v: &GpuVram, threshold: f64) -> (String, Style) {
    let style = v
        .used_pct()
        .map(|pct| severity(pct, threshold))
        .unwrap_or_else(theme::normal);
    (format!("{card}: {} MB / {} MB", v.used_mb, v.total_mb), style)
}

fn memory_value(m: &MemoryInfo, threshold: f64) -> (String, Style) {
    let style = if m.total_mb > 0 {
        severity(m.used_mb as f64 / m.total_mb as f64 * 100.0, threshold)
    } else {
        theme::normal()
    };
    (format!("{} MB / {} MB", m.used_mb, m.total_mb), style)
}

fn uptime_value(u: &UptimeInfo) -> (String, Style) {
    (
        format!("{} hours, {} minutes", u.hours, u.minutes),
        theme::normal(),
    )
}
