use crate::ui::app::App;
use crate::ui::layout::{self, FeedLayout};
use crate::ui::theme;
use greenroom_core::feed::FeedFilter;
use greenroom_core::models::{Message, MessageBody};
use greenroom_core::transport::PushState;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, app: &mut App) {
    let overlay = app.engine.overlay();
    let host_banner = overlay.host.map(banner_text);
    let pinned_banner = overlay.pinned.map(pinned_text);
    let header_rows = 1 + u16::from(host_banner.is_some()) + u16::from(pinned_banner.is_some());

    let [header_area, messages_area, input_area, status_area] = Layout::vertical([
        Constraint::Length(header_rows),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    f.render_widget(Block::default().style(Style::default().bg(theme::BG_APP)), f.area());

    render_header(f, header_area, app, host_banner, pinned_banner);
    render_messages(f, messages_area, app);
    render_input(f, input_area, app);
    render_status(f, status_area, app);
}

fn render_header(
    f: &mut Frame,
    area: Rect,
    app: &App,
    host_banner: Option<String>,
    pinned_banner: Option<String>,
) {
    let mut rows: Vec<Line> = Vec::with_capacity(3);

    let (state_label, state_color) = match app.engine.push_state() {
        PushState::Connected => ("● live", theme::ACCENT_LIVE),
        PushState::Connecting => ("◌ connecting", theme::TEXT_MUTED),
        PushState::Disconnected => ("○ polling", theme::ACCENT_DEGRADED),
    };
    let filter_label = match app.engine.filter() {
        FeedFilter::All => "all",
        FeedFilter::HostOnly => "host only",
    };
    rows.push(Line::from(vec![
        Span::styled(
            "greenroom",
            Style::default()
                .fg(theme::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" · {}", app.room_id),
            Style::default().fg(theme::TEXT_MUTED),
        ),
        Span::styled(format!(" · {state_label}"), Style::default().fg(state_color)),
        Span::styled(
            format!(" · {filter_label}"),
            Style::default().fg(theme::TEXT_DIM),
        ),
    ]));

    if let Some(text) = host_banner {
        rows.push(Line::from(vec![
            Span::styled("host ", Style::default().fg(theme::ACCENT_HOST)),
            Span::styled(text, Style::default().fg(theme::TEXT_PRIMARY)),
        ])
        .style(Style::default().bg(theme::BG_OVERLAY)));
    }
    if let Some(text) = pinned_banner {
        rows.push(Line::from(vec![
            Span::styled("pin ", Style::default().fg(theme::ACCENT_PIN)),
            Span::styled(text, Style::default().fg(theme::TEXT_PRIMARY)),
        ])
        .style(Style::default().bg(theme::BG_OVERLAY)));
    }

    f.render_widget(Paragraph::new(rows), area);
}

fn render_messages(f: &mut Frame, area: Rect, app: &mut App) {
    let display = app.engine.display();
    app.layout = FeedLayout::build(&display, area.width, area.height);

    let top = app.scroll_top.clamp(0.0, app.layout.max_scroll_top()) as usize;
    let visible: Vec<Line> = app
        .layout
        .lines
        .iter()
        .skip(top)
        .take(area.height as usize)
        .cloned()
        .collect();
    f.render_widget(Paragraph::new(visible), area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(app.input.clone(), Style::default().fg(theme::TEXT_PRIMARY)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let mut parts: Vec<String> = Vec::new();
    if app.engine.store().loading_older {
        parts.push("loading older…".to_string());
    }
    if let Some(status) = &app.status {
        parts.push(status.clone());
    }
    parts.push("enter send · tab filter · esc quit".to_string());
    let line = Line::from(Span::styled(
        parts.join("  ·  "),
        Style::default().fg(theme::TEXT_DIM),
    ));
    f.render_widget(Paragraph::new(line), area);
}

fn banner_text(message: &Message) -> String {
    format!("{}: {}", message.sender, summary(message))
}

fn pinned_text(message: &Message) -> String {
    if message.pin_amount.is_zero() {
        banner_text(message)
    } else {
        format!("${} {}", message.pin_amount.as_str(), banner_text(message))
    }
}

fn summary(message: &Message) -> String {
    match &message.body {
        MessageBody::Text(text) => text.replace('\n', " "),
        MessageBody::Voice(voice) => format!("voice · {}s", voice.duration_secs.round() as u64),
    }
}
