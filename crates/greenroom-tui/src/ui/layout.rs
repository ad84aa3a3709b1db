//! Feed layout: turning the engine's display view into styled rows, and
//! exposing the resulting row geometry to the viewport tracker.
//!
//! Row positions double as the scroll geometry: the header line is the top
//! of the messages area, one unit is one terminal row, and a message's
//! bottom edge is the row below its last content line.

use crate::ui::theme;
use greenroom_core::feed::{Geometry, ThreadFlags};
use greenroom_core::models::{Message, MessageBody, VoiceAttachment};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CONTENT_INDENT: &str = "  ";
const WAVEFORM_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const WAVEFORM_COLS: usize = 24;

/// Row span occupied by one message in the laid-out feed.
#[derive(Debug, Clone)]
pub struct MessageBlock {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// One frame's laid-out feed: styled rows plus per-message row spans.
#[derive(Debug, Default)]
pub struct FeedLayout {
    pub lines: Vec<Line<'static>>,
    pub blocks: Vec<MessageBlock>,
    pub viewport_height: f64,
}

impl FeedLayout {
    pub fn content_height(&self) -> f64 {
        self.lines.len() as f64
    }

    pub fn max_scroll_top(&self) -> f64 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    /// Lay out the display view for a messages area of the given size.
    pub fn build(display: &[(&Message, ThreadFlags)], width: u16, height: u16) -> Self {
        let mut layout = Self {
            viewport_height: height as f64,
            ..Self::default()
        };
        let text_width = (width as usize).saturating_sub(CONTENT_INDENT.len()).max(8);

        for (message, flags) in display {
            let top = layout.lines.len() as f64;

            if flags.starts_thread {
                layout.lines.push(author_line(message));
            }
            match &message.body {
                MessageBody::Text(text) => {
                    for row in wrap_text(text, text_width) {
                        layout.lines.push(Line::from(vec![
                            Span::raw(CONTENT_INDENT),
                            Span::styled(row, Style::default().fg(theme::TEXT_PRIMARY)),
                        ]));
                    }
                }
                MessageBody::Voice(voice) => {
                    layout.lines.push(voice_line(voice));
                }
            }
            if flags.ends_thread {
                layout.lines.push(timestamp_line(message.created_at));
            }

            let height = layout.lines.len() as f64 - top;
            layout.blocks.push(MessageBlock {
                id: message.id.clone(),
                top,
                height,
            });

            // spacer between segments, outside any block
            if flags.ends_thread {
                layout.lines.push(Line::from(""));
            }
        }
        layout
    }
}

/// Geometry snapshot for one frame: the laid-out feed plus the current
/// scroll offset, measured relative to the header line.
pub struct GeometryView<'a> {
    pub layout: &'a FeedLayout,
    pub scroll_top: f64,
}

impl Geometry for GeometryView<'_> {
    fn bottom_edge(&self, id: &str) -> Option<f64> {
        self.layout
            .blocks
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.top + b.height - self.scroll_top)
    }

    fn content_height(&self) -> f64 {
        self.layout.content_height()
    }

    fn viewport_height(&self) -> f64 {
        self.layout.viewport_height
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }
}

fn author_line(message: &Message) -> Line<'static> {
    let mut spans = vec![Span::styled(
        message.sender.clone(),
        theme::author_style(&message.sender, message.is_from_host),
    )];
    if message.is_from_host {
        spans.push(Span::styled(
            " · host",
            Style::default().fg(theme::ACCENT_HOST),
        ));
    }
    if message.is_pinned {
        let label = if message.pin_amount.is_zero() {
            " · pinned".to_string()
        } else {
            format!(" · pinned ${}", message.pin_amount.as_str())
        };
        spans.push(Span::styled(label, Style::default().fg(theme::ACCENT_PIN)));
    }
    if let Some(reply_to) = &message.reply_to {
        spans.push(Span::styled(
            format!(" · re {}", short_id(reply_to)),
            Style::default().fg(theme::TEXT_DIM),
        ));
    }
    Line::from(spans)
}

fn voice_line(voice: &VoiceAttachment) -> Line<'static> {
    Line::from(vec![
        Span::raw(CONTENT_INDENT),
        Span::styled(
            render_waveform(&voice.waveform),
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
        Span::styled(
            format!(" voice · {}s", voice.duration_secs.round() as u64),
            Style::default().fg(theme::TEXT_MUTED),
        ),
    ])
}

fn timestamp_line(created_at: i64) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}{}", CONTENT_INDENT, format_time(created_at)),
        Style::default().fg(theme::TEXT_MUTED),
    ))
}

pub fn format_time(created_at_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(created_at_ms)
        .map(|dt| dt.with_timezone(&chrono::Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Downsample amplitude samples into a fixed-width block-glyph sparkline.
fn render_waveform(samples: &[f32]) -> String {
    if samples.is_empty() {
        return WAVEFORM_GLYPHS[0].to_string().repeat(4);
    }
    let cols = samples.len().min(WAVEFORM_COLS);
    let per_col = samples.len() / cols;
    (0..cols)
        .map(|c| {
            let slice = &samples[c * per_col..((c + 1) * per_col).min(samples.len())];
            let peak = slice.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
            let idx = ((peak.clamp(0.0, 1.0) * 7.0).round()) as usize;
            WAVEFORM_GLYPHS[idx.min(7)]
        })
        .collect()
}

/// Greedy word wrap by display width; words wider than the line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            rows.push(String::new());
            continue;
        }
        let mut row = String::new();
        let mut row_width = 0usize;
        for word in paragraph.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);
            let sep = usize::from(!row.is_empty());
            if row_width + sep + word_width <= width {
                if sep == 1 {
                    row.push(' ');
                }
                row.push_str(word);
                row_width += sep + word_width;
                continue;
            }
            if !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            if word_width <= width {
                row.push_str(word);
                row_width = word_width;
            } else {
                // hard-split an overlong word
                for ch in word.chars() {
                    let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                    if row_width + ch_width > width && !row.is_empty() {
                        rows.push(std::mem::take(&mut row));
                        row_width = 0;
                    }
                    row.push(ch);
                    row_width += ch_width;
                }
            }
        }
        rows.push(row);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}
