use crate::ui::layout::{FeedLayout, GeometryView};
use greenroom_core::api::{ChatApi, OutgoingMessage, RestApi};
use greenroom_core::feed::{EngineEffect, ScrollAnchor};
use greenroom_core::{FeedEngine, FeedEvent};
use tokio::sync::mpsc;

/// Top-level TUI state: the feed engine plus everything presentation-side
/// (scroll offset, input line, the current frame's layout).
pub struct App {
    pub engine: FeedEngine,
    pub api: RestApi,
    pub room_id: String,
    pub feed_tx: mpsc::Sender<FeedEvent>,
    pub layout: FeedLayout,
    pub scroll_top: f64,
    pub input: String,
    pub status: Option<String>,
    pub running: bool,
    /// Anchor captured when an older-page fetch was kicked off
    pending_anchor: Option<ScrollAnchor>,
    /// Anchor to restore once the prepended page has been re-measured
    restore_anchor: Option<ScrollAnchor>,
    pending_scroll_bottom: bool,
}

impl App {
    pub fn new(
        engine: FeedEngine,
        api: RestApi,
        room_id: String,
        feed_tx: mpsc::Sender<FeedEvent>,
    ) -> Self {
        Self {
            engine,
            api,
            room_id,
            feed_tx,
            layout: FeedLayout::default(),
            scroll_top: 0.0,
            input: String::new(),
            status: None,
            running: true,
            pending_anchor: None,
            restore_anchor: None,
            pending_scroll_bottom: false,
        }
    }

    pub fn apply_effects(&mut self, effects: Vec<EngineEffect>) {
        for effect in effects {
            match effect {
                EngineEffect::ScrollToBottom => self.pending_scroll_bottom = true,
                EngineEffect::PagePrepended { .. } => {
                    self.restore_anchor = self.pending_anchor.take();
                }
            }
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.pending_scroll_bottom = true;
    }

    /// Scroll by a row delta, then re-evaluate auto-scroll and the near-top
    /// pagination trigger.
    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_top = (self.scroll_top + delta).clamp(0.0, self.layout.max_scroll_top());

        let geo = GeometryView {
            layout: &self.layout,
            scroll_top: self.scroll_top,
        };
        self.engine.on_scroll(&geo);

        let geo = GeometryView {
            layout: &self.layout,
            scroll_top: self.scroll_top,
        };
        if let Some(request) = self.engine.maybe_request_older(&geo) {
            self.pending_anchor = Some(request.anchor);
            let api = self.api.clone();
            let room_id = self.room_id.clone();
            let tx = self.feed_tx.clone();
            tokio::spawn(async move {
                let result = api
                    .fetch_messages_before(&room_id, request.before, request.limit)
                    .await;
                let _ = tx.send(FeedEvent::OlderPage(result)).await;
            });
        }
    }

    /// Send the input line as a text message. The echo arrives back through
    /// the transport like any other message.
    pub fn send_current_input(&mut self) {
        let text = self.input.trim().to_string();
        self.input.clear();
        if text.is_empty() {
            return;
        }
        self.engine.note_local_send();
        let outgoing = OutgoingMessage::text(text);
        let api = self.api.clone();
        let room_id = self.room_id.clone();
        let tx = self.feed_tx.clone();
        tokio::spawn(async move {
            let result = api.send_message(&room_id, &outgoing).await;
            let _ = tx.send(FeedEvent::SendFinished(result)).await;
        });
    }

    /// Post-render pass: apply deferred scroll moves against the freshly
    /// measured layout, then run the viewport classification.
    pub fn after_frame(&mut self) {
        if let Some(anchor) = self.restore_anchor.take() {
            self.scroll_top = anchor.restored_top(self.layout.content_height());
        }
        if self.pending_scroll_bottom {
            self.pending_scroll_bottom = false;
            self.scroll_top = self.layout.max_scroll_top();
            let geo = GeometryView {
                layout: &self.layout,
                scroll_top: self.scroll_top,
            };
            self.engine.on_scroll(&geo);
        }
        self.scroll_top = self.scroll_top.clamp(0.0, self.layout.max_scroll_top());

        let geo = GeometryView {
            layout: &self.layout,
            scroll_top: self.scroll_top,
        };
        self.engine.update_viewport(&geo);
    }
}
