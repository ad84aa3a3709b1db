//! Main event loop: terminal events, feed events, and a render tick.

use crate::input;
use crate::ui::{render, App, Tui};
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use greenroom_core::FeedEvent;
use std::time::Duration;
use tokio::sync::mpsc;

const TICK: Duration = Duration::from_millis(50);

pub async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    mut feed_rx: mpsc::Receiver<FeedEvent>,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK);

    while app.running {
        terminal.draw(|f| render::render(f, app))?;
        app.after_frame();

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        input::handle_key(app, key);
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        input::handle_mouse(app, mouse);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    None => app.running = false,
                }
            }
            maybe_feed = feed_rx.recv() => {
                match maybe_feed {
                    Some(event) => {
                        handle_feed_event(app, event);
                        // drain whatever else is queued before redrawing
                        while let Ok(event) = feed_rx.try_recv() {
                            handle_feed_event(app, event);
                        }
                    }
                    None => app.running = false,
                }
            }
            _ = tick.tick() => {}
        }
    }
    Ok(())
}

fn handle_feed_event(app: &mut App, event: FeedEvent) {
    if let FeedEvent::SendFinished(Err(err)) = &event {
        app.status = Some(format!("send failed: {err}"));
    }
    let effects = app.engine.handle_event(event);
    app.apply_effects(effects);
}
