use crate::models::Message;
use std::collections::HashSet;

/// Ordered message collection for one feed session - single source of truth
/// for everything the presentation layer renders.
///
/// Messages are kept oldest-to-newest. New arrivals append at the tail,
/// history pages prepend at the head, and every insertion is deduplicated by
/// id so overlapping push/poll/pagination deliveries collapse to one entry.
/// Store operations cannot fail; error handling belongs to the callers that
/// source the messages.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    ids: HashSet<String>,
    /// Whether older pages remain on the server. Only an empty page from the
    /// "before" fetch clears this.
    pub has_more_older: bool,
    /// Guard against overlapping backward-pagination fetches
    pub loading_older: bool,
}

impl MessageStore {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            ids: HashSet::new(),
            has_more_older: true,
            loading_older: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn oldest(&self) -> Option<&Message> {
        self.messages.first()
    }

    pub fn newest(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Tail-insert unless the id is already present. Returns whether an
    /// insertion occurred; callers use this to decide whether new content
    /// should trigger auto-scroll.
    pub fn append_if_new(&mut self, message: Message) -> bool {
        if !self.ids.insert(message.id.clone()) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Head-insert a contiguous older batch, preserving the batch's order and
    /// never touching existing entries. Ids already present are filtered out.
    /// Returns the number of messages actually inserted.
    pub fn prepend_batch(&mut self, older: Vec<Message>) -> usize {
        let fresh: Vec<Message> = older
            .into_iter()
            .filter(|m| !self.ids.contains(&m.id))
            .collect();
        for m in &fresh {
            self.ids.insert(m.id.clone());
        }
        let inserted = fresh.len();
        if inserted > 0 {
            self.messages.splice(0..0, fresh);
        }
        inserted
    }

    /// Full reload: fresh join or a filter-mode reload. Re-arms
    /// `has_more_older` since exhaustion only holds for the replaced view.
    pub fn replace_all(&mut self, messages: Vec<Message>) {
        self.ids = messages.iter().map(|m| m.id.clone()).collect();
        self.messages = messages;
        self.has_more_older = true;
        self.loading_older = false;
    }

    /// Poll-mode reconciliation. The fetched set is authoritative for its own
    /// time range; paginated history strictly older than the fetched batch is
    /// kept. An empty poll result is treated as transient, not a wipe.
    pub fn reconcile(&mut self, fetched: Vec<Message>) {
        if fetched.is_empty() {
            return;
        }
        let cutoff = fetched[0].created_at;
        let fetched_ids: HashSet<&str> = fetched.iter().map(|m| m.id.as_str()).collect();
        let mut merged: Vec<Message> = self
            .messages
            .drain(..)
            .filter(|m| m.created_at < cutoff && !fetched_ids.contains(m.id.as_str()))
            .collect();
        merged.extend(fetched);
        self.ids = merged.iter().map(|m| m.id.clone()).collect();
        self.messages = merged;
    }

    /// Drop everything; used when the user leaves the feed.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.ids.clear();
        self.has_more_older = true;
        self.loading_older = false;
    }
}
