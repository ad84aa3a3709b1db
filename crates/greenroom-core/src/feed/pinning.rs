//! Pin ranking: which pinned message earns the sticky overlay slot.

use crate::models::Message;

/// Top-paid pinned message among the loaded, non-host messages.
///
/// Ordering is numeric on the paid amount. Ties resolve to the earliest
/// `created_at`, then to the lexically smallest id, so the winner is stable
/// regardless of store insertion order.
pub fn top_pinned<'a, I>(messages: I) -> Option<&'a Message>
where
    I: IntoIterator<Item = &'a Message>,
{
    messages
        .into_iter()
        .filter(|m| m.is_pinned && !m.is_from_host)
        .max_by(|a, b| {
            a.pin_amount
                .cmp(&b.pin_amount)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned(id: &str, amount: &str, at: i64) -> Message {
        let mut m = Message::text(id, "fan", "pin", at);
        m.is_pinned = true;
        m.pin_amount = crate::models::PinAmount::new(amount);
        m
    }

    #[test]
    fn test_highest_amount_wins() {
        let messages = vec![
            pinned("m1", "1.00", 100),
            pinned("m2", "25.50", 200),
            pinned("m3", "3.00", 300),
        ];
        assert_eq!(top_pinned(&messages).unwrap().id, "m2");
    }

    #[test]
    fn test_host_and_unpinned_excluded() {
        let mut host = pinned("m1", "99.00", 100);
        host.is_from_host = true;
        let plain = Message::text("m2", "fan", "hi", 200);
        let messages = vec![host, plain, pinned("m3", "2.00", 300)];
        assert_eq!(top_pinned(&messages).unwrap().id, "m3");
    }

    #[test]
    fn test_tie_breaks_to_earliest_pin() {
        let messages = vec![pinned("m2", "5.00", 200), pinned("m1", "5.00", 100)];
        assert_eq!(top_pinned(&messages).unwrap().id, "m1");
    }

    #[test]
    fn test_no_candidates() {
        let messages = vec![Message::text("m1", "fan", "hi", 100)];
        assert!(top_pinned(&messages).is_none());
    }
}
