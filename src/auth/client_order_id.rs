//! Client order id generation.
//!
//! Every new order carries a `newClientOrderId` so that it can be queried or
//! cancelled without waiting for the venue's order id. Ids are built as
//! `<tag><millisecond timestamp><counter>`, where the counter is owned by the
//! generator and strictly increases for its whole lifetime.

use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;

/// Tag prefixed to generated client order ids.
pub const DEFAULT_CLIENT_ORDER_ID_TAG: &str = "x-A6SIDXVS";

/// Initial value of the order counter. The first id uses the value after it.
pub const INITIAL_ORDER_COUNT: u64 = 1_000_000;

/// Trait for providing client order ids for new orders.
///
/// Every call must return an id never returned before by the same provider.
pub trait ClientOrderIdProvider: Send + Sync {
    /// Generate the next client order id.
    fn next_client_order_id(&self) -> String;
}

/// A provider combining a fixed tag, the current time and a counter.
///
/// The counter alone guarantees uniqueness within one provider: concurrent
/// callers never observe the same value. Ids are not unique across restarts
/// if two processes start their counters in the same millisecond.
#[derive(Debug)]
pub struct CountingClientOrderId {
    tag: String,
    order_count: AtomicU64,
}

impl CountingClientOrderId {
    /// Create a provider using [`DEFAULT_CLIENT_ORDER_ID_TAG`].
    pub fn new() -> Self {
        Self::with_tag(DEFAULT_CLIENT_ORDER_ID_TAG)
    }

    /// Create a provider with a custom tag.
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            order_count: AtomicU64::new(INITIAL_ORDER_COUNT),
        }
    }

    /// The tag prefixed to every id.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Increment the counter and return the new value.
    pub fn next_count(&self) -> u64 {
        self.order_count.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for CountingClientOrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientOrderIdProvider for CountingClientOrderId {
    fn next_client_order_id(&self) -> String {
        let count = self.next_count();
        format!("{}{}{}", self.tag, current_time_millis(), count)
    }
}

/// Milliseconds since the UNIX epoch.
pub fn current_time_millis() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    /// Split an id into its timestamp and counter parts.
    fn parse_id(tag: &str, id: &str) -> (u64, u64) {
        let rest = id.strip_prefix(tag).expect("id starts with the tag");
        // 13 digits of milliseconds until the year 2286.
        let (millis, count) = rest.split_at(13);
        (millis.parse().unwrap(), count.parse().unwrap())
    }

    #[test]
    fn test_first_id_uses_incremented_counter() {
        let provider = CountingClientOrderId::new();
        let before = current_time_millis();
        let id = provider.next_client_order_id();
        let after = current_time_millis();

        let (millis, count) = parse_id(DEFAULT_CLIENT_ORDER_ID_TAG, &id);
        assert_eq!(count, INITIAL_ORDER_COUNT + 1);
        assert!(millis >= before && millis <= after);
    }

    #[test]
    fn test_counter_strictly_increasing() {
        let provider = CountingClientOrderId::with_tag("test-");

        let mut last = 0u64;
        for _ in 0..1000 {
            let (_, count) = parse_id("test-", &provider.next_client_order_id());
            assert!(count > last, "Counter must be strictly increasing");
            last = count;
        }
    }

    #[test]
    fn test_providers_are_independent() {
        let a = CountingClientOrderId::new();
        let b = CountingClientOrderId::new();
        a.next_count();
        a.next_count();
        assert_eq!(b.next_count(), INITIAL_ORDER_COUNT + 1);
    }

    #[test]
    fn test_ids_unique_and_contiguous_across_threads() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 500;

        let provider = Arc::new(CountingClientOrderId::new());
        let mut handles = vec![];

        for _ in 0..THREADS {
            let p = provider.clone();
            handles.push(thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| p.next_client_order_id())
                    .collect::<Vec<_>>()
            }));
        }

        let mut ids = HashSet::new();
        let mut counts = Vec::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                counts.push(parse_id(DEFAULT_CLIENT_ORDER_ID_TAG, &id).1);
                assert!(ids.insert(id), "Client order id must be unique across threads");
            }
        }

        counts.sort_unstable();
        let expected: Vec<u64> = (1..=(THREADS * PER_THREAD) as u64)
            .map(|n| INITIAL_ORDER_COUNT + n)
            .collect();
        assert_eq!(counts, expected);
    }
}
