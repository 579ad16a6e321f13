//! Lookback window filter
//!
//! Items without a publication time are always admitted; fingerprint
//! deduplication is what keeps them from being re-emitted within a run.

use chrono::{DateTime, Duration, Utc};

use watch_core::NewsItem;

/// Whether `item` was published within the last `days` days, measured now
pub fn is_within_days(item: &NewsItem, days: u32) -> bool {
    is_within_days_at(item, days, Utc::now())
}

/// Same as [`is_within_days`] against an explicit clock
///
/// The boundary is inclusive: an item exactly `days` old is admitted.
pub fn is_within_days_at(item: &NewsItem, days: u32, now: DateTime<Utc>) -> bool {
    match item.published_at {
        Some(published_at) => now - published_at <= Duration::days(i64::from(days)),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_at(at: Option<DateTime<Utc>>) -> NewsItem {
        let item = NewsItem::new("HPG", "https://cafef.vn", "");
        match at {
            Some(at) => item.published(at),
            None => item,
        }
    }

    #[test]
    fn test_boundary_inclusive() {
        let now = Utc::now();
        let exactly = item_at(Some(now - Duration::days(30)));
        assert!(is_within_days_at(&exactly, 30, now));

        let one_second_over = item_at(Some(now - Duration::days(30) - Duration::seconds(1)));
        assert!(!is_within_days_at(&one_second_over, 30, now));

        let day_over = item_at(Some(now - Duration::days(31)));
        assert!(!is_within_days_at(&day_over, 30, now));
    }

    #[test]
    fn test_missing_timestamp_admitted() {
        let item = item_at(None);
        assert!(is_within_days(&item, 0));
        assert!(is_within_days(&item, 30));
    }

    #[test]
    fn test_future_items_admitted() {
        let now = Utc::now();
        assert!(is_within_days_at(&item_at(Some(now + Duration::hours(7))), 1, now));
    }

    #[test]
    fn test_fresh_item_with_live_clock() {
        assert!(is_within_days(&item_at(Some(Utc::now())), 30));
    }
}
