use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};

use crate::services::keys::dates_key;
use crate::store::{KvStore, StoreError};

/// Clicks older than this many days fall off the histogram.
pub const HISTOGRAM_DAYS: usize = 30;

/// Records redirect clicks per alias and aggregates them into a fixed
/// 30-day histogram on demand. Nothing derived is ever stored; the day
/// list is re-walked on every aggregation.
#[derive(Clone)]
pub struct ClickTracker {
    store: Arc<dyn KvStore>,
}

impl ClickTracker {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Appends today's date to the front of the alias's click list.
    /// Called from the redirect path only.
    pub async fn record(&self, alias: &str) -> Result<(), StoreError> {
        let stamp = day_stamp(Local::now().date_naive());
        self.store
            .list_push_front(&dates_key(alias), &stamp)
            .await
    }

    /// Aggregates the alias's click list into 30 day-buckets, bucket `i`
    /// holding the clicks from exactly `i` days ago.
    pub async fn histogram(&self, alias: &str) -> Result<[u32; HISTOGRAM_DAYS], StoreError> {
        let dates = self.store.list_range(&dates_key(alias), 0, -1).await?;
        Ok(bucket_clicks(&dates, Local::now().date_naive()))
    }
}

/// Day stamp in "YEAR-MONTH-DAY" form, numeric fields with no leading
/// zeros and a 1-indexed month.
pub fn day_stamp(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

/// Walks `entries` (assumed newest first) and buckets each one by its
/// age in days relative to `today`.
///
/// The age uses the historical 30-day-month / 365-day-year approximation
/// `(Δyear)*365 + (Δmonth)*30 + Δday`; stored histograms were produced
/// with it, so calendar-accurate arithmetic would shift buckets. The
/// walk stops at the first entry aged >= 30, which is only correct under
/// the newest-first ordering the recorder maintains. Entries that do not
/// parse as three integers are skipped, and future-dated entries are
/// ignored rather than counted.
pub fn bucket_clicks(entries: &[String], today: NaiveDate) -> [u32; HISTOGRAM_DAYS] {
    let mut buckets = [0u32; HISTOGRAM_DAYS];
    let (now_year, now_month, now_day) = (today.year(), today.month() as i32, today.day() as i32);

    for entry in entries {
        let nums: Vec<&str> = entry.split('-').collect();
        if nums.len() != 3 {
            continue;
        }
        let parsed: Vec<i32> = nums.iter().filter_map(|n| n.parse().ok()).collect();
        let &[year, month, day] = parsed.as_slice() else {
            continue;
        };

        let days_since = (now_year - year) * 365 + (now_month - month) * 30 + (now_day - day);
        if days_since >= HISTOGRAM_DAYS as i32 {
            break;
        }
        if days_since < 0 {
            continue;
        }
        buckets[days_since as usize] += 1;
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_stamp_has_no_padding() {
        assert_eq!(day_stamp(date(2024, 6, 5)), "2024-6-5");
        assert_eq!(day_stamp(date(2024, 11, 23)), "2024-11-23");
    }

    #[test]
    fn buckets_by_approximate_age() {
        let today = date(2024, 6, 15);
        // Ages under the approximation: 0, 5, 29, 30, 40.
        let entries: Vec<String> = vec![
            "2024-6-15".into(),
            "2024-6-10".into(),
            "2024-5-16".into(),
            "2024-5-15".into(),
            "2024-5-5".into(),
        ];

        let buckets = bucket_clicks(&entries, today);
        assert_eq!(buckets[0], 1);
        assert_eq!(buckets[5], 1);
        assert_eq!(buckets[29], 1);
        assert_eq!(buckets.iter().sum::<u32>(), 3);
    }

    #[test]
    fn stops_at_first_old_entry() {
        let today = date(2024, 6, 15);
        // An out-of-order old entry masks everything after it; the walk
        // trusts the newest-first ordering.
        let entries: Vec<String> = vec!["2024-5-5".into(), "2024-6-15".into()];

        let buckets = bucket_clicks(&entries, today);
        assert_eq!(buckets.iter().sum::<u32>(), 0);
    }

    #[test]
    fn skips_unparseable_entries() {
        let today = date(2024, 6, 15);
        let entries: Vec<String> = vec![
            "not-a-date".into(),
            "2024-6".into(),
            "".into(),
            "2024-6-15".into(),
        ];

        let buckets = bucket_clicks(&entries, today);
        assert_eq!(buckets[0], 1);
        assert_eq!(buckets.iter().sum::<u32>(), 1);
    }

    #[test]
    fn ignores_future_entries() {
        let today = date(2024, 6, 15);
        let entries: Vec<String> = vec!["2024-6-20".into(), "2024-6-15".into()];

        let buckets = bucket_clicks(&entries, today);
        assert_eq!(buckets[0], 1);
        assert_eq!(buckets.iter().sum::<u32>(), 1);
    }

    #[test]
    fn month_boundary_uses_thirty_day_months() {
        // 2024-2-28 seen from 2024-3-1: (3-2)*30 + (1-28) = 3 under the
        // approximation, even though only 2 calendar days passed.
        let buckets = bucket_clicks(&["2024-2-28".to_string()], date(2024, 3, 1));
        assert_eq!(buckets[3], 1);
    }

    #[tokio::test]
    async fn record_then_histogram_counts_today() {
        let store = Arc::new(MemoryStore::new());
        let tracker = ClickTracker::new(store);

        tracker.record("abc123").await.unwrap();
        tracker.record("abc123").await.unwrap();

        let buckets = tracker.histogram("abc123").await.unwrap();
        assert_eq!(buckets[0], 2);
        assert_eq!(buckets.iter().sum::<u32>(), 2);
    }

    #[tokio::test]
    async fn histogram_of_unknown_alias_is_empty() {
        let tracker = ClickTracker::new(Arc::new(MemoryStore::new()));
        let buckets = tracker.histogram("zzzzzz").await.unwrap();
        assert_eq!(buckets.iter().sum::<u32>(), 0);
    }
}
