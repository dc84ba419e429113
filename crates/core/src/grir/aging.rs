//! Aging of open exposures.

use chrono::NaiveDate;
use poflow_shared::config::{BucketThreshold, GrirConfig};

/// Ordered day thresholds with an overflow bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBuckets {
    thresholds: Vec<BucketThreshold>,
    overflow_label: String,
}

impl TimeBuckets {
    /// Builds buckets from configuration. Thresholds are expected ascending.
    #[must_use]
    pub fn from_config(config: &GrirConfig) -> Self {
        Self {
            thresholds: config.buckets.clone(),
            overflow_label: config.overflow_label.clone(),
        }
    }

    /// Label of the smallest threshold with `days <= max_days`, else overflow.
    #[must_use]
    pub fn label_for(&self, days: i64) -> &str {
        self.thresholds
            .iter()
            .find(|bucket| days <= bucket.max_days)
            .map_or(self.overflow_label.as_str(), |bucket| bucket.label.as_str())
    }

    /// All labels in ascending age order, overflow last.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.thresholds
            .iter()
            .map(|bucket| bucket.label.as_str())
            .chain(std::iter::once(self.overflow_label.as_str()))
    }

    /// Returns true if `label` is one of the configured labels.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels().any(|l| l == label)
    }

    /// Days from `first_exposure` to `snapshot`.
    ///
    /// 0 without an exposure date; clamped at 0 when the exposure is dated
    /// after the snapshot.
    #[must_use]
    pub fn days_open(snapshot: NaiveDate, first_exposure: Option<NaiveDate>) -> i64 {
        first_exposure.map_or(0, |date| (snapshot - date).num_days().max(0))
    }
}

impl Default for TimeBuckets {
    fn default() -> Self {
        Self::from_config(&GrirConfig::default())
    }
}
