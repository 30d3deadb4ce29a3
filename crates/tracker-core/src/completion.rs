//! Completion aggregation over a user's entries.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::dimension::Dimension;

/// Something that can be counted against a dimension at a point in time.
///
/// The dimension is exposed as a raw key so that stored rows with keys
/// outside the known set can still flow through [`aggregate`].
pub trait Tallied {
    /// Raw dimension key as stored.
    fn dimension_key(&self) -> &str;

    /// Creation time in epoch milliseconds.
    fn created_at(&self) -> i64;
}

impl<T: Tallied + ?Sized> Tallied for &T {
    fn dimension_key(&self) -> &str {
        (**self).dimension_key()
    }

    fn created_at(&self) -> i64 {
        (**self).created_at()
    }
}

/// Count entries per dimension created at or after `window_start`.
///
/// Every dimension starts at zero. Entries whose key is not a known
/// dimension are skipped.
pub fn aggregate<I>(entries: I, window_start: i64) -> CompletionCounts
where
    I: IntoIterator,
    I::Item: Tallied,
{
    let mut counts = CompletionCounts::default();

    for entry in entries {
        if entry.created_at() < window_start {
            continue;
        }

        match Dimension::from_key(entry.dimension_key()) {
            Some(dimension) => counts.increment(dimension),
            None => {
                debug!(
                    dimension = entry.dimension_key(),
                    created_at = entry.created_at(),
                    "Skipping entry with unknown dimension"
                );
            }
        }
    }

    counts
}

/// Per-dimension entry counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionCounts {
    counts: [u32; Dimension::COUNT],
}

impl CompletionCounts {
    /// Build counts from explicit pairs. Later pairs overwrite earlier ones.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Dimension, u32)>,
    {
        let mut counts = Self::default();
        for (dimension, count) in pairs {
            counts.counts[dimension.index()] = count;
        }
        counts
    }

    fn increment(&mut self, dimension: Dimension) {
        let slot = &mut self.counts[dimension.index()];
        *slot = slot.saturating_add(1);
    }

    /// Count for a single dimension.
    pub fn get(&self, dimension: Dimension) -> u32 {
        self.counts[dimension.index()]
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Iterate `(dimension, count)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u32)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    /// Number of dimensions with at least one entry.
    pub fn completed_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Boolean "has at least one entry" projection.
    pub fn to_flags(&self) -> CompletionFlags {
        let mut flags = [false; Dimension::COUNT];
        for (flag, &count) in flags.iter_mut().zip(self.counts.iter()) {
            *flag = count > 0;
        }
        CompletionFlags { flags }
    }

    /// Dimension with the highest count.
    ///
    /// Ties go to the dimension declared first. Returns `None` when
    /// every count is zero.
    pub fn most_active(&self) -> Option<Dimension> {
        let mut best: Option<(Dimension, u32)> = None;
        for (dimension, count) in self.iter() {
            if count == 0 {
                continue;
            }
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((dimension, count)),
            }
        }
        best.map(|(d, _)| d)
    }

    /// Dimension with the lowest count, ties going to the dimension declared first.
    pub fn least_active(&self) -> Dimension {
        let mut least = (Dimension::ALL[0], self.get(Dimension::ALL[0]));
        for (dimension, count) in self.iter().skip(1) {
            if count < least.1 {
                least = (dimension, count);
            }
        }
        least.0
    }
}

impl Serialize for CompletionCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Dimension::COUNT))?;
        for (dimension, count) in self.iter() {
            map.serialize_entry(dimension.key(), &count)?;
        }
        map.end()
    }
}

/// Per-dimension "completed this window" flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionFlags {
    flags: [bool; Dimension::COUNT],
}

impl CompletionFlags {
    /// Whether a dimension has at least one entry.
    pub fn is_complete(&self, dimension: Dimension) -> bool {
        self.flags[dimension.index()]
    }

    /// Iterate `(dimension, flag)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, bool)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.is_complete(d)))
    }

    /// Number of completed dimensions.
    pub fn completed_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }
}

impl Serialize for CompletionFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Dimension::COUNT))?;
        for (dimension, flag) in self.iter() {
            map.serialize_entry(dimension.key(), &flag)?;
        }
        map.end()
    }
}

/// Number of dimensions with at least one entry, out of 8.
pub fn completion_score(counts: &CompletionCounts) -> u8 {
    counts.completed_count() as u8
}

/// [`completion_score`] as a rounded percentage.
pub fn completion_percent(counts: &CompletionCounts) -> u8 {
    let completed = counts.completed_count() as f64;
    (completed * 100.0 / Dimension::COUNT as f64).round() as u8
}

/// Balance score in `0.0..=100.0`.
///
/// Computed as `100 / (1 + cv)` where `cv` is the coefficient of variation
/// (population standard deviation over mean) of the eight counts. A perfectly
/// even spread scores 100. No entries at all scores 0.
pub fn balance_score(counts: &CompletionCounts) -> f64 {
    let total = counts.total();
    if total == 0 {
        return 0.0;
    }

    let n = Dimension::COUNT as f64;
    let mean = total as f64 / n;
    let variance = counts
        .iter()
        .map(|(_, c)| {
            let diff = f64::from(c) - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    let cv = variance.sqrt() / mean;

    100.0 / (1.0 + cv)
}
