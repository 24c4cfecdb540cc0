//! Column assignment for overlapping appointments.
//!
//! The engine works in three passes over a slice of [`Scheduled`] items that
//! share one resource and one day:
//!
//! 1. Sort by start time, then by end time. The sort is stable, so items with
//!    identical ranges keep their input order.
//! 2. Greedy left-packing: each item takes the lowest column whose already
//!    placed occupants it does not overlap. Touching ranges do not overlap.
//! 3. Width resolution: every item learns how many columns its overlap
//!    cluster needs, according to a [`ClusterWidth`] policy.
//!
//! Both passes are quadratic in the number of items, which stays small for a
//! single resource's day.

use std::{collections::HashMap, fmt, str::FromStr};

use log::{debug, trace};
use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};

use calgrid_core::{appointment::Scheduled, geometry::Column, time::TimeRange};

/// How the column count of an overlap cluster is resolved.
///
/// The two policies only disagree on chain-shaped clusters, where A overlaps
/// B and B overlaps C but A does not overlap C.
///
/// # Variants
///
/// - `Transitive` - Every member of a connected overlap cluster gets the same
///   count: one more than the highest column index in the cluster (default)
/// - `Neighbors` - Each item widens itself and its direct overlaps to one more
///   than the highest column index among them. Items far along a chain can
///   end up narrower than their cluster mates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterWidth {
    #[default]
    Transitive,
    Neighbors,
}

impl FromStr for ClusterWidth {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transitive" => Ok(Self::Transitive),
            "neighbors" => Ok(Self::Neighbors),
            _ => Err("Unsupported cluster width policy"),
        }
    }
}

impl From<ClusterWidth> for &'static str {
    fn from(val: ClusterWidth) -> Self {
        match val {
            ClusterWidth::Transitive => "transitive",
            ClusterWidth::Neighbors => "neighbors",
        }
    }
}

impl fmt::Display for ClusterWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// An item together with its assigned [`Column`].
#[derive(Debug)]
pub struct Placement<'a, T> {
    item: &'a T,
    column: Column,
}

impl<T> Clone for Placement<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Placement<'_, T> {}

impl<'a, T> Placement<'a, T> {
    pub fn new(item: &'a T, column: Column) -> Self {
        Self { item, column }
    }

    /// The placed item.
    pub fn item(&self) -> &'a T {
        self.item
    }

    pub fn column(&self) -> Column {
        self.column
    }

    /// Zero-based column within the overlap cluster.
    pub fn column_index(&self) -> usize {
        self.column.index()
    }

    /// Number of columns the overlap cluster needs.
    pub fn column_count(&self) -> usize {
        self.column.count()
    }
}

/// Lays out items that share one resource and one day.
///
/// The result is in sorted order (start, then end). The function does not
/// filter; callers hand it a slice already scoped to one track.
///
/// # Examples
///
/// ```
/// # use calgrid::layout::{ClusterWidth, compute_layout};
/// # use calgrid_core::time::TimeRange;
/// # use chrono::NaiveDate;
/// let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
/// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
/// let ranges = [
///     TimeRange::new(at(9, 0), at(10, 0)).unwrap(),
///     TimeRange::new(at(9, 30), at(10, 30)).unwrap(),
/// ];
///
/// let placements = compute_layout(&ranges, ClusterWidth::default());
/// assert_eq!(placements[0].column_index(), 0);
/// assert_eq!(placements[1].column_index(), 1);
/// assert!(placements.iter().all(|p| p.column_count() == 2));
/// ```
pub fn compute_layout<'a, T, I>(items: I, policy: ClusterWidth) -> Vec<Placement<'a, T>>
where
    T: Scheduled + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut sorted: Vec<(&'a T, TimeRange)> = items
        .into_iter()
        .map(|item| (item, item.time_range()))
        .collect();
    if sorted.is_empty() {
        return Vec::new();
    }

    sorted.sort_by(|(_, a), (_, b)| a.start().cmp(&b.start()).then(a.end().cmp(&b.end())));
    let ranges: Vec<TimeRange> = sorted.iter().map(|(_, range)| *range).collect();

    let indices = assign_columns(&ranges);
    let counts = match policy {
        ClusterWidth::Transitive => transitive_counts(&ranges, &indices),
        ClusterWidth::Neighbors => neighbor_counts(&ranges, &indices),
    };

    debug!(
        items = ranges.len(),
        columns = counts.iter().copied().max().unwrap_or(0),
        policy:% = policy;
        "Computed track layout"
    );

    sorted
        .into_iter()
        .zip(indices.into_iter().zip(counts))
        .map(|((item, _), (index, count))| Placement::new(item, Column::new(index, count)))
        .collect()
}

/// Greedy left-packing over ranges sorted by start.
fn assign_columns(ranges: &[TimeRange]) -> Vec<usize> {
    let mut columns: Vec<usize> = Vec::with_capacity(ranges.len());

    for range in ranges {
        let mut column = 0;
        // `columns` only covers items placed so far, so the zip stops there.
        while columns
            .iter()
            .zip(ranges)
            .any(|(&occupied, placed)| occupied == column && placed.overlaps(range))
        {
            column += 1;
        }
        trace!(range:% = range, column; "Placed item");
        columns.push(column);
    }

    columns
}

/// Column count per connected overlap cluster.
fn transitive_counts(ranges: &[TimeRange], indices: &[usize]) -> Vec<usize> {
    let mut clusters = UnionFind::<usize>::new(ranges.len());

    for (i, range) in ranges.iter().enumerate() {
        // Sorted by start: once a later item starts at or after this end,
        // no further item can overlap it.
        for (j, other) in ranges.iter().enumerate().skip(i + 1) {
            if other.start() >= range.end() {
                break;
            }
            if range.overlaps(other) {
                clusters.union(i, j);
            }
        }
    }

    let mut widest: HashMap<usize, usize> = HashMap::new();
    for (i, &index) in indices.iter().enumerate() {
        let entry = widest.entry(clusters.find(i)).or_insert(0);
        *entry = (*entry).max(index);
    }

    (0..ranges.len())
        .map(|i| widest.get(&clusters.find(i)).copied().unwrap_or(0) + 1)
        .collect()
}

/// Column count from direct neighbors only.
fn neighbor_counts(ranges: &[TimeRange], indices: &[usize]) -> Vec<usize> {
    let mut counts = vec![1; ranges.len()];

    for (i, range) in ranges.iter().enumerate() {
        let group: Vec<usize> = ranges
            .iter()
            .enumerate()
            .filter(|&(j, other)| j == i || range.overlaps(other))
            .map(|(j, _)| j)
            .collect();

        let widest = group.iter().map(|&j| indices[j]).max().unwrap_or(0);
        for j in group {
            counts[j] = counts[j].max(widest + 1);
        }
    }

    counts
}


#[cfg(test)]
mod proptest_tests {
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Ranges on one day, on a 5-minute grid so that touching and identical
    /// boundaries come up often.
    fn range_strategy() -> impl Strategy<Value = TimeRange> {
        (0i64..200, 1i64..36).prop_map(|(start, len)| {
            let midnight = NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            let start = midnight + Duration::minutes(start * 5);
            TimeRange::new(start, start + Duration::minutes(len * 5)).unwrap()
        })
    }

    fn ranges_strategy() -> impl Strategy<Value = Vec<TimeRange>> {
        prop::collection::vec(range_strategy(), 0..40)
    }

    fn policy_strategy() -> impl Strategy<Value = ClusterWidth> {
        prop_oneof![Just(ClusterWidth::Transitive), Just(ClusterWidth::Neighbors)]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Overlapping items never share a column, under either policy.
    fn check_no_collision(ranges: &[TimeRange], policy: ClusterWidth) -> Result<(), TestCaseError> {
        let placements = compute_layout(ranges, policy);
        prop_assert_eq!(placements.len(), ranges.len());

        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                if a.item().overlaps(b.item()) {
                    prop_assert_ne!(a.column_index(), b.column_index());
                }
            }
        }
        Ok(())
    }

    /// Column index is always inside the reported count.
    fn check_index_within_count(ranges: &[TimeRange], policy: ClusterWidth) -> Result<(), TestCaseError> {
        for placement in compute_layout(ranges, policy) {
            prop_assert!(placement.column_index() < placement.column_count());
        }
        Ok(())
    }

    /// Disjoint items all land in a single full-width column.
    fn check_disjoint_is_single_column(ranges: &[TimeRange]) -> Result<(), TestCaseError> {
        let mut sorted = ranges.to_vec();
        sorted.sort_by_key(|r| r.start());
        let disjoint: Vec<TimeRange> = sorted
            .into_iter()
            .fold(Vec::new(), |mut acc: Vec<TimeRange>, range| {
                if acc.last().is_none_or(|last| last.end() <= range.start()) {
                    acc.push(range);
                }
                acc
            });

        for placement in compute_layout(&disjoint, ClusterWidth::Transitive) {
            prop_assert_eq!(placement.column_index(), 0);
            prop_assert_eq!(placement.column_count(), 1);
        }
        Ok(())
    }

    /// N copies of one range fill columns 0..N with count N.
    fn check_full_clique(range: TimeRange, n: usize) -> Result<(), TestCaseError> {
        let ranges = vec![range; n];
        let placements = compute_layout(&ranges, ClusterWidth::Transitive);

        let mut indices: Vec<usize> = placements.iter().map(Placement::column_index).collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..n).collect::<Vec<_>>());
        prop_assert!(placements.iter().all(|p| p.column_count() == n));
        Ok(())
    }

    /// Same input, same output, regardless of input order.
    fn check_deterministic(ranges: &[TimeRange], policy: ClusterWidth) -> Result<(), TestCaseError> {
        let first: Vec<(TimeRange, Column)> = compute_layout(ranges, policy)
            .iter()
            .map(|p| (*p.item(), p.column()))
            .collect();
        let second: Vec<(TimeRange, Column)> = compute_layout(ranges, policy)
            .iter()
            .map(|p| (*p.item(), p.column()))
            .collect();
        prop_assert_eq!(&first, &second);

        let mut reversed = ranges.to_vec();
        reversed.reverse();
        let third: Vec<(TimeRange, Column)> = compute_layout(&reversed, policy)
            .iter()
            .map(|p| (*p.item(), p.column()))
            .collect();
        prop_assert_eq!(&first, &third);
        Ok(())
    }

    /// Members of a transitive cluster agree on the count, and the count is
    /// exactly one past the highest index in the cluster.
    fn check_transitive_count_is_cluster_max(ranges: &[TimeRange]) -> Result<(), TestCaseError> {
        let placements = compute_layout(ranges, ClusterWidth::Transitive);

        // Sorted output: a cluster ends where the running max end is reached.
        let mut start = 0;
        while start < placements.len() {
            let mut end = start + 1;
            let mut reach = placements[start].item().end();
            while end < placements.len() && placements[end].item().start() < reach {
                reach = reach.max(placements[end].item().end());
                end += 1;
            }

            let cluster = &placements[start..end];
            let widest = cluster.iter().map(Placement::column_index).max().unwrap_or(0);
            for placement in cluster {
                prop_assert_eq!(placement.column_count(), widest + 1);
            }
            start = end;
        }
        Ok(())
    }

    /// The neighbor policy never reports more columns than the transitive one.
    fn check_neighbors_at_most_transitive(ranges: &[TimeRange]) -> Result<(), TestCaseError> {
        let transitive = compute_layout(ranges, ClusterWidth::Transitive);
        let neighbors = compute_layout(ranges, ClusterWidth::Neighbors);

        for (t, n) in transitive.iter().zip(&neighbors) {
            prop_assert_eq!(t.column_index(), n.column_index());
            prop_assert!(n.column_count() <= t.column_count());
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn no_collision(ranges in ranges_strategy(), policy in policy_strategy()) {
            check_no_collision(&ranges, policy)?;
        }

        #[test]
        fn index_within_count(ranges in ranges_strategy(), policy in policy_strategy()) {
            check_index_within_count(&ranges, policy)?;
        }

        #[test]
        fn disjoint_is_single_column(ranges in ranges_strategy()) {
            check_disjoint_is_single_column(&ranges)?;
        }

        #[test]
        fn full_clique(range in range_strategy(), n in 1usize..20) {
            check_full_clique(range, n)?;
        }

        #[test]
        fn deterministic(ranges in ranges_strategy(), policy in policy_strategy()) {
            check_deterministic(&ranges, policy)?;
        }

        #[test]
        fn transitive_count_is_cluster_max(ranges in ranges_strategy()) {
            check_transitive_count_is_cluster_max(&ranges)?;
        }

        #[test]
        fn neighbors_at_most_transitive(ranges in ranges_strategy()) {
            check_neighbors_at_most_transitive(&ranges)?;
        }
    }
}
