//! Data types produced by the aggregators.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregators::utility::pct;

/// Number of primary-vehicle rows for one (period, vehicle) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalSplitRow {
    pub semester_time: String,
    pub vehicle: String,
    pub vehicle_label: String,
    pub vehicle_rank: u32,
    pub count: usize,
}

impl ModalSplitRow {
    /// Share of this vehicle among `total` primary vehicles, in percent.
    pub fn share(&self, total: usize) -> f64 {
        pct(self.count, total)
    }
}

/// Modal split keyed by time period.
///
/// Sparse: a vehicle with no primary rows in a period has no entry, and a
/// period with no primary rows at all is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModalSplit {
    pub(crate) periods: BTreeMap<String, Vec<ModalSplitRow>>,
}

impl ModalSplit {
    pub fn get(&self, period: &str) -> Option<&[ModalSplitRow]> {
        self.periods.get(period).map(Vec::as_slice)
    }

    pub fn periods(&self) -> impl Iterator<Item = &str> {
        self.periods.keys().map(String::as_str)
    }

    pub fn has_period(&self, period: &str) -> bool {
        self.periods.contains_key(period)
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Rows of `period` in display order: vehicle rank, then code.
    pub fn period_sorted(&self, period: &str) -> Vec<&ModalSplitRow> {
        let mut rows: Vec<_> = self.get(period).unwrap_or_default().iter().collect();
        rows.sort_by(|a, b| {
            a.vehicle_rank
                .cmp(&b.vehicle_rank)
                .then_with(|| a.vehicle.cmp(&b.vehicle))
        });
        rows
    }

    /// Primary vehicles counted in `period`.
    pub fn total(&self, period: &str) -> usize {
        self.get(period)
            .map(|rows| rows.iter().map(|r| r.count).sum())
            .unwrap_or(0)
    }

    /// All rows, period by period.
    pub fn flatten(&self) -> Vec<&ModalSplitRow> {
        self.periods.values().flatten().collect()
    }
}

/// Usage rows of `period` (all periods for `None`) in display order:
/// period, group rank, vehicle rank.
pub fn select_usage<'a>(usage: &'a [GroupUsageRow], period: Option<&str>) -> Vec<&'a GroupUsageRow> {
    let mut selected: Vec<_> = usage
        .iter()
        .filter(|u| period.is_none_or(|want| want == u.semester_time))
        .collect();
    selected.sort_by(|a, b| {
        (&a.semester_time, a.group_rank, a.vehicle_rank)
            .cmp(&(&b.semester_time, b.group_rank, b.vehicle_rank))
    });
    selected
}

/// Distinct participants using one vehicle, per (period, group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupUsageRow {
    pub semester_time: String,
    pub vehicle: String,
    pub vehicle_label: String,
    pub vehicle_rank: u32,
    pub group: String,
    pub group_label: String,
    pub group_rank: u32,
    pub people: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage_row(period: &str, group_rank: u32, vehicle_rank: u32) -> GroupUsageRow {
        GroupUsageRow {
            semester_time: period.to_string(),
            vehicle: format!("v{vehicle_rank}"),
            vehicle_label: String::new(),
            vehicle_rank,
            group: format!("g{group_rank}"),
            group_label: String::new(),
            group_rank,
            people: 1,
        }
    }

    #[test]
    fn test_has_period() {
        let mut split = ModalSplit::default();
        split.periods.insert("WS24".to_string(), vec![]);

        assert!(split.has_period("WS24"));
        assert!(!split.has_period("WS99"));
    }

    #[test]
    fn test_select_usage_filters_and_orders() {
        let usage = vec![
            usage_row("WS24", 2, 1),
            usage_row("SS25", 1, 1),
            usage_row("WS24", 1, 4),
            usage_row("WS24", 1, 2),
        ];

        let ws: Vec<_> = select_usage(&usage, Some("WS24"))
            .into_iter()
            .map(|u| (u.group_rank, u.vehicle_rank))
            .collect();
        assert_eq!(ws, vec![(1, 2), (1, 4), (2, 1)]);

        assert_eq!(select_usage(&usage, None).len(), 4);
        assert_eq!(select_usage(&usage, None)[0].semester_time, "SS25");
    }

    #[test]
    fn test_select_usage_unknown_period_is_empty() {
        let usage = vec![usage_row("WS24", 1, 1)];
        assert!(select_usage(&usage, Some("WS99")).is_empty());
    }
}
