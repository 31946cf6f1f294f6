use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::aggregators::types::GroupUsageRow;
use crate::categories::{GroupScheme, VEHICLES};
use crate::row::VehicleRow;

/// Counts distinct participants per (time period, group, vehicle).
///
/// Every row counts regardless of `is_main_vehicle`. The group comes from
/// `scheme`; rows the scheme excludes are skipped entirely. `people` is the
/// number of different participant ids seen for a key, so repeated rows of
/// one participant count once.
pub fn usage_by_group(rows: &[VehicleRow], scheme: GroupScheme) -> Vec<GroupUsageRow> {
    let mut participants: BTreeMap<(&str, &str, &str), HashSet<u64>> = BTreeMap::new();
    let mut excluded = 0usize;

    for row in rows {
        let Some(group) = scheme.group_of(&row.employment_status) else {
            excluded += 1;
            continue;
        };

        participants
            .entry((row.semester_time.as_str(), group, row.vehicle.as_str()))
            .or_default()
            .insert(row.participant_key());
    }

    let groups = scheme.registry();
    let usage: Vec<GroupUsageRow> = participants
        .into_iter()
        .filter(|(_, ids)| !ids.is_empty())
        .map(|((period, group, vehicle), ids)| {
            let vehicle_info = VEHICLES.resolve(vehicle);
            let group_info = groups.resolve(group);
            GroupUsageRow {
                semester_time: period.to_string(),
                vehicle: vehicle.to_string(),
                vehicle_label: vehicle_info.label,
                vehicle_rank: vehicle_info.rank,
                group: group.to_string(),
                group_label: group_info.label,
                group_rank: group_info.rank,
                people: ids.len(),
            }
        })
        .collect();

    debug!(%scheme, entries = usage.len(), excluded, "Group usage computed");
    usage
}
