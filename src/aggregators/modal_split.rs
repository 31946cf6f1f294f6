use std::collections::BTreeMap;
use tracing::debug;

use crate::aggregators::types::{ModalSplit, ModalSplitRow};
use crate::categories::VEHICLES;
use crate::row::VehicleRow;

/// Counts primary vehicles per time period.
///
/// Rows whose `is_main_vehicle` flag is false are ignored. Only cells with
/// at least one row produce an entry; labels and ranks come from
/// [`VEHICLES`].
pub fn modal_split(rows: &[VehicleRow]) -> ModalSplit {
    let mut counts: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();

    for row in rows {
        if !row.is_main_vehicle {
            continue;
        }

        *counts
            .entry(row.semester_time.as_str())
            .or_default()
            .entry(row.vehicle.as_str())
            .or_default() += 1;
    }

    let mut periods = BTreeMap::new();
    for (period, vehicles) in counts {
        let entries: Vec<ModalSplitRow> = vehicles
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(vehicle, count)| {
                let info = VEHICLES.resolve(vehicle);
                ModalSplitRow {
                    semester_time: period.to_string(),
                    vehicle: vehicle.to_string(),
                    vehicle_label: info.label,
                    vehicle_rank: info.rank,
                    count,
                }
            })
            .collect();

        if !entries.is_empty() {
            periods.insert(period.to_string(), entries);
        }
    }

    debug!(periods = periods.len(), "Modal split computed");
    ModalSplit { periods }
}
