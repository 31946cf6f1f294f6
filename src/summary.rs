use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::aggregators::utility::pct;
use crate::row::VehicleRow;

/// Descriptive counts over the loaded rows.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub participants: usize,
    pub periods: Vec<String>,

    pub main_vehicle_rows: usize,
    pub with_distance_km: usize,
    pub with_distance_km_week: usize,
    pub with_car_technology: usize,

    // rows whose participant_id did not parse
    pub invalid_participant_ids: usize,
}

impl DatasetSummary {
    pub fn from_rows(rows: &[VehicleRow]) -> Self {
        let mut s = DatasetSummary {
            rows: rows.len(),
            ..Default::default()
        };

        let mut participants = HashSet::new();
        let mut periods = BTreeSet::new();

        for r in rows {
            participants.insert(r.participant_key());

            periods.insert(r.semester_time.as_str());

            if r.is_main_vehicle {
                s.main_vehicle_rows += 1;
            }

            if r.distance_km.is_some() {
                s.with_distance_km += 1;
            }

            if r.distance_km_week.is_some() {
                s.with_distance_km_week += 1;
            }

            if r.car_technology.is_some() {
                s.with_car_technology += 1;
            }

            if r.participant_id.is_nan() {
                s.invalid_participant_ids += 1;
            }
        }

        s.participants = participants.len();
        s.periods = periods.into_iter().map(String::from).collect();
        s
    }

    pub fn main_vehicle_pct(&self) -> f64 {
        pct(self.main_vehicle_rows, self.rows)
    }

    pub fn distance_pct(&self) -> f64 {
        pct(self.with_distance_km, self.rows)
    }
}
