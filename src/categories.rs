//! Display labels and sort ranks for categorical codes.
//!
//! Lookups are total: a code missing from a registry resolves to its own
//! text as label and [`SENTINEL_RANK`], so new codes in the dataset sort
//! after every known one instead of failing.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Rank given to codes absent from a registry. Larger than any authored rank.
pub const SENTINEL_RANK: u32 = 999;

/// Resolved label and display rank for one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub label: String,
    pub rank: u32,
}

/// Fixed `(code, label, rank)` table.
#[derive(Debug)]
pub struct CategoryRegistry {
    entries: &'static [(&'static str, &'static str, u32)],
}

impl CategoryRegistry {
    pub const fn new(entries: &'static [(&'static str, &'static str, u32)]) -> Self {
        Self { entries }
    }

    pub fn resolve(&self, code: &str) -> CategoryInfo {
        self.entries
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, label, rank)| CategoryInfo {
                label: label.to_string(),
                rank: *rank,
            })
            .unwrap_or_else(|| CategoryInfo {
                label: code.to_string(),
                rank: SENTINEL_RANK,
            })
    }

    /// Highest authored rank.
    #[cfg(test)]
    pub(crate) fn max_rank(&self) -> u32 {
        self.entries.iter().map(|(_, _, r)| *r).max().unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn codes(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(c, _, _)| *c)
    }
}

/// Vehicles in canonical display order.
pub static VEHICLES: CategoryRegistry = CategoryRegistry::new(&[
    ("car-driver", "Car (driver)", 1),
    ("car-passenger", "Car (passenger)", 2),
    ("motorbike", "Motorbike", 3),
    ("bus", "Bus", 4),
    ("train-short", "Train (short distance)", 5),
    ("train-far", "Train (long distance)", 6),
    ("bicycle", "Bicycle", 7),
    ("ebike", "E-bike", 8),
    ("walk", "Walking", 9),
]);

/// Coarse demographic buckets.
pub static GROUP_BUCKETS: CategoryRegistry = CategoryRegistry::new(&[
    ("student", "Students", 1),
    ("employee", "Employees", 2),
    ("prof", "Professors", 3),
]);

/// Raw employment status codes, used ungrouped.
pub static STATUS_CODES: CategoryRegistry = CategoryRegistry::new(&[
    ("student", "Students", 1),
    ("wimi", "Research staff", 2),
    ("niwi", "Non-research staff", 3),
    ("prof", "Professors", 4),
]);

/// How employment status codes become demographic groups.
///
/// The two schemes are alternatives; a deployment uses exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupScheme {
    /// `student`, `wimi`/`niwi` as `employee`, `prof`; every other code is dropped.
    #[default]
    Buckets,
    /// The status code itself is the group.
    Raw,
}

impl GroupScheme {
    /// Group code for a status code, or `None` if the row is excluded.
    pub fn group_of<'a>(&self, status: &'a str) -> Option<&'a str> {
        match self {
            Self::Buckets => match status {
                "student" => Some("student"),
                "wimi" | "niwi" => Some("employee"),
                "prof" => Some("prof"),
                _ => None,
            },
            Self::Raw => Some(status),
        }
    }

    pub fn registry(&self) -> &'static CategoryRegistry {
        match self {
            Self::Buckets => &GROUP_BUCKETS,
            Self::Raw => &STATUS_CODES,
        }
    }
}

impl fmt::Display for GroupScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buckets => write!(f, "buckets"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for GroupScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buckets" | "a" => Ok(Self::Buckets),
            "raw" | "b" => Ok(Self::Raw),
            other => Err(anyhow::anyhow!(
                "unknown group scheme '{other}', expected 'buckets' or 'raw'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vehicle() {
        let info = VEHICLES.resolve("bus");
        assert_eq!(info.label, "Bus");
        assert_eq!(info.rank, 4);
    }

    #[test]
    fn test_canonical_vehicle_order() {
        let codes: Vec<_> = VEHICLES.codes().collect();
        let ranks: Vec<_> = codes.iter().map(|c| VEHICLES.resolve(c).rank).collect();
        assert_eq!(ranks, (1..=9).collect::<Vec<u32>>());
        assert_eq!(codes.first(), Some(&"car-driver"));
        assert_eq!(codes.last(), Some(&"walk"));
    }

    #[test]
    fn test_unknown_code_falls_back() {
        for registry in [&VEHICLES, &GROUP_BUCKETS, &STATUS_CODES] {
            let info = registry.resolve("hoverboard");
            assert_eq!(info.label, "hoverboard");
            assert!(info.rank > registry.max_rank());
            assert_eq!(info.rank, SENTINEL_RANK);
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(VEHICLES.resolve("Bus").rank, SENTINEL_RANK);
        assert_eq!(VEHICLES.resolve("").label, "");
    }

    #[test]
    fn test_bucket_scheme() {
        let s = GroupScheme::Buckets;
        assert_eq!(s.group_of("student"), Some("student"));
        assert_eq!(s.group_of("wimi"), Some("employee"));
        assert_eq!(s.group_of("niwi"), Some("employee"));
        assert_eq!(s.group_of("prof"), Some("prof"));
        assert_eq!(s.group_of("other"), None);
        assert_eq!(s.group_of(""), None);
    }

    #[test]
    fn test_raw_scheme_keeps_code() {
        let s = GroupScheme::Raw;
        assert_eq!(s.group_of("wimi"), Some("wimi"));
        assert_eq!(s.group_of("other"), Some("other"));
        assert_eq!(s.registry().resolve("niwi").rank, 3);
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("buckets".parse::<GroupScheme>().unwrap(), GroupScheme::Buckets);
        assert_eq!(" RAW ".parse::<GroupScheme>().unwrap(), GroupScheme::Raw);
        assert!("both".parse::<GroupScheme>().is_err());
    }
}
