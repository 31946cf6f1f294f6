//! Typed vehicle observation rows and the coercions that build them.

use serde::Serialize;

use crate::parser::RawRecord;

/// One participant-vehicle observation from the survey dataset.
///
/// A participant appears once per vehicle they report for a period;
/// `is_main_vehicle` marks the single primary mode among those rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRow {
    /// Not unique across rows. `NaN` when the source cell is not numeric.
    pub participant_id: f64,
    pub plz: String,
    pub employment_status: String,
    pub semester: String,
    pub vl: bool,
    /// Time period label, the primary grouping key.
    pub semester_time: String,
    pub days_present: f64,
    pub vehicle: String,
    pub distance_km: Option<f64>,
    pub distance_km_week: Option<f64>,
    pub has_changed: Option<String>,
    pub is_main_vehicle: bool,
    pub car_technology: Option<String>,
}

impl VehicleRow {
    /// Builds a typed row from a parsed record. Missing keys read as `""`.
    pub fn from_record(r: &RawRecord) -> Self {
        let field = |key: &str| r.get(key).map(String::as_str).unwrap_or("");

        VehicleRow {
            participant_id: coerce_number(field("participant_id")),
            plz: field("plz").to_string(),
            employment_status: field("employment_status").to_string(),
            semester: field("semester").to_string(),
            vl: to_bool(field("vl")),
            semester_time: field("semester_time").to_string(),
            days_present: coerce_number(field("days_present")),
            vehicle: field("vehicle").to_string(),
            distance_km: to_num_or_null(field("distance_km")),
            distance_km_week: to_num_or_null(field("distance_km_week")),
            has_changed: to_str_or_null(field("has_changed")),
            is_main_vehicle: to_bool(field("is_main_vehicle")),
            car_technology: to_str_or_null(field("car_technology")),
        }
    }

    /// Hashable identity of `participant_id`.
    ///
    /// Numeric equality, except that every `NaN` is one participant and
    /// `-0.0` is the same participant as `0.0`.
    pub fn participant_key(&self) -> u64 {
        let id = self.participant_id;
        if id.is_nan() {
            f64::NAN.to_bits()
        } else if id == 0.0 {
            0.0f64.to_bits()
        } else {
            id.to_bits()
        }
    }
}

#[cfg(test)]
impl VehicleRow {
    /// Row with only the aggregation keys set.
    pub(crate) fn sample(pid: f64, period: &str, status: &str, vehicle: &str, is_main: bool) -> Self {
        VehicleRow {
            participant_id: pid,
            plz: String::new(),
            employment_status: status.to_string(),
            semester: String::new(),
            vl: false,
            semester_time: period.to_string(),
            days_present: 0.0,
            vehicle: vehicle.to_string(),
            distance_km: None,
            distance_km_week: None,
            has_changed: None,
            is_main_vehicle: is_main,
            car_technology: None,
        }
    }
}

/// `true` iff the trimmed, lowercased content is exactly `"true"`.
pub fn to_bool(v: &str) -> bool {
    v.trim().eq_ignore_ascii_case("true")
}

/// Direct numeric coercion for non-nullable fields.
///
/// Blank content is `0` and anything that is not a number is `NaN`.
/// Decimal literals too large for `f64` become `±Infinity`, as does the
/// literal `Infinity`. Unsigned `0x`/`0o`/`0b` prefixes read as hex,
/// octal and binary integers.
pub fn coerce_number(v: &str) -> f64 {
    let s = v.trim();
    match s {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(n) = parse_radix_literal(s) {
        return n;
    }

    // Rust also accepts "inf", "infinity" and "nan" spellings
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// `Some` for `0x`, `0o` and `0b` prefixed content, `NaN` if the digits
/// are invalid. `None` when there is no such prefix.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let prefix = s.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Nullable numeric: `None` for blank, non-numeric or non-finite content.
pub fn to_num_or_null(v: &str) -> Option<f64> {
    let s = v.trim();
    if s.is_empty() {
        return None;
    }
    Some(coerce_number(s)).filter(|n| n.is_finite())
}

/// Nullable string: trimmed, `None` when nothing is left.
pub fn to_str_or_null(v: &str) -> Option<String> {
    let s = v.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_to_bool() {
        assert!(to_bool("true"));
        assert!(to_bool("  TRUE "));
        assert!(to_bool("True"));
        assert!(!to_bool(""));
        assert!(!to_bool("yes"));
        assert!(!to_bool("1"));
        assert!(!to_bool("true!"));
        assert!(!to_bool("false"));
    }

    #[test]
    fn test_distance_blank_or_garbage_is_none() {
        assert_eq!(to_num_or_null(""), None);
        assert_eq!(to_num_or_null("   "), None);
        assert_eq!(to_num_or_null("n/a"), None);
        assert_eq!(to_num_or_null("12km"), None);
        assert_eq!(to_num_or_null("NaN"), None);
        assert_eq!(to_num_or_null("Infinity"), None);
    }

    #[test]
    fn test_distance_valid_decimal() {
        assert_eq!(to_num_or_null("12.5"), Some(12.5));
        assert_eq!(to_num_or_null(" 0 "), Some(0.0));
        assert_eq!(to_num_or_null("-3"), Some(-3.0));
        assert_eq!(to_num_or_null("1e2"), Some(100.0));
    }

    #[test]
    fn test_coerce_number_is_permissive() {
        assert_eq!(coerce_number("42"), 42.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("  "), 0.0);
        assert!(coerce_number("abc").is_nan());
        assert!(coerce_number("inf").is_nan());
        assert!(coerce_number("nan").is_nan());
        assert_eq!(coerce_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_coerce_number_overflow_keeps_sign() {
        assert_eq!(coerce_number("1e400"), f64::INFINITY);
        assert_eq!(coerce_number("-1e400"), f64::NEG_INFINITY);
        assert_eq!(to_num_or_null("1e400"), None);
    }

    #[test]
    fn test_coerce_number_radix_literals() {
        assert_eq!(coerce_number("0x10"), 16.0);
        assert_eq!(coerce_number("0XfF"), 255.0);
        assert_eq!(coerce_number("0o17"), 15.0);
        assert_eq!(coerce_number("0b101"), 5.0);
        assert!(coerce_number("0x").is_nan());
        assert!(coerce_number("0xg1").is_nan());
        assert!(coerce_number("-0x10").is_nan());
        assert_eq!(to_num_or_null("0x10"), Some(16.0));
    }

    #[test]
    fn test_to_str_or_null() {
        assert_eq!(to_str_or_null(""), None);
        assert_eq!(to_str_or_null("  "), None);
        assert_eq!(to_str_or_null(" electric "), Some("electric".to_string()));
    }

    #[test]
    fn test_from_record_full() {
        let r = record(&[
            ("participant_id", "17"),
            ("plz", "76131"),
            ("employment_status", "student"),
            ("semester", "3"),
            ("vl", "TRUE"),
            ("semester_time", "WS24"),
            ("days_present", "4"),
            ("vehicle", "car-driver"),
            ("distance_km", "12.5"),
            ("distance_km_week", ""),
            ("has_changed", " yes "),
            ("is_main_vehicle", "true"),
            ("car_technology", ""),
        ]);
        let row = VehicleRow::from_record(&r);

        assert_eq!(row.participant_id, 17.0);
        assert_eq!(row.plz, "76131");
        assert!(row.vl);
        assert_eq!(row.semester_time, "WS24");
        assert_eq!(row.days_present, 4.0);
        assert_eq!(row.distance_km, Some(12.5));
        assert_eq!(row.distance_km_week, None);
        assert_eq!(row.has_changed.as_deref(), Some("yes"));
        assert!(row.is_main_vehicle);
        assert_eq!(row.car_technology, None);
    }

    #[test]
    fn test_from_record_missing_fields_default() {
        let row = VehicleRow::from_record(&record(&[("vehicle", "bus")]));

        assert_eq!(row.vehicle, "bus");
        assert_eq!(row.plz, "");
        assert_eq!(row.participant_id, 0.0);
        assert!(!row.is_main_vehicle);
        assert_eq!(row.distance_km, None);
    }

    #[test]
    fn test_from_record_invalid_id_is_nan() {
        let row = VehicleRow::from_record(&record(&[("participant_id", "p-17")]));
        assert!(row.participant_id.is_nan());
    }

    #[test]
    fn test_participant_key_normalizes() {
        let mut a = VehicleRow::from_record(&record(&[("participant_id", "0")]));
        let mut b = a.clone();
        b.participant_id = -0.0;
        assert_eq!(a.participant_key(), b.participant_key());

        a.participant_id = f64::NAN;
        b.participant_id = -f64::NAN;
        assert_eq!(a.participant_key(), b.participant_key());
    }
}
