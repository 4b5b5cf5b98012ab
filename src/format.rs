//! Display helpers for dates, amounts and status labels.
//!
//! Backends in this system send timestamps as ISO 8601 strings and money as
//! plain numbers; these helpers turn them into the strings shown in list
//! rows. Absent or unparseable values render as [`NOT_AVAILABLE`] instead of
//! failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Placeholder for values that are missing or cannot be parsed.
pub const NOT_AVAILABLE: &str = "N/A";

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Render a date as `dd/mm/yyyy`.
pub fn format_date(raw: Option<&str>) -> String {
    match raw.filter(|s| !s.is_empty()).and_then(parse_timestamp) {
        Some(parsed) => parsed.format("%d/%m/%Y").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Render a timestamp as `dd/mm/yyyy HH:MM`.
pub fn format_date_time(raw: Option<&str>) -> String {
    match raw.filter(|s| !s.is_empty()).and_then(parse_timestamp) {
        Some(parsed) => parsed.format("%d/%m/%Y %H:%M").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(".")
}

/// Render an amount as Indonesian Rupiah, `Rp 1.500.000` style.
pub fn format_rupiah(amount: Option<i64>) -> String {
    let amount = match amount {
        Some(amount) => amount,
        None => return NOT_AVAILABLE.to_string(),
    };
    let mut out = String::from("Rp ");
    if amount < 0 {
        out.push('-');
    }
    out.push_str(&group_thousands(amount.unsigned_abs()));
    out
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Visual weight of a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Green: available, approved, completed
    Positive,
    /// Blue: something is underway
    Active,
    /// Red: declined, damaged, out of service
    Negative,
    /// Grey: anything unrecognized
    Neutral,
}

/// Map a status label to its severity, case-insensitively.
///
/// Labels come from the backend in both English and Indonesian.
pub fn status_severity(status: &str) -> Severity {
    match status.to_lowercase().as_str() {
        "available" | "tersedia" | "good" | "approved" | "completed" | "returned" => {
            Severity::Positive
        }
        "booked" | "pending" => Severity::Active,
        "declined" | "unavailable" | "damaged" | "maintenance" => Severity::Negative,
        _ => Severity::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dates_from_common_backend_shapes() {
        assert_eq!(format_date(Some("2024-05-17T00:00:00")), "17/05/2024");
        assert_eq!(format_date(Some("2024-05-17T10:30:00Z")), "17/05/2024");
        assert_eq!(format_date(Some("2024-05-17")), "17/05/2024");
        assert_eq!(format_date(Some("2024-05-17T10:30:00.1234567")), "17/05/2024");
    }

    #[test]
    fn missing_or_invalid_dates_render_placeholder() {
        assert_eq!(format_date(None), NOT_AVAILABLE);
        assert_eq!(format_date(Some("")), NOT_AVAILABLE);
        assert_eq!(format_date(Some("yesterday")), NOT_AVAILABLE);
    }

    #[test]
    fn formats_date_time_with_minutes() {
        assert_eq!(
            format_date_time(Some("2024-05-17T14:30:00")),
            "17/05/2024 14:30"
        );
        assert_eq!(format_date_time(None), NOT_AVAILABLE);
    }

    #[test]
    fn formats_rupiah_with_dot_grouping() {
        assert_eq!(format_rupiah(Some(1_500_000)), "Rp 1.500.000");
        assert_eq!(format_rupiah(Some(0)), "Rp 0");
        assert_eq!(format_rupiah(Some(999)), "Rp 999");
        assert_eq!(format_rupiah(Some(1_000)), "Rp 1.000");
        assert_eq!(format_rupiah(Some(-1500)), "Rp -1.500");
        assert_eq!(format_rupiah(None), NOT_AVAILABLE);
    }

    #[test]
    fn capitalizes_only_the_first_character() {
        assert_eq!(capitalize_first("pending"), "Pending");
        assert_eq!(capitalize_first("Approved"), "Approved");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn severity_mapping_is_case_insensitive() {
        assert_eq!(status_severity("Available"), Severity::Positive);
        assert_eq!(status_severity("tersedia"), Severity::Positive);
        assert_eq!(status_severity("APPROVED"), Severity::Positive);
        assert_eq!(status_severity("Returned"), Severity::Positive);
        assert_eq!(status_severity("pending"), Severity::Active);
        assert_eq!(status_severity("Booked"), Severity::Active);
        assert_eq!(status_severity("Declined"), Severity::Negative);
        assert_eq!(status_severity("maintenance"), Severity::Negative);
        assert_eq!(status_severity("Damaged"), Severity::Negative);
        assert_eq!(status_severity("Being Repaired"), Severity::Neutral);
    }
}
