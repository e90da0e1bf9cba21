//! Appointment time slots.
//!
//! Bookings are offered in fixed hourly slots between 8 AM and 7 PM. For
//! same-day bookings, slots less than 30 minutes away are hidden.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// The hourly slot lineup, in display form.
pub const TIME_SLOTS: [&str; 12] = [
    "08:00 AM", "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "01:00 PM", "02:00 PM",
    "03:00 PM", "04:00 PM", "05:00 PM", "06:00 PM", "07:00 PM",
];

/// Parse a display slot like `"08:00 AM"` into its time of day.
#[must_use]
pub fn parse_slot(slot: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(slot, "%I:%M %p").ok()
}

/// The slots still bookable on `date` as of `now`.
///
/// Any future date offers the full lineup. On the current day, only slots
/// strictly more than 30 minutes ahead remain.
#[must_use]
pub fn available_slots(date: NaiveDate, now: NaiveDateTime) -> Vec<&'static str> {
    if date != now.date() {
        return TIME_SLOTS.to_vec();
    }

    // 30-minute minimum lead time for same-day bookings.
    let cutoff = now + TimeDelta::minutes(30);
    TIME_SLOTS
        .iter()
        .copied()
        .filter(|slot| parse_slot(slot).is_some_and(|time| date.and_time(time) > cutoff))
        .collect()
}

/// Combine a date and a display slot into the backend's
/// `yyyy-MM-ddTHH:mm:ss` timestamp string.
#[must_use]
pub fn to_iso_date_time(date: NaiveDate, slot: &str) -> Option<String> {
    let time = parse_slot(slot)?;
    Some(date.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_slot_am_pm() {
        assert_eq!(
            parse_slot("08:00 AM"),
            NaiveTime::from_hms_opt(8, 0, 0)
        );
        assert_eq!(
            parse_slot("12:00 PM"),
            NaiveTime::from_hms_opt(12, 0, 0)
        );
        assert_eq!(
            parse_slot("07:00 PM"),
            NaiveTime::from_hms_opt(19, 0, 0)
        );
        assert_eq!(parse_slot("late"), None);
    }

    #[test]
    fn test_future_date_offers_all_slots() {
        let now = date("2025-03-10").and_hms_opt(18, 0, 0).unwrap();
        let slots = available_slots(date("2025-03-11"), now);
        assert_eq!(slots.len(), 12);
    }

    #[test]
    fn test_same_day_hides_near_slots() {
        // 10:31 + 30 min lead puts 11:00 AM inside the window.
        let now = date("2025-03-10").and_hms_opt(10, 31, 0).unwrap();
        let slots = available_slots(date("2025-03-10"), now);
        assert_eq!(slots.first().copied(), Some("12:00 PM"));

        // At exactly 10:30, the 11:00 slot is 30 minutes away - not strictly
        // beyond the lead time, so it is hidden.
        let now = date("2025-03-10").and_hms_opt(10, 30, 0).unwrap();
        let slots = available_slots(date("2025-03-10"), now);
        assert_eq!(slots.first().copied(), Some("12:00 PM"));

        // A minute earlier, 11:00 AM is open.
        let now = date("2025-03-10").and_hms_opt(10, 29, 0).unwrap();
        let slots = available_slots(date("2025-03-10"), now);
        assert_eq!(slots.first().copied(), Some("11:00 AM"));
    }

    #[test]
    fn test_late_evening_leaves_nothing() {
        let now = date("2025-03-10").and_hms_opt(19, 0, 0).unwrap();
        assert!(available_slots(date("2025-03-10"), now).is_empty());
    }

    #[test]
    fn test_iso_date_time() {
        assert_eq!(
            to_iso_date_time(date("2025-03-10"), "02:00 PM").as_deref(),
            Some("2025-03-10T14:00:00")
        );
        assert_eq!(to_iso_date_time(date("2025-03-10"), "bogus"), None);
    }
}
