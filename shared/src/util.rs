//! Clock and id helpers

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC time as an RFC 3339 string (used for submission stamps)
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Today's UTC date as `YYYY-MM-DD`
pub fn today_iso() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Allocate an epoch-millisecond id that is strictly greater than `current_max`.
///
/// Custom content ids are millisecond timestamps; built-in defaults use small
/// sequential integers, so the two ranges never meet. When the clock has not
/// advanced past the largest id already handed out (two adds inside the same
/// millisecond, or a clock step backwards) the id is bumped instead.
///
/// Returns `None` when `current_max` is already `i64::MAX`; only a corrupted
/// store can hold such an id.
pub fn next_timestamp_id(current_max: Option<i64>) -> Option<i64> {
    let now = now_millis();
    match current_max {
        Some(max) if max >= now => max.checked_add(1),
        _ => Some(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_timestamp_id_uses_clock() {
        let before = now_millis();
        let id = next_timestamp_id(Some(3)).unwrap();
        assert!(id >= before);
        assert!(next_timestamp_id(None).unwrap() >= before);
    }

    #[test]
    fn test_next_timestamp_id_bumps_past_max() {
        let far_future = now_millis() + 1_000_000;
        assert_eq!(next_timestamp_id(Some(far_future)), Some(far_future + 1));
    }

    #[test]
    fn test_next_timestamp_id_exhausted() {
        assert_eq!(next_timestamp_id(Some(i64::MAX)), None);
        assert_eq!(next_timestamp_id(Some(i64::MAX - 1)), Some(i64::MAX));
    }

    #[test]
    fn test_today_iso_shape() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
    }
}
