/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Id for a record created locally before the backend assigns one.
///
/// Millisecond timestamp, bumped past `max_existing` so that two records
/// created within the same millisecond never collide.
pub fn local_id(max_existing: Option<i64>) -> i64 {
    let now = now_millis();
    match max_existing {
        Some(max) if max >= now => max + 1,
        _ => now,
    }
}
