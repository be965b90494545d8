use chrono::SubsecRound;

/// Todo identifiers are random (v4) UUIDs generated by the server.
pub type TodoId = uuid::Uuid;

/// Timestamps handed to callers are in the host's local zone.
pub type Timestamp = chrono::DateTime<chrono::Local>;

/// Number of fractional-second digits kept on generated timestamps.
///
/// Postgres stores microseconds, so anything finer would not survive a
/// round trip through the SQL store.
pub const TIMESTAMP_PRECISION: u16 = 6;

/// Current wall-clock time at storage precision.
pub fn now() -> Timestamp {
    chrono::Local::now().trunc_subsecs(TIMESTAMP_PRECISION)
}
