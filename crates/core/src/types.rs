/// Record identifiers are opaque strings assigned by the hosted store.
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
