/// Primary keys are opaque text identifiers (UUID strings for new rows).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh, globally unique entity identifier.
pub fn new_entity_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}
