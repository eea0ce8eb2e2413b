//! Identifier generation for the in-memory store.
//!
//! Postgres assigns identity ids with `gen_random_uuid()`; the in-memory store
//! uses UUIDv7 so ids still sort by creation time.

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}
