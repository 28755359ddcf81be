//! SQLite schema definition.

/// Complete database schema for patient intake.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Key-Value Slots
-- ============================================================================

-- Each slot holds one serialized value (the record store uses a single slot
-- containing a JSON array of patient records).
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
