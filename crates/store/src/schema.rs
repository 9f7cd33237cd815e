//! PostgreSQL DDL for the contact request table.

/// Document table. `seq` fixes insertion order for listing and paging.
pub const CONTACT_US_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS contact_us (
    id          UUID PRIMARY KEY,
    seq         BIGSERIAL NOT NULL UNIQUE,
    doc         JSONB NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// All DDL statements in execution order.
pub fn all_tables() -> Vec<&'static str> {
    vec![CONTACT_US_TABLE]
}
