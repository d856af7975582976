//! SQL schema for the vitae SQLite store.
//!
//! Executed once at connection startup. There is no migration path; the
//! table is created if absent and never altered afterwards.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
///
/// Timestamps are RFC 3339 UTC text with microsecond precision so that
/// string order is chronological order. SQLite's clock only has millisecond
/// resolution, so the SQL-side values pad `%f` with three zeros to keep the
/// same fixed width as the store's own writes.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS resumes (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL CHECK (name <> ''),
    email          TEXT NOT NULL CHECK (email <> ''),
    phone          TEXT,
    city           TEXT,
    country        TEXT,
    resume_content TEXT,
    template       TEXT,
    created_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%f', 'now') || '000Z'),
    updated_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%f', 'now') || '000Z')
);

-- Any modification that leaves updated_at untouched gets it refreshed here.
-- SqliteStore::update always sets it explicitly, so this never fires for it.
-- max() keeps a value the store already pushed ahead of the clock.
CREATE TRIGGER IF NOT EXISTS resumes_touch_updated_at
AFTER UPDATE ON resumes
FOR EACH ROW WHEN NEW.updated_at IS OLD.updated_at
BEGIN
    UPDATE resumes
       SET updated_at = max(strftime('%Y-%m-%dT%H:%M:%f', 'now') || '000Z', OLD.updated_at)
     WHERE id = NEW.id;
END;

CREATE INDEX IF NOT EXISTS resumes_created_idx ON resumes(created_at);
";
