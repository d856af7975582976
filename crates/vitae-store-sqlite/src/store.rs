//! [`SqliteStore`] — the SQLite implementation of [`ResumeStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use vitae_core::{
  resume::{Resume, ResumeFields, ResumeId, ResumeSummary},
  store::ResumeStore,
};

use crate::{
  Result,
  encode::{
    RESUME_COLUMNS, RawResume, RawSummary, SUMMARY_COLUMNS, encode_dt, next_updated_at, now,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The resume table backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("resumes table ready");
    Ok(())
  }
}

// ─── ResumeStore impl ────────────────────────────────────────────────────────

impl ResumeStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, fields: ResumeFields) -> Result<Resume> {
    let at = now();
    let at_str = encode_dt(at);
    let row = fields.clone();

    let id: ResumeId = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO resumes (
             name, email, phone, city, country, resume_content, template,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          rusqlite::params![
            row.name,
            row.email,
            row.phone,
            row.city,
            row.country,
            row.resume_content,
            row.template,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Resume {
      id,
      name: fields.name,
      email: fields.email,
      phone: fields.phone,
      city: fields.city,
      country: fields.country,
      resume_content: fields.resume_content,
      template: fields.template,
      created_at: at,
      updated_at: at,
    })
  }

  async fn list(&self) -> Result<Vec<ResumeSummary>> {
    let raws: Vec<RawSummary> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUMMARY_COLUMNS} FROM resumes ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawSummary::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }

  async fn get(&self, id: ResumeId) -> Result<Option<Resume>> {
    let raw: Option<RawResume> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {RESUME_COLUMNS} FROM resumes WHERE id = ?1"),
              rusqlite::params![id],
              RawResume::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawResume::into_resume).transpose()
  }

  async fn update(&self, id: ResumeId, fields: ResumeFields) -> Result<Option<Resume>> {
    let at = now();

    let raw: Option<RawResume> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let previous: Option<String> = tx
          .query_row(
            "SELECT updated_at FROM resumes WHERE id = ?1",
            rusqlite::params![id],
            |r| r.get(0),
          )
          .optional()?;
        let Some(previous) = previous else {
          return Ok(None);
        };

        tx.execute(
          "UPDATE resumes
              SET name = ?1, email = ?2, phone = ?3, city = ?4, country = ?5,
                  resume_content = ?6, template = ?7, updated_at = ?8
            WHERE id = ?9",
          rusqlite::params![
            fields.name,
            fields.email,
            fields.phone,
            fields.city,
            fields.country,
            fields.resume_content,
            fields.template,
            next_updated_at(&previous, at),
            id,
          ],
        )?;

        let raw = tx.query_row(
          &format!("SELECT {RESUME_COLUMNS} FROM resumes WHERE id = ?1"),
          rusqlite::params![id],
          RawResume::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawResume::into_resume).transpose()
  }

  async fn delete(&self, id: ResumeId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM resumes WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(removed > 0)
  }
}
