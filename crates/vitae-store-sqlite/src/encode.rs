//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings
//! (`2024-05-01T12:00:00.000000Z`).

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use vitae_core::resume::{Resume, ResumeId, ResumeSummary};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Current time at the precision the store keeps.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// The `updated_at` to write over `previous`: `now`, unless the clock has not
/// moved past `previous`, in which case one microsecond after it.
pub fn next_updated_at(previous: &str, now: DateTime<Utc>) -> String {
  match decode_dt(previous) {
    Ok(prev) if prev >= now => encode_dt(prev + Duration::microseconds(1)),
    _ => encode_dt(now),
  }
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

pub const RESUME_COLUMNS: &str = "id, name, email, phone, city, country, \
                                  resume_content, template, created_at, updated_at";

pub const SUMMARY_COLUMNS: &str = "id, name, email, phone, city, country, created_at";

/// A `resumes` row as read from SQLite, before timestamp decoding.
pub struct RawResume {
  pub id:             ResumeId,
  pub name:           String,
  pub email:          String,
  pub phone:          Option<String>,
  pub city:           Option<String>,
  pub country:        Option<String>,
  pub resume_content: Option<String>,
  pub template:       Option<String>,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawResume {
  /// Map a row selected with [`RESUME_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawResume {
      id:             row.get(0)?,
      name:           row.get(1)?,
      email:          row.get(2)?,
      phone:          row.get(3)?,
      city:           row.get(4)?,
      country:        row.get(5)?,
      resume_content: row.get(6)?,
      template:       row.get(7)?,
      created_at:     row.get(8)?,
      updated_at:     row.get(9)?,
    })
  }

  pub fn into_resume(self) -> Result<Resume> {
    Ok(Resume {
      id:             self.id,
      name:           self.name,
      email:          self.email,
      phone:          self.phone,
      city:           self.city,
      country:        self.country,
      resume_content: self.resume_content,
      template:       self.template,
      created_at:     decode_dt(&self.created_at)?,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}

pub struct RawSummary {
  pub id:         ResumeId,
  pub name:       String,
  pub email:      String,
  pub phone:      Option<String>,
  pub city:       Option<String>,
  pub country:    Option<String>,
  pub created_at: String,
}

impl RawSummary {
  /// Map a row selected with [`SUMMARY_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawSummary {
      id:         row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      phone:      row.get(3)?,
      city:       row.get(4)?,
      country:    row.get(5)?,
      created_at: row.get(6)?,
    })
  }

  pub fn into_summary(self) -> Result<ResumeSummary> {
    Ok(ResumeSummary {
      id:         self.id,
      name:       self.name,
      email:      self.email,
      phone:      self.phone,
      city:       self.city,
      country:    self.country,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
