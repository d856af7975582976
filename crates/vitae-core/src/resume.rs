//! The resume record and the shapes it takes on its way to and from the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Server-assigned row id.
pub type ResumeId = i64;

// ─── Stored record ───────────────────────────────────────────────────────────

/// The fields a caller may set. Produced by [`ResumeBody::validate`], so
/// `name` and `email` are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFields {
  pub name:           String,
  pub email:          String,
  pub phone:          Option<String>,
  pub city:           Option<String>,
  pub country:        Option<String>,
  pub resume_content: Option<String>,
  pub template:       Option<String>,
}

/// One persisted resume submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
  pub id:             ResumeId,
  pub name:           String,
  pub email:          String,
  pub phone:          Option<String>,
  pub city:           Option<String>,
  pub country:        Option<String>,
  pub resume_content: Option<String>,
  pub template:       Option<String>,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl Resume {
  pub fn fields(&self) -> ResumeFields {
    ResumeFields {
      name:           self.name.clone(),
      email:          self.email.clone(),
      phone:          self.phone.clone(),
      city:           self.city.clone(),
      country:        self.country.clone(),
      resume_content: self.resume_content.clone(),
      template:       self.template.clone(),
    }
  }
}

/// List projection of a [`Resume`]; leaves out the document markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSummary {
  pub id:         ResumeId,
  pub name:       String,
  pub email:      String,
  pub phone:      Option<String>,
  pub city:       Option<String>,
  pub country:    Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<Resume> for ResumeSummary {
  fn from(r: Resume) -> Self {
    ResumeSummary {
      id:         r.id,
      name:       r.name,
      email:      r.email,
      phone:      r.phone,
      city:       r.city,
      country:    r.country,
      created_at: r.created_at,
    }
  }
}

// ─── Wire body ───────────────────────────────────────────────────────────────

/// JSON body accepted by create and update.
///
/// Every field is optional on the wire so that a missing `name` or `email`
/// surfaces as [`Error::MissingRequired`] rather than a decode failure.
/// Unknown keys (a draft's `created_at`, for one) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeBody {
  pub name:           Option<String>,
  pub email:          Option<String>,
  pub phone:          Option<String>,
  pub city:           Option<String>,
  pub country:        Option<String>,
  pub resume_content: Option<String>,
  pub template:       Option<String>,
}

impl ResumeBody {
  /// Presence check for the required fields. Nothing else is inspected.
  pub fn validate(self) -> Result<ResumeFields> {
    let name = self.name.filter(|s| !s.is_empty());
    let email = self.email.filter(|s| !s.is_empty());
    let (Some(name), Some(email)) = (name, email) else {
      return Err(Error::MissingRequired);
    };

    Ok(ResumeFields {
      name,
      email,
      phone: self.phone,
      city: self.city,
      country: self.country,
      resume_content: self.resume_content,
      template: self.template,
    })
  }
}

impl From<ResumeFields> for ResumeBody {
  fn from(f: ResumeFields) -> Self {
    ResumeBody {
      name:           Some(f.name),
      email:          Some(f.email),
      phone:          f.phone,
      city:           f.city,
      country:        f.country,
      resume_content: f.resume_content,
      template:       f.template,
    }
  }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// An unsaved candidate record built by extraction. Never carries an id.
///
/// `created_at` is the client's clock at extraction time; the server ignores
/// it and assigns its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
  pub name:           String,
  pub email:          String,
  pub phone:          String,
  pub city:           String,
  pub country:        String,
  pub resume_content: String,
  pub template:       String,
  pub created_at:     DateTime<Utc>,
}

impl Draft {
  /// Whether the draft carries both required fields.
  pub fn is_submittable(&self) -> bool {
    !self.name.is_empty() && !self.email.is_empty()
  }

  pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string(self)?) }

  pub fn from_json(s: &str) -> Result<Self> { Ok(serde_json::from_str(s)?) }
}
