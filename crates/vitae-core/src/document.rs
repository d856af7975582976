//! The editor snapshot handed to extraction and transport.
//!
//! The editor owns its live state; the pipeline only ever sees an immutable
//! [`Document`] built from it at the moment of a save or a submission.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{extract, resume::Draft};

/// Title of the section whose text holds the contact details.
pub const HEADER_TITLE: &str = "Header";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
  pub title: String,
  /// Plain-text content of the section, line breaks preserved.
  pub text:  String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  pub sections: Vec<Section>,
  /// Serialized markup of the whole document. Opaque to the pipeline.
  pub markup:   String,
  /// Name of the active visual template.
  pub template: String,
}

impl Document {
  pub fn new(markup: impl Into<String>, template: impl Into<String>) -> Self {
    Self { sections: Vec::new(), markup: markup.into(), template: template.into() }
  }

  pub fn with_section(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
    self.sections.push(Section { title: title.into(), text: text.into() });
    self
  }

  /// The first section titled [`HEADER_TITLE`], if any.
  pub fn header(&self) -> Option<&Section> {
    self.sections.iter().find(|s| s.title == HEADER_TITLE)
  }

  /// Run extraction over the header section, stamped with the current time.
  ///
  /// Returns `None` when the document has no header; such a document cannot
  /// be submitted.
  pub fn extract_draft(&self) -> Option<Draft> {
    let header = self.header()?;
    Some(extract::extract_fields(&header.text, &self.markup, &self.template, Utc::now()))
  }
}
