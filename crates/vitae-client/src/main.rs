//! `vitae` — command-line client for the vitae resume API.
//!
//! # Usage
//!
//! ```text
//! vitae submit --header header.txt --markup resume.html --template modern
//! vitae list
//! vitae show 3
//! vitae draft save --header header.txt
//! vitae --url http://resumes.internal:3000 delete 3
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vitae_client::{DraftCache, ResumeClient, storage::FileStorage};
use vitae_core::{document::Document, resume::ResumeId};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "vitae", about = "Submit and browse resumes stored by vitae-server")]
struct Cli {
  /// Base URL of the vitae server.
  #[arg(long, env = "VITAE_URL", default_value = "http://localhost:3000")]
  url: String,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Extract contact details from a header and submit the resume.
  Submit(DocumentArgs),
  /// List stored resumes, newest first.
  List,
  /// Print one stored resume as JSON.
  Show { id: ResumeId },
  /// Delete a stored resume.
  Delete { id: ResumeId },
  /// Work with the locally cached draft.
  #[command(subcommand)]
  Draft(DraftCommand),
}

#[derive(Subcommand, Debug)]
enum DraftCommand {
  /// Extract a draft and cache it locally, replacing any previous one.
  Save {
    #[command(flatten)]
    document: DocumentArgs,
    #[command(flatten)]
    dir:      DraftDir,
  },
  /// Print the cached draft, if any.
  Show {
    #[command(flatten)]
    dir: DraftDir,
  },
}

#[derive(Args, Debug)]
struct DraftDir {
  /// Directory holding the local draft cache.
  #[arg(long = "draft-dir", env = "VITAE_DRAFT_DIR", default_value = ".vitae")]
  path: PathBuf,
}

#[derive(Args, Debug)]
struct DocumentArgs {
  /// Plain-text file with the header section (name, contacts, location).
  #[arg(long)]
  header:   PathBuf,
  /// File with the full document markup.
  #[arg(long)]
  markup:   Option<PathBuf>,
  /// Name of the visual template.
  #[arg(long, default_value = "")]
  template: String,
}

impl DocumentArgs {
  fn load(&self) -> Result<Document> {
    let header = std::fs::read_to_string(&self.header)
      .with_context(|| format!("reading header file {}", self.header.display()))?;
    let markup = match &self.markup {
      Some(path) => std::fs::read_to_string(path)
        .with_context(|| format!("reading markup file {}", path.display()))?,
      None => String::new(),
    };
    Ok(Document::new(markup, self.template.clone()).with_section("Header", header))
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let client = ResumeClient::new(cli.url.clone())?;

  match cli.command {
    Command::Submit(args) => {
      let id = client.submit(&args.load()?).await?;
      println!("Resume submitted successfully! (id {id})");
    }
    Command::List => {
      for r in client.list().await? {
        let location = match (r.city.as_deref(), r.country.as_deref()) {
          (Some(city), Some(country)) if !country.is_empty() => format!("{city}, {country}"),
          (Some(city), _) => city.to_owned(),
          _ => String::new(),
        };
        println!("{}\t{}\t{}\t{}\t{}", r.id, r.created_at, r.name, r.email, location);
      }
    }
    Command::Show { id } => match client.get(id).await? {
      Some(resume) => println!("{}", serde_json::to_string_pretty(&resume)?),
      None => bail!("resume {id} not found"),
    },
    Command::Delete { id } => {
      client.delete(id).await?;
      println!("Resume deleted successfully");
    }
    Command::Draft(DraftCommand::Save { document, dir }) => {
      let cache = DraftCache::new(FileStorage::new(dir.path));
      if cache.flush(&document.load()?)? {
        println!("Draft saved");
      } else {
        bail!("no header found; nothing to cache");
      }
    }
    Command::Draft(DraftCommand::Show { dir }) => {
      let cache = DraftCache::new(FileStorage::new(dir.path));
      match cache.load()? {
        Some(draft) => println!("{}", serde_json::to_string_pretty(&draft)?),
        None => println!("No draft cached"),
      }
    }
  }

  Ok(())
}
