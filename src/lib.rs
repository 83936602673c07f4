//! Sitemap generation for a static site directory.
//!
//! ```text
//! resolve base URL ──► walk tree ──► map URLs ──► tag metadata ──► write sitemap.xml
//! ```
//!
//! Runs are single-threaded and one-shot: `sitemap.xml` is rewritten in full
//! every time. Two runs against the same root at once race, last writer wins.

pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod rules;
pub mod site_map;
pub mod sitemap;
pub mod urls;

use std::{io::Write, path::PathBuf};
use tracing::debug;

use crate::config::{Args, SitemapConfig};
use crate::io::Progress;

pub use crate::error::{Result, SitemapError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub file_count: usize,
    pub urls: Vec<String>,
}

/// Generate the sitemap for `args.root`, printing progress to `out`.
///
/// The base URL is resolved before anything is written, so a failed
/// resolution leaves an existing `sitemap.xml` untouched.
pub fn run<W: Write>(args: &Args, env_override: Option<String>, out: W) -> Result<RunSummary> {
    let config = SitemapConfig::load(args, env_override)?;
    let mut progress = Progress::new(out);
    progress.start(config.base_url.as_str());

    let files = site_map::collect_candidate_files(&config)?;
    progress.found(files.len());

    let url_set = urls::build_url_set(&config.base_url, &files);
    let entries = sitemap::build_entries(&config, &url_set);
    sitemap::write_sitemap(&config, &entries)?;
    debug!("wrote {} entries to {}", entries.len(), config.output.display());

    progress.generated(&config.output, url_set.len());
    progress.sample(url_set.keys().take(args.sample).map(String::as_str));

    Ok(RunSummary {
        output: config.output,
        file_count: files.len(),
        urls: url_set.into_keys().collect(),
    })
}
