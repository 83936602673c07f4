//! Console output. Progress lines go to stdout with fixed wording so CI jobs
//! can scrape them; diagnostics go to stderr.

use std::{io::Write, path::Path};
use tracing::debug;

pub const COLOR_RED: &str = "\x1b[31m";
pub const COLOR_RESET: &str = "\x1b[0m";

pub fn print_error(message: &str) {
    eprintln!("{}ERROR{}: {}", COLOR_RED, COLOR_RESET, message);
}

pub struct Progress<W: Write> {
    out: W,
}

impl<W: Write> Progress<W> {
    pub fn new(out: W) -> Self {
        Progress { out }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            debug!("progress output failed: {}", e);
        }
    }

    pub fn start(&mut self, base_url: &str) {
        self.line(&format!("Generating sitemap for: {}", base_url));
    }

    pub fn found(&mut self, file_count: usize) {
        self.line(&format!("Found {} candidate files", file_count));
    }

    pub fn generated(&mut self, output: &Path, url_count: usize) {
        self.line(&format!("Generated {} with {} URLs", output.display(), url_count));
    }

    pub fn sample<'a, I>(&mut self, urls: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut urls = urls.into_iter().peekable();
        if urls.peek().is_none() {
            return;
        }
        self.line("Sample URLs:");
        for url in urls {
            self.line(&format!("  {}", url));
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
