use chrono::{DateTime, Utc};
use quick_xml::escape::escape;
use std::{fs, path::Path};
use tracing::warn;

use crate::config::SitemapConfig;
use crate::error::{Result, SitemapError};
use crate::rules::{Changefreq, Priority};
use crate::urls::UrlSet;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub changefreq: Changefreq,
    pub priority: Priority,
    pub lastmod: Option<String>,
}

pub fn build_entries(config: &SitemapConfig, urls: &UrlSet) -> Vec<SitemapEntry> {
    urls.iter()
        .map(|(loc, rel_path)| SitemapEntry {
            loc: loc.clone(),
            changefreq: config.changefreq.evaluate(loc, &config.base_url),
            priority: config.priority.evaluate(loc, &config.base_url),
            lastmod: config
                .lastmod
                .then(|| get_last_modified_date(&config.root.join(rel_path)))
                .flatten(),
        })
        .collect()
}

/// File modification date as `YYYY-MM-DD` (UTC).
pub fn get_last_modified_date(path: &Path) -> Option<String> {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => {
            let modified: DateTime<Utc> = modified.into();
            Some(modified.format("%Y-%m-%d").to_string())
        }
        Err(e) => {
            warn!("no modification time for {}: {}", path.display(), e);
            None
        }
    }
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let rows: Vec<String> = entries
        .iter()
        .map(|entry| {
            let lastmod = entry
                .lastmod
                .as_deref()
                .map(|date| format!("\n    <lastmod>{}</lastmod>", date))
                .unwrap_or_default();

            format!(
                "  <url>\n    <loc>{}</loc>{}\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
                escape(&entry.loc),
                lastmod,
                entry.changefreq,
                entry.priority
            )
        })
        .collect();

    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{}\">\n",
        SITEMAP_NAMESPACE
    );
    for row in rows {
        xml.push_str(&row);
        xml.push('\n');
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Overwrites the output file with the rendered document.
pub fn write_sitemap(config: &SitemapConfig, entries: &[SitemapEntry]) -> Result<()> {
    fs::write(&config.output, render_sitemap(entries)).map_err(|source| SitemapError::Write {
        path: config.output.clone(),
        source,
    })
}
