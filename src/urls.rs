use std::{
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
};
use url::Url;

use crate::error::{Result, SitemapError};

/// Every emitted URL mapped to the root-relative file it came from. Keys are
/// unique and iterate in sorted order.
pub type UrlSet = BTreeMap<String, PathBuf>;

const INDEX_FILE: &str = "index.html";

/// Scheme and host (plus an optional path prefix) every sitemap URL starts with.
/// Stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    url: Url,
    text: String,
}

impl BaseUrl {
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |source| SitemapError::InvalidBaseUrl {
            value: value.to_string(),
            source,
        };

        let mut url = Url::parse(value.trim().trim_end_matches('/')).map_err(invalid)?;
        if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
            return Err(invalid(url::ParseError::EmptyHost));
        }
        url.set_query(None);
        url.set_fragment(None);

        let text = url.as_str().trim_end_matches('/').to_string();
        Ok(BaseUrl { url, text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The site's home page, `<base>/`.
    pub fn root(&self) -> String {
        format!("{}/", self.text)
    }

    pub fn is_root(&self, url: &str) -> bool {
        url.strip_prefix(self.text.as_str()) == Some("/")
    }

    /// Append path segments, percent-encoding each one.
    pub fn join<'a, I>(&self, segments: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Root-relative path with forward slashes, independent of the host separator.
pub fn web_path(rel_path: &Path) -> String {
    rel_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(os_str) => Some(os_str.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn to_url(base_url: &BaseUrl, rel_path: &Path) -> String {
    let path = web_path(rel_path);
    if path.eq_ignore_ascii_case(INDEX_FILE) {
        return base_url.root();
    }
    base_url.join(path.split('/'))
}

/// Pretty URL for an index file below the root: `about/index.html` -> `<base>/about/`.
pub fn folder_url(base_url: &BaseUrl, rel_path: &Path) -> Option<String> {
    let path = web_path(rel_path);
    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 {
        return None;
    }

    let file_name = segments.pop()?;
    if !file_name.eq_ignore_ascii_case(INDEX_FILE) {
        return None;
    }
    segments.push("");
    Some(base_url.join(segments))
}

pub fn build_url_set(base_url: &BaseUrl, files: &[PathBuf]) -> UrlSet {
    let mut urls = UrlSet::new();

    for rel_path in files {
        urls.entry(to_url(base_url, rel_path))
            .or_insert_with(|| rel_path.clone());

        if let Some(folder) = folder_url(base_url, rel_path) {
            urls.entry(folder).or_insert_with(|| rel_path.clone());
        }
    }

    urls
}
