//! Base URL detection.
//!
//! Sources are tried in a fixed order and the first one that yields a value wins:
//! the `SITEMAP_BASE_URL` override, `package.json`, `domain.txt`, a directory
//! named like `map.plnt.earth`, and finally a GitHub Pages `CNAME` file.
//! A value that is not an absolute URL counts as absent.

use regex::Regex;
use serde_json::Value;
use std::{fs, path::Path};
use tracing::debug;

use crate::error::{Result, SitemapError};
use crate::urls::BaseUrl;

pub const ENV_BASE_URL: &str = "SITEMAP_BASE_URL";
pub const MANIFEST_FILE: &str = "package.json";
pub const DOMAIN_FILE: &str = "domain.txt";
pub const CNAME_FILE: &str = "CNAME";
pub const DOMAIN_SUFFIX: &str = "plnt.earth";

/// Inputs the resolvers read from. The override is passed in rather than read
/// from the process environment so resolution can be tested in isolation.
#[derive(Debug, Clone)]
pub struct DomainSources<'a> {
    pub root: &'a Path,
    pub env_override: Option<String>,
}

type Resolver = fn(&DomainSources) -> Option<String>;

const RESOLVERS: &[(&str, Resolver)] = &[
    ("environment", from_env),
    ("manifest", from_manifest),
    ("domain file", from_domain_file),
    ("directory name", from_dir_name),
    ("custom domain file", from_cname),
];

pub fn resolve_base_url(sources: &DomainSources) -> Result<BaseUrl> {
    for (name, resolver) in RESOLVERS {
        let Some(value) = resolver(sources) else {
            continue;
        };
        match BaseUrl::parse(&value) {
            Ok(base_url) => {
                debug!("base URL {} resolved from {}", base_url, name);
                return Ok(base_url);
            }
            Err(e) => debug!("skipping {} value: {}", name, e),
        }
    }

    Err(SitemapError::NoDomain {
        root: sources.root.to_path_buf(),
    })
}

fn strip_trailing_slashes(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn with_scheme(value: &str) -> String {
    if value.contains("://") {
        value.to_string()
    } else {
        format!("https://{}", value)
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    non_empty(&content).map(str::to_string)
}

fn from_env(sources: &DomainSources) -> Option<String> {
    let value = sources.env_override.as_deref()?;
    if value.trim().is_empty() {
        return None;
    }
    Some(strip_trailing_slashes(value))
}

fn from_manifest(sources: &DomainSources) -> Option<String> {
    let path = sources.root.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).ok()?;

    let manifest: Value = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!("ignoring unparseable {}: {}", path.display(), e);
            return None;
        }
    };

    ["domain", "homepage"]
        .iter()
        .filter_map(|field| manifest.get(*field).and_then(Value::as_str))
        .find_map(non_empty)
        .map(strip_trailing_slashes)
}

fn from_domain_file(sources: &DomainSources) -> Option<String> {
    let value = read_trimmed(&sources.root.join(DOMAIN_FILE))?;
    Some(strip_trailing_slashes(&with_scheme(&value)))
}

fn from_dir_name(sources: &DomainSources) -> Option<String> {
    let dir_name = sources.root.file_name()?.to_str()?;
    let pattern = format!(r"(?i)^.+\.{}$", regex::escape(DOMAIN_SUFFIX));
    let suffix_regex = Regex::new(&pattern).ok()?;

    suffix_regex
        .is_match(dir_name)
        .then(|| format!("https://{}", dir_name))
}

fn from_cname(sources: &DomainSources) -> Option<String> {
    let value = read_trimmed(&sources.root.join(CNAME_FILE))?;
    Some(format!("https://{}", value.trim_end_matches('/')))
}
