use regex::Regex;
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::domain::{resolve_base_url, DomainSources};
use crate::error::{Result, SitemapError};
use crate::rules::{
    changefreq_chain, priority_chain, Changefreq, Priority, RuleChain, DEFAULT_IMPORTANT_PRIORITY,
};
use crate::urls::BaseUrl;

pub const OUTPUT_FILE: &str = "sitemap.xml";
pub const RULES_FILE: &str = "sitemap.toml";
pub const DEFAULT_SAMPLE: usize = 5;

pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    ".dist",
    "dist",
    "build",
    ".github",
    ".vscode",
    ".idea",
    ".cache",
    "coverage",
    "target",
];
pub const DEFAULT_INCLUDE_EXTENSIONS: &[&str] = &["html", "htm"];
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    r"(?i)(^|/)404\.html?$",
    r"(?i)(^|/)50[0-9]\.html?$",
    r"(?i)(^|/)(drafts?|tests?|wip)/",
];
pub const DEFAULT_IMPORTANT_PATTERN: &str = r"(?i)/(jar|froot)/";
pub const DEFAULT_ACTIVE_PATTERN: &str = r"(?i)/(calendar|day|notes|timeline|victory|jar|froot)/";

#[derive(Debug)]
pub struct Args {
    pub root: PathBuf,
    pub lastmod: bool,
    pub sample: usize,
    pub verbose: bool,
}

/// Optional overrides read from `sitemap.toml` in the site root.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesFile {
    pub exclude_dirs: Option<Vec<String>>,
    pub include_extensions: Option<Vec<String>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub important_pattern: Option<String>,
    pub important_priority: Option<f32>,
    pub active_pattern: Option<String>,
}

impl RulesFile {
    /// A missing file means "use the defaults"; a malformed one is an error.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(RULES_FILE);
        if !path.is_file() {
            return Ok(RulesFile::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| SitemapError::InvalidRules {
            path: path.clone(),
            message: e.to_string(),
        })?;
        debug!("loaded rules from {}", path.display());

        toml::from_str(&content).map_err(|e| SitemapError::InvalidRules {
            path,
            message: e.to_string(),
        })
    }
}

/// Everything one run needs, built once at startup.
#[derive(Debug)]
pub struct SitemapConfig {
    pub root: PathBuf,
    pub base_url: BaseUrl,
    pub exclude_dirs: HashSet<String>,
    /// Lowercase, without the leading dot.
    pub include_extensions: HashSet<String>,
    pub exclude_patterns: Vec<Regex>,
    pub priority: RuleChain<Priority>,
    pub changefreq: RuleChain<Changefreq>,
    pub output: PathBuf,
    pub lastmod: bool,
}

impl SitemapConfig {
    pub fn load(args: &Args, env_override: Option<String>) -> Result<Self> {
        if !args.root.is_dir() {
            return Err(SitemapError::RootMissing(args.root.clone()));
        }
        let root = args
            .root
            .canonicalize()
            .map_err(|_| SitemapError::RootMissing(args.root.clone()))?;

        let base_url = resolve_base_url(&DomainSources {
            root: &root,
            env_override,
        })?;
        let rules = RulesFile::load(&root)?;

        SitemapConfig::from_parts(root, base_url, rules, args.lastmod)
    }

    pub fn from_parts(
        root: PathBuf,
        base_url: BaseUrl,
        rules: RulesFile,
        lastmod: bool,
    ) -> Result<Self> {
        let exclude_dirs = rules
            .exclude_dirs
            .unwrap_or_else(|| to_strings(DEFAULT_EXCLUDE_DIRS))
            .into_iter()
            .collect();

        let include_extensions = rules
            .include_extensions
            .unwrap_or_else(|| to_strings(DEFAULT_INCLUDE_EXTENSIONS))
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        let exclude_patterns = rules
            .exclude_patterns
            .unwrap_or_else(|| to_strings(DEFAULT_EXCLUDE_PATTERNS))
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<Vec<_>>>()?;

        let important = compile(
            rules
                .important_pattern
                .as_deref()
                .unwrap_or(DEFAULT_IMPORTANT_PATTERN),
        )?;
        let important_priority = rules
            .important_priority
            .map_or(DEFAULT_IMPORTANT_PRIORITY, Priority::new);
        let active = compile(
            rules
                .active_pattern
                .as_deref()
                .unwrap_or(DEFAULT_ACTIVE_PATTERN),
        )?;

        let output = root.join(OUTPUT_FILE);

        Ok(SitemapConfig {
            root,
            base_url,
            exclude_dirs,
            include_extensions,
            exclude_patterns,
            priority: priority_chain(important, important_priority),
            changefreq: changefreq_chain(active),
            output,
            lastmod,
        })
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| SitemapError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn base() -> BaseUrl {
        BaseUrl::parse("https://example.com").unwrap()
    }

    #[test]
    fn defaults_without_rules_file() {
        let dir = tempdir().unwrap();
        let rules = RulesFile::load(dir.path()).unwrap();
        let config =
            SitemapConfig::from_parts(dir.path().to_path_buf(), base(), rules, false).unwrap();

        assert!(config.exclude_dirs.contains("node_modules"));
        assert!(config.include_extensions.contains("html"));
        assert_eq!(config.exclude_patterns.len(), DEFAULT_EXCLUDE_PATTERNS.len());
        assert_eq!(config.output, dir.path().join(OUTPUT_FILE));
    }

    #[test]
    fn rules_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(RULES_FILE),
            r#"
exclude_dirs = ["vendor"]
include_extensions = [".HTML"]
important_pattern = "/docs/"
important_priority = 0.6
"#,
        )
        .unwrap();

        let rules = RulesFile::load(dir.path()).unwrap();
        let config =
            SitemapConfig::from_parts(dir.path().to_path_buf(), base(), rules, false).unwrap();

        assert!(config.exclude_dirs.contains("vendor"));
        assert!(!config.exclude_dirs.contains("node_modules"));
        assert!(config.include_extensions.contains("html"));
        assert_eq!(
            config
                .priority
                .evaluate("https://example.com/docs/", &config.base_url)
                .to_string(),
            "0.6"
        );
    }

    #[test]
    fn malformed_rules_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(RULES_FILE), "exclude_dirs = 3").unwrap();

        assert!(matches!(
            RulesFile::load(dir.path()),
            Err(SitemapError::InvalidRules { .. })
        ));
    }

    #[test]
    fn bad_pattern_is_reported() {
        let rules = RulesFile {
            exclude_patterns: Some(vec!["(unclosed".to_string()]),
            ..RulesFile::default()
        };

        let err = SitemapConfig::from_parts(PathBuf::from("/site"), base(), rules, false)
            .unwrap_err();
        assert!(matches!(err, SitemapError::InvalidPattern { .. }));
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let args = Args {
            root: dir.path().join("nope"),
            lastmod: false,
            sample: DEFAULT_SAMPLE,
            verbose: false,
        };

        assert!(matches!(
            SitemapConfig::load(&args, Some("https://example.com".to_string())),
            Err(SitemapError::RootMissing(_))
        ));
    }
}
