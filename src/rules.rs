//! Per-URL `priority` and `changefreq`.
//!
//! Both are ordered rule chains: the first predicate that matches supplies the
//! value, otherwise the chain's fallback is used.

use regex::Regex;
use std::fmt;

use crate::urls::BaseUrl;

pub const ROOT_PRIORITY: Priority = Priority(1.0);
pub const FOLDER_PRIORITY: Priority = Priority(0.8);
pub const DEFAULT_PRIORITY: Priority = Priority(0.7);
pub const DEFAULT_IMPORTANT_PRIORITY: Priority = Priority(0.9);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Changefreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl Changefreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            Changefreq::Always => "always",
            Changefreq::Hourly => "hourly",
            Changefreq::Daily => "daily",
            Changefreq::Weekly => "weekly",
            Changefreq::Monthly => "monthly",
            Changefreq::Yearly => "yearly",
            Changefreq::Never => "never",
        }
    }
}

impl fmt::Display for Changefreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sitemap priority, clamped to `[0.0, 1.0]`. Rendered with one decimal unless
/// the value needs more (`0.75` stays `0.75`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(f32);

impl Priority {
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return DEFAULT_PRIORITY;
        }
        Priority(value.clamp(0.0, 1.0))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tenths = self.0 * 10.0;
        if (tenths - tenths.round()).abs() < 1e-4 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone)]
pub enum UrlPredicate {
    /// The site home page, `<base>/`.
    Root,
    Matches(Regex),
    /// Folder URLs produced from index files.
    TrailingSlash,
}

impl UrlPredicate {
    pub fn test(&self, url: &str, base_url: &BaseUrl) -> bool {
        match self {
            UrlPredicate::Root => base_url.is_root(url),
            UrlPredicate::Matches(regex) => regex.is_match(url),
            UrlPredicate::TrailingSlash => url.ends_with('/'),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuleChain<T> {
    rules: Vec<(UrlPredicate, T)>,
    fallback: T,
}

impl<T: Copy> RuleChain<T> {
    pub fn new(fallback: T) -> Self {
        RuleChain {
            rules: Vec::new(),
            fallback,
        }
    }

    pub fn rule(mut self, predicate: UrlPredicate, value: T) -> Self {
        self.rules.push((predicate, value));
        self
    }

    pub fn evaluate(&self, url: &str, base_url: &BaseUrl) -> T {
        self.rules
            .iter()
            .find(|(predicate, _)| predicate.test(url, base_url))
            .map_or(self.fallback, |(_, value)| *value)
    }
}

/// root, then important sections, then folder URLs, then the default.
pub fn priority_chain(important: Regex, important_priority: Priority) -> RuleChain<Priority> {
    RuleChain::new(DEFAULT_PRIORITY)
        .rule(UrlPredicate::Root, ROOT_PRIORITY)
        .rule(UrlPredicate::Matches(important), important_priority)
        .rule(UrlPredicate::TrailingSlash, FOLDER_PRIORITY)
}

/// root, then active sections, then weekly.
pub fn changefreq_chain(active: Regex) -> RuleChain<Changefreq> {
    RuleChain::new(Changefreq::Weekly)
        .rule(UrlPredicate::Root, Changefreq::Daily)
        .rule(UrlPredicate::Matches(active), Changefreq::Daily)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseUrl {
        BaseUrl::parse("https://example.com").unwrap()
    }

    fn priorities() -> RuleChain<Priority> {
        priority_chain(Regex::new(r"/(jar|froot)/").unwrap(), Priority::new(0.9))
    }

    fn changefreqs() -> RuleChain<Changefreq> {
        changefreq_chain(Regex::new(r"(?i)/(calendar|day|notes)/").unwrap())
    }

    fn priority(url: &str) -> String {
        priorities().evaluate(url, &base()).to_string()
    }

    #[test]
    fn root_priority_is_exactly_one() {
        assert_eq!(priority("https://example.com/"), "1.0");
    }

    #[test]
    fn unmatched_url_gets_default() {
        assert_eq!(priority("https://example.com/about/team.html"), "0.7");
    }

    #[test]
    fn important_section_beats_trailing_slash() {
        assert_eq!(priority("https://example.com/jar/"), "0.9");
        assert_eq!(priority("https://example.com/jar/index.html"), "0.9");
    }

    #[test]
    fn folder_url_priority() {
        assert_eq!(priority("https://example.com/about/"), "0.8");
    }

    #[test]
    fn first_matching_rule_wins() {
        let chain = RuleChain::new(Changefreq::Never)
            .rule(UrlPredicate::TrailingSlash, Changefreq::Monthly)
            .rule(UrlPredicate::Root, Changefreq::Always);
        assert_eq!(
            chain.evaluate("https://example.com/", &base()),
            Changefreq::Monthly
        );
    }

    #[test]
    fn changefreq_rules() {
        let chain = changefreqs();
        assert_eq!(chain.evaluate("https://example.com/", &base()), Changefreq::Daily);
        assert_eq!(
            chain.evaluate("https://example.com/Calendar/nov.html", &base()),
            Changefreq::Daily
        );
        assert_eq!(
            chain.evaluate("https://example.com/about/", &base()),
            Changefreq::Weekly
        );
    }

    #[test]
    fn priority_is_clamped() {
        assert_eq!(Priority::new(1.7).to_string(), "1.0");
        assert_eq!(Priority::new(-0.2).to_string(), "0.0");
        assert_eq!(Priority::new(f32::NAN), DEFAULT_PRIORITY);
    }

    #[test]
    fn priority_keeps_extra_precision() {
        assert_eq!(Priority::new(0.75).to_string(), "0.75");
        assert_eq!(Priority::new(0.9).to_string(), "0.9");
        assert_eq!(Priority::new(0.0).to_string(), "0.0");
    }
}
