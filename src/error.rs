use std::{io, path::PathBuf};
use thiserror::Error;

use crate::domain::{CNAME_FILE, DOMAIN_FILE, ENV_BASE_URL, MANIFEST_FILE};

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("site root {} does not exist or is not a directory", .0.display())]
    RootMissing(PathBuf),

    #[error(
        "could not determine the site domain for {}.\n\
         Provide one of:\n  \
         - the {} environment variable (e.g. https://map.plnt.earth)\n  \
         - a \"domain\" or \"homepage\" field in {}\n  \
         - a {} file containing the domain\n  \
         - a {} file (GitHub Pages custom domain)\n\
         or rename the directory to match <subdomain>.plnt.earth",
        .root.display(),
        ENV_BASE_URL,
        MANIFEST_FILE,
        DOMAIN_FILE,
        CNAME_FILE
    )]
    NoDomain { root: PathBuf },

    #[error("invalid base URL {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid rules file {}: {message}", .path.display())]
    InvalidRules { path: PathBuf, message: String },

    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SitemapError>;
