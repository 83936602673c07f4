use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::config::SitemapConfig;
use crate::error::{Result, SitemapError};
use crate::urls::web_path;

/// The one hidden entry that is still published (domain verification files).
pub const ALLOWED_HIDDEN: &str = ".well-known";

/// Every publishable file under the site root, as root-relative paths.
///
/// Entries are classified without following symlinks, so links are skipped.
pub fn collect_candidate_files(config: &SitemapConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    fn traverse(dir: &Path, config: &SitemapConfig, files: &mut Vec<PathBuf>) -> Result<()> {
        let walk_error = |source| SitemapError::Walk {
            path: dir.to_path_buf(),
            source,
        };

        for entry in fs::read_dir(dir).map_err(walk_error)? {
            let entry = entry.map_err(walk_error)?;
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if name.starts_with('.') && name != ALLOWED_HIDDEN {
                continue;
            }

            let path = entry.path();
            let file_type = entry.file_type().map_err(|source| SitemapError::Walk {
                path: path.clone(),
                source,
            })?;

            if file_type.is_dir() {
                if config.exclude_dirs.contains(&*name) {
                    debug!("skipping excluded directory {}", path.display());
                    continue;
                }
                traverse(&path, config, files)?;
            } else if file_type.is_file() && has_included_extension(&path, config) {
                let rel_path = path.strip_prefix(&config.root).unwrap_or(&path);
                if is_excluded(rel_path, config) {
                    debug!("skipping excluded file {}", rel_path.display());
                    continue;
                }
                files.push(rel_path.to_path_buf());
            }
        }
        Ok(())
    }

    traverse(&config.root, config, &mut files)?;
    Ok(files)
}

fn has_included_extension(path: &Path, config: &SitemapConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| config.include_extensions.contains(&ext.to_ascii_lowercase()))
}

pub fn is_excluded(rel_path: &Path, config: &SitemapConfig) -> bool {
    let path = web_path(rel_path);
    config
        .exclude_patterns
        .iter()
        .any(|pattern| pattern.is_match(&path))
}
