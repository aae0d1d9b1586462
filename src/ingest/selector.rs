//! Content Selector
//!
//! Walks a repository snapshot and picks the files worth sending to the
//! model under a size budget:
//!
//! 1. **Code files** by extension, skipping noise paths (vendored, minified,
//!    generated, build output) and files outside the size window. Each is
//!    truncated and counted against the aggregate budget, which is checked
//!    before every read. The file that crosses the budget is kept.
//! 2. **Identity files** (manifests, root README and Dockerfile) below their
//!    own size cap, outside the budget.
//!
//! Enumeration is sorted by file name so the same tree always yields the
//! same selection. All lengths are character counts.

use ignore::WalkBuilder;
use std::path::Path;
use tracing::{debug, trace};

use crate::config::SelectionConfig;
use crate::constants::selection::{
    CODE_EXTENSIONS, IDENTITY_ROOT_FILES, IDENTITY_SUFFIXES, NOISE_PATH_MARKERS,
    TRUNCATION_MARKER, VCS_DIR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Code,
    Identity,
}

/// One file chosen for the context payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Path relative to the snapshot root, `/`-separated
    pub path: String,
    /// Body as sent, after truncation
    pub content: String,
    /// Character length of `content`
    pub chars: usize,
    pub truncated: bool,
    pub role: FileRole,
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Code files in enumeration order, then identity files
    pub files: Vec<SelectedFile>,
    /// Characters counted against the budget (code files only)
    pub total_chars: usize,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn known_paths(&self) -> Vec<String> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }

    /// Characters across every selected file, identity files included
    pub fn payload_chars(&self) -> usize {
        self.files.iter().map(|f| f.chars).sum()
    }

    fn upsert(&mut self, file: SelectedFile) {
        match self.files.iter_mut().find(|f| f.path == file.path) {
            Some(existing) => *existing = file,
            None => self.files.push(file),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentSelector {
    limits: SelectionConfig,
}

impl ContentSelector {
    pub fn new(limits: SelectionConfig) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SelectionConfig {
        &self.limits
    }

    /// Select files from the snapshot at `root`. Never fails: unreadable
    /// files are skipped.
    pub fn select(&self, root: &Path) -> Selection {
        let paths = enumerate(root);
        debug!("Enumerated {} files under {}", paths.len(), root.display());

        let mut selection = Selection::default();
        self.select_code(root, &paths, &mut selection);
        self.select_identity(root, &paths, &mut selection);

        debug!(
            "Selected {} files ({} budgeted chars)",
            selection.len(),
            selection.total_chars
        );
        selection
    }

    fn select_code(&self, root: &Path, paths: &[String], selection: &mut Selection) {
        for path in paths.iter().filter(|p| is_code_file(p)) {
            if selection.total_chars > self.limits.max_total_chars {
                debug!("Character budget exhausted before {}", path);
                break;
            }
            if is_noise(path) {
                trace!("Skipping noise path {}", path);
                continue;
            }

            let Some(content) = read_text(root, path) else {
                continue;
            };
            let len = content.chars().count();
            if len <= self.limits.min_file_chars || len >= self.limits.max_file_chars {
                trace!("Skipping {} ({} chars, outside size window)", path, len);
                continue;
            }

            let (content, truncated) = truncate(content, len, self.limits.truncate_at_chars);
            let chars = content.chars().count();
            selection.total_chars += chars;
            selection.files.push(SelectedFile {
                path: path.clone(),
                content,
                chars,
                truncated,
                role: FileRole::Code,
            });
        }
    }

    fn select_identity(&self, root: &Path, paths: &[String], selection: &mut Selection) {
        for path in paths.iter().filter(|p| is_identity_file(p) && !is_noise(p)) {
            let Some(content) = read_text(root, path) else {
                continue;
            };
            let chars = content.chars().count();
            if chars >= self.limits.max_identity_file_chars {
                trace!("Skipping identity file {} ({} chars)", path, chars);
                continue;
            }

            selection.upsert(SelectedFile {
                path: path.clone(),
                content,
                chars,
                truncated: false,
                role: FileRole::Identity,
            });
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

pub fn is_code_file(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    CODE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn is_noise(path: &str) -> bool {
    NOISE_PATH_MARKERS.iter().any(|marker| path.contains(marker))
}

pub fn is_identity_file(path: &str) -> bool {
    IDENTITY_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
        || IDENTITY_ROOT_FILES
            .iter()
            .any(|name| path.eq_ignore_ascii_case(name))
}

// =============================================================================
// Filesystem
// =============================================================================

/// Every regular file under `root` except version-control metadata, as
/// sorted `/`-separated relative paths
fn enumerate(root: &Path) -> Vec<String> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| entry.file_name() != VCS_DIR)
        .build();

    walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(root).ok()?;
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            Some(parts.join("/"))
        })
        .collect()
}

fn read_text(root: &Path, path: &str) -> Option<String> {
    match std::fs::read_to_string(root.join(path)) {
        Ok(content) => Some(content),
        Err(e) => {
            debug!("Skipping unreadable file {}: {}", path, e);
            None
        }
    }
}

fn truncate(content: String, len: usize, limit: usize) -> (String, bool) {
    if len <= limit {
        return (content, false);
    }
    let cut = content
        .char_indices()
        .nth(limit)
        .map_or(content.len(), |(idx, _)| idx);
    (format!("{}{}", &content[..cut], TRUNCATION_MARKER), true)
}
