/// File placement engine.
///
/// Walks a source tree, classifies every file by extension, plans a
/// collision-free destination under the destination root, optionally skips
/// content duplicates, and executes the move/copy (or only reports it in
/// dry-run mode), accumulating the run counters.
use crate::category::CategoryMap;
use crate::config::CompiledFilters;
use crate::hasher;
use crate::output::OutputFormatter;
use crate::planner;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Mode flags for one organization run.
///
/// Defaults correspond to a real (non-simulated) move without date folders
/// or duplicate detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizeOptions {
    /// Copy files instead of moving them.
    pub copy: bool,
    /// Report intended actions without touching the filesystem.
    pub dry_run: bool,
    /// Insert a `YYYY-MM-DD` folder between category and extension folders.
    pub by_date: bool,
    /// Skip files whose content was already placed earlier in the run.
    pub skip_duplicates: bool,
}

/// Counters accumulated over one run and returned to the caller.
///
/// `processed == moved + copied + skipped` holds after every non-dry run;
/// in dry-run mode `moved` and `copied` stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files encountered by the walk (after filtering).
    pub processed: u64,
    /// Files moved to their destination.
    pub moved: u64,
    /// Files copied to their destination.
    pub copied: u64,
    /// Files skipped: already inside dest, duplicate content, or failed.
    pub skipped: u64,
}

/// Fatal errors that abort a run before any file is touched.
///
/// Per-file problems (unreadable file, failed placement) are not represented
/// here; they are logged and recorded as skipped so the run can continue.
#[derive(Debug)]
pub enum OrganizeError {
    /// The source path is missing, not a directory, or cannot be resolved.
    InvalidSource { path: PathBuf, source: io::Error },
    /// The destination root cannot be resolved or created.
    InvalidDest { path: PathBuf, source: io::Error },
    /// Source and destination are the same directory, or source lies inside
    /// the destination tree.
    OverlappingRoots { source: PathBuf, dest: PathBuf },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSource { path, source } => {
                write!(
                    f,
                    "Source directory does not exist or is not a directory: {}: {}",
                    path.display(),
                    source
                )
            }
            Self::InvalidDest { path, source } => {
                write!(
                    f,
                    "Destination root is not usable: {}: {}",
                    path.display(),
                    source
                )
            }
            Self::OverlappingRoots { source, dest } => {
                write!(
                    f,
                    "Source {} and destination {} overlap; refusing to organize a tree into itself",
                    source.display(),
                    dest.display()
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Orchestrates one organization run.
///
/// Holds the run configuration by reference; the category map and filters
/// are owned by the caller, so alternate tables can be substituted without
/// global state.
pub struct Organizer<'a> {
    options: OrganizeOptions,
    categories: &'a CategoryMap,
    filters: &'a CompiledFilters,
}

impl<'a> Organizer<'a> {
    /// Creates an organizer for the given options, category table and filters.
    pub fn new(
        options: OrganizeOptions,
        categories: &'a CategoryMap,
        filters: &'a CompiledFilters,
    ) -> Self {
        Self {
            options,
            categories,
            filters,
        }
    }

    /// Organizes every file under `source` into the tree rooted at `dest`.
    ///
    /// Walks the source recursively (symlinks not followed, directories
    /// themselves never processed) and, per file: classify, plan the relative
    /// destination, resolve a collision-free name, optionally skip content
    /// duplicates, then move/copy the file (in dry-run mode, report only).
    ///
    /// Individual files that cannot be read or placed are logged and counted
    /// as skipped; the run continues.
    ///
    /// # Errors
    ///
    /// Fails fast, before touching any file, if `source` is missing or not a
    /// directory, or if source and destination overlap (same directory, or
    /// source inside dest). A destination inside the source tree is allowed;
    /// files already under it are counted as processed and skipped.
    pub fn organize(&self, source: &Path, dest: &Path) -> OrganizeResult<RunSummary> {
        let source_root = validate_source(source)?;
        let dest_root = self.resolve_dest(&source_root, dest)?;

        let mut summary = RunSummary::default();
        let mut seen_hashes: HashSet<String> = HashSet::new();
        let spinner = OutputFormatter::scan_spinner();

        for entry in WalkDir::new(&source_root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    OutputFormatter::warning(&format!("Skipping unreadable entry: {}", e));
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&source_root).unwrap_or(path);
            if !self.filters.should_include(relative) {
                continue;
            }

            spinner.set_message(relative.display().to_string());
            summary.processed += 1;

            // Guard against re-processing files already organized when the
            // destination lives inside the source tree.
            if path.starts_with(&dest_root) {
                summary.skipped += 1;
                continue;
            }

            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase());
            let category = self.categories.category_for(extension.as_deref());
            let rel_dir = planner::plan_relative_dir(
                category.dir_name(),
                self.options.by_date,
                extension.as_deref(),
            );
            let file_name = entry.file_name().to_string_lossy();
            let final_path = planner::resolve_collision(&dest_root, &rel_dir, &file_name);

            if self.options.skip_duplicates && self.is_duplicate(path, &mut seen_hashes) {
                summary.skipped += 1;
                continue;
            }

            let (verb, done) = if self.options.copy {
                ("COPY", "copied")
            } else {
                ("MOVE", "moved")
            };

            if self.options.dry_run {
                OutputFormatter::dry_run_notice(&format!(
                    "{} {} -> {}",
                    verb,
                    path.display(),
                    final_path.display()
                ));
                continue;
            }

            match self.place_file(path, &final_path) {
                Ok(()) => {
                    let shown = final_path.strip_prefix(&dest_root).unwrap_or(&final_path);
                    OutputFormatter::success(&format!(
                        "{} {} -> {}",
                        done,
                        file_name,
                        shown.display()
                    ));
                    if self.options.copy {
                        summary.copied += 1;
                    } else {
                        summary.moved += 1;
                    }
                }
                Err(e) => {
                    OutputFormatter::error(&format!(
                        "Could not {} {}: {}",
                        verb.to_lowercase(),
                        path.display(),
                        e
                    ));
                    summary.skipped += 1;
                }
            }
        }

        spinner.finish_and_clear();
        Ok(summary)
    }

    /// Resolves the destination root and rejects overlapping roots.
    ///
    /// On a real run the root is created up front so the overlap guard and
    /// the per-entry ancestry check both work on a canonical path; dry-run
    /// never creates it.
    fn resolve_dest(&self, source_root: &Path, dest: &Path) -> OrganizeResult<PathBuf> {
        let resolved = if dest.exists() {
            dest.canonicalize()
        } else {
            std::path::absolute(dest)
        }
        .map_err(|e| OrganizeError::InvalidDest {
            path: dest.to_path_buf(),
            source: e,
        })?;

        if resolved == *source_root || source_root.starts_with(&resolved) {
            return Err(OrganizeError::OverlappingRoots {
                source: source_root.to_path_buf(),
                dest: resolved,
            });
        }

        if !self.options.dry_run && !resolved.exists() {
            fs::create_dir_all(&resolved).map_err(|e| OrganizeError::InvalidDest {
                path: resolved.clone(),
                source: e,
            })?;
        }

        Ok(resolved)
    }

    /// Digests the file and checks it against the run's seen-hash set.
    ///
    /// A digest failure is logged and treated as "not a duplicate" so a
    /// single unreadable file never aborts the run.
    fn is_duplicate(&self, path: &Path, seen_hashes: &mut HashSet<String>) -> bool {
        match hasher::digest_file(path) {
            Ok(digest) => {
                if seen_hashes.contains(&digest) {
                    OutputFormatter::skip(&format!(
                        "duplicate (sha256={}…): {}",
                        &digest[..8],
                        path.display()
                    ));
                    true
                } else {
                    seen_hashes.insert(digest);
                    false
                }
            }
            Err(e) => {
                OutputFormatter::warning(&format!(
                    "Could not hash {}: {}; treating as unique",
                    path.display(),
                    e
                ));
                false
            }
        }
    }

    /// Creates the destination directory and executes the copy or move.
    fn place_file(&self, src: &Path, dest: &Path) -> io::Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        if self.options.copy {
            copy_with_mtime(src, dest)
        } else {
            move_file(src, dest)
        }
    }
}

/// Validates that the source exists and is a directory, and canonicalizes it.
fn validate_source(source: &Path) -> OrganizeResult<PathBuf> {
    if !source.is_dir() {
        return Err(OrganizeError::InvalidSource {
            path: source.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not an existing directory"),
        });
    }
    source
        .canonicalize()
        .map_err(|e| OrganizeError::InvalidSource {
            path: source.to_path_buf(),
            source: e,
        })
}

/// Copies `src` to `dest`, carrying the source modification time over.
fn copy_with_mtime(src: &Path, dest: &Path) -> io::Result<()> {
    let modified = fs::metadata(src)?.modified().ok();
    fs::copy(src, dest)?;
    if let Some(modified) = modified {
        let file = fs::OpenOptions::new().write(true).open(dest)?;
        file.set_modified(modified)?;
    }
    Ok(())
}

fn is_cross_device_error(err: &io::Error) -> bool {
    match err.raw_os_error() {
        Some(code) if code == 18 => true, // POSIX EXDEV
        Some(code) if code == 17 => true, // Windows ERROR_NOT_SAME_DEVICE
        _ => false,
    }
}

/// Moves `src` to `dest`: an atomic rename where possible, falling back to
/// copy-then-remove when source and destination are on different filesystems.
/// A partial copy left by a failed fallback is removed.
fn move_file(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(err) if is_cross_device_error(&err) => match copy_with_mtime(src, dest) {
            Ok(()) => fs::remove_file(src),
            Err(copy_err) => {
                let _ = fs::remove_file(dest);
                Err(copy_err)
            }
        },
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn organizer<'a>(
        options: OrganizeOptions,
        categories: &'a CategoryMap,
        filters: &'a CompiledFilters,
    ) -> Organizer<'a> {
        Organizer::new(options, categories, filters)
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let categories = CategoryMap::default();
        let filters = CompiledFilters::default();
        let dest = TempDir::new().expect("Failed to create temp directory");

        let result = organizer(OrganizeOptions::default(), &categories, &filters)
            .organize(Path::new("/no/such/source"), dest.path());
        assert!(matches!(result, Err(OrganizeError::InvalidSource { .. })));
    }

    #[test]
    fn test_source_that_is_a_file_is_fatal() {
        let categories = CategoryMap::default();
        let filters = CompiledFilters::default();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, b"x").expect("Failed to write file");

        let result = organizer(OrganizeOptions::default(), &categories, &filters)
            .organize(&file, temp_dir.path());
        assert!(matches!(result, Err(OrganizeError::InvalidSource { .. })));
    }

    #[test]
    fn test_source_equals_dest_is_fatal() {
        let categories = CategoryMap::default();
        let filters = CompiledFilters::default();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let result = organizer(OrganizeOptions::default(), &categories, &filters)
            .organize(temp_dir.path(), temp_dir.path());
        assert!(matches!(
            result,
            Err(OrganizeError::OverlappingRoots { .. })
        ));
    }

    #[test]
    fn test_source_inside_dest_is_fatal() {
        let categories = CategoryMap::default();
        let filters = CompiledFilters::default();
        let dest = TempDir::new().expect("Failed to create temp directory");
        let source = dest.path().join("inbox");
        fs::create_dir(&source).expect("Failed to create source");

        let result = organizer(OrganizeOptions::default(), &categories, &filters)
            .organize(&source, dest.path());
        assert!(matches!(
            result,
            Err(OrganizeError::OverlappingRoots { .. })
        ));
    }

    #[test]
    fn test_move_file_renames_within_filesystem() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let src = temp_dir.path().join("a.txt");
        let dest = temp_dir.path().join("b.txt");
        fs::write(&src, b"payload").expect("Failed to write file");

        move_file(&src, &dest).expect("Failed to move");
        assert!(!src.exists());
        assert_eq!(fs::read(&dest).expect("Failed to read"), b"payload");
    }

    #[test]
    fn test_copy_preserves_modification_time() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let src = temp_dir.path().join("a.txt");
        let dest = temp_dir.path().join("b.txt");
        fs::write(&src, b"payload").expect("Failed to write file");

        copy_with_mtime(&src, &dest).expect("Failed to copy");

        let src_mtime = fs::metadata(&src)
            .and_then(|m| m.modified())
            .expect("Failed to stat src");
        let dest_mtime = fs::metadata(&dest)
            .and_then(|m| m.modified())
            .expect("Failed to stat dest");
        assert_eq!(src_mtime, dest_mtime);
        assert!(src.exists());
    }
}
