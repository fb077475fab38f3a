//! Destination planning: relative directory layout and collision-free names.
//!
//! The layout produced under the destination root is
//! `<Category>/[<YYYY-MM-DD>/]<EXT-UPPER-or-MISC>/<filename>[ (N)]<ext>`.

use std::path::{Path, PathBuf};

/// Directory segment used for files without an extension.
const NO_EXTENSION_SEGMENT: &str = "MISC";

/// Builds the relative destination directory for a file.
///
/// Segments, in order: the category directory name; today's local date as
/// `YYYY-MM-DD` when `by_date` is set; the extension uppercased, or `MISC`
/// for files with no extension. The date segment makes this depend on the
/// wall clock, an accepted once-per-run impurity.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use tidymove::planner::plan_relative_dir;
///
/// assert_eq!(
///     plan_relative_dir("Images", false, Some("jpg")),
///     PathBuf::from("Images/JPG")
/// );
/// assert_eq!(
///     plan_relative_dir("Other", false, None),
///     PathBuf::from("Other/MISC")
/// );
/// ```
pub fn plan_relative_dir(category_dir: &str, by_date: bool, extension: Option<&str>) -> PathBuf {
    let mut rel = PathBuf::from(category_dir);
    if by_date {
        rel.push(chrono::Local::now().format("%Y-%m-%d").to_string());
    }
    match extension {
        Some(ext) => rel.push(ext.trim_start_matches('.').to_uppercase()),
        None => rel.push(NO_EXTENSION_SEGMENT),
    }
    rel
}

/// Computes a collision-free absolute destination path for `file_name` under
/// `dest_root/relative_dir`.
///
/// If the name is free it is returned unchanged; otherwise ` (1)`, ` (2)`, …
/// are appended to the stem until a free name is found. The probe runs
/// against the live filesystem on every call, since two files with the same
/// name from different source subdirectories can land in the same destination
/// folder within one run.
///
/// This function never creates directories; a missing destination directory
/// simply means the first candidate is free.
pub fn resolve_collision(dest_root: &Path, relative_dir: &Path, file_name: &str) -> PathBuf {
    let base = dest_root.join(relative_dir);
    let candidate = base.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let suffix = name
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    let mut n = 1u32;
    loop {
        let alt = base.join(format!("{stem} ({n}){suffix}"));
        if !alt.exists() {
            return alt;
        }
        n += 1;
    }
}
