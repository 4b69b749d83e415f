/*!
 * Relative-path math shared by both link-injection passes.
 *
 * The mirrored tree is rooted one directory level below the site root, so a
 * translated page always sits one level deeper than its source counterpart at
 * the same relative position. Hrefs between the two trees are chains of `../`
 * whose length is a function of the page's depth.
 */

use std::path::Path;

/// Depth of a root-relative path: the number of `/` separators.
///
/// Root-level files have depth 0.
pub fn depth(rel_path: &str) -> usize {
    rel_path.matches('/').count()
}

/// Href from a translated page to its source-language counterpart.
///
/// The translated page lives under `<target-subdir>/<rel_path>`, one level
/// deeper than the source page at `<rel_path>`, hence `depth + 1` up-levels.
pub fn href_to_source(rel_path: &str) -> String {
    format!("{}{}", "../".repeat(depth(rel_path) + 1), rel_path)
}

/// Href from a source-language page to its translated counterpart.
pub fn href_to_target(rel_path: &str, target_subdir: &str) -> String {
    format!(
        "{}{}/{}",
        "../".repeat(depth(rel_path)),
        target_subdir,
        rel_path
    )
}

/// Render a path relative to the site root as a forward-slash string.
///
/// Component-wise join, so the result is stable across platforms.
pub fn rel_path_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
