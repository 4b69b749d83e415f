/*!
 * Tests for cross-tree relative-path math
 */

use std::path::Path;

use uzmirror::relpath::{depth, href_to_source, href_to_target, rel_path_string};

#[test]
fn test_depth_withRootFile_shouldBeZero() {
    assert_eq!(depth("index.html"), 0);
}

#[test]
fn test_depth_withNestedFile_shouldCountSeparators() {
    assert_eq!(depth("a/b/c.html"), 2);
    assert_eq!(depth("dlya_professionalov/dokumentacziya.html"), 1);
}

#[test]
fn test_hrefToSource_withNestedFile_shouldGoUpDepthPlusOne() {
    assert_eq!(href_to_source("a/b/c.html"), "../../../a/b/c.html");
}

#[test]
fn test_hrefToSource_withRootFile_shouldGoUpOnce() {
    assert_eq!(href_to_source("index.html"), "../index.html");
}

#[test]
fn test_hrefToTarget_withNestedFile_shouldGoUpDepthLevels() {
    assert_eq!(href_to_target("a/b/c.html", "uz"), "../../uz/a/b/c.html");
}

#[test]
fn test_hrefToTarget_withRootFile_shouldHaveNoUpLevels() {
    assert_eq!(href_to_target("index.html", "uz"), "uz/index.html");
}

#[test]
fn test_relPathString_withNestedPath_shouldUseForwardSlashes() {
    let path = Path::new("docs").join("guide").join("page.html");
    assert_eq!(rel_path_string(&path), "docs/guide/page.html");
}
