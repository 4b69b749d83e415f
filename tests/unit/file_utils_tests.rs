/*!
 * Tests for file and directory utilities
 */

use std::path::Path;

use uzmirror::file_utils::{FileManager, FileType};

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_detectFileType_withHtmlExtensions_shouldClassifyHtml() {
    assert_eq!(FileManager::detect_file_type(Path::new("a.html")), FileType::Html);
    assert_eq!(FileManager::detect_file_type(Path::new("a.htm")), FileType::Html);
    assert_eq!(FileManager::detect_file_type(Path::new("A.HTML")), FileType::Html);
}

#[test]
fn test_detectFileType_withOtherExtensions_shouldClassifyOther() {
    assert_eq!(FileManager::detect_file_type(Path::new("a.pdf")), FileType::Pdf);
    assert_eq!(FileManager::detect_file_type(Path::new("a.css")), FileType::Other);
    assert_eq!(FileManager::detect_file_type(Path::new("no_extension")), FileType::Other);
}

#[test]
fn test_collectFiles_shouldSkipExcludedSubtree() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    create_test_file(&root, "index.html", "<html></html>").unwrap();
    create_test_file(&root, "docs/page.html", "<html></html>").unwrap();
    create_test_file(&root, "uz/index.html", "<html></html>").unwrap();

    let files = FileManager::collect_files(&root, root.join("uz")).unwrap();

    let mut names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(&root).unwrap().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["docs/page.html", "index.html"]);
}

#[test]
fn test_copyFile_withNestedDestination_shouldCreateParents() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    let src = create_test_file(&root, "style.css", "body {}").unwrap();

    let dest = root.join("uz").join("css").join("style.css");
    FileManager::copy_file(&src, &dest).unwrap();

    assert!(FileManager::file_exists(&dest));
    assert_eq!(std::fs::read(&src).unwrap(), std::fs::read(&dest).unwrap());
}

#[test]
fn test_writeToFile_withNestedPath_shouldCreateParents() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("a").join("b").join("c.txt");

    FileManager::write_to_file(&path, "content").unwrap();

    assert_eq!(FileManager::read_to_string(&path).unwrap(), "content");
}

#[test]
fn test_removeDirIfExists_withMissingDir_shouldSucceed() {
    let temp_dir = create_temp_dir().unwrap();
    assert!(FileManager::remove_dir_if_exists(temp_dir.path().join("nope")).is_ok());
}
