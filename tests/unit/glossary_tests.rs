/*!
 * Tests for glossary substitution rules
 */

use uzmirror::glossary::{Glossary, GlossaryMode, GlossaryRule};

use crate::common::{create_temp_dir, create_test_file};

fn exact(source: &str, target: &str) -> GlossaryRule {
    GlossaryRule {
        source: source.to_string(),
        target: target.to_string(),
        mode: GlossaryMode::Exact,
    }
}

fn regex(source: &str, target: &str) -> GlossaryRule {
    GlossaryRule {
        source: source.to_string(),
        target: target.to_string(),
        mode: GlossaryMode::Regex,
    }
}

#[test]
fn test_applyPre_withExactRule_shouldReplaceEveryOccurrence() {
    let glossary = Glossary::new(vec![exact("Даногипс", "Danogips")]);
    let result = glossary.apply_pre("Даногипс и снова Даногипс");
    assert_eq!(result, "Danogips и снова Danogips");
}

#[test]
fn test_applyPre_withOrderedRules_shouldApplyInFileOrder() {
    // The second rule sees the first rule's output
    let glossary = Glossary::new(vec![exact("аб", "x"), exact("xв", "y")]);
    assert_eq!(glossary.apply_pre("абв"), "y");

    // Reversed order gives a different result
    let reversed = Glossary::new(vec![exact("xв", "y"), exact("аб", "x")]);
    assert_eq!(reversed.apply_pre("абв"), "xв");
}

#[test]
fn test_applyPre_withRegexRule_shouldSubstituteMatches() {
    let glossary = Glossary::new(vec![regex(r"\d{4}-\d{2}-\d{2}", "<sana>")]);
    let result = glossary.apply_pre("Дата: 2024-01-15 и 2024-02-20");
    assert_eq!(result, "Дата: <sana> и <sana>");
}

#[test]
fn test_applyPre_withInvalidRegex_shouldSkipRuleAndContinue() {
    let glossary = Glossary::new(vec![regex("([unclosed", "oops"), exact("Мир", "Dunyo")]);
    // Invalid pattern leaves the text untouched; later rules still run
    assert_eq!(glossary.apply_pre("Привет Мир"), "Привет Dunyo");
}

#[test]
fn test_applyPost_withExactRules_shouldBeIdentity() {
    let glossary = Glossary::new(vec![exact("Даногипс", "Danogips"), exact("КНАУФ", "KNAUF")]);
    let text = "Danogips mahsulotlari va KNAUF plitalari";
    assert_eq!(glossary.apply_post(text), text);
}

#[test]
fn test_applyPost_withRegexRule_shouldIgnoreIt() {
    let glossary = Glossary::new(vec![regex("a+", "b")]);
    assert_eq!(glossary.apply_post("aaa"), "aaa");
}

#[test]
fn test_load_withCsvFile_shouldSkipHeaderAndShortRows() {
    let temp_dir = create_temp_dir().unwrap();
    let path = create_test_file(
        &temp_dir.path().to_path_buf(),
        "glossary.csv",
        "source,target,mode\n\
         Даногипс,Danogips,dt\n\
         only-two-fields,oops\n\
         гипсокартон,gipsokarton,exact\n\
         [0-9]+ мм,$0 mm,regex\n",
    )
    .unwrap();

    let glossary = Glossary::load(&path).unwrap();
    assert_eq!(glossary.len(), 3);
    assert_eq!(glossary.apply_pre("Даногипс"), "Danogips");
}

#[test]
fn test_load_withUnknownMode_shouldIgnoreRow() {
    let temp_dir = create_temp_dir().unwrap();
    let path = create_test_file(
        &temp_dir.path().to_path_buf(),
        "glossary.csv",
        "source,target,mode\nПривет,Salom,fuzzy\n",
    )
    .unwrap();

    let glossary = Glossary::load(&path).unwrap();
    assert!(glossary.is_empty());
}

#[test]
fn test_load_withMissingFile_shouldReturnEmptyGlossary() {
    let temp_dir = create_temp_dir().unwrap();
    let glossary = Glossary::load(temp_dir.path().join("nope.csv")).unwrap();
    assert!(glossary.is_empty());
    assert_eq!(glossary.apply_pre("Привет"), "Привет");
}
