/*!
 * Tests for batch planning under count and character limits
 */

use uzmirror::translation::batch::plan_batches;

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_planBatches_withCountLimit_shouldSplitBySize() {
    let input = texts(&["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc", "dddddddddd", "eeeeeeeeee"]);
    let batches = plan_batches(&input, 2, 100);

    let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[test]
fn test_planBatches_withCharLimit_shouldSplitByVolume() {
    let input = texts(&[&"a".repeat(60), &"b".repeat(60), &"c".repeat(30)]);
    let batches = plan_batches(&input, 10, 100);

    let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![1, 2]);
}

#[test]
fn test_planBatches_withOversizedSingleText_shouldShipItAlone() {
    let input = texts(&[&"a".repeat(500), "short"]);
    let batches = plan_batches(&input, 10, 100);

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0][0].len(), 500);
    assert_eq!(batches[1], vec!["short".to_string()]);
}

#[test]
fn test_planBatches_withAnyInput_shouldPreserveOrder() {
    let input = texts(&["one", "two", "three", "four"]);
    let batches = plan_batches(&input, 3, 1000);

    let flattened: Vec<String> = batches.into_iter().flatten().collect();
    assert_eq!(flattened, input);
}

#[test]
fn test_planBatches_withEmptyInput_shouldReturnNoBatches() {
    let batches = plan_batches(&[], 10, 100);
    assert!(batches.is_empty());
}

#[test]
fn test_planBatches_withMultiByteText_shouldCountCharsNotBytes() {
    // Two 40-char Cyrillic strings fit one 80-char batch even though their
    // UTF-8 byte length is twice that
    let input = texts(&[&"п".repeat(40), &"р".repeat(40)]);
    let batches = plan_batches(&input, 10, 80);
    assert_eq!(batches.len(), 1);
}
