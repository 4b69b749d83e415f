/*!
 * Batch planning for translation requests.
 *
 * The API accepts a bounded number of texts per call and a bounded total
 * character volume. This module splits an ordered list of texts into batches
 * that respect both limits while preserving order.
 */

/// Split `texts` into ordered batches.
///
/// A batch accumulates texts while it holds fewer than `max_items` entries
/// and adding the next text keeps the cumulative character count within
/// `max_chars`. A batch always holds at least one text, so a single text
/// longer than `max_chars` still ships alone rather than stalling the run.
pub fn plan_batches(texts: &[String], max_items: usize, max_chars: usize) -> Vec<Vec<String>> {
    let mut batches = Vec::new();
    let mut index = 0;

    while index < texts.len() {
        let mut batch = Vec::new();
        let mut batch_chars = 0usize;

        while index < texts.len() && batch.len() < max_items {
            let next_len = texts[index].chars().count();
            if !batch.is_empty() && batch_chars + next_len > max_chars {
                break;
            }
            batch_chars += next_len;
            batch.push(texts[index].clone());
            index += 1;
        }

        batches.push(batch);
    }

    batches
}
