//! Added-line detection between two versions of a document.

use similar::{Algorithm, ChangeTag, TextDiff};

/// Content present in `after` but not in `before`, as line blocks.
///
/// Lines are compared without their terminators, so appending to a file
/// whose last line lacked a newline does not report that line as changed.
/// A run of inserted lines that is contiguous in `after` is returned as one
/// block, exactly as it appears in `after` minus its final line terminator,
/// so a CRLF document yields `\r\n` between the lines of a block. Blocks that
/// are empty or only whitespace are dropped. Blocks keep the order in which
/// they appear in `after`.
#[must_use]
pub fn find_differences(before: &str, after: &str) -> Vec<String> {
    if before == after {
        return Vec::new();
    }

    let old_lines: Vec<&str> = before.lines().collect();
    let new_lines: Vec<&str> = after.lines().collect();
    // Same lines as `new_lines`, terminators included.
    let raw_lines: Vec<&str> = after.split_inclusive('\n').collect();
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(old_lines.as_slice(), new_lines.as_slice());

    let mut blocks: Vec<String> = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for change in diff.iter_all_changes() {
        if change.tag() != ChangeTag::Insert {
            continue;
        }
        let Some(index) = change.new_index() else {
            continue;
        };
        current = match current {
            Some((first, last)) if last + 1 == index => Some((first, index)),
            Some(run) => {
                flush_block(&raw_lines[run.0..=run.1], &mut blocks);
                Some((index, index))
            }
            None => Some((index, index)),
        };
    }
    if let Some((first, last)) = current {
        flush_block(&raw_lines[first..=last], &mut blocks);
    }

    blocks
}

fn flush_block(lines: &[&str], blocks: &mut Vec<String>) {
    let joined = lines.concat();
    let block = joined
        .strip_suffix('\n')
        .map_or(joined.as_str(), |b| b.strip_suffix('\r').unwrap_or(b));
    if !block.trim().is_empty() {
        blocks.push(block.to_string());
    }
}

/// Compute diff stats (added and removed lines) between two texts.
#[must_use]
pub fn compute_diff_stats(before: &str, after: &str) -> (u32, u32) {
    let old_lines: Vec<&str> = before.lines().collect();
    let new_lines: Vec<&str> = after.lines().collect();
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(old_lines.as_slice(), new_lines.as_slice());

    let mut additions: u32 = 0;
    let mut deletions: u32 = 0;

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => additions += 1,
            ChangeTag::Delete => deletions += 1,
            ChangeTag::Equal => {}
        }
    }

    (additions, deletions)
}
