//! Line alignment engine.
//!
//! Re-projects a file's parsed hunks onto the complete old and new file
//! contents, producing one gap-free sequence of classified line pairs that
//! spans the whole file. Unchanged regions between and around hunks are
//! reconstructed, so the left numbers cover exactly 1..=N_old and the right
//! numbers exactly 1..=N_new, each once and in order.
//!
//! Pairing inside a hunk uses a greedy first-match scan over trimmed
//! content. A new line already linked is never reused, but the scan is not
//! position-aware, so duplicate lines inside one hunk can pair
//! suboptimally. The output is still gap-free; it is just not guaranteed to
//! be the minimal edit script.

use crate::git::FilePatch;
use std::collections::HashMap;

/// Change classification for one aligned line pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Normal,
    Added,
    Removed,
    Modified,
}

/// The atomic unit of the aligned sequence. A pure insertion has no left
/// number, a pure deletion no right number; the absent side's content is
/// empty.
#[derive(Debug, Clone)]
pub struct DiffLine {
    pub left_num: Option<usize>,
    pub right_num: Option<usize>,
    pub left_content: String,
    pub right_content: String,
    pub state: LineState,
}

/// A fully aligned file: every old and new line accounted for.
#[derive(Debug, Clone)]
pub struct DiffFile {
    pub filename: String,
    pub adds: usize,
    pub dels: usize,
    pub lines: Vec<DiffLine>,
}

/// Split file content into lines. `lines()` drops the trailing newline, so
/// empty content maps to zero lines rather than one empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(String::from).collect()
}

/// The 0-based index where a hunk range begins. Zero-count ranges name the
/// line *before* the change point (unified diff convention), so their
/// anchor is the start itself rather than start - 1.
fn range_anchor(start: usize, count: usize) -> usize {
    if count == 0 {
        start
    } else {
        start.saturating_sub(1)
    }
}

/// Greedy pairing of old hunk lines to new hunk lines by trimmed content.
/// Each new line links at most once.
fn match_lines(old: &[String], new: &[String]) -> HashMap<usize, usize> {
    let mut pairs = HashMap::new();
    let mut used = vec![false; new.len()];

    for (i, old_line) in old.iter().enumerate() {
        for (j, new_line) in new.iter().enumerate() {
            if !used[j] && old_line.trim() == new_line.trim() {
                pairs.insert(i, j);
                used[j] = true;
                break;
            }
        }
    }

    pairs
}

/// Align a file's hunks against its full old and new contents.
///
/// Hunk ranges outside the available content are clamped, never an error.
pub fn align_file(patch: &FilePatch, old_content: &str, new_content: &str) -> DiffFile {
    let old_lines = split_lines(old_content);
    let new_lines = split_lines(new_content);
    let (adds, dels) = patch.stats();

    let mut lines: Vec<DiffLine> = Vec::new();
    let mut old_idx = 0usize;
    let mut new_idx = 0usize;

    for hunk in &patch.hunks {
        let old_anchor = range_anchor(hunk.old_start, hunk.old_count).min(old_lines.len());
        let new_anchor = range_anchor(hunk.new_start, hunk.new_count).min(new_lines.len());

        // Untouched region before the hunk: identical on both sides, both
        // cursors advance together
        while old_idx < old_anchor && new_idx < new_anchor {
            lines.push(DiffLine {
                left_num: Some(old_idx + 1),
                right_num: Some(new_idx + 1),
                left_content: old_lines[old_idx].clone(),
                right_content: old_lines[old_idx].clone(),
                state: LineState::Normal,
            });
            old_idx += 1;
            new_idx += 1;
        }

        // Clamp the hunk's sub-ranges to content already past the cursors
        let o_start = old_anchor.max(old_idx);
        let n_start = new_anchor.max(new_idx);
        let old_end = (old_anchor + hunk.old_count).min(old_lines.len()).max(o_start);
        let new_end = (new_anchor + hunk.new_count).min(new_lines.len()).max(n_start);

        let pairs = match_lines(&old_lines[o_start..old_end], &new_lines[n_start..new_end]);

        // Lockstep walk over both sub-ranges
        let mut oi = o_start;
        let mut ni = n_start;
        while oi < old_end || ni < new_end {
            let linked = oi < old_end
                && ni < new_end
                && pairs.get(&(oi - o_start)) == Some(&(ni - n_start));

            if linked {
                let left = old_lines[oi].clone();
                let right = new_lines[ni].clone();
                let state = if left == right {
                    LineState::Normal
                } else {
                    LineState::Modified
                };
                lines.push(DiffLine {
                    left_num: Some(oi + 1),
                    right_num: Some(ni + 1),
                    left_content: left,
                    right_content: right,
                    state,
                });
                oi += 1;
                ni += 1;
            } else if ni < new_end && !pairs.values().any(|&j| j == ni - n_start) {
                lines.push(DiffLine {
                    left_num: None,
                    right_num: Some(ni + 1),
                    left_content: String::new(),
                    right_content: new_lines[ni].clone(),
                    state: LineState::Added,
                });
                ni += 1;
            } else if oi < old_end {
                lines.push(DiffLine {
                    left_num: Some(oi + 1),
                    right_num: None,
                    left_content: old_lines[oi].clone(),
                    right_content: String::new(),
                    state: LineState::Removed,
                });
                oi += 1;
            } else {
                // Remaining new lines whose linked partner was consumed on a
                // crossed pairing; emit them so the sequence stays gap-free
                lines.push(DiffLine {
                    left_num: None,
                    right_num: Some(ni + 1),
                    left_content: String::new(),
                    right_content: new_lines[ni].clone(),
                    state: LineState::Added,
                });
                ni += 1;
            }
        }

        old_idx = old_end.max(old_idx);
        new_idx = new_end.max(new_idx);
    }

    // Untouched region after the last hunk
    while old_idx < old_lines.len() && new_idx < new_lines.len() {
        lines.push(DiffLine {
            left_num: Some(old_idx + 1),
            right_num: Some(new_idx + 1),
            left_content: old_lines[old_idx].clone(),
            right_content: old_lines[old_idx].clone(),
            state: LineState::Normal,
        });
        old_idx += 1;
        new_idx += 1;
    }

    // Inconsistent input (hunks that undercount one side) drains one-sided
    while old_idx < old_lines.len() {
        lines.push(DiffLine {
            left_num: Some(old_idx + 1),
            right_num: None,
            left_content: old_lines[old_idx].clone(),
            right_content: String::new(),
            state: LineState::Removed,
        });
        old_idx += 1;
    }
    while new_idx < new_lines.len() {
        lines.push(DiffLine {
            left_num: None,
            right_num: Some(new_idx + 1),
            left_content: String::new(),
            right_content: new_lines[new_idx].clone(),
            state: LineState::Added,
        });
        new_idx += 1;
    }

    DiffFile {
        filename: patch.filename.clone(),
        adds,
        dels,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::parse_diff;

    fn patch_for(filename: &str, hunk_headers: &[&str]) -> FilePatch {
        let mut raw = format!("diff --git a/{} b/{}\n", filename, filename);
        for header in hunk_headers {
            raw.push_str(header);
            raw.push('\n');
        }
        parse_diff(&raw).remove(0)
    }

    /// Check the core invariants: left numbers are exactly 1..=n_old in
    /// order, right numbers exactly 1..=n_new, and every state matches its
    /// content/presence contract.
    fn assert_invariants(file: &DiffFile, n_old: usize, n_new: usize) {
        let lefts: Vec<usize> = file.lines.iter().filter_map(|l| l.left_num).collect();
        let rights: Vec<usize> = file.lines.iter().filter_map(|l| l.right_num).collect();
        assert_eq!(lefts, (1..=n_old).collect::<Vec<_>>(), "left numbering");
        assert_eq!(rights, (1..=n_new).collect::<Vec<_>>(), "right numbering");

        for line in &file.lines {
            assert!(line.left_num.is_some() || line.right_num.is_some());
            match line.state {
                LineState::Normal => {
                    assert!(line.left_num.is_some() && line.right_num.is_some());
                    assert_eq!(line.left_content, line.right_content);
                }
                LineState::Added => {
                    assert!(line.left_num.is_none() && line.right_num.is_some());
                    assert!(line.left_content.is_empty());
                }
                LineState::Removed => {
                    assert!(line.left_num.is_some() && line.right_num.is_none());
                    assert!(line.right_content.is_empty());
                }
                LineState::Modified => {
                    assert!(line.left_num.is_some() && line.right_num.is_some());
                    assert_ne!(line.left_content, line.right_content);
                }
            }
        }
    }

    #[test]
    fn identical_content_no_hunks_is_all_normal() {
        let patch = patch_for("same.txt", &[]);
        let content = "alpha\nbeta\ngamma\n";
        let file = align_file(&patch, content, content);

        assert_eq!(file.lines.len(), 3);
        assert!(file.lines.iter().all(|l| l.state == LineState::Normal));
        assert_invariants(&file, 3, 3);
    }

    #[test]
    fn single_line_replacement() {
        let patch = patch_for("f.txt", &["@@ -2,1 +2,1 @@", "-b", "+x"]);
        let file = align_file(&patch, "a\nb\nc\n", "a\nx\nc\n");

        assert_invariants(&file, 3, 3);
        assert_eq!(file.lines.first().unwrap().state, LineState::Normal);
        assert_eq!(file.lines.last().unwrap().state, LineState::Normal);
        // "b" vs "x" do not pair, so the middle is an add/remove couple
        let states: Vec<LineState> = file.lines.iter().map(|l| l.state).collect();
        assert!(states.contains(&LineState::Added));
        assert!(states.contains(&LineState::Removed));
        assert_eq!(file.lines.len(), 4);
    }

    #[test]
    fn whitespace_only_change_pairs_as_modified() {
        let patch = patch_for("f.txt", &["@@ -1,1 +1,1 @@", "-  indented", "+indented"]);
        let file = align_file(&patch, "  indented\n", "indented\n");

        assert_invariants(&file, 1, 1);
        assert_eq!(file.lines.len(), 1);
        assert_eq!(file.lines[0].state, LineState::Modified);
    }

    #[test]
    fn identical_pair_inside_hunk_is_normal() {
        // "keep" survives the hunk unchanged; only "old" -> "new" differs
        let patch = patch_for("f.txt", &["@@ -1,2 +1,2 @@", " keep", "-old", "+new"]);
        let file = align_file(&patch, "keep\nold\n", "keep\nnew\n");

        assert_invariants(&file, 2, 2);
        assert_eq!(file.lines[0].state, LineState::Normal);
        assert_eq!(file.lines[0].left_content, "keep");
    }

    #[test]
    fn pure_creation_is_all_added() {
        let patch = patch_for("new.txt", &["@@ -0,0 +1,2 @@", "+a", "+b"]);
        let file = align_file(&patch, "", "a\nb\n");

        assert_invariants(&file, 0, 2);
        assert_eq!(file.lines.len(), 2);
        assert!(file.lines.iter().all(|l| l.state == LineState::Added));
    }

    #[test]
    fn pure_deletion_is_all_removed() {
        let patch = patch_for("gone.txt", &["@@ -1,2 +0,0 @@", "-a", "-b"]);
        let file = align_file(&patch, "a\nb\n", "");

        assert_invariants(&file, 2, 0);
        assert_eq!(file.lines.len(), 2);
        assert!(file.lines.iter().all(|l| l.state == LineState::Removed));
    }

    #[test]
    fn zero_context_insertion_keeps_numbering_gap_free() {
        // -U0 insertion after old line 2: @@ -2,0 +3,1 @@
        let patch = patch_for("f.txt", &["@@ -2,0 +3,1 @@", "+x"]);
        let file = align_file(&patch, "a\nb\nc\n", "a\nb\nx\nc\n");

        assert_invariants(&file, 3, 4);
        assert_eq!(file.lines.len(), 4);
        assert_eq!(file.lines[2].state, LineState::Added);
        assert_eq!(file.lines[2].right_content, "x");
        assert_eq!(file.lines[3].state, LineState::Normal);
    }

    #[test]
    fn zero_context_deletion_keeps_numbering_gap_free() {
        // -U0 deletion of old line 2: @@ -2,1 +1,0 @@
        let patch = patch_for("f.txt", &["@@ -2,1 +1,0 @@", "-b"]);
        let file = align_file(&patch, "a\nb\nc\n", "a\nc\n");

        assert_invariants(&file, 3, 2);
        assert_eq!(file.lines.len(), 3);
        assert_eq!(file.lines[1].state, LineState::Removed);
        assert_eq!(file.lines[1].left_content, "b");
    }

    #[test]
    fn multiple_hunks_reconstruct_gaps_between() {
        let patch = patch_for(
            "f.txt",
            &["@@ -1,1 +1,1 @@", "-one", "+ONE", "@@ -4,1 +4,1 @@", "-four", "+FOUR"],
        );
        let file = align_file(&patch, "one\ntwo\nthree\nfour\nfive\n", "ONE\ntwo\nthree\nFOUR\nfive\n");

        assert_invariants(&file, 5, 5);
        // Lines two, three, five must be reconstructed as Normal
        let normals: Vec<&str> = file
            .lines
            .iter()
            .filter(|l| l.state == LineState::Normal)
            .map(|l| l.left_content.as_str())
            .collect();
        assert_eq!(normals, vec!["two", "three", "five"]);
    }

    #[test]
    fn out_of_bounds_hunk_is_clamped() {
        // Hunk claims ten lines; the files only have two
        let patch = patch_for("f.txt", &["@@ -1,10 +1,10 @@"]);
        let file = align_file(&patch, "a\nb\n", "a\nb\n");

        assert_invariants(&file, 2, 2);
        assert_eq!(file.lines.len(), 2);
    }

    #[test]
    fn swapped_duplicate_lines_stay_gap_free() {
        // Greedy matching links crossed pairs; output is still complete
        let patch = patch_for("f.txt", &["@@ -1,2 +1,2 @@", "-x", "-y", "+y", "+x"]);
        let file = align_file(&patch, "x\ny\n", "y\nx\n");

        assert_invariants(&file, 2, 2);
    }

    #[test]
    fn stats_come_from_hunk_lines() {
        let patch = patch_for("f.txt", &["@@ -1,2 +1,1 @@", "-a", "-b", "+c"]);
        let file = align_file(&patch, "a\nb\n", "c\n");
        assert_eq!((file.adds, file.dels), (1, 2));
    }

    #[test]
    fn split_lines_handles_trailing_newline_and_empty() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert!(split_lines("").is_empty());
    }
}
