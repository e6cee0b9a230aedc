//! Unified diff parser.
//!
//! Turns raw `git diff` output into per-file hunk records. Parsing never
//! fails: malformed hunk headers drop the hunk, unrecognized lines are
//! ignored, and truncated input degrades to a partial result.

/// A single raw line recorded inside a hunk, tagged by its leading character.
#[derive(Debug, Clone)]
pub struct RawHunkLine {
    pub kind: RawLineKind,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawLineKind {
    Add,
    Delete,
    Context,
}

/// A diff hunk: header plus the old/new line ranges it covers.
#[derive(Debug, Clone)]
pub struct Hunk {
    pub header: String,
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<RawHunkLine>,
}

/// All hunks for one file, in header order.
#[derive(Debug, Clone)]
pub struct FilePatch {
    pub filename: String,
    pub hunks: Vec<Hunk>,
}

impl FilePatch {
    /// Total (added, deleted) line counts across all hunks.
    pub fn stats(&self) -> (usize, usize) {
        let mut adds = 0;
        let mut dels = 0;
        for hunk in &self.hunks {
            for line in &hunk.lines {
                match line.kind {
                    RawLineKind::Add => adds += 1,
                    RawLineKind::Delete => dels += 1,
                    RawLineKind::Context => {}
                }
            }
        }
        (adds, dels)
    }
}

/// Parse unified diff output (one or many files) into per-file hunk records.
pub fn parse_diff(raw: &str) -> Vec<FilePatch> {
    let mut files: Vec<FilePatch> = Vec::new();
    let mut current_file: Option<FilePatch> = None;
    let mut current_hunk: Option<Hunk> = None;

    for line in raw.lines() {
        // New file record: diff --git a/path b/path
        if line.starts_with("diff --git") {
            if let Some(hunk) = current_hunk.take() {
                if let Some(ref mut file) = current_file {
                    file.hunks.push(hunk);
                }
            }
            if let Some(file) = current_file.take() {
                files.push(file);
            }

            current_file = Some(FilePatch {
                filename: parse_filename(line),
                hunks: Vec::new(),
            });
            continue;
        }

        // Hunk header: @@ -old_start[,old_count] +new_start[,new_count] @@
        if line.starts_with("@@") {
            if let Some(hunk) = current_hunk.take() {
                if let Some(ref mut file) = current_file {
                    file.hunks.push(hunk);
                }
            }
            // A malformed header drops the hunk, not the run
            current_hunk = parse_hunk_header(line);
            continue;
        }

        // Content lines only count inside an open hunk; everything else
        // (index, ---, +++, mode changes) is metadata and ignored
        if let Some(ref mut hunk) = current_hunk {
            if let Some(content) = line.strip_prefix('+') {
                hunk.lines.push(RawHunkLine {
                    kind: RawLineKind::Add,
                    content: content.to_string(),
                });
            } else if let Some(content) = line.strip_prefix('-') {
                hunk.lines.push(RawHunkLine {
                    kind: RawLineKind::Delete,
                    content: content.to_string(),
                });
            } else if line.starts_with(' ') || line.is_empty() {
                let content = if line.is_empty() { "" } else { &line[1..] };
                hunk.lines.push(RawHunkLine {
                    kind: RawLineKind::Context,
                    content: content.to_string(),
                });
            }
            // Skip "\ No newline at end of file" and anything else
        }
    }

    // Flush the last open hunk and file
    if let Some(hunk) = current_hunk {
        if let Some(ref mut file) = current_file {
            file.hunks.push(hunk);
        }
    }
    if let Some(file) = current_file {
        files.push(file);
    }

    files
}

/// Extract the filename from "diff --git a/path b/path", stripping the
/// b/ prefix. Falls back to the raw tail if the marker is unusual.
fn parse_filename(line: &str) -> String {
    if let Some(path) = line.rsplit(" b/").next() {
        if !path.starts_with("diff --git") {
            return path.to_string();
        }
    }
    line.strip_prefix("diff --git ")
        .unwrap_or(line)
        .split_whitespace()
        .next_back()
        .unwrap_or("")
        .trim_start_matches("a/")
        .trim_start_matches("b/")
        .to_string()
}

/// Parse a hunk header like "@@ -10,4 +10,15 @@ fn foo()".
/// Returns None (hunk dropped) when the ranges do not decode.
fn parse_hunk_header(line: &str) -> Option<Hunk> {
    let after = line.strip_prefix("@@ ")?;
    let end_idx = after.find(" @@")?;
    let range_str = &after[..end_idx];

    let parts: Vec<&str> = range_str.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }

    let (old_start, old_count) = parse_range(parts[0].strip_prefix('-')?)?;
    let (new_start, new_count) = parse_range(parts[1].strip_prefix('+')?)?;

    Some(Hunk {
        header: line.to_string(),
        old_start,
        old_count,
        new_start,
        new_count,
        lines: Vec::new(),
    })
}

/// Parse "start,count" or just "start" (count defaults to 1 per the
/// unified diff format).
fn parse_range(s: &str) -> Option<(usize, usize)> {
    if let Some((start, count)) = s.split_once(',') {
        Some((start.parse().ok()?, count.parse().ok()?))
    } else {
        Some((s.parse().ok()?, 1))
    }
}
