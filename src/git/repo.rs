use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

// ── Repo info ──

/// Get the repository root directory for a specific path
pub fn repo_root_in(dir: &str) -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output()
        .context(format!("Failed to run git in '{}'", dir))?;

    if !output.status.success() {
        anyhow::bail!("Not a git repository: {}", dir);
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

// ── Changed files ──

/// List paths changed between `base` and the working tree.
/// This is the one startup call whose failure is fatal: with no file list
/// there is nothing to display.
pub fn changed_files(repo_root: &str, base: &str) -> Result<Vec<String>> {
    let output = Command::new("git")
        .args(["diff", "--name-only", base])
        .current_dir(repo_root)
        .output()
        .context("Failed to run git diff --name-only")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git diff --name-only failed: {}", stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

// ── File contents ──

/// Fetch a file's content at a given revision via `git show ref:path`.
/// A failure means the file does not exist on that side (newly created),
/// which is represented as empty content rather than an error.
pub fn file_at_ref(repo_root: &str, reference: &str, path: &str) -> String {
    let spec = format!("{}:{}", reference, path);
    let output = Command::new("git")
        .args(["show", &spec])
        .current_dir(repo_root)
        .output();

    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).to_string(),
        _ => String::new(),
    }
}

/// Read a file's current content from the working tree.
/// A missing file (deleted in this change) is empty content.
pub fn working_file(repo_root: &str, path: &str) -> String {
    std::fs::read_to_string(Path::new(repo_root).join(path)).unwrap_or_default()
}

// ── Per-file diff ──

/// Get the raw unified diff for a single path. Unlike content fetches, a
/// failure here is surfaced: the caller reports it and skips the path.
pub fn diff_raw_file(repo_root: &str, base: &str, path: &str, context: usize) -> Result<String> {
    let unified = format!("--unified={}", context);
    let output = Command::new("git")
        .args(["diff", &unified, "--no-color", "--no-ext-diff", base, "--", path])
        .current_dir(repo_root)
        .output()
        .context("Failed to run git diff")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git diff failed for '{}': {}", path, stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a scratch repo with one committed file; returns None when git
    /// is unavailable so these tests degrade to no-ops.
    fn scratch_repo() -> Option<tempfile::TempDir> {
        let dir = tempfile::tempdir().ok()?;
        let root = dir.path();

        let git = |args: &[&str]| {
            Command::new("git")
                .args(args)
                .current_dir(root)
                .output()
                .ok()
                .filter(|o| o.status.success())
        };

        git(&["init", "-q"])?;
        std::fs::write(root.join("a.txt"), "one\ntwo\nthree\n").ok()?;
        git(&["add", "a.txt"])?;
        git(&[
            "-c",
            "user.name=test",
            "-c",
            "user.email=test@example.com",
            "commit",
            "-q",
            "-m",
            "init",
        ])?;

        Some(dir)
    }

    #[test]
    fn changed_files_lists_modified_paths() {
        let Some(dir) = scratch_repo() else { return };
        let root = dir.path().to_string_lossy().to_string();

        std::fs::write(dir.path().join("a.txt"), "one\nTWO\nthree\n").unwrap();

        let files = changed_files(&root, "HEAD").unwrap();
        assert_eq!(files, vec!["a.txt".to_string()]);
    }

    #[test]
    fn file_at_ref_returns_committed_content() {
        let Some(dir) = scratch_repo() else { return };
        let root = dir.path().to_string_lossy().to_string();

        std::fs::write(dir.path().join("a.txt"), "changed\n").unwrap();

        assert_eq!(file_at_ref(&root, "HEAD", "a.txt"), "one\ntwo\nthree\n");
        assert_eq!(working_file(&root, "a.txt"), "changed\n");
    }

    #[test]
    fn missing_file_is_empty_content() {
        let Some(dir) = scratch_repo() else { return };
        let root = dir.path().to_string_lossy().to_string();

        // Not present at HEAD (new file) and not present on disk (deleted)
        assert_eq!(file_at_ref(&root, "HEAD", "nope.txt"), "");
        assert_eq!(working_file(&root, "nope.txt"), "");
    }

    #[test]
    fn diff_raw_file_produces_hunks() {
        let Some(dir) = scratch_repo() else { return };
        let root = dir.path().to_string_lossy().to_string();

        std::fs::write(dir.path().join("a.txt"), "one\nTWO\nthree\n").unwrap();

        let raw = diff_raw_file(&root, "HEAD", "a.txt", 0).unwrap();
        assert!(raw.contains("diff --git"));
        assert!(raw.contains("@@"));
        assert!(raw.contains("-two"));
        assert!(raw.contains("+TWO"));
    }

    #[test]
    fn repo_root_resolves_the_toplevel() {
        let Some(dir) = scratch_repo() else { return };

        let root = repo_root_in(&dir.path().to_string_lossy()).unwrap();
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(std::path::Path::new(&root).canonicalize().unwrap(), expected);
    }
}
