use anyhow::Result;
use crate::error_helpers;
use crate::rules::{self, Rule};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Lock file rewritten when mixfix runs without arguments
pub const LOCK_FILE: &str = "mix.lock";

/// Permission bits for the lock file if the write has to create it
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

#[derive(Debug, Clone, PartialEq)]
pub struct LineChange {
    pub line_number: usize,  // 1-based
    pub rule: &'static Rule,
    pub old_content: Vec<u8>,
    pub new_content: Vec<u8>,
}

#[derive(Debug)]
pub struct FileDiff {
    pub file_path: String,
    pub changes: Vec<LineChange>,
    pub content: Vec<u8>,  // Rewritten file content
}

impl FileDiff {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Split on `\n` without keeping the delimiter
///
/// Empty input gives a single empty line and a trailing `\n` gives a trailing
/// empty line, so `join_lines(&split_lines(x)) == x` for every input.
pub fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    content.split(|b| *b == b'\n').collect()
}

pub fn join_lines<L: AsRef<[u8]>>(lines: &[L]) -> Vec<u8> {
    let mut out = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        out.extend_from_slice(line.as_ref());
    }
    out
}

/// Apply the rules to every line of `content`
///
/// Returns the rewritten content and one [`LineChange`] per replaced line.
pub fn rewrite_content(content: &[u8]) -> (Vec<u8>, Vec<LineChange>) {
    let mut lines: Vec<&[u8]> = split_lines(content);
    let mut changes = Vec::new();

    for (i, line) in lines.iter_mut().enumerate() {
        let Some(rule) = rules::match_rule(*line) else {
            continue;
        };

        let replacement = rule.replace.as_bytes();
        if *line != replacement {
            changes.push(LineChange {
                line_number: i + 1,
                rule,
                old_content: line.to_vec(),
                new_content: replacement.to_vec(),
            });
        }
        *line = replacement;
    }

    (join_lines(&lines), changes)
}

/// Rewrites a lock file in place
pub struct LineRewriter {
    path: PathBuf,
}

impl Default for LineRewriter {
    fn default() -> Self {
        Self::new(LOCK_FILE)
    }
}

impl LineRewriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compute the rewrite without touching the file
    pub fn preview(&self) -> Result<FileDiff> {
        let original = fs::read(&self.path)
            .map_err(|e| io_failure(e, &self.path, "reading"))?;
        tracing::debug!(path = %self.path.display(), bytes = original.len(), "read lock file");

        let (content, changes) = rewrite_content(&original);
        for change in &changes {
            tracing::debug!(line = change.line_number, rule = change.rule.name, "replacing line");
        }

        Ok(FileDiff {
            file_path: self.path.display().to_string(),
            changes,
            content,
        })
    }

    /// Read, rewrite and write back the file
    ///
    /// The file is always written, even when no line matched. A failed read
    /// leaves the file untouched; a failed write is not rolled back.
    pub fn rewrite(&self) -> Result<FileDiff> {
        let diff = self.preview()?;

        self.write_all(&diff.content)
            .map_err(|e| io_failure(e, &self.path, "writing"))?;
        tracing::debug!(path = %self.path.display(), bytes = diff.content.len(), "wrote lock file");
        tracing::info!(path = %self.path.display(), replaced = diff.changes.len(), "rewrite complete");

        Ok(diff)
    }

    fn write_all(&self, content: &[u8]) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }

        let mut file = options.open(&self.path)?;
        file.write_all(content)?;
        file.flush()
    }
}

/// Wrap an IO error with a message naming the path and the failed step
fn io_failure(err: io::Error, path: &Path, operation: &str) -> anyhow::Error {
    let msg = error_helpers::describe(&err, path, operation);
    anyhow::Error::new(err).context(msg)
}

/// Rewrite the lock file at `path`
pub fn rewrite(path: &Path) -> Result<FileDiff> {
    LineRewriter::new(path).rewrite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{EX_ABI, EX_KECCAK};
    use tempfile::TempDir;

    fn lock_with(lines: &[&str]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_split_join_round_trip() {
        for input in ["", "\n", "a", "a\n", "a\nb", "\n\na\n\n", "a\r\nb\r\n"] {
            let lines = split_lines(input.as_bytes());
            assert_eq!(join_lines(&lines), input.as_bytes(), "input: {:?}", input);
        }
    }

    #[test]
    fn test_split_empty_and_trailing() {
        assert_eq!(split_lines(b""), vec![&b""[..]]);
        assert_eq!(split_lines(b"a\n"), vec![&b"a"[..], &b""[..]]);
    }

    #[test]
    fn test_rewrite_content_targeted_replacement() {
        let input = lock_with(&[
            "%{",
            EX_ABI.search,
            "  \"jason\": {:hex, :jason, \"1.4.1\"},",
            "}",
            "",
        ]);

        let (output, changes) = rewrite_content(input.as_bytes());
        let expected = lock_with(&[
            "%{",
            EX_ABI.replace,
            "  \"jason\": {:hex, :jason, \"1.4.1\"},",
            "}",
            "",
        ]);

        assert_eq!(String::from_utf8(output).unwrap(), expected);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].line_number, 2);
        assert_eq!(changes[0].rule, &EX_ABI);
        assert_eq!(changes[0].old_content, EX_ABI.search.as_bytes());
    }

    #[test]
    fn test_rewrite_content_both_rules() {
        let abi_line = format!("  {}", EX_ABI.search);
        let keccak_line = format!("  {}", EX_KECCAK.search);
        let input = lock_with(&["%{", abi_line.as_str(), keccak_line.as_str(), "}"]);

        let (output, changes) = rewrite_content(input.as_bytes());

        assert_eq!(
            String::from_utf8(output).unwrap(),
            lock_with(&["%{", EX_ABI.replace, EX_KECCAK.replace, "}"])
        );
        let rules: Vec<_> = changes.iter().map(|c| c.rule.name).collect();
        assert_eq!(rules, vec!["ex_abi", "ex_keccak"]);
    }

    #[test]
    fn test_rewrite_content_priority() {
        let line = format!("{} {}", EX_KECCAK.search, EX_ABI.search);
        let (output, changes) = rewrite_content(line.as_bytes());
        assert_eq!(output, EX_ABI.replace.as_bytes());
        assert_eq!(changes[0].rule, &EX_ABI);
    }

    #[test]
    fn test_rewrite_content_no_match() {
        let input = "%{\n  \"jason\": {:hex, :jason, \"1.4.1\"},\n}\n";
        let (output, changes) = rewrite_content(input.as_bytes());
        assert_eq!(output, input.as_bytes());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_rewrite_content_non_utf8() {
        let mut input = b"\xff\xfe\n".to_vec();
        input.extend_from_slice(EX_KECCAK.search.as_bytes());
        input.extend_from_slice(b"\n\xc3\x28");

        let (output, changes) = rewrite_content(&input);

        let mut expected = b"\xff\xfe\n".to_vec();
        expected.extend_from_slice(EX_KECCAK.replace.as_bytes());
        expected.extend_from_slice(b"\n\xc3\x28");
        assert_eq!(output, expected);
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_rewrite_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(LOCK_FILE);
        let input = lock_with(&["%{", EX_KECCAK.search, "}", ""]);
        fs::write(&path, &input).unwrap();

        let diff = rewrite(&path).unwrap();

        assert!(diff.has_changes());
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, lock_with(&["%{", EX_KECCAK.replace, "}", ""]));
    }

    #[test]
    fn test_rewrite_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(LOCK_FILE);
        fs::write(&path, "").unwrap();

        let diff = rewrite(&path).unwrap();

        assert!(!diff.has_changes());
        assert_eq!(fs::read(&path).unwrap(), b"");
    }

    #[test]
    fn test_preview_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(LOCK_FILE);
        fs::write(&path, EX_ABI.search).unwrap();

        let diff = LineRewriter::new(&path).preview().unwrap();

        assert_eq!(diff.changes.len(), 1);
        assert_eq!(diff.content, EX_ABI.replace.as_bytes());
        assert_eq!(fs::read_to_string(&path).unwrap(), EX_ABI.search);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(LOCK_FILE);

        let err = rewrite(&path).unwrap_err();

        let io_err = err.root_cause().downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("File not found"));
        assert!(!path.exists(), "failed read must not create the file");
    }

    #[test]
    fn test_write_failure_is_io_error() {
        // Writing over a directory fails regardless of the caller's privileges
        let temp_dir = TempDir::new().unwrap();
        let rewriter = LineRewriter::new(temp_dir.path());

        let io_err = rewriter.write_all(b"%{\n}\n").unwrap_err();
        let err = io_failure(io_err, rewriter.path(), "writing");

        let root = err.root_cause().downcast_ref::<io::Error>().unwrap();
        assert_ne!(root.kind(), io::ErrorKind::NotFound);
        let msg = err.to_string();
        assert!(
            msg.starts_with("Failed writing") || msg.starts_with("Permission denied when writing"),
            "unexpected message: {}",
            msg
        );
        assert!(msg.contains(&temp_dir.path().display().to_string()));
        assert!(temp_dir.path().is_dir());
    }

    #[test]
    fn test_default_path_is_mix_lock() {
        let rewriter = LineRewriter::default();
        assert_eq!(rewriter.path(), Path::new("mix.lock"));
    }
}
