//! Prompt/output pair persistence
//!
//! Each completed round is saved as two independent Markdown files sharing a
//! sanitized title stem: `<Stem>.md` in the prompts folder and `<Stem>.md`
//! in the outputs folder. Nothing links the pair after writing; they are
//! reconstructed by filename convention only.

use crate::storage::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

/// Stem used when the title is empty after sanitization
const FALLBACK_TITLE: &str = "Untitled";

/// Reduce a title to a filesystem-safe, capitalized stem.
///
/// Keeps alphanumeric characters, spaces, and underscores, then capitalizes
/// each whitespace-separated word (first char upper, rest lower). The
/// operation is idempotent.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect();

    let prettified = kept
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if prettified.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        prettified
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            // Titlecase, not uppercase: when the uppercase form expands to
            // several chars (e.g. 'ß' -> "SS"), only the first stays upper,
            // so a second pass maps the word onto itself.
            let mut expansion = first.to_uppercase();
            let mut result = String::new();
            if let Some(head) = expansion.next() {
                result.push(head);
            }
            for c in expansion {
                result.extend(c.to_lowercase());
            }
            result.push_str(&chars.as_str().to_lowercase());
            result
        }
        None => String::new(),
    }
}

/// Target paths for one saved round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundFiles {
    pub prompt_path: PathBuf,
    pub output_path: PathBuf,
}

/// Compute the file pair for a title and the two configured folders
pub fn round_files(prompts_folder: &Path, outputs_folder: &Path, title: &str) -> RoundFiles {
    let stem = sanitize_title(title);
    RoundFiles {
        prompt_path: prompts_folder.join(format!("{stem}.md")),
        output_path: outputs_folder.join(format!("{stem}.md")),
    }
}

impl RoundFiles {
    /// True if either target file already exists; the caller must then ask
    /// for overwrite confirmation before writing anything.
    pub fn any_exists(&self) -> bool {
        self.prompt_path.exists() || self.output_path.exists()
    }

    /// Write both files, creating the folders if absent
    pub fn write(&self, prompt: &str, output: &str) -> Result<(), StorageError> {
        for (path, contents) in [(&self.prompt_path, prompt), (&self.output_path, output)] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, contents)?;
        }

        tracing::debug!(
            "Saved round to {} and {}",
            self.prompt_path.display(),
            self.output_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_and_capitalizes() {
        assert_eq!(sanitize_title("my!! first_test"), "My First_test");
        assert_eq!(sanitize_title("hello world"), "Hello World");
        assert_eq!(sanitize_title("SHOUTING TITLE"), "Shouting Title");
        assert_eq!(sanitize_title("a/b\\c:d"), "Abcd");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for title in [
            "my!! first_test",
            "Hello World",
            "  spaced   out  ",
            "x_y z",
            "ßeta test",
        ] {
            let once = sanitize_title(title);
            assert_eq!(sanitize_title(&once), once);
        }
    }

    #[test]
    fn test_sanitize_titlecases_expanding_uppercase() {
        // 'ß' uppercases to "SS"; only the first char may stay upper
        assert_eq!(sanitize_title("ßeta test"), "Sseta Test");
        assert_eq!(sanitize_title("Sseta Test"), "Sseta Test");
    }

    #[test]
    fn test_empty_title_falls_back() {
        assert_eq!(sanitize_title(""), "Untitled");
        assert_eq!(sanitize_title("   "), "Untitled");
        assert_eq!(sanitize_title("!!!"), "Untitled");
    }

    #[test]
    fn test_round_trip_writes_both_files_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let prompts = dir.path().join("A");
        let outputs = dir.path().join("B");

        let files = round_files(&prompts, &outputs, "Hello World");
        files.write("the prompt text", "the response text").unwrap();

        assert_eq!(files.prompt_path, prompts.join("Hello World.md"));
        assert_eq!(files.output_path, outputs.join("Hello World.md"));
        assert_eq!(
            fs::read_to_string(&files.prompt_path).unwrap(),
            "the prompt text"
        );
        assert_eq!(
            fs::read_to_string(&files.output_path).unwrap(),
            "the response text"
        );
    }

    #[test]
    fn test_declined_overwrite_leaves_files_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let prompts = dir.path().join("prompts");
        let outputs = dir.path().join("outputs");

        let first = round_files(&prompts, &outputs, "Same Title");
        first.write("first prompt", "first output").unwrap();

        // Second round with the same title: the conflict is detected and,
        // with confirmation declined, nothing is written.
        let second = round_files(&prompts, &outputs, "same title");
        assert!(second.any_exists());

        assert_eq!(
            fs::read_to_string(&first.prompt_path).unwrap(),
            "first prompt"
        );
        assert_eq!(
            fs::read_to_string(&first.output_path).unwrap(),
            "first output"
        );
    }

    #[test]
    fn test_conflict_detected_when_only_one_side_exists() {
        let dir = tempfile::tempdir().unwrap();
        let prompts = dir.path().join("prompts");
        let outputs = dir.path().join("outputs");

        fs::create_dir_all(&outputs).unwrap();
        fs::write(outputs.join("Solo.md"), "stale output").unwrap();

        let files = round_files(&prompts, &outputs, "Solo");
        assert!(files.any_exists());
    }
}
