//! Utility functions for interactive prompts and file system checks.
//!
//! The scraper pipeline is driven by a human between pages, so the prompt
//! helpers here block on stdin by design. `ensure_writable_dir` validates
//! output directories before any work is done.

use std::error::Error;
use std::fs as stdfs;
use std::io::{self, Write};
use tokio::fs;
use tracing::info;

/// Print `message`, flush stdout, and read one trimmed line from stdin.
///
/// Used for every human-gated step of the pagination loop. The returned
/// string has surrounding whitespace removed; an empty line is returned
/// as an empty string.
pub fn prompt_line(message: &str) -> Result<String, Box<dyn Error>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Whether a continue/stop answer means "stop".
///
/// Only a literal `no` (any casing) stops the loop; every other answer,
/// including an empty one, continues.
pub fn answer_means_stop(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("no")
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!(%path, "Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_means_stop_only_on_no() {
        assert!(answer_means_stop("no"));
        assert!(answer_means_stop("NO"));
        assert!(answer_means_stop("  no  "));
        assert!(!answer_means_stop("yes"));
        assert!(!answer_means_stop(""));
        assert!(!answer_means_stop("nope"));
        assert!(!answer_means_stop("n"));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing() {
        let dir = std::env::temp_dir().join("press_topics_probe_test");
        let path = dir.to_str().unwrap().to_string();
        let _ = stdfs::remove_dir_all(&dir);

        ensure_writable_dir(&path).await.unwrap();
        assert!(dir.is_dir());

        let _ = stdfs::remove_dir_all(&dir);
    }
}
