//! CSV output for collected article URLs.
//!
//! The file is opened in append mode so separate runs accumulate into the
//! same corpus; the `url` header is written only when the file is empty, so
//! it appears exactly once no matter how many times the append runs.
//! Append-mode writes make an interrupted run resumable, not atomic.

use std::error::Error;
use std::fs::OpenOptions;
use tracing::{info, instrument};

/// Append `urls` to the CSV at `path`, creating it (with header) if needed.
#[instrument(level = "info", skip(urls), fields(count = urls.len()))]
pub fn append_urls(path: &str, urls: &[String]) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let needs_header = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if needs_header {
        writer.write_record(["url"])?;
    }
    for url in urls {
        writer.write_record([url.as_str()])?;
    }
    writer.flush()?;

    info!(count = urls.len(), path, "URLs added to CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_csv(name: &str) -> String {
        let path = std::env::temp_dir().join(name);
        let _ = std::fs::remove_file(&path);
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_header_written_exactly_once_across_appends() {
        let path = temp_csv("press_topics_urls_header.csv");

        let first = vec!["http://world.people.com.cn/a.html".to_string()];
        let second = vec![
            "http://world.people.com.cn/b.html".to_string(),
            "http://world.people.com.cn/c.html".to_string(),
        ];
        append_urls(&path, &first).unwrap();
        append_urls(&path, &second).unwrap();
        append_urls(&path, &[]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "url");
        assert_eq!(lines.iter().filter(|line| **line == "url").count(), 1);
        assert_eq!(lines[1], "http://world.people.com.cn/a.html");
        assert_eq!(lines[3], "http://world.people.com.cn/c.html");
    }

    #[test]
    fn test_empty_batch_on_fresh_file_still_writes_header() {
        let path = temp_csv("press_topics_urls_empty.csv");

        append_urls(&path, &[]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(contents.trim(), "url");
    }
}
