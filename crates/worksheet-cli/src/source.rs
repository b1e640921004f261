use anyhow::{Context, Result, bail};
use std::path::Path;

/// Load worksheet items from a `.csv` file (first column of each record) or
/// a plain text file (one item per line). Blank entries are skipped.
///
/// A file without items is an error unless `allow_empty` is set.
pub async fn load_items(path: impl AsRef<Path>, allow_empty: bool) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let items = if is_csv {
        tokio::task::spawn_blocking(move || items_from_csv(&contents)).await??
    } else {
        items_from_lines(&contents)
    };

    if items.is_empty() && !allow_empty {
        bail!(
            "No items found in {} (pass --allow-empty for a blank worksheet)",
            path.display()
        );
    }
    log::info!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Header cells recognised and skipped on the first CSV record
const HEADER_LABELS: &[&str] = &["item", "items", "document", "documents"];

pub fn items_from_csv(contents: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let mut items = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let Some(first) = record.get(0).map(str::trim) else {
            continue;
        };
        if row == 0 && HEADER_LABELS.contains(&first.to_ascii_lowercase().as_str()) {
            continue;
        }
        if !first.is_empty() {
            items.push(first.to_string());
        }
    }
    Ok(items)
}

pub fn items_from_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_takes_first_column_and_skips_header() {
        let csv = "Item,Notes\nW-2,employer\n\"1099-INT, Raymond James\",\n,\nBank Statement\n";
        let items = items_from_csv(csv).unwrap();
        assert_eq!(items, vec!["W-2", "1099-INT, Raymond James", "Bank Statement"]);
    }

    #[test]
    fn csv_without_header_keeps_first_row() {
        let items = items_from_csv("W-2\n1099-NEC\n").unwrap();
        assert_eq!(items, vec!["W-2", "1099-NEC"]);
    }

    #[test]
    fn lines_skip_blanks() {
        let items = items_from_lines("W-2\n\n  1099-NEC  \n");
        assert_eq!(items, vec!["W-2", "1099-NEC"]);
    }

    #[tokio::test]
    async fn load_items_rejects_empty_file() {
        let temp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        std::fs::write(temp.path(), "\n\n").unwrap();
        assert!(load_items(temp.path(), false).await.is_err());
    }

    #[tokio::test]
    async fn load_items_allows_empty_file_on_request() {
        let temp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        std::fs::write(temp.path(), "Item\n").unwrap();
        assert!(load_items(temp.path(), true).await.unwrap().is_empty());
    }
}
