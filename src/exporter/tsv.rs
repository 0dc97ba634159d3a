// file: src/exporter/tsv.rs
// description: TSV export of Torznab feeds for manual import into *arr applications
// reference: tab separated indexer lists accepted by *arr import dialogs

use crate::error::{Result, SyncError};
use crate::models::join_ids;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const TSV_HEADER: &str = "Name\tTorznab Feed URL\tCategories\tAPI Key";

#[derive(Debug, Clone, PartialEq)]
pub struct TsvRow {
    pub name: String,
    pub torznab_url: String,
    pub categories: Vec<u32>,
    pub api_key: String,
}

impl TsvRow {
    fn render(&self) -> String {
        [
            sanitize(&self.name),
            sanitize(&self.torznab_url),
            join_ids(&self.categories),
            sanitize(&self.api_key),
        ]
        .join("\t")
    }
}

#[derive(Debug, Clone)]
pub struct TsvExporter {
    output: PathBuf,
}

impl TsvExporter {
    pub fn new(output: impl Into<PathBuf>) -> Result<Self> {
        let output = output.into();

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SyncError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        Ok(Self { output })
    }

    pub fn path(&self) -> &Path {
        &self.output
    }

    /// Writes the header followed by one line per row, without a trailing newline.
    pub fn write(&self, rows: &[TsvRow]) -> Result<usize> {
        let content = render(rows);

        fs::write(&self.output, content).map_err(|source| SyncError::FileOperation {
            path: self.output.clone(),
            source,
        })?;

        info!("Exported {} indexers to {}", rows.len(), self.output.display());
        Ok(rows.len())
    }
}

pub fn render(rows: &[TsvRow]) -> String {
    let body = rows
        .iter()
        .map(TsvRow::render)
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", TSV_HEADER, body)
}

fn sanitize(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn row(name: &str, categories: &[u32]) -> TsvRow {
        TsvRow {
            name: name.to_string(),
            torznab_url: format!(
                "http://jackett:9117/api/v2.0/indexers/{}/results/torznab/",
                name.to_lowercase()
            ),
            categories: categories.to_vec(),
            api_key: "KEY".to_string(),
        }
    }

    #[test]
    fn test_render_format() {
        let content = render(&[row("EZTV", &[5000, 5040]), row("Bare", &[])]);

        assert_eq!(
            content,
            "Name\tTorznab Feed URL\tCategories\tAPI Key\n\
             EZTV\thttp://jackett:9117/api/v2.0/indexers/eztv/results/torznab/\t5000,5040\tKEY\n\
             Bare\thttp://jackett:9117/api/v2.0/indexers/bare/results/torznab/\t\tKEY"
        );
    }

    #[test]
    fn test_render_empty_keeps_header() {
        assert_eq!(render(&[]), format!("{}\n", TSV_HEADER));
    }

    #[test]
    fn test_sanitize_control_characters() {
        let mut dirty = row("Tab\tName", &[2000]);
        dirty.name.push('\n');

        let line = dirty.render();
        assert_eq!(line.split('\t').count(), 4);
        assert!(line.starts_with("Tab Name "));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/indexers.tsv");

        let exporter = TsvExporter::new(&path).unwrap();
        let written = exporter.write(&[row("EZTV", &[5000])]).unwrap();

        assert_eq!(written, 1);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(TSV_HEADER));
        assert!(content.ends_with("\t5000\tKEY"));
    }
}
