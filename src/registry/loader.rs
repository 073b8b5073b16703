use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::SoftwareDraft;

/// Reads a JSON array of catalog entries. Ids are assigned by the store, so
/// any `id` field in the file is ignored.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<SoftwareDraft>> {
    let file = fs::read_to_string(path.as_ref())
        .with_context(|| format!("failed to read {}", path.as_ref().display()))?;
    let entries: Vec<SoftwareDraft> = serde_json::from_str(&file)
        .with_context(|| format!("invalid json in {}", path.as_ref().display()))?;
    tracing::debug!(
        count = entries.len(),
        path = %path.as_ref().display(),
        "loaded catalog file"
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::model::{Category, InstallMethod, SizeUnit};
    use std::io::Write;

    #[test]
    fn loads_entries_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"name": "VLC", "version": "3.0.20", "size": "40", "sizeUnit": "MB",
                  "path": "D:\\setup\\vlc.exe", "category": "multimedia",
                  "installMethod": "silent"}},
                {{"id": "ignored", "name": "Notes", "version": "1", "size": "2", "path": "notes.msi"}}
            ]"#
        )
        .unwrap();

        let entries = load_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, Category::Multimedia);
        assert_eq!(entries[0].install_method, InstallMethod::Silent);
        assert_eq!(entries[1].size_unit, SizeUnit::Mb);
        assert_eq!(entries[1].category, Category::Other);
        assert!(!entries[1].is_cracked);
    }

    #[test]
    fn reports_bad_json_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_entries(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid json"));
    }
}
