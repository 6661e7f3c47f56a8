//! Ledger snapshot loading.

use std::path::Path;

use bazaar_core::{InMemoryLedger, LedgerSnapshot};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported snapshot extension: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
}

/// Snapshot encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(SnapshotError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse snapshot text in the given encoding.
fn parse(content: &str, format: Format) -> Result<LedgerSnapshot, SnapshotError> {
    Ok(match format {
        Format::Yaml => serde_yaml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    })
}

/// Load and index a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<InMemoryLedger, SnapshotError> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let snapshot = parse(&content, format)?;
    info!(
        path = %path.display(),
        users = snapshot.users.len(),
        items = snapshot.items.len(),
        orders = snapshot.orders.len(),
        "Loaded ledger snapshot"
    );
    Ok(InMemoryLedger::new(snapshot))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{ItemId, LedgerReader};

    use super::*;

    const YAML: &str = r#"
users:
  - id: 1
    role: merchant
    name: Shop
    city: Ames
    state: IA
    created_at: "2026-01-01T00:00:00Z"
items:
  - id: 7
    merchant_id: 1
    name: Mug
    price: "12.50"
    inventory: 3
"#;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.YAML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert!(matches!(
            Format::from_path(Path::new("a.csv")),
            Err(SnapshotError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_yaml() {
        let snapshot = parse(YAML, Format::Yaml).unwrap();
        let ledger = InMemoryLedger::new(snapshot);
        assert_eq!(ledger.item_by_id(ItemId::new(7)).unwrap().name, "Mug");
    }

    #[test]
    fn test_missing_file() {
        let err = load(Path::new("/nonexistent/ledger.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
