use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use nb_core::{Error, PreferenceStore, Result};
use tracing::info;

pub mod backends;

pub use backends::*;

/// Which preference backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    File,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(StoreKind::File),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

pub async fn create_store(kind: StoreKind, path: Option<&Path>) -> Result<Arc<dyn PreferenceStore>> {
    match kind {
        StoreKind::Memory => {
            info!("💾 Using in-memory preferences (nothing survives exit)");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreKind::File => {
            let path = path.ok_or_else(|| {
                Error::Config("File preference store needs a path".to_string())
            })?;
            let store = FileStore::open(path).await?;
            info!("💾 Using preferences from {}", path.display());
            Ok(Arc::new(store))
        }
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_store, StoreKind};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_store() {
        let store = create_store(StoreKind::Memory, None).await.unwrap();
        store.set("theme", "dark").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));

        assert!(create_store(StoreKind::File, None).await.is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = create_store(StoreKind::File, Some(path.as_path())).await.unwrap();
        assert!(store.get("theme").await.unwrap().is_none());
    }

    #[test]
    fn test_store_kind() {
        assert_eq!("memory".parse::<StoreKind>().unwrap(), StoreKind::Memory);
        assert_eq!("FILE".parse::<StoreKind>().unwrap(), StoreKind::File);
        assert!("redis".parse::<StoreKind>().is_err());
    }
}
