//! File-backed local cart cache.

use std::path::PathBuf;

use async_trait::async_trait;
use pantry::cart::Cart;
use tokio::fs;

use crate::domain::carts::{
    errors::CartStoreError,
    store::{CartCache, CartKey},
};

/// One JSON file per cart key inside a spool directory.
///
/// Writes go through a temporary file and a rename, so a crash mid-write
/// leaves the previous blob intact rather than a truncated one.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    dir: PathBuf,
}

impl FileCartStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: CartKey) -> PathBuf {
        let stem = match key {
            CartKey::Anonymous => "anonymous".to_string(),
            CartKey::Customer(customer) => customer.to_string(),
        };

        self.dir.join(format!("{stem}.json"))
    }
}

#[async_trait]
impl CartCache for FileCartStore {
    async fn load(&self, key: CartKey) -> Result<Option<Cart>, CartStoreError> {
        let path = self.path_for(key);

        let blob = match fs::read(&path).await {
            Ok(blob) => blob,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_slice(&blob)?))
    }

    async fn save(&self, key: CartKey, cart: &Cart) -> Result<(), CartStoreError> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        let blob = serde_json::to_vec(cart)?;

        fs::write(&tmp, &blob).await?;
        fs::rename(&tmp, &path).await?;

        Ok(())
    }

    async fn clear(&self, key: CartKey) -> Result<(), CartStoreError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
