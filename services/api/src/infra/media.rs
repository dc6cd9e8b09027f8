use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::image::ImageUpload;
use crate::domain::repository::MediaStore;
use crate::error::FoodgramError;

/// Media files on the local filesystem, served under `/media/`.
#[derive(Clone)]
pub struct FsMediaStore {
    pub root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a media-relative path, refusing anything that escapes the root.
    fn resolve(&self, relative: &str) -> Result<PathBuf, FoodgramError> {
        let relative = Path::new(relative);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(anyhow::anyhow!("media path {relative:?} leaves the media root").into());
        }
        Ok(self.root.join(relative))
    }
}

impl MediaStore for FsMediaStore {
    async fn save(&self, folder: &str, image: &ImageUpload) -> Result<String, FoodgramError> {
        let relative = format!("{folder}/{}.{}", Uuid::now_v7(), image.extension);
        let path = self.resolve(&relative)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create media folder {}", parent.display()))?;
        }
        tokio::fs::write(&path, &image.bytes)
            .await
            .with_context(|| format!("write media file {}", path.display()))?;
        Ok(relative)
    }

    async fn remove(&self, relative: &str) -> Result<(), FoodgramError> {
        let path = self.resolve(relative)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove media file {}", path.display()))
                .into()),
        }
    }
}
