//! # Asset Bridge
//!
//! Moves a user-selected file into the engine's asset registry as a
//! base64 `data:` URI. Uploads are single-flight through [`UploadSlot`]:
//! the slot is claimed before the read starts and released when the
//! [`PendingUpload`] or [`LoadedUpload`] holding it is dropped, so a failed
//! read can never leave the state stuck at `Busy`.
//!
//! ```text
//! on_file_selected ─▶ PendingUpload ──read()──▶ LoadedUpload ──register()──▶ Asset
//!   (Busy)              holds slot               holds slot         slot released (Idle)
//! ```
//!
//! Reading is split from registering so a host can run the read without
//! holding the engine.

use crate::config::ShellConfig;
use crate::errors::UploadError;
use crate::upload_slot::{SlotGuard, UploadPolicy, UploadSlot, UploadState};
use base64::Engine as _;
use pageshell_engine::{Asset, AssetKind, Engine};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Label shown for assets without a name
pub const UNNAMED_ASSET_LABEL: &str = "Asset";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    /// Contents already in memory (drag and drop, tests)
    Bytes(Vec<u8>),
}

/// A file handed over by the host's file picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub source: FileSource,
}

impl SelectedFile {
    /// Named after the path's file name
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Bytes(bytes),
        }
    }

    /// Media type guessed from the extension
    pub fn media_type(&self) -> &'static str {
        media_type_for(Path::new(&self.name))
    }
}

fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Encode `bytes` as a `data:` URI
pub fn data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        media_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Handed to the engine's asset-manager selection callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSelection {
    pub asset: Asset,
    /// Replace the target's source rather than insert a new element
    pub replace: bool,
}

/// One cell of the asset grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTile {
    pub src: String,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct AssetBridge {
    slot: UploadSlot,
}

impl AssetBridge {
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            slot: UploadSlot::new(policy),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.upload_policy)
    }

    pub fn upload_state(&self) -> UploadState {
        self.slot.state()
    }

    pub fn watch_upload_state(&self) -> watch::Receiver<UploadState> {
        self.slot.watch()
    }

    /// Refuse further uploads. Clones of this bridge share the slot.
    pub fn close(&self) {
        self.slot.close();
    }

    /// Claim the upload slot for `file`
    pub async fn begin_upload(&self, file: SelectedFile) -> Result<PendingUpload, UploadError> {
        let guard = self.slot.acquire().await.map_err(|e| {
            debug!(file = %file.name, error = %e, "Upload not started");
            e
        })?;
        debug!(file = %file.name, "Upload started");
        Ok(PendingUpload { file, guard })
    }

    /// File picker callback. Only the first file is taken; an empty
    /// selection does nothing.
    pub async fn on_file_selected(
        &self,
        files: Vec<SelectedFile>,
    ) -> Result<Option<PendingUpload>, UploadError> {
        let Some(file) = files.into_iter().next() else {
            debug!("Empty file selection");
            return Ok(None);
        };
        self.begin_upload(file).await.map(Some)
    }

    /// Remove an asset, without confirmation
    pub fn remove(&self, engine: &mut dyn Engine, src: &str) -> Option<Asset> {
        let removed = engine.remove_asset(src);
        match &removed {
            Some(_) => info!(src = %truncate_src(src), "Asset removed"),
            None => debug!(src = %truncate_src(src), "No asset to remove"),
        }
        removed
    }

    /// Selecting an asset replaces the target element's source
    pub fn select(&self, asset: &Asset) -> AssetSelection {
        AssetSelection {
            asset: asset.clone(),
            replace: true,
        }
    }

    pub fn tiles(&self, engine: &dyn Engine) -> Vec<AssetTile> {
        engine
            .assets()
            .iter()
            .map(|asset| AssetTile {
                src: asset.src.clone(),
                label: asset
                    .name
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| UNNAMED_ASSET_LABEL.to_string()),
            })
            .collect()
    }
}

/// An upload holding the slot, not yet read
#[derive(Debug)]
pub struct PendingUpload {
    file: SelectedFile,
    guard: SlotGuard,
}

impl PendingUpload {
    pub fn file_name(&self) -> &str {
        &self.file.name
    }

    /// Read and encode the file. On failure the slot is released.
    pub async fn read(self) -> Result<LoadedUpload, UploadError> {
        let PendingUpload { file, guard } = self;
        let media_type = file.media_type();
        let SelectedFile { name, source } = file;

        let bytes = match source {
            FileSource::Bytes(bytes) => bytes,
            FileSource::Path(path) => match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(source) => {
                    drop(guard);
                    warn!(file = %name, error = %source, "Upload read failed");
                    return Err(UploadError::Read { name, source });
                }
            },
        };

        debug!(file = %name, bytes = bytes.len(), "Upload read");
        Ok(LoadedUpload {
            name,
            src: data_uri(media_type, &bytes),
            guard,
        })
    }

    /// Read the file and register it in one go
    pub async fn complete(self, engine: &mut dyn Engine) -> Result<Asset, UploadError> {
        Ok(self.read().await?.register(engine))
    }
}

/// File contents encoded and ready to register; still holds the slot
#[derive(Debug)]
pub struct LoadedUpload {
    name: String,
    src: String,
    guard: SlotGuard,
}

impl LoadedUpload {
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Add the asset to the engine and release the slot
    pub fn register(self, engine: &mut dyn Engine) -> Asset {
        let LoadedUpload { name, src, guard } = self;
        let asset = Asset {
            src,
            name: Some(name),
            kind: AssetKind::Image,
        };
        engine.add_asset(asset.clone());
        drop(guard);

        info!(file = ?asset.name, "Asset uploaded");
        asset
    }
}

fn truncate_src(src: &str) -> &str {
    match src.char_indices().nth(64) {
        Some((index, _)) => &src[..index],
        None => src,
    }
}
