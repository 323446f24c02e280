/*
 * Asset Module
 *
 * Loads the fish mesh from a JSON file: a vertex list, a triangle index list
 * and a uniform scale. Loading happens on a background thread so the
 * starfield can start twinkling straight away; the frame driver polls for
 * the result once per tick.
 */

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read mesh {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse mesh {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("mesh has no triangles")]
    Empty,
    #[error("index list length {0} is not a multiple of three")]
    RaggedIndices(usize),
    #[error("triangle index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: usize, vertices: usize },
    #[error("mesh scale must be positive, got {0}")]
    BadScale(f32),
    #[error("mesh loader thread exited without a result")]
    LoaderGone,
}

/// An indexed triangle mesh, cloned once per fish by the scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeshAsset {
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<usize>,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl MeshAsset {
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mesh: Self = serde_json::from_str(&text).map_err(|source| AssetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn validate(&self) -> Result<(), AssetError> {
        if self.vertices.is_empty() || self.indices.is_empty() {
            return Err(AssetError::Empty);
        }
        if self.indices.len() % 3 != 0 {
            return Err(AssetError::RaggedIndices(self.indices.len()));
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i >= self.vertices.len()) {
            return Err(AssetError::IndexOutOfRange {
                index,
                vertices: self.vertices.len(),
            });
        }
        if !(self.scale > 0.0) {
            return Err(AssetError::BadScale(self.scale));
        }
        Ok(())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Handle to a mesh being loaded in the background.
pub struct AssetLoader {
    receiver: Option<Receiver<Result<MeshAsset, AssetError>>>,
}

impl AssetLoader {
    pub fn spawn(path: PathBuf) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            debug!(path = %path.display(), "loading fish mesh");
            // The driver may have been torn down already
            let _ = sender.send(MeshAsset::load(&path));
        });
        Self {
            receiver: Some(receiver),
        }
    }

    /// A loader that hands over an already available mesh on the first poll.
    pub fn ready(mesh: MeshAsset) -> Self {
        Self::settled(Ok(mesh))
    }

    pub fn settled(result: Result<MeshAsset, AssetError>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let _ = sender.send(result);
        Self {
            receiver: Some(receiver),
        }
    }

    /// Returns the load result exactly once, as soon as it is available.
    pub fn poll(&mut self) -> Option<Result<MeshAsset, AssetError>> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                Some(Err(AssetError::LoaderGone))
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }
}
