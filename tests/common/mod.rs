#![allow(dead_code)] // not every test binary uses every helper

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::DynamicImage;
use materio::io::image::ImageStore;
use materio::material::types::Texture;
use materio::MaterialIoError;

/// Image-store double that records save calls and fabricates 1x1 textures on
/// load, so tests can assert the dedup behavior without touching codecs.
#[derive(Default)]
pub struct InMemoryImageStore {
    saved: Mutex<Vec<(PathBuf, u64)>>,
    loaded: Mutex<Vec<PathBuf>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// (path, texture handle) per save call, in call order.
    pub fn saved(&self) -> Vec<(PathBuf, u64)> {
        self.saved.lock().unwrap().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loaded.lock().unwrap().len()
    }
}

impl ImageStore for InMemoryImageStore {
    fn save(&self, path: &Path, texture: &Texture) -> Result<(), MaterialIoError> {
        self.saved.lock().unwrap().push((path.to_path_buf(), texture.handle()));
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Arc<Texture>, MaterialIoError> {
        self.loaded.lock().unwrap().push(path.to_path_buf());
        Ok(Arc::new(Texture::with_origin(
            DynamicImage::new_rgba8(1, 1),
            path.to_path_buf(),
        )))
    }
}

pub fn blank_texture() -> Arc<Texture> {
    Arc::new(Texture::new(DynamicImage::new_rgba8(1, 1)))
}
