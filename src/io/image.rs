use std::path::Path;
use std::sync::Arc;

use image::ImageFormat;

use crate::material::types::Texture;
use crate::MaterialIoError;

/// Persistence collaborator for texture assets. The IO layer decides *when*
/// an asset is saved or loaded (at most once per pass), the store decides how.
pub trait ImageStore {
    fn save(&self, path: &Path, texture: &Texture) -> Result<(), MaterialIoError>;

    fn load(&self, path: &Path) -> Result<Arc<Texture>, MaterialIoError>;
}

impl<S: ImageStore + ?Sized> ImageStore for &S {
    fn save(&self, path: &Path, texture: &Texture) -> Result<(), MaterialIoError> {
        (**self).save(path, texture)
    }

    fn load(&self, path: &Path) -> Result<Arc<Texture>, MaterialIoError> {
        (**self).load(path)
    }
}

/// Stores textures as PNG files on the local filesystem.
#[derive(Debug, Default)]
pub struct DiskImageStore;

impl ImageStore for DiskImageStore {
    fn save(&self, path: &Path, texture: &Texture) -> Result<(), MaterialIoError> {
        texture.data.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Arc<Texture>, MaterialIoError> {
        let data = image::open(path)?;
        Ok(Arc::new(Texture::with_origin(data, path.to_path_buf())))
    }
}
