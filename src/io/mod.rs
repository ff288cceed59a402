use std::path::Path;

use crate::collector::collect_scene_materials;
use crate::io::image::{DiskImageStore, ImageStore};
use crate::io::reader::ReadContext;
use crate::io::writer::WriteContext;
use crate::material::types::MaterialPtr;
use crate::scene::types::Scene;
use crate::MaterialIoError;

pub mod image;
pub mod mapping;
mod reader;
mod writer;

/// Entry point for material graph IO. Texture persistence goes through the
/// `ImageStore` collaborator; all pass-scoped state (id tables, texture
/// caches, the resolve queue) lives in per-call contexts, so one shared
/// instance serves independent calls back to back.
pub struct MaterialIo<S: ImageStore> {
    store: S,
}

impl MaterialIo<DiskImageStore> {
    pub fn new() -> Self {
        Self::with_store(DiskImageStore)
    }
}

impl Default for MaterialIo<DiskImageStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ImageStore> MaterialIo<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Emits one record per node. Within the call, each texture asset is
    /// persisted at most once, next to the document.
    pub fn save_materials(
        &self,
        path: impl AsRef<Path>,
        materials: &[MaterialPtr],
    ) -> Result<(), MaterialIoError> {
        let path = path.as_ref();
        WriteContext::new(&self.store, path).save_materials(path, materials)
    }

    /// Loads the fully resolved node set, or fails as a whole. Forward
    /// references inside the document are fixed up in a second pass.
    pub fn load_materials(&self, path: impl AsRef<Path>) -> Result<Vec<MaterialPtr>, MaterialIoError> {
        let path = path.as_ref();
        ReadContext::new(&self.store, path).load_materials(path)
    }

    /// Collects the transitive closure of the scene's shape materials and
    /// saves exactly that set.
    pub fn save_materials_from_scene(
        &self,
        path: impl AsRef<Path>,
        scene: &Scene,
    ) -> Result<(), MaterialIoError> {
        let materials = collect_scene_materials(scene);
        self.save_materials(path, &materials)
    }
}
