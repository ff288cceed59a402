use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use log::trace;
use quick_xml::se::Serializer;
use serde::Serialize;

use crate::io::image::ImageStore;
use crate::material::types::{InputValue, Material, MaterialKind, MaterialPtr};
use crate::xml::types::{InputRecord, MaterialDocument, MaterialRecord};
use crate::MaterialIoError;

/// Pass-scoped write state. A fresh context is built per save call, so a
/// shared `MaterialIo` carries no mutable state between calls.
pub(crate) struct WriteContext<'a, S: ImageStore> {
    store: &'a S,
    /// Textures are persisted next to the document.
    base_path: PathBuf,
    ids: HashMap<*const RwLock<Material>, u64>,
    next_id: u64,
    /// Asset-identity keyed: a texture referenced from several inputs is
    /// saved once and every record names the same resource.
    texture_names: HashMap<u64, String>,
}

impl<'a, S: ImageStore> WriteContext<'a, S> {
    pub fn new(store: &'a S, document_path: &Path) -> Self {
        Self {
            store,
            base_path: document_path.parent().map(Path::to_path_buf).unwrap_or_default(),
            ids: HashMap::new(),
            next_id: 1,
            texture_names: HashMap::new(),
        }
    }

    pub fn save_materials(mut self, path: &Path, materials: &[MaterialPtr]) -> Result<(), MaterialIoError> {
        let mut document = MaterialDocument::default();
        for material in materials {
            let record = self.write_material(material)?;
            document.materials.push(record);
        }

        let mut xml = String::new();
        let mut serializer = Serializer::with_root(&mut xml, Some("Materials"))?;
        serializer.indent(' ', 2);
        document.serialize(serializer)?;
        fs::write(path, xml)?;
        Ok(())
    }

    /// Ids are handed out sequentially on first sight of a node, no matter
    /// whether that is its own record or a reference from an earlier record.
    /// A record can therefore target an id that only gets emitted later.
    fn id_for(&mut self, material: &MaterialPtr) -> u64 {
        let key = Arc::as_ptr(material);
        match self.ids.get(&key) {
            Some(id) => *id,
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.ids.insert(key, id);
                id
            }
        }
    }

    fn write_material(&mut self, material: &MaterialPtr) -> Result<MaterialRecord, MaterialIoError> {
        let id = self.id_for(material);
        let guard = material.read().expect("material lock poisoned");

        let (bxdf, blend_type) = match guard.kind() {
            MaterialKind::Simple { bxdf } => (Some(bxdf.tag().to_owned()), None),
            MaterialKind::Blend { blend } => (None, Some(u32::from(blend))),
        };

        let mut inputs = Vec::with_capacity(guard.inputs().len());
        for input in guard.inputs() {
            inputs.push(self.write_input(&input.name, &input.value)?);
        }

        Ok(MaterialRecord {
            name: guard.name().to_owned(),
            id,
            thin: guard.is_thin(),
            kind: guard.kind().tag().to_owned(),
            bxdf,
            blend_type,
            inputs,
        })
    }

    fn write_input(&mut self, name: &str, value: &InputValue) -> Result<InputRecord, MaterialIoError> {
        let (input_type, encoded) = match value {
            InputValue::Float4(v) => ("float4", format!("{} {} {} {}", v[0], v[1], v[2], v[3])),
            InputValue::Texture(texture) => {
                let resource = match self.texture_names.get(&texture.handle()) {
                    Some(existing) => existing.clone(),
                    None => {
                        let file_name = format!("{}.png", texture.handle());
                        trace!("persisting texture {:?} as {}", texture, file_name);
                        self.store.save(&self.base_path.join(&file_name), texture)?;
                        self.texture_names.insert(texture.handle(), file_name.clone());
                        file_name
                    }
                };
                ("texture", resource)
            }
            InputValue::Material(target) => ("material", self.id_for(target).to_string()),
        };

        Ok(InputRecord {
            name: name.to_owned(),
            input_type: input_type.to_owned(),
            value: encoded,
        })
    }
}
