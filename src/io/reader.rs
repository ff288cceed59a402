use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, trace};

use crate::io::image::ImageStore;
use crate::material::types::{BlendType, Bxdf, InputValue, Material, MaterialKind, MaterialPtr, Texture};
use crate::xml::types::{InputRecord, MaterialDocument, MaterialRecord};
use crate::MaterialIoError;

/// A material-typed input whose target id was not registered yet when the
/// input was encountered. Drained in enqueue order once the whole document
/// has been walked.
struct ResolveRequest {
    material: MaterialPtr,
    input: String,
    target_id: u64,
}

/// Pass-scoped read state, freshly built per load call.
pub(crate) struct ReadContext<'a, S: ImageStore> {
    store: &'a S,
    base_path: PathBuf,
    materials_by_id: HashMap<u64, MaterialPtr>,
    /// Resource-name keyed: a name occurring in several inputs is loaded once
    /// and all of them share the same asset.
    textures_by_name: HashMap<String, Arc<Texture>>,
    pending: Vec<ResolveRequest>,
}

impl<'a, S: ImageStore> ReadContext<'a, S> {
    pub fn new(store: &'a S, document_path: &Path) -> Self {
        Self {
            store,
            base_path: document_path.parent().map(Path::to_path_buf).unwrap_or_default(),
            materials_by_id: HashMap::new(),
            textures_by_name: HashMap::new(),
            pending: Vec::new(),
        }
    }

    pub fn load_materials(mut self, path: &Path) -> Result<Vec<MaterialPtr>, MaterialIoError> {
        let xml = fs::read_to_string(path)?;
        let document: MaterialDocument = quick_xml::de::from_str(&xml)?;

        let mut loaded = Vec::with_capacity(document.materials.len());
        for record in &document.materials {
            let material = self.load_material(record)?;
            loaded.push(material);
        }

        // Second pass: every id the document declares is in the table by now,
        // so anything still missing references a record that never existed.
        for request in std::mem::take(&mut self.pending) {
            let target = self.materials_by_id.get(&request.target_id).ok_or(
                MaterialIoError::UnresolvedReference {
                    id: request.target_id,
                },
            )?;
            request
                .material
                .write()
                .expect("material lock poisoned")
                .set_input(&request.input, InputValue::Material(target.clone()));
        }

        Ok(loaded)
    }

    fn load_material(&mut self, record: &MaterialRecord) -> Result<MaterialPtr, MaterialIoError> {
        let kind = match record.kind.as_str() {
            "simple" => {
                let tag = record.bxdf.as_deref().ok_or(MaterialIoError::MalformedRecord {
                    reason: "simple material without a bxdf attribute",
                })?;
                MaterialKind::Simple {
                    bxdf: Bxdf::from_tag(tag)?,
                }
            }
            "blend" => {
                let raw = record.blend_type.ok_or(MaterialIoError::MalformedRecord {
                    reason: "blend material without a blend_type attribute",
                })?;
                let blend = BlendType::try_from(raw).map_err(|_| MaterialIoError::UnsupportedKind {
                    kind: format!("blend_type {}", raw),
                })?;
                MaterialKind::Blend { blend }
            }
            other => {
                return Err(MaterialIoError::UnsupportedKind {
                    kind: other.to_owned(),
                })
            }
        };

        let material = Material::create(record.name.clone(), kind);
        material
            .write()
            .expect("material lock poisoned")
            .set_thin(record.thin);

        for input in &record.inputs {
            self.load_input(&material, input)?;
        }

        // Registered after its inputs, so a self reference goes through the
        // resolve queue like any other forward reference.
        if self
            .materials_by_id
            .insert(record.id, material.clone())
            .is_some()
        {
            // Documented behavior: the later record takes over the id slot.
            debug!("material id {} redefined by '{}'", record.id, record.name);
        }

        Ok(material)
    }

    fn load_input(&mut self, material: &MaterialPtr, record: &InputRecord) -> Result<(), MaterialIoError> {
        let value = match record.input_type.as_str() {
            "float4" => InputValue::Float4(parse_float4(&record.value)?),
            "texture" => {
                let texture = match self.textures_by_name.get(&record.value) {
                    Some(texture) => texture.clone(),
                    None => {
                        trace!("loading texture {}", record.value);
                        let texture = self.store.load(&self.base_path.join(&record.value))?;
                        self.textures_by_name.insert(record.value.clone(), texture.clone());
                        texture
                    }
                };
                InputValue::Texture(texture)
            }
            "material" => {
                let id: u64 = record.value.trim().parse().map_err(|_| MaterialIoError::MalformedRecord {
                    reason: "material input id is not an integer",
                })?;
                match self.materials_by_id.get(&id) {
                    Some(target) => InputValue::Material(target.clone()),
                    None => {
                        // Forward reference; fixed up after the whole
                        // document is in.
                        self.pending.push(ResolveRequest {
                            material: material.clone(),
                            input: record.name.clone(),
                            target_id: id,
                        });
                        return Ok(());
                    }
                }
            }
            other => {
                return Err(MaterialIoError::UnsupportedInputType {
                    input_type: other.to_owned(),
                })
            }
        };

        material
            .write()
            .expect("material lock poisoned")
            .set_input(&record.name, value);
        Ok(())
    }
}

fn parse_float4(value: &str) -> Result<[f32; 4], MaterialIoError> {
    let mut components = [0.0f32; 4];
    let mut parts = value.split_whitespace();
    for component in components.iter_mut() {
        let part = parts.next().ok_or(MaterialIoError::MalformedRecord {
            reason: "float4 input needs four components",
        })?;
        *component = part.parse().map_err(|_| MaterialIoError::MalformedRecord {
            reason: "float4 component is not a number",
        })?;
    }
    Ok(components)
}
