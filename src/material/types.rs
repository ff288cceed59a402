use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use image::DynamicImage;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::MaterialIoError;

/// Materials are shared graph nodes: several shapes may bind the same
/// material and blend materials reference their layers through this pointer.
pub type MaterialPtr = Arc<RwLock<Material>>;

static NEXT_TEXTURE_HANDLE: AtomicU64 = AtomicU64::new(1);

/// A decoded texture asset. Identity is the `Arc<Texture>` pointer, not the
/// pixel content; `handle` is a stable per-asset number assigned at
/// construction time, used to name the asset in documents.
pub struct Texture {
    pub data: DynamicImage,
    pub origin: Option<PathBuf>,
    handle: u64,
}

impl Texture {
    pub fn new(data: DynamicImage) -> Self {
        Self {
            data,
            origin: None,
            handle: NEXT_TEXTURE_HANDLE.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn with_origin(data: DynamicImage, origin: PathBuf) -> Self {
        Self {
            origin: Some(origin),
            ..Self::new(data)
        }
    }

    pub fn handle(&self) -> u64 {
        self.handle
    }
}

impl Debug for Texture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ handle: {}, data: {}x{}, origin: {:?} }}",
            self.handle,
            self.data.width(),
            self.data.height(),
            self.origin
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bxdf {
    Zero,
    Lambert,
    IdealReflect,
    IdealRefract,
    Translucent,
    MicrofacetBeckmann,
    MicrofacetGGX,
    Emissive,
    Passthrough,
    MicrofacetRefractionGGX,
    MicrofacetRefractionBeckmann,
}

impl Bxdf {
    pub fn tag(self) -> &'static str {
        match self {
            Bxdf::Zero => "zero",
            Bxdf::Lambert => "lambert",
            Bxdf::IdealReflect => "ideal_reflect",
            Bxdf::IdealRefract => "ideal_refract",
            Bxdf::Translucent => "translucent",
            Bxdf::MicrofacetBeckmann => "microfacet_beckmann",
            Bxdf::MicrofacetGGX => "microfacet_ggx",
            Bxdf::Emissive => "emissive",
            Bxdf::Passthrough => "passthrough",
            Bxdf::MicrofacetRefractionGGX => "microfacet_refraction_ggx",
            Bxdf::MicrofacetRefractionBeckmann => "microfacet_refraction_beckmann",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, MaterialIoError> {
        Ok(match tag {
            "zero" => Bxdf::Zero,
            "lambert" => Bxdf::Lambert,
            "ideal_reflect" => Bxdf::IdealReflect,
            "ideal_refract" => Bxdf::IdealRefract,
            "translucent" => Bxdf::Translucent,
            "microfacet_beckmann" => Bxdf::MicrofacetBeckmann,
            "microfacet_ggx" => Bxdf::MicrofacetGGX,
            "emissive" => Bxdf::Emissive,
            "passthrough" => Bxdf::Passthrough,
            "microfacet_refraction_ggx" => Bxdf::MicrofacetRefractionGGX,
            "microfacet_refraction_beckmann" => Bxdf::MicrofacetRefractionBeckmann,
            _ => {
                return Err(MaterialIoError::UnsupportedKind {
                    kind: tag.to_owned(),
                })
            }
        })
    }
}

/// Blend materials carry their mode as a small integer in documents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum BlendType {
    Layered = 0,
    FresnelBlend = 1,
    Mix = 2,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MaterialKind {
    Simple { bxdf: Bxdf },
    Blend { blend: BlendType },
}

impl MaterialKind {
    pub fn tag(&self) -> &'static str {
        match self {
            MaterialKind::Simple { .. } => "simple",
            MaterialKind::Blend { .. } => "blend",
        }
    }
}

/// One named input slot of a material.
#[derive(Debug, Clone)]
pub struct Input {
    pub name: String,
    pub value: InputValue,
}

#[derive(Debug, Clone)]
pub enum InputValue {
    Float4([f32; 4]),
    Texture(Arc<Texture>),
    Material(MaterialPtr),
}

#[derive(Debug)]
pub struct Material {
    name: String,
    thin: bool,
    kind: MaterialKind,
    inputs: Vec<Input>,
}

impl Material {
    pub fn new(name: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            name: name.into(),
            thin: false,
            kind,
            inputs: Vec::new(),
        }
    }

    /// Convenience for the common case of a freshly shared node.
    pub fn create(name: impl Into<String>, kind: MaterialKind) -> MaterialPtr {
        Arc::new(RwLock::new(Self::new(name, kind)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_thin(&self) -> bool {
        self.thin
    }

    pub fn set_thin(&mut self, thin: bool) {
        self.thin = thin;
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn input(&self, name: &str) -> Option<&InputValue> {
        self.inputs
            .iter()
            .find(|input| input.name == name)
            .map(|input| &input.value)
    }

    /// Sets a named slot, replacing an existing one in place so that the
    /// declaration order of the inputs is stable across updates.
    pub fn set_input(&mut self, name: &str, value: InputValue) {
        match self.inputs.iter_mut().find(|input| input.name == name) {
            Some(input) => input.value = value,
            None => self.inputs.push(Input {
                name: name.to_owned(),
                value,
            }),
        }
    }

    /// The direct material-typed dependencies, for the graph walk.
    pub fn material_inputs(&self) -> Vec<MaterialPtr> {
        self.inputs
            .iter()
            .filter_map(|input| match &input.value {
                InputValue::Material(mat) => Some(mat.clone()),
                _ => None,
            })
            .collect()
    }
}
