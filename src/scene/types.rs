use crate::material::types::MaterialPtr;

/// The minimal host-scene contract the IO layer consumes: shapes are only
/// ever iterated, and the only thing read or rebound is their material.
#[derive(Debug, Default)]
pub struct Shape {
    material: Option<MaterialPtr>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_material(material: MaterialPtr) -> Self {
        Self {
            material: Some(material),
        }
    }

    pub fn material(&self) -> Option<MaterialPtr> {
        self.material.clone()
    }

    pub fn set_material(&mut self, material: Option<MaterialPtr>) {
        self.material = material;
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn shapes_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.shapes.iter_mut()
    }
}
