use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::material::types::{Material, MaterialPtr};
use crate::scene::types::Scene;


/// Collects every material transitively reachable from the scene's shapes,
/// each exactly once, in discovery order.
///
/// The walk is an explicit stack with an "expanded" marker separate from
/// result membership: a node's dependencies are pushed only the first time it
/// is popped, which bounds the work to O(nodes + edges) and terminates on
/// cyclic and diamond-shaped graphs.
pub fn collect_scene_materials(scene: &Scene) -> Vec<MaterialPtr> {
    let mut result = Vec::new();
    let mut collected: HashSet<*const RwLock<Material>> = HashSet::new();
    let mut expanded: HashSet<*const RwLock<Material>> = HashSet::new();

    let mut stack: Vec<MaterialPtr> = scene.shapes().filter_map(|shape| shape.material()).collect();

    while let Some(material) = stack.pop() {
        let key = Arc::as_ptr(&material);

        if collected.insert(key) {
            result.push(material.clone());
        }

        if expanded.insert(key) {
            let dependencies = material.read().expect("material lock poisoned").material_inputs();
            stack.extend(dependencies);
        }
    }

    result
}
