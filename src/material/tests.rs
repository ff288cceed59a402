use std::sync::Arc;

use crate::material::types::{Bxdf, InputValue, Material, MaterialKind};
use crate::MaterialIoError;

#[test]
fn set_input_replaces_in_place() {
    let mut material = Material::new("steel", MaterialKind::Simple { bxdf: Bxdf::Lambert });
    material.set_input("albedo", InputValue::Float4([0.1, 0.1, 0.1, 1.0]));
    material.set_input("roughness", InputValue::Float4([0.4, 0.0, 0.0, 0.0]));
    material.set_input("albedo", InputValue::Float4([0.8, 0.8, 0.8, 1.0]));

    assert_eq!(material.inputs().len(), 2);
    assert_eq!(material.inputs()[0].name, "albedo");
    match material.input("albedo") {
        Some(InputValue::Float4(v)) => assert_eq!(v[0], 0.8),
        other => panic!("unexpected albedo value: {:?}", other),
    }
}

#[test]
fn material_inputs_only_lists_material_slots() {
    let layer = Material::create("layer", MaterialKind::Simple { bxdf: Bxdf::MicrofacetGGX });
    let mut blend = Material::new(
        "coat",
        MaterialKind::Blend {
            blend: crate::material::types::BlendType::FresnelBlend,
        },
    );
    blend.set_input("ior", InputValue::Float4([1.5, 0.0, 0.0, 0.0]));
    blend.set_input("top_material", InputValue::Material(layer.clone()));

    let deps = blend.material_inputs();
    assert_eq!(deps.len(), 1);
    assert!(Arc::ptr_eq(&deps[0], &layer));
}

#[test]
fn bxdf_tags_round_trip() -> Result<(), anyhow::Error> {
    for bxdf in [
        Bxdf::Zero,
        Bxdf::Lambert,
        Bxdf::IdealReflect,
        Bxdf::IdealRefract,
        Bxdf::Translucent,
        Bxdf::MicrofacetBeckmann,
        Bxdf::MicrofacetGGX,
        Bxdf::Emissive,
        Bxdf::Passthrough,
        Bxdf::MicrofacetRefractionGGX,
        Bxdf::MicrofacetRefractionBeckmann,
    ] {
        assert_eq!(Bxdf::from_tag(bxdf.tag())?, bxdf);
    }
    Ok(())
}

#[test]
fn unknown_bxdf_tag_is_rejected() {
    match Bxdf::from_tag("phong") {
        Err(MaterialIoError::UnsupportedKind { kind }) => assert_eq!(kind, "phong"),
        other => panic!("expected UnsupportedKind, got {:?}", other.map(|b| b.tag())),
    }
}
