use serde_derive::{Deserialize, Serialize};

/// `<Materials>` root with one `<Material>` record per graph node.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct MaterialDocument {
    #[serde(rename = "Material", default)]
    pub materials: Vec<MaterialRecord>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MaterialRecord {
    #[serde(rename = "@name")]
    pub name: String,
    /// Numeric identity, unique within one document. Input records of type
    /// "material" target these ids, forwards or backwards.
    #[serde(rename = "@id")]
    pub id: u64,
    #[serde(rename = "@thin")]
    #[serde(default)]
    pub thin: bool,
    #[serde(rename = "@type")]
    pub kind: String,

    // kind-specific attributes
    #[serde(rename = "@bxdf", default, skip_serializing_if = "Option::is_none")]
    pub bxdf: Option<String>,
    #[serde(rename = "@blend_type", default, skip_serializing_if = "Option::is_none")]
    pub blend_type: Option<u32>,

    #[serde(rename = "Input", default)]
    pub inputs: Vec<InputRecord>,
}

/// The value grammar depends on `type`: "float4" carries four whitespace
/// separated numbers, "texture" a resource name relative to the document,
/// "material" the decimal id of another record.
#[derive(Serialize, Deserialize, Debug)]
pub struct InputRecord {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@type")]
    pub input_type: String,
    #[serde(rename = "@value")]
    pub value: String,
}

/// `<Mappings>` root, structurally unrelated to material documents.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct MappingDocument {
    #[serde(rename = "Mapping", default)]
    pub mappings: Vec<MappingRecord>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MappingRecord {
    #[serde(rename = "@from")]
    pub from: String,
    #[serde(rename = "@to")]
    pub to: String,
}
