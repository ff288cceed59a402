use thiserror::Error;

/// Errors of the material graph IO layer. Any of these aborts the whole
/// save/load call; no partial graph is ever handed out.
#[derive(Error, Debug)]
pub enum MaterialIoError {
    #[error("Unsupported material kind '{kind}'")]
    UnsupportedKind { kind: String },

    #[error("Unsupported input type '{input_type}'")]
    UnsupportedInputType { input_type: String },

    /// A material input referenced an id that never showed up in the document.
    #[error("Unresolved material reference to id {id}")]
    UnresolvedReference { id: u64 },

    #[error("The record is violating the expected format, because: {reason}")]
    MalformedRecord { reason: &'static str },

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    XmlDeError(#[from] quick_xml::DeError),

    #[error(transparent)]
    XmlSeError(#[from] quick_xml::SeError),

    #[error(transparent)]
    ImageError(#[from] image::ImageError),
}

pub mod collector;
pub mod io;
pub mod material;
pub mod scene;
pub mod xml;
