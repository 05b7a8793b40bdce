//! Error types for mesh loading.

use std::{fmt, path::PathBuf};

/// Errors that abort a mesh load. No partial mesh is ever returned alongside one.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// The file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed OBJ text.
    #[error("syntax error at line {line}, column {column}: {kind}")]
    Syntax {
        line: usize,
        column: usize,
        kind: SyntaxError,
    },

    /// A face corner points past the end of an attribute array.
    #[error("face on line {line} references {attribute} {index}, but the file defines only {available}")]
    Reference {
        line: usize,
        attribute: Attribute,
        index: u32,
        available: usize,
    },

    /// More face corners than a 32-bit index buffer can address.
    #[error("mesh has {count} face corners, more than a u32 index buffer can address")]
    TooManyVertices { count: usize },

    /// The file parsed but contains no faces.
    #[error("mesh contains no faces")]
    Empty,
}

/// What exactly was wrong with the OBJ text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("expected a number for component {component} of '{directive}'")]
    ExpectedFloat {
        directive: &'static str,
        component: usize,
    },

    #[error("expected an integer index in face corner {corner}")]
    ExpectedIndex { corner: usize },

    /// Zero, negative (relative) and indices beyond `u32::MAX` are rejected.
    #[error("face index {value} is not a positive 32-bit index")]
    InvalidIndex { value: i64 },

    #[error("faces must be triangles or quads, found {count} corners")]
    CornerCount { count: usize },
}

/// The per-corner attribute an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Position => "position",
            Self::TexCoord => "texture coordinate",
            Self::Normal => "normal",
        })
    }
}
