//! PLY header types and constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keyword that terminates the header.
pub const END_HEADER: &str = "end_header";

//  Property type

/// Scalar types a property (or a list's size prefix) can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Float,
    Double,
}

impl PropertyType {
    pub const ALL: [PropertyType; 8] = [
        Self::Char,
        Self::UChar,
        Self::Short,
        Self::UShort,
        Self::Int,
        Self::UInt,
        Self::Float,
        Self::Double,
    ];

    /// Spelling used in the header.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::UChar => "uchar",
            Self::Short => "short",
            Self::UShort => "ushort",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Width of one encoded value in the binary encodings.
    pub fn size_in_bytes(self) -> usize {
        match self {
            Self::Char | Self::UChar => 1,
            Self::Short | Self::UShort => 2,
            Self::Int | Self::UInt | Self::Float => 4,
            Self::Double => 8,
        }
    }
}

impl FromStr for PropertyType {
    type Err = ();

    /// Exact, case-sensitive match; width aliases such as `uint8` are rejected.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//  Format

/// Body encoding declared on the `format` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlyFormat {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

impl PlyFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::BinaryLittleEndian => "binary_little_endian",
            Self::BinaryBigEndian => "binary_big_endian",
        }
    }

    /// Whether the body of this encoding can be read by this crate.
    pub fn is_supported(self) -> bool {
        self == Self::Ascii
    }
}

impl FromStr for PlyFormat {
    type Err = PlyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(Self::Ascii),
            "binary_little_endian" => Ok(Self::BinaryLittleEndian),
            "binary_big_endian" => Ok(Self::BinaryBigEndian),
            _ => Err(PlyError::InvalidFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PlyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//  Property

/// A named field of an element.
///
/// `size_type` is `Some` exactly for list properties, where it holds the type
/// of the count that prefixes every list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlyProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_type: Option<PropertyType>,
}

impl PlyProperty {
    pub fn scalar(name: impl Into<String>, data_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            data_type,
            size_type: None,
        }
    }

    pub fn list(name: impl Into<String>, size_type: PropertyType, data_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            data_type,
            size_type: Some(size_type),
        }
    }

    pub fn is_list(&self) -> bool {
        self.size_type.is_some()
    }
}

//  Element

/// A declared record type with its instance count and ordered properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlyElement {
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub properties: Vec<PlyProperty>,
}

impl PlyElement {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            properties: Vec::new(),
        }
    }

    /// First property called `name`, if any.
    pub fn property(&self, name: &str) -> Option<&PlyProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

//  Error

#[derive(Debug, thiserror::Error)]
pub enum PlyError {
    #[error("Unexpected token on line {line}: expected {expected}, found {actual}")]
    UnexpectedToken {
        expected: String,
        actual: String,
        line: usize,
    },

    #[error("Invalid PLY format '{format}'")]
    InvalidFormat { format: String },

    #[error("Unsupported PLY format '{format}'")]
    UnsupportedFormat { format: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlyError>;
