//! PLY header reader — parses the header of an already-open stream.

use std::io::{BufRead, Cursor};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::{HeaderParser, ParsedHeader};
use crate::types::*;

/// A PLY file whose header has been fully parsed.
///
/// Construction either parses the whole header or fails; there is no
/// partially-read `PlyFile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyFile {
    format: PlyFormat,
    version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    comments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    obj_info: Vec<String>,
    elements: Vec<PlyElement>,
}

impl PlyFile {
    /// Parse the header from `reader`.
    ///
    /// The reader is consumed up to and including the line holding
    /// `end_header`, so the body can be read from it afterwards. It is never
    /// closed here; its lifetime stays with the caller.
    pub fn from_reader<R: BufRead>(reader: &mut R) -> Result<Self> {
        let ParsedHeader {
            format,
            version,
            elements,
            comments,
            obj_info,
        } = HeaderParser::new(reader).parse()?;

        debug!(
            format = %format,
            version = %version,
            elements = elements.len(),
            comments = comments.len(),
            "PLY header parsed"
        );

        Ok(Self {
            format,
            version,
            comments,
            obj_info,
            elements,
        })
    }

    /// Declared elements, in header order.
    pub fn elements(&self) -> &[PlyElement] {
        &self.elements
    }

    /// First element called `name`, if any.
    pub fn element(&self, name: &str) -> Option<&PlyElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    pub fn format(&self) -> PlyFormat {
        self.format
    }

    /// Version string from the `format` line, e.g. `1.0`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn obj_info(&self) -> &[String] {
        &self.obj_info
    }
}

impl FromStr for PlyFile {
    type Err = PlyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(&mut Cursor::new(s))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    const CUBE: &str = "ply\n\
        format ascii 1.0\n\
        comment exported for tests\n\
        obj_info generator none\n\
        element vertex 8\n\
        property float x\n\
        property float y\n\
        property float z\n\
        element face 6\n\
        property list uchar int vertex_indices\n\
        end_header\n\
        0 0 0\n";

    #[test]
    fn exposes_header_contents() {
        let ply: PlyFile = CUBE.parse().unwrap();
        assert_eq!(ply.format(), PlyFormat::Ascii);
        assert_eq!(ply.version(), "1.0");
        assert_eq!(ply.comments(), ["exported for tests"]);
        assert_eq!(ply.obj_info(), ["generator none"]);
        assert_eq!(ply.elements().len(), 2);

        let vertex = ply.element("vertex").unwrap();
        assert_eq!(vertex.size, 8);
        assert_eq!(vertex.property("z").unwrap().data_type, PropertyType::Float);
        assert!(ply.element("face").unwrap().property("vertex_indices").unwrap().is_list());
        assert!(ply.element("edge").is_none());
    }

    #[test]
    fn leaves_body_unread() {
        let mut input = Cursor::new(CUBE);
        PlyFile::from_reader(&mut input).unwrap();
        let mut body = String::new();
        input.read_to_string(&mut body).unwrap();
        assert_eq!(body, "0 0 0\n");
    }

    #[test]
    fn parsing_is_deterministic() {
        assert_eq!(CUBE.parse::<PlyFile>().unwrap(), CUBE.parse::<PlyFile>().unwrap());
    }

    #[test]
    fn serializes_to_json() {
        let ply: PlyFile = "ply\nformat ascii 1.0\nelement face 1\nproperty list uchar int i\nend_header\n"
            .parse()
            .unwrap();
        let json = serde_json::to_value(&ply).unwrap();
        assert_eq!(json["format"], "ascii");
        assert_eq!(json["elements"][0]["properties"][0]["type"], "int");
        assert_eq!(json["elements"][0]["properties"][0]["size_type"], "uchar");
        assert!(json.get("comments").is_none());
    }
}
