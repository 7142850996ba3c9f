use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use ply_header::{PlyError, PlyFile, PlyFormat, PropertyType};
use rstest::rstest;

fn fixture(name: &str) -> BufReader<File> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/input").join(name);
    BufReader::new(File::open(&path).unwrap_or_else(|e| panic!("open {}: {e}", path.display())))
}

fn parse_fixture(name: &str) -> ply_header::Result<PlyFile> {
    PlyFile::from_reader(&mut fixture(name))
}

#[test]
fn empty_input_is_an_unexpected_token() {
    let err = PlyFile::from_reader(&mut io::empty()).expect_err("empty input must fail");
    assert!(matches!(err, PlyError::UnexpectedToken { .. }));
}

#[rstest]
#[case::not_a_ply_file("invalid.ply")]
#[case::missing_format("missing_format.ply")]
#[case::format_in_wrong_order("format_in_wrong_order.ply")]
#[case::missing_element_size("missing_element_size.ply")]
fn structural_errors_are_unexpected_tokens(#[case] name: &str) {
    let err = parse_fixture(name).expect_err("header must be rejected");
    assert!(matches!(err, PlyError::UnexpectedToken { .. }), "{name}: {err:?}");
}

#[test]
fn unknown_format_is_invalid() {
    let err = parse_fixture("invalid_format.ply").expect_err("foo is not a format");
    assert!(matches!(err, PlyError::InvalidFormat { ref format } if format == "foo"));
}

#[rstest]
#[case("binary_little_endian.ply", "binary_little_endian")]
#[case("binary_big_endian.ply", "binary_big_endian")]
fn binary_formats_are_unsupported(#[case] name: &str, #[case] expected: &str) {
    let err = parse_fixture(name).expect_err("binary bodies are not readable");
    assert!(matches!(err, PlyError::UnsupportedFormat { ref format } if format == expected));
}

#[test]
fn missing_element_size_names_both_tokens() {
    let message = parse_fixture("missing_element_size.ply")
        .expect_err("count is missing")
        .to_string();
    assert!(message.contains("'end_header'"), "{message}");
    assert!(message.contains("'<number>'"), "{message}");
}

#[test]
fn single_element_without_properties() {
    let ply = parse_fixture("single_element.ply").unwrap();
    let elements = ply.elements();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].name, "vertex");
    assert_eq!(elements[0].size, 0);
    assert!(elements[0].properties.is_empty());
    assert_eq!(ply.comments(), ["a single empty element"]);
}

#[test]
fn multiple_elements_keep_declaration_order() {
    let ply = parse_fixture("multiple_elements.ply").unwrap();
    let names: Vec<_> = ply.elements().iter().map(|e| (e.name.as_str(), e.size)).collect();
    assert_eq!(names, [("vertex", 0), ("face", 0)]);
}

#[test]
fn single_element_with_every_property_type() {
    let ply = parse_fixture("single_element_with_properties.ply").unwrap();
    assert_eq!(ply.elements().len(), 1);

    let element = &ply.elements()[0];
    assert_eq!(element.name, "vertex");
    assert_eq!(element.size, 0);
    assert_eq!(element.properties.len(), 9);

    let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
    for ((property, name), ty) in element.properties.iter().zip(names).zip(PropertyType::ALL) {
        assert_eq!(property.name, name);
        assert!(!property.is_list());
        assert_eq!(property.data_type, ty);
    }

    let list = &element.properties[8];
    assert_eq!(list.name, "i");
    assert!(list.is_list());
    assert_eq!(list.data_type, PropertyType::Int);
    assert_eq!(list.size_type, Some(PropertyType::UChar));
}

#[test]
fn same_bytes_parse_to_equal_headers() {
    let first = parse_fixture("single_element_with_properties.ply").unwrap();
    let second = parse_fixture("single_element_with_properties.ply").unwrap();
    assert_eq!(first, second);
}

#[test]
fn crlf_header_leaves_body_in_the_stream() {
    let mut reader = fixture("triangle_crlf.ply");
    let ply = PlyFile::from_reader(&mut reader).unwrap();
    assert_eq!(ply.format(), PlyFormat::Ascii);
    assert_eq!(ply.element("vertex").map(|e| e.size), Some(3));
    assert_eq!(ply.element("face").map(|e| e.properties.len()), Some(1));

    let mut body = String::new();
    reader.read_to_string(&mut body).unwrap();
    assert_eq!(body.lines().next(), Some("0 0"));
    assert_eq!(body.lines().count(), 4);
}
