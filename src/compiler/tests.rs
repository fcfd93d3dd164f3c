use super::{compile, Piece};
use crate::error::CompileError;
use regex::Regex;

#[test]
fn test_root_path() {
    let compiled = compile("/").unwrap();
    assert!(!compiled.is_dynamic());
    assert_eq!(compiled.segments.len(), 2);
    assert_eq!(compiled.reconstruct(), "/");
}

#[test]
fn test_parameterized_path() {
    let compiled = compile("/items/{id}").unwrap();
    assert_eq!(compiled.param_names, vec!["id"]);
    assert_eq!(compiled.segments[2].pieces, vec![Piece::Param("id".to_string())]);
}

#[test]
fn test_surrounding_literal_text_is_kept() {
    let compiled = compile("/files/file-{id}.json").unwrap();
    assert_eq!(
        compiled.segments[2].pieces,
        vec![
            Piece::Literal("file-".to_string()),
            Piece::Param("id".to_string()),
            Piece::Literal(".json".to_string()),
        ]
    );
    assert_eq!(compiled.segments[2].literal_text(), "file-.json");
}

#[test]
fn test_reconstruct_is_lossless() {
    for path in [
        "/",
        "/users",
        "/users/{id}/posts/{tag}",
        "/files/file-{id}.json",
        "/a/{x}-{y}/b/",
        "/v1//double",
        "/{lang}",
    ] {
        assert_eq!(compile(path).unwrap().reconstruct(), path, "path {}", path);
    }
}

#[test]
fn test_param_order_is_preserved() {
    let compiled = compile("/{a}/x/{b}-{c}").unwrap();
    assert_eq!(compiled.param_names, vec!["a", "b", "c"]);
}

#[test]
fn test_unclosed_brace() {
    match compile("/users/{id").unwrap_err() {
        CompileError::MalformedPattern { position, .. } => assert_eq!(position, 7),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_placeholder_cannot_span_segments() {
    assert!(matches!(
        compile("/users/{id/x}").unwrap_err(),
        CompileError::MalformedPattern { .. }
    ));
}

#[test]
fn test_empty_placeholder() {
    assert!(matches!(
        compile("/users/{}").unwrap_err(),
        CompileError::MalformedPattern { .. }
    ));
}

#[test]
fn test_stray_closing_brace() {
    assert!(matches!(
        compile("/users/id}").unwrap_err(),
        CompileError::MalformedPattern { .. }
    ));
}

#[test]
fn test_nested_brace() {
    assert!(matches!(
        compile("/users/{a{b}}").unwrap_err(),
        CompileError::MalformedPattern { .. }
    ));
}

#[test]
fn test_invalid_identifier() {
    assert!(matches!(
        compile("/users/{user id}").unwrap_err(),
        CompileError::MalformedPattern { .. }
    ));
    assert!(matches!(
        compile("/users/{1id}").unwrap_err(),
        CompileError::MalformedPattern { .. }
    ));
}

#[test]
fn test_relative_path_is_rejected() {
    assert!(matches!(
        compile("users/{id}").unwrap_err(),
        CompileError::MalformedPattern { position: 0, .. }
    ));
}

#[test]
fn test_duplicate_parameter_name() {
    assert_eq!(
        compile("/a/{x}/b/{x}").unwrap_err(),
        CompileError::DuplicateParameterName {
            path: "/a/{x}/b/{x}".to_string(),
            name: "x".to_string(),
        }
    );
}

#[test]
fn test_regex_source_escapes_literals() {
    let compiled = compile("/files/{id}.json").unwrap();
    let source = compiled.regex_source(|_| r"\d+");
    assert_eq!(source, r"^/files/(?P<id>\d+)\.json$");

    let re = Regex::new(&source).unwrap();
    assert!(re.is_match("/files/42.json"));
    assert!(!re.is_match("/files/42xjson"));
}

#[test]
fn test_regex_source_for_static_path() {
    let compiled = compile("/a.b/c").unwrap();
    assert_eq!(compiled.regex_source(|_| ""), r"^/a\.b/c$");
}

#[test]
fn test_segment_containing() {
    let compiled = compile("/search/{q}/page-{page}").unwrap();
    assert_eq!(compiled.segment_containing("page").unwrap().raw(), "page-{page}");
    assert!(compiled.segment_containing("missing").is_none());
}
