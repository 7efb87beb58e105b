use std::io::{BufRead, Read};

use datagear::ParamMapperError;
use datagear::persistence::{FILE_PATH_VALUE_PREFIX, FilePathValueResolver};

#[test]
fn file_prefix_marks_path_values() {
    let resolver = FilePathValueResolver::new();

    assert!(!resolver.has_file_value_charset());
    assert!(resolver.is_file_path_value("file:/tmp/a.csv"));
    assert_eq!(resolver.file_path_content("file:/tmp/a.csv"), Some("/tmp/a.csv"));
    assert!(!resolver.is_file_path_value("plain"));
    assert_eq!(resolver.file_path_content("plain"), None);
    assert!(!resolver.is_file_path_value("FILE:/tmp/a.csv"));
    assert!(resolver.is_file_path_value(FILE_PATH_VALUE_PREFIX));
}

#[test]
fn file_value_requires_an_existing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("blob.bin");
    std::fs::write(&path, [1u8, 2, 3]).expect("write fixture");
    let resolver = FilePathValueResolver::new();

    let value = format!("file:{}", path.display());
    assert_eq!(resolver.file_value(&value), Some(path.clone()));

    let missing = format!("file:{}", dir.path().join("missing.bin").display());
    assert_eq!(resolver.file_value(&missing), None);
    assert_eq!(resolver.file_value(&path.display().to_string()), None);
}

#[test]
fn input_stream_reads_bytes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("blob.bin");
    std::fs::write(&path, [0xffu8, 0x00, 0x10]).expect("write fixture");

    let mut bytes = Vec::new();
    FilePathValueResolver::new()
        .input_stream(&path)
        .expect("open")
        .read_to_end(&mut bytes)
        .expect("read");

    assert_eq!(bytes, vec![0xff, 0x00, 0x10]);
}

#[test]
fn reader_decodes_utf8_text() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("note.txt");
    std::fs::write(&path, "数据 gear").expect("write fixture");

    let resolver = FilePathValueResolver::new().with_file_value_charset("UTF-8");
    assert!(resolver.has_file_value_charset());
    assert_eq!(resolver.read_text(&path).expect("read text"), "数据 gear");
}

#[test]
fn missing_file_maps_to_file_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("gone.txt");

    let err = FilePathValueResolver::new()
        .input_stream(&path)
        .expect_err("file is missing");

    assert!(matches!(err, ParamMapperError::FileNotFound { path: ref p, .. } if *p == path));
}

#[test]
fn reader_decodes_configured_legacy_charset() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("legacy.txt");
    // "数据 gear" in GBK.
    std::fs::write(&path, [0xca, 0xfd, 0xbe, 0xdd, b' ', b'g', b'e', b'a', b'r'])
        .expect("write fixture");

    let resolver = FilePathValueResolver::new().with_file_value_charset("GBK");
    assert_eq!(resolver.read_text(&path).expect("read text"), "数据 gear");

    let mut first_line = String::new();
    resolver
        .reader(&path)
        .expect("open reader")
        .read_line(&mut first_line)
        .expect("read line");
    assert_eq!(first_line, "数据 gear");
}

#[test]
fn unknown_charset_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("legacy.txt");
    std::fs::write(&path, "abc").expect("write fixture");

    let err = FilePathValueResolver::new()
        .with_file_value_charset("klingon-8")
        .reader(&path)
        .expect_err("label names no encoding");

    assert!(matches!(err, ParamMapperError::UnsupportedCharset(ref c) if c == "klingon-8"));
}

#[test]
fn charset_labels_resolve_case_insensitively() {
    let resolver = FilePathValueResolver::new().with_file_value_charset("gbk");
    assert_eq!(resolver.file_value_encoding().expect("known label"), encoding_rs::GBK);
    assert_eq!(
        FilePathValueResolver::new().file_value_encoding().expect("default"),
        encoding_rs::UTF_8
    );
}

#[test]
fn resolver_config_loads_from_json() {
    let resolver: FilePathValueResolver =
        serde_json::from_str(r#"{"fileValueCharset":"utf8"}"#).expect("parse");
    assert_eq!(resolver.file_value_charset.as_deref(), Some("utf8"));

    let defaults: FilePathValueResolver = serde_json::from_str("{}").expect("parse");
    assert_eq!(defaults, FilePathValueResolver::new());
}
