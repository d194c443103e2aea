//! Content-type resolution integration tests.
//!
//! Covers the sniffer rules and the precedence of declared MIME, origin
//! extension and sniffed content.

use docdown::core::mime::OCTET_STREAM_MIME_TYPE;
use docdown::core::sniff::sniff_zip;
use docdown::{Format, ResolvedType, SourceHints, resolve, resolve_hints, sniff};
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};

fn zip_archive(entries: &[&str]) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut cursor);
        let options = FileOptions::<'_, ()>::default();
        for entry in entries {
            zip.start_file(*entry, options).unwrap();
            zip.write_all(b"<?xml version=\"1.0\"?><root/>").unwrap();
        }
        zip.finish().unwrap();
    }
    cursor.into_inner()
}

#[test]
fn test_magic_numbers_resolve() {
    let test_cases: Vec<(&[u8], &str, &str)> = vec![
        (&b"%PDF-1.5\n%\xe2\xe3\xcf\xd3"[..], "application/pdf", ".pdf"),
        (&b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR"[..], "image/png", ".png"),
        (&b"\xff\xd8\xff\xe1\x00\x16Exif"[..], "image/jpeg", ".jpg"),
    ];

    for (content, mime, ext) in test_cases {
        assert_eq!(resolve(content, None, None), ResolvedType::new(mime, ext));
    }
}

#[test]
fn test_office_containers_resolve() {
    let docx = zip_archive(&["[Content_Types].xml", "word/document.xml"]);
    let xlsx = zip_archive(&["[Content_Types].xml", "xl/workbook.xml"]);
    let pptx = zip_archive(&["[Content_Types].xml", "ppt/presentation.xml"]);

    assert_eq!(resolve(&docx, None, None).extension, ".docx");
    assert_eq!(resolve(&xlsx, None, None).extension, ".xlsx");
    assert_eq!(resolve(&pptx, None, None).extension, ".pptx");
}

#[test]
fn test_plain_zip_is_not_sniffed() {
    let archive = zip_archive(&["notes/readme.txt"]);
    assert_eq!(sniff_zip(&archive), None);
    assert_eq!(sniff(&archive), None);
}

#[test]
fn test_text_formats_resolve() {
    assert_eq!(resolve(br#"{"a":1}"#, None, None).extension, ".json");
    assert_eq!(resolve(b"<html><body>hi</body></html>", None, None).extension, ".html");
    assert_eq!(resolve(b"<root><a/></root>", None, None).extension, ".xml");
    assert_eq!(resolve(b"id,name\n1,alpha\n", None, None).extension, ".csv");
}

#[test]
fn test_declared_html_with_charset() {
    let resolved = resolve(b"", Some("text/html; charset=utf-8"), None);
    assert_eq!(resolved, ResolvedType::new("text/html", ".html"));
}

#[test]
fn test_origin_extension_beats_sniffing() {
    let resolved = resolve(b"name,age\n", None, Some("https://example.com/export.json?token=abc"));
    assert_eq!(resolved, ResolvedType::new("application/json", ".json"));
}

#[test]
fn test_misleading_filename_is_corrected_by_sniffing() {
    let resolved = resolve(b"%PDF-1.4", None, Some("upload.bin"));
    assert_eq!(resolved, ResolvedType::new("application/pdf", ".pdf"));
}

#[test]
fn test_octet_stream_upload_is_sniffed() {
    let hints = SourceHints::new()
        .with_mime("application/octet-stream")
        .with_origin("blob");
    let resolved = resolve_hints(b"<!DOCTYPE html><html></html>", &hints);
    assert_eq!(resolved, ResolvedType::new("text/html", ".html"));
}

#[test]
fn test_unknown_content_falls_back_to_octet_stream() {
    let resolved = resolve(b"\x00\x01\x02\x03", None, Some("data.bin"));
    assert_eq!(resolved.mime_type, OCTET_STREAM_MIME_TYPE);
    assert!(!resolved.has_extension());
    assert_eq!(Format::from_resolved(&resolved), None);
}

#[test]
fn test_resolve_is_idempotent() {
    let docx = zip_archive(&["word/document.xml"]);
    let inputs: Vec<(&[u8], Option<&str>, Option<&str>)> = vec![
        (&b"%PDF-1.4"[..], None, None),
        (&b"{\"k\":true}"[..], Some("application/octet-stream"), Some("a")),
        (&b""[..], Some("text/html; charset=utf-8"), None),
        (&b""[..], None, Some("https://example.com/slides.PPTX")),
        (docx.as_slice(), None, None),
        (&b"\x00\x00"[..], None, None),
        (&b"GIF89a"[..], Some("image/gif"), None),
    ];

    for (content, declared, origin) in inputs {
        let first = resolve(content, declared, origin);
        let second = resolve(content, Some(first.mime_type.as_str()), Some(first.extension.as_str()));
        assert_eq!(first, second, "resolve not idempotent for {:?}/{:?}", declared, origin);
        assert_eq!(first, resolve(content, declared, origin));
    }
}

#[test]
fn test_resolved_extension_is_always_supported_or_empty() {
    let inputs: Vec<(&[u8], Option<&str>)> = vec![
        (&b"GIF89a"[..], Some("image/gif")),
        (&b"MZ\x90\x00"[..], Some("application/x-msdownload")),
        (&b"plain text"[..], Some("text/plain")),
        (&b"%PDF"[..], Some("application/pdf")),
    ];

    for (content, declared) in inputs {
        let resolved = resolve(content, declared, None);
        assert!(
            !resolved.has_extension() || docdown::is_supported(&resolved.extension),
            "unexpected extension {}",
            resolved.extension
        );
    }
}
