//! Integration tests for par-textvideo-fonts crate.

use par_textvideo_config::ROWS_PER_GLYPH;
use par_textvideo_fonts::{FONT_BYTES, FontError, GlyphFont};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_glyph_row_for_letter_a_reads_font_table() {
    let font = GlyphFont::builtin();
    let base = (b'A' - 0x20) as usize * ROWS_PER_GLYPH;
    for row in 0..ROWS_PER_GLYPH {
        assert_eq!(font.glyph_row(b'A', row), font.as_bytes()[base + row]);
    }
    // Crossbar of the 'A'
    assert_eq!(font.glyph_row(b'A', 7), 0xFE);
}

#[test]
fn test_glyph_returns_all_rows() {
    let font = GlyphFont::builtin();
    let glyph = font.glyph(b'A').expect("printable glyph");
    assert_eq!(glyph.len(), ROWS_PER_GLYPH);
    assert_eq!(glyph[2], 0x10);
}

#[test]
fn test_underscore_has_a_single_row() {
    let font = GlyphFont::builtin();
    let lit: Vec<usize> = (0..ROWS_PER_GLYPH)
        .filter(|&row| font.glyph_row(b'_', row) != 0)
        .collect();
    assert_eq!(lit, vec![13]);
}

#[test]
fn test_non_printable_code_renders_blank() {
    let font = GlyphFont::builtin();
    for row in 0..ROWS_PER_GLYPH {
        assert_eq!(font.glyph_row(0x01, row), 0);
    }
}

#[test]
fn test_from_bytes_rejects_wrong_size() {
    let err = GlyphFont::from_bytes(vec![0u8; 100]).unwrap_err();
    match err {
        FontError::InvalidSize { expected, actual } => {
            assert_eq!(expected, FONT_BYTES);
            assert_eq!(actual, 100);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_from_file_loads_custom_font() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("solid.fnt");
    fs::write(&path, vec![0xFFu8; FONT_BYTES]).expect("write font");

    let font = GlyphFont::from_file(&path).expect("load font");
    assert_eq!(font.glyph_row(b'x', 0), 0xFF);
    assert_eq!(font.glyph_row(0x7F, 0), 0);
    assert_ne!(font, GlyphFont::builtin());
}

#[test]
fn test_from_file_missing_is_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = GlyphFont::from_file(&dir.path().join("missing.fnt")).unwrap_err();
    assert!(matches!(err, FontError::Io { .. }));
    assert!(err.to_string().contains("missing.fnt"));
}

#[test]
fn test_font_debug() {
    let debug_str = format!("{:?}", GlyphFont::builtin());
    assert!(debug_str.contains("GlyphFont"));
    assert!(debug_str.contains("data_len"));
}
