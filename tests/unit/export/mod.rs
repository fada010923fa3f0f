use std::path::PathBuf;

use super::*;

fn frame(width: u32, height: u32, rgb: [u8; 3]) -> FrameRgb {
    let mut f = FrameRgb::new(width, height).unwrap();
    for px in f.data.chunks_exact_mut(3) {
        px.copy_from_slice(&rgb);
    }
    f
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("canvasflat-export-{}", std::process::id()))
        .join(name)
}

#[test]
fn format_from_extension() {
    assert_eq!(ExportFormat::from_path(Path::new("a/b.PNG")).unwrap(), ExportFormat::Png);
    assert_eq!(ExportFormat::from_path(Path::new("x.ppm")).unwrap(), ExportFormat::Ppm);
    assert_eq!(ExportFormat::from_path(Path::new("x.pgm")).unwrap(), ExportFormat::Pgm);
    assert_eq!(ExportFormat::from_path(Path::new("x.pbm")).unwrap(), ExportFormat::Pbm);
    assert_eq!(ExportFormat::from_path(Path::new("x.txt")).unwrap(), ExportFormat::Ascii);
    assert_eq!(ExportFormat::PpmPlain.extension(), "ppm");
    assert_eq!(ExportFormat::PgmPlain.extension(), "pgm");
    assert!(ExportFormat::from_path(Path::new("x.gif")).is_err());
    assert!(ExportFormat::from_path(Path::new("noext")).is_err());
}

#[test]
fn png_decodes_back_to_same_pixels() {
    let mut f = frame(3, 2, [10, 20, 30]);
    f.data[0] = 200;
    let mut buf = Vec::new();
    write_png(&f, &mut buf).unwrap();
    let img = image::load_from_memory(&buf).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.into_raw(), f.data);
}

#[test]
fn ppm_is_binary_pixmap() {
    let f = frame(2, 1, [1, 2, 3]);
    let mut buf = Vec::new();
    write_ppm(&f, &mut buf).unwrap();
    assert!(buf.starts_with(b"P6"));
    assert!(buf.ends_with(&[1, 2, 3, 1, 2, 3]));
}

fn plain_tokens(buf: Vec<u8>) -> Vec<String> {
    String::from_utf8(buf)
        .unwrap()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[test]
fn plain_ppm_lists_decimal_samples() {
    let f = frame(2, 1, [1, 2, 30]);
    let mut buf = Vec::new();
    write_frame(&f, ExportFormat::PpmPlain, &mut buf).unwrap();
    assert!(buf.starts_with(b"P3"));
    assert_eq!(
        plain_tokens(buf),
        ["P3", "2", "1", "255", "1", "2", "30", "1", "2", "30"]
    );
}

#[test]
fn gray_level_truncates_each_channel() {
    assert_eq!(gray_level(&[10, 20, 30]), 18);
    assert_eq!(gray_level(&[255, 255, 255]), 254);
    assert_eq!(gray_level(&[0, 0, 0]), 0);
}

#[test]
fn pgm_writes_gray_levels() {
    let f = frame(2, 1, [255, 255, 255]);
    let mut buf = Vec::new();
    write_pgm(&f, false, &mut buf).unwrap();
    assert_eq!(buf, b"P5\n2 1 255\n\xfe\xfe");

    let mut buf = Vec::new();
    write_pgm(&frame(2, 1, [10, 20, 30]), true, &mut buf).unwrap();
    assert_eq!(plain_tokens(buf), ["P2", "2", "1", "255", "18", "18"]);
}

#[test]
fn otsu_splits_two_level_image() {
    assert_eq!(otsu_threshold(&[0, 254, 0]), 1);
    assert_eq!(otsu_threshold(&[10, 10, 200, 200, 210]), 11);
    assert_eq!(otsu_threshold(&[77; 6]), 0);
    assert_eq!(otsu_threshold(&[]), 0);
}

#[test]
fn pbm_marks_dark_pixels_black() {
    let mut f = frame(3, 1, [0, 0, 0]);
    f.data[3..6].copy_from_slice(&[255, 255, 255]);
    let mut buf = Vec::new();
    write_frame(&f, ExportFormat::Pbm, &mut buf).unwrap();
    assert_eq!(buf, b"P4\n3 1\n\xa0");

    // No split in a uniform image: everything is white.
    let mut buf = Vec::new();
    write_pbm(&frame(3, 1, [90, 90, 90]), &mut buf).unwrap();
    assert_eq!(buf, b"P4\n3 1\n\x00");
}

#[test]
fn ascii_uses_two_rows_per_line() {
    let f = frame(4, 5, [0, 0, 0]);
    let mut buf = Vec::new();
    write_ascii(&f, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "$$$$\n$$$$\n");
}

#[test]
fn ascii_ramp_ends_are_clamped() {
    let black = frame(1, 2, [0, 0, 0]);
    let white = frame(1, 2, [255, 255, 255]);
    assert_eq!(ascii_char(&black, 0, 0), Some('$'));
    assert_eq!(ascii_char(&white, 0, 0), Some(' '));
    assert_eq!(ascii_char(&white, 0, 1), None);
}

#[test]
fn inconsistent_frame_is_export_error() {
    let mut f = frame(2, 2, [0, 0, 0]);
    f.data.pop();
    let err = write_png(&f, Vec::new()).unwrap_err();
    assert!(matches!(err, CanvasError::Export(_)));
}

#[test]
fn export_creates_parent_dirs() {
    let path = temp_path("nested/out.ppm");
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
    export_to_path(&frame(2, 2, [9, 9, 9]), &path, ExportFormat::Ppm).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P6"));
    let _ = std::fs::remove_file(&path);
}
