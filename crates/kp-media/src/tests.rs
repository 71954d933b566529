use crate::*;
use crate::raster::fit_within;
use crate::video::crf_for_quality;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageOutputFormat, Rgb, RgbImage};
use kp_core::{CompressionSettings, FileCategory, KompresError, ReportExtra, SettingsOverrides};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::ZipWriter;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x * 4) as u8, (y * 8) as u8, 128]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img).write_to(&mut buf, ImageOutputFormat::Png).unwrap();
    buf.into_inner()
}

fn small_bounds() -> CompressionSettings {
    SettingsOverrides::new().with_max_size(32, 32).with_quality(70).build().unwrap()
}

// ========== Images ==========

#[test]
fn test_fit_within() {
    assert_eq!(fit_within(4000, 3000, 1920, 1080), (1440, 1080));
    assert_eq!(fit_within(100, 50, 1920, 1080), (100, 50));
    assert_eq!(fit_within(1, 5000, 1920, 1080), (1, 1080));
}

#[test]
fn test_image_target_parse() {
    assert_eq!("JPG".parse::<ImageTarget>().unwrap(), ImageTarget::Jpeg);
    assert_eq!("png".parse::<ImageTarget>().unwrap(), ImageTarget::Png);
    assert_eq!("auto".parse::<ImageTarget>().unwrap(), ImageTarget::Auto);
    assert!("tiff".parse::<ImageTarget>().is_err());
}

#[test]
fn test_image_output_names() {
    let auto = ImageCompressor::default();
    assert_eq!(auto.output_name(Path::new("dir/photo.PNG")), "compressed_photo.png");
    assert_eq!(auto.output_name(Path::new("shot.webp")), "compressed_shot.jpg");
    let png = ImageCompressor::new(ImageTarget::Png);
    assert_eq!(png.output_name(Path::new("shot.jpeg")), "compressed_shot.png");
}

#[test]
fn test_image_downscales_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.png");
    std::fs::write(&input, png_bytes(64, 32)).unwrap();
    let output = dir.path().join("out.png");

    let report = ImageCompressor::default()
        .compress_file(&input, &output, &small_bounds())
        .unwrap();
    assert_eq!(report.extra, ReportExtra::Image { quality: 70 });
    assert_eq!(report.compressed_size, std::fs::metadata(&output).unwrap().len());

    let decoded = image::open(&output).unwrap();
    assert_eq!(decoded.dimensions(), (32, 16));
}

#[test]
fn test_image_jpeg_target() {
    let bytes = ImageCompressor::new(ImageTarget::Jpeg)
        .compress_bytes(&png_bytes(20, 10), &CompressionSettings::default())
        .unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn test_image_garbage_is_codec_error() {
    let err = ImageCompressor::default()
        .compress_bytes(b"not an image", &CompressionSettings::default())
        .unwrap_err();
    assert!(matches!(err, KompresError::Codec(_)));
}

// ========== Video ==========

#[test]
fn test_crf_mapping() {
    assert_eq!(crf_for_quality(100), 0);
    assert_eq!(crf_for_quality(80), 10);
    assert_eq!(crf_for_quality(50), 26);
    assert_eq!(crf_for_quality(0), 51);
}

#[test]
fn test_video_command_args() {
    let video = VideoCompressor::new();
    let args: Vec<String> = video
        .command_args(Path::new("in.mov"), Path::new("out.mov"), &CompressionSettings::default())
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();
    assert_eq!(args[pos("-i") + 1], "in.mov");
    assert_eq!(args[pos("-r") + 1], "30");
    assert_eq!(args[pos("-crf") + 1], "10");
    assert!(args[pos("-vf") + 1].contains("min(1920,iw)"));
    assert!(!args.iter().any(|a| a == "-b:v"));
    assert_eq!(args.last().unwrap(), "out.mov");

    let with_bitrate = SettingsOverrides::new().with_bitrate(800_000).build().unwrap();
    let args = video.command_args(Path::new("a.mp4"), Path::new("b.mp4"), &with_bitrate);
    assert!(args.iter().any(|a| a == "800000"));
}

#[test]
fn test_video_missing_tool() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    std::fs::write(&input, b"fake").unwrap();
    let video = VideoCompressor::with_program(dir.path().join("no-such-ffmpeg"));
    let err = video
        .compress_file(&input, &dir.path().join("out.mp4"), &CompressionSettings::default())
        .unwrap_err();
    assert!(matches!(err, KompresError::ExternalTool { .. }));
}

// ========== Archive ==========

#[test]
fn test_zip_pack_list_read() {
    let zip = ZipArchiver::new();
    let data = b"hello hello hello hello hello".repeat(20);
    let packed = zip.pack("greeting.txt", &data).unwrap();
    assert!(packed.len() < data.len());

    let entries = zip.list(&packed).unwrap();
    assert_eq!(entries, vec![ArchiveEntry { name: "greeting.txt".into(), size: data.len() as u64 }]);
    assert_eq!(zip.read_entry(&packed, "greeting.txt").unwrap(), data);
}

#[test]
fn test_zip_unpack() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("a.zip");
    std::fs::write(&archive, ZipArchiver::new().pack("notes.bin", b"abc").unwrap()).unwrap();

    let out = dir.path().join("out");
    let entries = ZipArchiver::new().unpack(&archive, &out).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(std::fs::read(out.join("notes.bin")).unwrap(), b"abc");
}

#[test]
fn test_zip_unpack_refuses_escape() {
    let mut w = ZipWriter::new(Cursor::new(Vec::new()));
    w.start_file("../evil.txt", FileOptions::default()).unwrap();
    w.write_all(b"x").unwrap();
    let data = w.finish().unwrap().into_inner();

    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("evil.zip");
    std::fs::write(&archive, data).unwrap();
    let err = ZipArchiver::new().unpack(&archive, &dir.path().join("out")).unwrap_err();
    assert!(matches!(err, KompresError::Codec(_)));
    assert!(!dir.path().join("evil.txt").exists());
}

// ========== Dispatch ==========

#[test]
fn test_dispatch_code_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("app.js");
    std::fs::write(&input, "// comment\nfoo(  1,2 );\n\n").unwrap();

    let out = dir.path().join("out");
    let outcome = Dispatcher::default()
        .compress_path(&input, &out, &CompressionSettings::default())
        .unwrap();
    assert_eq!(outcome.category, FileCategory::Code);
    assert_eq!(outcome.output, out.join("compressed_app.js"));
    assert_eq!(std::fs::read_to_string(&outcome.output).unwrap(), "foo( 1,2 );");
    assert!(matches!(outcome.report.extra, ReportExtra::Code { .. }));
}

#[test]
fn test_dispatch_generic_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blob.bin");
    std::fs::write(&input, vec![0u8; 4096]).unwrap();

    let outcome = Dispatcher::default()
        .compress_path(&input, dir.path(), &CompressionSettings::default())
        .unwrap();
    assert_eq!(outcome.category, FileCategory::GenericFile);
    assert_eq!(outcome.output, dir.path().join("blob.bin.zip"));
    assert!(outcome.report.compression_ratio_percent > 50.0);
    assert_eq!(outcome.report.extra, ReportExtra::Archive { entries: 1 });
}

#[test]
fn test_dispatch_output_paths_unique() {
    let out = Path::new("out");
    let inputs = vec![
        PathBuf::from("a/x.js"),
        PathBuf::from("b/x.js"),
        PathBuf::from("c/x.js"),
        PathBuf::from("blob.bin"),
        PathBuf::from("more/blob.bin"),
    ];
    let paths = Dispatcher::default().output_paths(&inputs, out);
    assert_eq!(
        paths,
        vec![
            out.join("compressed_x.js"),
            out.join("compressed_x-1.js"),
            out.join("compressed_x-2.js"),
            out.join("blob.bin.zip"),
            out.join("blob.bin-1.zip"),
        ]
    );
}

#[test]
fn test_dispatch_compress_to_exact_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("style.css");
    std::fs::write(&input, "a { b : c }").unwrap();
    let output = dir.path().join("nested/custom.css");

    let outcome = Dispatcher::default()
        .compress_to(&input, &output, &CompressionSettings::default())
        .unwrap();
    assert_eq!(outcome.output, output);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "a{b:c}");
}

#[test]
fn test_dispatch_routes_by_category() {
    let d = Dispatcher::default();
    assert_eq!(d.compressor_for(FileCategory::Image).category(), FileCategory::Image);
    assert_eq!(d.compressor_for(FileCategory::Video).category(), FileCategory::Video);
    assert!(d.compressor_for(FileCategory::Code).can_handle(Path::new("x.css")));
    assert!(!d.compressor_for(FileCategory::Code).can_handle(Path::new("x.mp4")));
}

#[test]
fn test_dispatch_stats() {
    let dir = tempfile::tempdir().unwrap();
    let code = dir.path().join("main.py");
    std::fs::write(&code, "print(1)\nprint(2)\n").unwrap();
    let s = Dispatcher::default().stats(&code).unwrap();
    assert_eq!(s.line_count, Some(3));
    assert_eq!(s.word_count, Some(2));
    assert_eq!(s.size_bytes, 18);

    let bad = dir.path().join("broken.txt");
    std::fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();
    let s = Dispatcher::default().stats(&bad).unwrap();
    assert_eq!(s.category, FileCategory::Code);
    assert_eq!(s.line_count, None);
}
