mod common;

use std::io::Write;
use std::path::PathBuf;

use sprint_report::logo::{self, LogoSource};
use sprint_report::model::{ImageFormat, PageGeometry, TextStyle};
use sprint_report::report::{self, REPORT_TITLE};
use sprint_report::{LogoLoad, ReportSession, render_report};

#[test]
fn failed_logo_starts_with_fallback_label() {
    let doc = common::layout(&common::answers(&[]));
    let first: Vec<(&str, f32, &TextStyle)> = doc.pages[0].texts().take(2).collect();

    assert_eq!(first[0].0, "EVERLEAD IQ");
    assert!(common::approx(first[0].1, 20.0));
    assert_eq!(*first[0].2, TextStyle::FALLBACK_LABEL);

    assert_eq!(first[1].0, REPORT_TITLE);
    assert!(common::approx(first[1].1, 30.0));
    assert!(common::image_ops(&doc).is_empty());
    assert!(doc.images.is_empty());
}

#[test]
fn loaded_logo_keeps_aspect_ratio_and_pushes_title_down() {
    let logo = common::png_logo(100, 50);
    let doc = report::assemble(
        &common::answers(&[]),
        LogoLoad::Loaded(logo),
        PageGeometry::A4,
    );

    assert_eq!(common::image_ops(&doc), vec![(20.0, 20.0, 50.0, 25.0)]);
    assert_eq!(doc.images.len(), 1);

    let (title, y, _) = doc.pages[0].texts().next().expect("title");
    assert_eq!(title, REPORT_TITLE);
    assert!(common::approx(y, 20.0 + 25.0 + 10.0));
    assert!(!common::all_text(&doc).iter().any(|t| t == "EVERLEAD IQ"));
}

#[test]
fn source_parsing() {
    assert_eq!(LogoSource::parse(""), LogoSource::None);
    assert_eq!(
        LogoSource::parse("https://example.com/logo.png"),
        LogoSource::Url("https://example.com/logo.png".into())
    );
    assert_eq!(
        LogoSource::parse("assets/logo.png"),
        LogoSource::File(PathBuf::from("assets/logo.png"))
    );
}

#[test]
fn png_file_loads() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(&common::png_bytes(64, 32)).expect("write png");

    match logo::load(&LogoSource::File(file.path().to_path_buf())) {
        LogoLoad::Loaded(img) => {
            assert_eq!(img.format, ImageFormat::Png);
            assert_eq!((img.pixel_width, img.pixel_height), (64, 32));
            assert!(common::approx(img.display_height(50.0), 25.0));
        }
        LogoLoad::Failed => panic!("expected the png to load"),
    }
}

#[test]
fn unusable_sources_fall_back() {
    let mut not_an_image = tempfile::NamedTempFile::new().expect("temp file");
    not_an_image.write_all(b"definitely not pixels").expect("write");

    let sources = [
        LogoSource::None,
        LogoSource::File(PathBuf::from("/nonexistent/everlead/logo.png")),
        LogoSource::File(not_an_image.path().to_path_buf()),
    ];
    for source in &sources {
        assert!(
            matches!(logo::load(source), LogoLoad::Failed),
            "{source:?} should fall back"
        );
    }
}

#[test]
fn truncated_png_falls_back_without_failing_the_report() {
    let png = common::png_bytes(64, 32);
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(&png[..png.len() / 2]).expect("write png");
    let source = LogoSource::File(file.path().to_path_buf());

    let load = logo::load(&source);
    assert!(matches!(load, LogoLoad::Failed), "truncated png must not load");

    let bytes = render_report(&common::answers(&[]), load).expect("render");
    assert!(bytes.starts_with(b"%PDF-"));

    let artifact = ReportSession::default()
        .submit(&common::answers(&[("sayNo", "New markets")]), &source)
        .expect("submit");
    assert!(artifact.bytes.starts_with(b"%PDF-"));
    assert!(!common::contains(&artifact.bytes, b"/XObject"));
}
