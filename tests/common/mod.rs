#![allow(dead_code)]

use std::io::Cursor;

use sprint_report::model::{Document, DrawOp, LogoImage, PageGeometry};
use sprint_report::report;
use sprint_report::{FormAnswers, LogoLoad};

pub fn answers(pairs: &[(&str, &str)]) -> FormAnswers {
    FormAnswers::from_pairs(pairs.iter().copied())
}

/// Lay out a report without a logo (the fallback label path).
pub fn layout(answers: &FormAnswers) -> Document {
    report::assemble(answers, LogoLoad::Failed, PageGeometry::A4)
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([8, 171, 241, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

pub fn jpeg_rgb_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([3, 205, 201]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Jpeg)
        .expect("encode jpeg");
    out.into_inner()
}

pub fn jpeg_gray_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::GrayImage::from_pixel(width, height, image::Luma([128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Jpeg)
        .expect("encode jpeg");
    out.into_inner()
}

pub fn png_logo(width: u32, height: u32) -> LogoImage {
    LogoImage::from_bytes(png_bytes(width, height)).expect("png logo")
}

pub fn all_text(doc: &Document) -> Vec<String> {
    doc.text_lines()
        .into_iter()
        .map(|(_, t)| t.to_string())
        .collect()
}

pub fn image_ops(doc: &Document) -> Vec<(f32, f32, f32, f32)> {
    doc.pages
        .iter()
        .flat_map(|p| p.ops.iter())
        .filter_map(|op| match op {
            DrawOp::Image {
                x,
                y,
                width,
                height,
                ..
            } => Some((*x, *y, *width, *height)),
            _ => None,
        })
        .collect()
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
