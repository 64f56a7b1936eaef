pub mod blocks;
pub mod flow;
pub mod layout;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{BuiltinFont, register_builtin_fonts, to_winansi_bytes};
use crate::model::{Document, DrawOp, ImageEncoding, LogoImage, PT_PER_MM, Page, PageGeometry, Rgb};
use crate::report::REPORT_TITLE;

fn set_fill(content: &mut Content, color: Rgb) {
    content.set_fill_rgb(
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
    );
}

/// Layout y (from the top, in layout units) to PDF y (from the bottom, in points).
fn pdf_y(geometry: &PageGeometry, y: f32) -> f32 {
    (geometry.page_height - y) * PT_PER_MM
}

/// Write the logo as an image XObject. Pixels were validated when the logo
/// was loaded, so this cannot fail.
fn embed_image(img: &LogoImage, pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> Ref {
    let xobj_ref = alloc();
    let (w, h) = (img.pixel_width as i32, img.pixel_height as i32);

    match &img.encoding {
        ImageEncoding::Dct { data, components } => {
            let mut xobj = pdf.image_xobject(xobj_ref, data);
            xobj.filter(Filter::DctDecode);
            xobj.width(w);
            xobj.height(h);
            if *components == 1 {
                xobj.color_space().device_gray();
            } else {
                xobj.color_space().device_rgb();
            }
            xobj.bits_per_component(8);
        }
        ImageEncoding::Rgba(pixels) => {
            let has_alpha = pixels.chunks_exact(4).any(|p| p[3] < 255);

            let rgb_data: Vec<u8> = pixels
                .chunks_exact(4)
                .flat_map(|p| [p[0], p[1], p[2]])
                .collect();
            let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

            let smask_ref = if has_alpha {
                let alpha_data: Vec<u8> = pixels.chunks_exact(4).map(|p| p[3]).collect();
                let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
                let mask_ref = alloc();
                let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
                mask.filter(Filter::FlateDecode);
                mask.width(w);
                mask.height(h);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                Some(mask_ref)
            } else {
                None
            };

            let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(w);
            xobj.height(h);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
        }
    }

    xobj_ref
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn render_page(page: &Page, geometry: &PageGeometry) -> Content {
    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                content.save_state();
                set_fill(&mut content, *color);
                content.rect(
                    x * PT_PER_MM,
                    pdf_y(geometry, y + height),
                    width * PT_PER_MM,
                    height * PT_PER_MM,
                );
                content.fill_nonzero();
                content.restore_state();
            }
            DrawOp::Text { x, y, text, style } => {
                set_fill(&mut content, style.color);
                content
                    .begin_text()
                    .set_font(Name(style.font.pdf_name()), style.size)
                    .next_line(x * PT_PER_MM, pdf_y(geometry, *y))
                    .show(Str(&to_winansi_bytes(text)))
                    .end_text();
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
                image,
            } => {
                let name = image_name(*image);
                content.save_state();
                content.transform([
                    width * PT_PER_MM,
                    0.0,
                    0.0,
                    height * PT_PER_MM,
                    x * PT_PER_MM,
                    pdf_y(geometry, y + height),
                ]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
        }
    }
    content
}

/// Serialize a laid-out document into PDF bytes.
pub fn render(doc: &Document) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let font_refs: Vec<(BuiltinFont, Ref)> = register_builtin_fonts(&mut pdf, &mut alloc);

    let mut image_xobjects: Vec<(String, Ref)> = Vec::with_capacity(doc.images.len());
    for (i, img) in doc.images.iter().enumerate() {
        let xobj_ref = embed_image(img, &mut pdf, &mut alloc);
        image_xobjects.push((image_name(i), xobj_ref));
    }
    let t_resources = t0.elapsed();

    let n = doc.pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, page) in doc.pages.iter().enumerate() {
        let raw = render_page(page, &doc.geometry).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);
    pdf.document_info(info_id)
        .title(TextStr(REPORT_TITLE))
        .producer(TextStr(concat!("sprint-report ", env!("CARGO_PKG_VERSION"))));

    let width_pt = doc.geometry.page_width * PT_PER_MM;
    let height_pt = doc.geometry.page_height * PT_PER_MM;
    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, width_pt, height_pt))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for (font, font_ref) in &font_refs {
                fonts.pair(Name(font.pdf_name()), *font_ref);
            }
        }
        if !image_xobjects.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, xobj_ref) in &image_xobjects {
                xobjects.pair(Name(name.as_bytes()), *xobj_ref);
            }
        }
    }

    log::info!(
        "PDF phases: resources={:.1}ms, pages={:.1}ms ({} page(s), {} image(s))",
        t_resources.as_secs_f64() * 1000.0,
        (t0.elapsed() - t_resources).as_secs_f64() * 1000.0,
        n,
        doc.images.len(),
    );

    Ok(pdf.finish())
}
