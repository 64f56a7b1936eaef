use crate::model::{BACKGROUND, Document, DrawOp, LINE_HEIGHT, LogoImage, Page, PageGeometry, Rgb, TextStyle};

/// Tracks the vertical write position and owns the pages produced so far.
/// Pages are append-only; once a break happens the previous page is final.
pub struct PageFlow {
    geometry: PageGeometry,
    background: Rgb,
    cursor: f32,
    pages: Vec<Page>,
    images: Vec<LogoImage>,
}

impl PageFlow {
    pub fn new(geometry: PageGeometry) -> Self {
        let mut flow = PageFlow {
            geometry,
            background: BACKGROUND,
            cursor: geometry.margin_top,
            pages: Vec::new(),
            images: Vec::new(),
        };
        flow.new_page();
        flow
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Start a new page when `height_needed` does not fit above the bottom
    /// margin. Returns whether a break happened.
    ///
    /// One exception to the fit rule: a page holding nothing but its
    /// background is never abandoned. An oversized block (in practice only a
    /// very tall logo on the first page) overflows there rather than leaving
    /// a blank first page behind, which is what a plain fit check would do.
    pub fn ensure_space(&mut self, height_needed: f32) -> bool {
        if self.cursor + height_needed <= self.geometry.content_bottom() {
            return false;
        }
        if !self.current_page().has_content() {
            log::debug!(
                "Block of {height_needed:.1} exceeds page {} but the page is empty; overflowing",
                self.pages.len()
            );
            return false;
        }
        log::debug!(
            "Page break before block of {height_needed:.1} at y={:.1} (page {})",
            self.cursor,
            self.pages.len()
        );
        self.new_page();
        true
    }

    pub fn advance(&mut self, height: f32) {
        self.cursor = (self.cursor + height).clamp(0.0, self.geometry.page_height);
    }

    /// Append a page painted with the background colour and reset the cursor.
    pub fn new_page(&mut self) {
        let g = &self.geometry;
        self.pages.push(Page {
            ops: vec![DrawOp::FillRect {
                x: 0.0,
                y: 0.0,
                width: g.page_width,
                height: g.page_height,
                color: self.background,
            }],
        });
        self.cursor = g.margin_top;
    }

    /// Draw pre-wrapped lines with the first baseline at the cursor.
    /// The cursor itself is left for the caller to advance.
    pub fn draw_lines(&mut self, lines: &[String], indent: f32, style: &TextStyle) {
        let x = self.geometry.margin_left + indent;
        let top = self.cursor;
        let page = self.current_page_mut();
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            page.ops.push(DrawOp::Text {
                x,
                y: top + i as f32 * LINE_HEIGHT,
                text: line.clone(),
                style: *style,
            });
        }
    }

    /// Place `image` at the left margin with its top edge at the cursor.
    pub fn draw_image(&mut self, image: LogoImage, width: f32, height: f32) {
        let index = self.images.len();
        self.images.push(image);
        let x = self.geometry.margin_left;
        let y = self.cursor;
        self.current_page_mut().ops.push(DrawOp::Image {
            x,
            y,
            width,
            height,
            image: index,
        });
    }

    pub fn finish(self) -> Document {
        Document {
            geometry: self.geometry,
            pages: self.pages,
            images: self.images,
        }
    }

    fn current_page(&self) -> &Page {
        // new() always pushes the first page
        &self.pages[self.pages.len() - 1]
    }

    fn current_page_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}
