use crate::fonts::BuiltinFont;

pub type Rgb = [u8; 3];

pub const BACKGROUND: Rgb = [0x1a, 0x20, 0x2c];
pub const ACCENT: Rgb = [0x08, 0xab, 0xf1];
pub const SECONDARY_ACCENT: Rgb = [0x03, 0xcd, 0xc9];
pub const BODY_TEXT: Rgb = [0xe2, 0xe8, 0xf0];

/// Points per layout unit (layout is in millimetres).
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Vertical distance between wrapped lines, in layout units.
pub const LINE_HEIGHT: f32 = 7.0;
pub const TEXT_WIDTH: f32 = 170.0;
pub const ANSWER_INDENT: f32 = 5.0;
pub const ANSWER_WIDTH: f32 = 165.0;

pub const GAP_AFTER_MAIN_TITLE: f32 = 15.0;
pub const GAP_AFTER_SUBTITLE: f32 = 12.0;
pub const GAP_AFTER_SECTION_TITLE: f32 = 8.0;
pub const GAP_AFTER_SUBSECTION_TITLE: f32 = 5.0;
pub const GAP_BETWEEN_QUESTION_AND_ANSWER: f32 = 0.5;
pub const GAP_AFTER_ANSWER_BLOCK: f32 = 0.0;

pub const LOGO_WIDTH: f32 = 50.0;
pub const GAP_AFTER_LOGO: f32 = 10.0;
/// Room kept below the logo so the main title lands on the same page.
pub const LOGO_TITLE_RESERVE: f32 = 24.0 + GAP_AFTER_MAIN_TITLE + 10.0;
pub const FALLBACK_LABEL: &str = "EVERLEAD IQ";
pub const GAP_AFTER_FALLBACK_LABEL: f32 = 10.0;

pub const PLACEHOLDER: &str = "N/A";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font: BuiltinFont,
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const MAIN_TITLE: TextStyle = TextStyle::bold(24.0, ACCENT);
    pub const SUBTITLE: TextStyle = TextStyle::regular(12.0, BODY_TEXT);
    pub const SECTION_TITLE: TextStyle = TextStyle::bold(18.0, ACCENT);
    pub const SUBSECTION_TITLE: TextStyle = TextStyle::bold(14.0, ACCENT);
    pub const QUESTION: TextStyle = TextStyle::bold(12.0, SECONDARY_ACCENT);
    pub const ANSWER: TextStyle = TextStyle::regular(10.0, BODY_TEXT);
    pub const FALLBACK_LABEL: TextStyle = TextStyle::bold(16.0, ACCENT);

    const fn bold(size: f32, color: Rgb) -> Self {
        TextStyle {
            font: BuiltinFont::HelveticaBold,
            size,
            color,
        }
    }

    const fn regular(size: f32, color: Rgb) -> Self {
        TextStyle {
            font: BuiltinFont::Helvetica,
            size,
            color,
        }
    }
}

/// Page size and margins in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        page_width: 210.0,
        page_height: 297.0,
        margin_top: 20.0,
        margin_bottom: 20.0,
        margin_left: 20.0,
    };

    /// Lowest y a block may start at and still be considered on the page.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    pub fn usable_height(&self) -> f32 {
        self.content_bottom() - self.margin_top
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::A4
    }
}

/// One logical unit of report content.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    MainTitle(String),
    Subtitle(String),
    SectionHeader(String),
    SubsectionHeader(String),
    QuestionAnswer {
        question: String,
        answer: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// How the logo's pixels are written into the PDF.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageEncoding {
    /// JPEG bytes passed through with DCTDecode; `components` is 1 (gray) or 3 (RGB).
    Dct { data: Vec<u8>, components: u8 },
    /// Fully decoded 8-bit RGBA pixels, Flate-compressed when embedded.
    Rgba(Vec<u8>),
}

#[derive(Clone, Debug)]
pub struct LogoImage {
    pub format: ImageFormat,
    pub encoding: ImageEncoding,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl LogoImage {
    /// Height that keeps the aspect ratio at the given display width.
    pub fn display_height(&self, display_width: f32) -> f32 {
        if self.pixel_width == 0 {
            return 0.0;
        }
        self.pixel_height as f32 * display_width / self.pixel_width as f32
    }
}

/// Positions are in layout units measured from the top-left page corner.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    /// `y` is the text baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    /// `y` is the top edge; `image` indexes [`Document::images`].
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: usize,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// True once anything besides the background fill was drawn.
    pub fn has_content(&self) -> bool {
        self.ops
            .iter()
            .any(|op| !matches!(op, DrawOp::FillRect { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, &TextStyle)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, y, style, .. } => Some((text.as_str(), *y, style)),
            _ => None,
        })
    }
}

pub struct Document {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
    pub images: Vec<LogoImage>,
}

impl Document {
    /// Every text line in drawing order, with its page index.
    pub fn text_lines(&self) -> Vec<(usize, &str)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, p)| p.texts().map(move |(t, _, _)| (i, t)))
            .collect()
    }
}
