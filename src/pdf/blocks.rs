use crate::model::{
    ANSWER_INDENT, ANSWER_WIDTH, Block, FALLBACK_LABEL, GAP_AFTER_ANSWER_BLOCK,
    GAP_AFTER_FALLBACK_LABEL, GAP_AFTER_LOGO, GAP_AFTER_MAIN_TITLE, GAP_AFTER_SECTION_TITLE,
    GAP_AFTER_SUBSECTION_TITLE, GAP_AFTER_SUBTITLE, GAP_BETWEEN_QUESTION_AND_ANSWER, LOGO_TITLE_RESERVE,
    LOGO_WIDTH, LogoImage, TEXT_WIDTH, TextStyle,
};

use super::flow::PageFlow;
use super::layout::{Wrapped, wrap};

/// One styled run of wrapped lines inside a block.
struct Piece {
    wrapped: Wrapped,
    style: TextStyle,
    indent: f32,
    gap_after: f32,
}

impl Piece {
    fn new(text: Option<&str>, style: TextStyle, indent: f32, width: f32, gap_after: f32) -> Self {
        Piece {
            wrapped: wrap(text, width, &style),
            style,
            indent,
            gap_after,
        }
    }

    fn height(&self) -> f32 {
        self.wrapped.height + self.gap_after
    }
}

/// A block with every piece measured, ready for a single page-break decision.
pub struct MeasuredBlock {
    pieces: Vec<Piece>,
}

impl MeasuredBlock {
    pub fn height(&self) -> f32 {
        self.pieces.iter().map(Piece::height).sum()
    }
}

pub fn measure(block: &Block) -> MeasuredBlock {
    let pieces = match block {
        Block::MainTitle(title) => vec![Piece::new(
            Some(title.as_str()),
            TextStyle::MAIN_TITLE,
            0.0,
            TEXT_WIDTH,
            GAP_AFTER_MAIN_TITLE,
        )],
        Block::Subtitle(subtitle) => vec![Piece::new(
            Some(subtitle.as_str()),
            TextStyle::SUBTITLE,
            0.0,
            TEXT_WIDTH,
            GAP_AFTER_SUBTITLE,
        )],
        Block::SectionHeader(title) => vec![Piece::new(
            Some(title.as_str()),
            TextStyle::SECTION_TITLE,
            0.0,
            TEXT_WIDTH,
            GAP_AFTER_SECTION_TITLE,
        )],
        Block::SubsectionHeader(title) => vec![Piece::new(
            Some(title.as_str()),
            TextStyle::SUBSECTION_TITLE,
            0.0,
            TEXT_WIDTH,
            GAP_AFTER_SUBSECTION_TITLE,
        )],
        Block::QuestionAnswer { question, answer } => vec![
            Piece::new(
                Some(question.as_str()),
                TextStyle::QUESTION,
                0.0,
                TEXT_WIDTH,
                GAP_BETWEEN_QUESTION_AND_ANSWER,
            ),
            Piece::new(
                answer.as_deref(),
                TextStyle::ANSWER,
                ANSWER_INDENT,
                ANSWER_WIDTH,
                GAP_AFTER_ANSWER_BLOCK,
            ),
        ],
    };
    MeasuredBlock { pieces }
}

/// Measure, reserve space, draw and advance. A question and its answer share
/// one page-break decision so they never end up on different pages.
pub fn render_block(flow: &mut PageFlow, block: &Block) {
    let measured = measure(block);
    flow.ensure_space(measured.height());
    for piece in &measured.pieces {
        flow.draw_lines(&piece.wrapped.lines, piece.indent, &piece.style);
        flow.advance(piece.height());
    }
}

/// Draw the logo, keeping room for the main title below it on the same page.
pub fn render_logo(flow: &mut PageFlow, image: LogoImage) {
    let height = image.display_height(LOGO_WIDTH);
    flow.ensure_space(height + LOGO_TITLE_RESERVE);
    flow.draw_image(image, LOGO_WIDTH, height);
    flow.advance(height + GAP_AFTER_LOGO);
}

/// Text stand-in for a logo that could not be loaded. Drawn at the cursor
/// without a page-break check; it only ever opens the first page.
pub fn render_fallback_label(flow: &mut PageFlow) {
    flow.draw_lines(&[FALLBACK_LABEL.to_string()], 0.0, &TextStyle::FALLBACK_LABEL);
    flow.advance(GAP_AFTER_FALLBACK_LABEL);
}
