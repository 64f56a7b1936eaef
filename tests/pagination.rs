mod common;

use sprint_report::model::{BACKGROUND, Block, DrawOp, PageGeometry, TextStyle};
use sprint_report::pdf::blocks::{measure, render_block};
use sprint_report::pdf::flow::PageFlow;

fn qa(question: &str, answer: Option<String>) -> Block {
    Block::QuestionAnswer {
        question: question.to_string(),
        answer,
    }
}

fn filler_answer(words: usize) -> Option<String> {
    Some(vec!["momentum"; words].join(" "))
}

#[test]
fn first_page_is_painted_and_cursor_at_top_margin() {
    let g = PageGeometry::A4;
    let flow = PageFlow::new(g);
    assert_eq!(flow.page_count(), 1);
    assert!(common::approx(flow.cursor(), g.margin_top));

    let doc = flow.finish();
    assert_eq!(
        doc.pages[0].ops,
        vec![DrawOp::FillRect {
            x: 0.0,
            y: 0.0,
            width: 210.0,
            height: 297.0,
            color: BACKGROUND,
        }]
    );
}

#[test]
fn ensure_space_breaks_only_when_block_overflows() {
    let mut flow = PageFlow::new(PageGeometry::A4);
    render_block(&mut flow, &Block::SectionHeader("1. Strategic Anchor".into()));

    flow.advance(250.0 - flow.cursor());
    assert!(!flow.ensure_space(27.0));
    assert_eq!(flow.page_count(), 1);

    assert!(flow.ensure_space(27.5));
    assert_eq!(flow.page_count(), 2);
    assert!(common::approx(flow.cursor(), 20.0));

    let doc = flow.finish();
    assert!(matches!(
        doc.pages[1].ops.as_slice(),
        [DrawOp::FillRect { color, .. }] if *color == BACKGROUND
    ));
}

#[test]
fn empty_page_is_never_abandoned() {
    let mut flow = PageFlow::new(PageGeometry::A4);
    assert!(!flow.ensure_space(1000.0));
    assert_eq!(flow.page_count(), 1);
}

#[test]
fn oversized_block_overflows_then_next_block_breaks() {
    let g = PageGeometry::A4;
    let mut flow = PageFlow::new(g);
    let huge = qa("Sector/system opportunities to watch:", filler_answer(1500));
    assert!(measure(&huge).height() > g.usable_height());

    render_block(&mut flow, &huge);
    assert_eq!(flow.page_count(), 1);
    assert!(common::approx(flow.cursor(), g.page_height));

    render_block(&mut flow, &qa("Owner:", Some("Dana".into())));
    assert_eq!(flow.page_count(), 2);
}

#[test]
fn question_and_answer_share_a_page() {
    let g = PageGeometry::A4;
    let mut flow = PageFlow::new(g);
    for i in 0..60 {
        let block = qa(&format!("Action {}:", i + 1), filler_answer((i * 7) % 60));
        assert!(measure(&block).height() <= g.usable_height());
        render_block(&mut flow, &block);
    }
    let doc = flow.finish();
    assert!(doc.pages.len() > 2);

    for (i, page) in doc.pages.iter().enumerate() {
        let styles: Vec<TextStyle> = page.texts().map(|(_, _, s)| *s).collect();
        assert_eq!(styles.first(), Some(&TextStyle::QUESTION), "page {i} starts mid-block");
        assert_eq!(styles.last(), Some(&TextStyle::ANSWER), "page {i} ends on a question");
    }
}

#[test]
fn no_line_starts_below_the_bottom_margin() {
    let g = PageGeometry::A4;
    let mut flow = PageFlow::new(g);
    for i in 0..40 {
        if i % 9 == 0 {
            render_block(&mut flow, &Block::SectionHeader(format!("{}. Section", i / 9 + 1)));
        }
        render_block(&mut flow, &qa("What moved forward this week?", filler_answer(i * 3)));
    }
    let doc = flow.finish();
    for page in &doc.pages {
        for (text, y, _) in page.texts() {
            assert!(y >= g.margin_top - 1e-3, "{text:?} above top margin");
            assert!(y <= g.content_bottom() + 1e-3, "{text:?} at y={y} below bottom margin");
        }
    }
}

#[test]
fn answers_are_indented() {
    let mut flow = PageFlow::new(PageGeometry::A4);
    render_block(&mut flow, &qa("Owner:", None));
    let doc = flow.finish();

    let xs: Vec<(String, f32)> = doc.pages[0]
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { x, text, .. } => Some((text.clone(), *x)),
            _ => None,
        })
        .collect();
    assert_eq!(xs, vec![("Owner:".to_string(), 20.0), ("N/A".to_string(), 25.0)]);
}
