//! The fixed outline of the Strategic Sprint Planner report.

use crate::form::FormAnswers;
use crate::logo::LogoLoad;
use crate::model::{Block, Document, PageGeometry};
use crate::pdf::blocks::{render_block, render_fallback_label, render_logo};
use crate::pdf::flow::PageFlow;

pub const REPORT_TITLE: &str = "Strategic Sprint Planner Report";
pub const REPORT_SUBTITLE: &str = "Your 90-Day Strategic Sprint Summary";
pub const ARTIFACT_NAME: &str = "Strategic_Sprint_Report.pdf";

pub const MAX_OUTCOMES: usize = 3;
pub const MAX_DECISIONS: usize = 2;
pub const MAX_ACTIONS: usize = 5;

/// (question, answer key)
type Prompt = (&'static str, &'static str);

const STRATEGIC_ANCHOR: &[Prompt] = &[
    ("What are you building and why does it matter?", "strategicAnchor_whatBuilding"),
    (
        "What must be true 90 days from now for this quarter to feel meaningful?",
        "strategicAnchor_90DaysMeaningful",
    ),
    ("Legacy alignment check-in:", "strategicAnchor_legacyAlignment"),
    ("Organizational maturity level:", "strategicAnchor_maturityLevel"),
    ("Sector/system opportunities to watch:", "strategicAnchor_opportunities"),
];

const GUARDRAILS: &[Prompt] = &[
    ("What will you say 'no' to this quarter to stay focused?", "sayNo"),
    ("What resources or permissions do you need?", "resourcesPermissions"),
];

const TRACTION_PULSE: &[Prompt] = &[
    ("What moved forward this week?", "movedForward"),
    ("What stalled - and why?", "stalledWhy"),
    (
        "What needs reinforcement, reallocation, or removal?",
        "reinforcementReallocationRemoval",
    ),
];

const REFLECTION_JOURNAL: &[Prompt] = &[
    ("What did I learn about my leadership?", "learnedAboutLeadership"),
    ("What surprised me about my decision-making?", "surprisedByDecisionMaking"),
    ("What do I want to carry forward?", "carryForward"),
    ("What must I let go of?", "letGoOf"),
];

fn section(blocks: &mut Vec<Block>, title: &str) {
    blocks.push(Block::SectionHeader(title.to_string()));
}

fn question(blocks: &mut Vec<Block>, question: impl Into<String>, answer: Option<String>) {
    blocks.push(Block::QuestionAnswer {
        question: question.into(),
        answer,
    });
}

fn prompts(blocks: &mut Vec<Block>, answers: &FormAnswers, prompts: &[Prompt]) {
    for (q, key) in prompts {
        question(blocks, *q, answers.text(key));
    }
}

/// Report body in drawing order. Repeated entries without a name are
/// skipped entirely; missing single answers stay `None` and render as `N/A`.
pub fn outline(answers: &FormAnswers) -> Vec<Block> {
    let mut blocks = vec![
        Block::MainTitle(REPORT_TITLE.to_string()),
        Block::Subtitle(REPORT_SUBTITLE.to_string()),
    ];

    section(&mut blocks, "1. Strategic Anchor");
    prompts(&mut blocks, answers, STRATEGIC_ANCHOR);

    section(&mut blocks, "2. Outcomes That Matter");
    for i in 1..=MAX_OUTCOMES {
        let Some(name) = answers.text(&format!("outcome{i}_name")) else {
            continue;
        };
        blocks.push(Block::SubsectionHeader(format!("Outcome {i}: {name}")));
        question(&mut blocks, "Why it matters:", answers.text(&format!("outcome{i}_whyMatters")));
        question(&mut blocks, "Is it:", answers.text(&format!("outcome{i}_type")));
    }

    section(&mut blocks, "3. Critical Decisions");
    for i in 1..=MAX_DECISIONS {
        let Some(name) = answers.text(&format!("decision{i}_name")) else {
            continue;
        };
        blocks.push(Block::SubsectionHeader(format!("Decision {i}: {name}")));
        question(&mut blocks, "Owner:", answers.text(&format!("decision{i}_owner")));
        question(&mut blocks, "Cost of delay:", answers.text(&format!("decision{i}_costOfDelay")));
        question(
            &mut blocks,
            "Consensus or conviction?:",
            answers.text(&format!("decision{i}_consensusConviction")),
        );
    }

    section(&mut blocks, "4. Tactical Path & Guardrails");
    for i in 1..=MAX_ACTIONS {
        if let Some(action) = answers.text(&format!("action{i}")) {
            question(&mut blocks, format!("Action {i}:"), Some(action));
        }
    }
    prompts(&mut blocks, answers, GUARDRAILS);

    section(&mut blocks, "5. Weekly Traction Pulse (Repeat Weekly)");
    prompts(&mut blocks, answers, TRACTION_PULSE);

    section(&mut blocks, "6. Leadership Reflection Journal (End of Quarter)");
    prompts(&mut blocks, answers, REFLECTION_JOURNAL);

    blocks
}

/// Lay out the whole report. The logo outcome is consumed here and the body
/// follows on both branches.
pub fn assemble(answers: &FormAnswers, logo: LogoLoad, geometry: PageGeometry) -> Document {
    let mut flow = PageFlow::new(geometry);

    match logo {
        LogoLoad::Loaded(image) => render_logo(&mut flow, image),
        LogoLoad::Failed => render_fallback_label(&mut flow),
    }

    let blocks = outline(answers);
    for block in &blocks {
        render_block(&mut flow, block);
    }

    log::debug!(
        "Laid out {} blocks on {} page(s)",
        blocks.len(),
        flow.page_count()
    );
    flow.finish()
}
