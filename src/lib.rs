mod error;
pub mod fonts;
pub mod form;
pub mod logo;
pub mod model;
pub mod pdf;
pub mod report;
pub mod session;

pub use error::Error;
pub use form::FormAnswers;
pub use logo::{LogoLoad, LogoSource};
pub use session::{Artifact, LoadingIndicator, LogIndicator, ReportSession};

use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

/// Lay out and serialize a report for an already-resolved logo outcome.
pub fn render_report(answers: &FormAnswers, logo: LogoLoad) -> Result<Vec<u8>, Error> {
    let doc = report::assemble(answers, logo, model::PageGeometry::A4);
    pdf::render(&doc)
}

/// Read a JSON answers document from `input`, or from stdin when it is `-`.
pub fn read_answers(input: &Path) -> Result<FormAnswers, Error> {
    let json = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    FormAnswers::from_json_str(&json)
}

/// Read answers (see [`read_answers`]) and write the PDF report to `output`.
pub fn generate_report(
    input: &Path,
    output: &Path,
    logo: &LogoSource,
    logo_timeout: Duration,
) -> Result<(), Error> {
    let t0 = Instant::now();

    let answers = read_answers(input)?;
    let t_parse = t0.elapsed();

    let artifact = ReportSession::default()
        .with_logo_timeout(logo_timeout)
        .submit(&answers, logo)?;
    let t_render = t0.elapsed();

    artifact.save_as(output)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        artifact.bytes.len(),
    );

    Ok(())
}
