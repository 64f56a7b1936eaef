//! Submission handling: starts a render pass, drives the loading indicator,
//! and rejects a second submission while one is still running.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::Error;
use crate::form::FormAnswers;
use crate::logo::{self, LogoSource};
use crate::model::PageGeometry;
use crate::report::{self, ARTIFACT_NAME};

/// Visual side channel shown while a report is being generated.
pub trait LoadingIndicator {
    fn show(&self);
    fn hide(&self);
}

/// Indicator that only reports progress through the log.
pub struct LogIndicator;

impl LoadingIndicator for LogIndicator {
    fn show(&self) {
        log::info!("Generating report...");
    }

    fn hide(&self) {
        log::info!("Report ready");
    }
}

/// The finished report, ready to be saved under its fixed name.
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf, Error> {
        let path = dir.join(&self.file_name);
        self.save_as(&path)?;
        Ok(path)
    }

    pub fn save_as(&self, path: &Path) -> Result<(), Error> {
        std::fs::write(path, &self.bytes).map_err(Error::Io)?;
        log::info!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(())
    }
}

pub struct ReportSession<I: LoadingIndicator = LogIndicator> {
    indicator: I,
    geometry: PageGeometry,
    logo_timeout: Duration,
    in_flight: AtomicBool,
}

/// Held for the duration of one render pass.
pub struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Default for ReportSession<LogIndicator> {
    fn default() -> Self {
        ReportSession::new(LogIndicator)
    }
}

impl<I: LoadingIndicator> ReportSession<I> {
    pub fn new(indicator: I) -> Self {
        ReportSession {
            indicator,
            geometry: PageGeometry::A4,
            logo_timeout: logo::DEFAULT_FETCH_TIMEOUT,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_logo_timeout(mut self, timeout: Duration) -> Self {
        self.logo_timeout = timeout;
        self
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Claim the session for one render pass.
    pub fn try_begin(&self) -> Result<InFlight<'_>, Error> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::SubmissionInFlight)?;
        Ok(InFlight {
            flag: &self.in_flight,
        })
    }

    /// Run one full render pass. The indicator is hidden only when the pass
    /// succeeds; on error it stays up and the error is returned.
    pub fn submit(&self, answers: &FormAnswers, logo: &LogoSource) -> Result<Artifact, Error> {
        let _guard = self.try_begin()?;
        self.indicator.show();

        let t0 = std::time::Instant::now();
        let logo = logo::load_with_timeout(logo, self.logo_timeout);
        let t_logo = t0.elapsed();

        let doc = report::assemble(answers, logo, self.geometry);
        let t_layout = t0.elapsed();

        let bytes = crate::pdf::render(&doc)?;
        let t_total = t0.elapsed();

        log::info!(
            "Timing: logo={:.1}ms, layout={:.1}ms, pdf={:.1}ms, total={:.1}ms ({} pages, {} bytes)",
            t_logo.as_secs_f64() * 1000.0,
            (t_layout - t_logo).as_secs_f64() * 1000.0,
            (t_total - t_layout).as_secs_f64() * 1000.0,
            t_total.as_secs_f64() * 1000.0,
            doc.pages.len(),
            bytes.len(),
        );

        self.indicator.hide();
        Ok(Artifact {
            file_name: ARTIFACT_NAME.to_string(),
            bytes,
        })
    }
}
