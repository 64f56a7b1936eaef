//! Loading of the optional report logo.
//!
//! Loading never fails the report: every error collapses into
//! [`LogoLoad::Failed`], which the assembler answers with a text label.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;
use crate::model::{ImageEncoding, ImageFormat, LogoImage};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq)]
pub enum LogoSource {
    None,
    File(PathBuf),
    Url(String),
}

impl LogoSource {
    /// `http://` and `https://` locations are fetched; anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.is_empty() {
            LogoSource::None
        } else if location.starts_with("http://") || location.starts_with("https://") {
            LogoSource::Url(location.to_string())
        } else {
            LogoSource::File(PathBuf::from(location))
        }
    }
}

/// Outcome of loading the logo. Consumed by value, so the report body is
/// rendered exactly once whichever branch fired.
#[derive(Debug)]
pub enum LogoLoad {
    Loaded(LogoImage),
    Failed,
}

impl LogoImage {
    /// Sniff the format and decode every pixel up front, so a truncated or
    /// corrupt file is rejected here rather than while the PDF is written.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        let (format, reader_format) = match image::guess_format(&data)? {
            image::ImageFormat::Png => (ImageFormat::Png, image::ImageFormat::Png),
            image::ImageFormat::Jpeg => (ImageFormat::Jpeg, image::ImageFormat::Jpeg),
            other => {
                return Err(Error::Logo(format!("unsupported image format {other:?}")));
            }
        };
        let decoded = image::load_from_memory_with_format(&data, reader_format)?;
        let (pixel_width, pixel_height) = (decoded.width(), decoded.height());
        if pixel_width == 0 || pixel_height == 0 {
            return Err(Error::Logo("image has no pixels".into()));
        }

        // Gray and RGB JPEGs embed as-is; CMYK and anything unusual goes
        // through the decoded pixels instead.
        let encoding = match (format, jpeg_components(&data)) {
            (ImageFormat::Jpeg, Some(components @ (1 | 3))) => ImageEncoding::Dct { data, components },
            _ => ImageEncoding::Rgba(decoded.to_rgba8().into_raw()),
        };

        Ok(LogoImage {
            format,
            encoding,
            pixel_width,
            pixel_height,
        })
    }
}

/// Component count from the first JPEG start-of-frame segment.
fn jpeg_components(data: &[u8]) -> Option<u8> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut i = 2;
    while i + 4 <= data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        if marker == 0xFF {
            i += 1;
            continue;
        }
        // Scan data starts before any frame header was seen
        if marker == 0xDA {
            return None;
        }
        if matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            return data.get(i + 9).copied();
        }
        let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + len;
    }
    None
}

pub fn load(source: &LogoSource) -> LogoLoad {
    load_with_timeout(source, DEFAULT_FETCH_TIMEOUT)
}

pub fn load_with_timeout(source: &LogoSource, timeout: Duration) -> LogoLoad {
    let t0 = std::time::Instant::now();
    let result = match source {
        LogoSource::None => {
            log::debug!("No logo configured; using fallback text");
            return LogoLoad::Failed;
        }
        LogoSource::File(path) => std::fs::read(path)
            .map_err(|e| Error::Logo(format!("{}: {e}", path.display())))
            .and_then(LogoImage::from_bytes),
        LogoSource::Url(url) => fetch(url, timeout).and_then(LogoImage::from_bytes),
    };

    match result {
        Ok(image) => {
            log::info!(
                "Loaded logo {}x{} ({:?}) in {:.1}ms",
                image.pixel_width,
                image.pixel_height,
                image.format,
                t0.elapsed().as_secs_f64() * 1000.0,
            );
            LogoLoad::Loaded(image)
        }
        Err(e) => {
            log::error!("Failed to load logo image ({e}); using fallback text");
            LogoLoad::Failed
        }
    }
}

#[cfg(feature = "remote-logo")]
fn fetch(url: &str, timeout: Duration) -> Result<Vec<u8>, Error> {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    let agent: ureq::Agent = config.into();

    let mut response = agent
        .get(url)
        .call()
        .map_err(|e| Error::Logo(format!("request to {url} failed: {e}")))?;
    response
        .body_mut()
        .read_to_vec()
        .map_err(|e| Error::Logo(format!("reading {url} failed: {e}")))
}

#[cfg(not(feature = "remote-logo"))]
fn fetch(url: &str, _timeout: Duration) -> Result<Vec<u8>, Error> {
    Err(Error::Logo(format!(
        "cannot fetch {url}: built without the remote-logo feature"
    )))
}
