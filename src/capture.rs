//! Page screenshots via the Playwright CLI.
//!
//! Uses the system `npx` rather than a browser-automation crate, so no Node or browser bits are
//! linked into the binary. The capture is a single attempt.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{AuditError, AuditResult};

/// Shown with every failed capture.
pub const INSTALL_HINT: &str = "try installing browsers: npx playwright install chromium";

/// What to capture.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaptureRequest {
    /// Page to load.
    pub url: String,
    /// Viewport width in CSS pixels.
    pub width: u32,
    /// Viewport height in CSS pixels.
    pub height: u32,
    /// Capture the whole scrollable page instead of the viewport.
    pub full_page: bool,
}

impl CaptureRequest {
    /// 1920x1080 viewport capture of `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: 1920,
            height: 1080,
            full_page: false,
        }
    }

    /// Set the viewport size.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Capture the full scrollable page.
    pub fn with_full_page(mut self, full_page: bool) -> Self {
        self.full_page = full_page;
        self
    }

    /// Reject an empty url or a zero-sized viewport.
    pub fn validate(&self) -> AuditResult<()> {
        if self.url.trim().is_empty() {
            return Err(AuditError::validation("capture url must be non-empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(AuditError::validation(
                "capture viewport width/height must be non-zero",
            ));
        }
        Ok(())
    }

    /// Arguments passed to `npx`, ending with the url and `dest`.
    pub fn args(&self, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "playwright".into(),
            "screenshot".into(),
            "--viewport-size".into(),
            format!("{},{}", self.width, self.height).into(),
        ];
        if self.full_page {
            args.push("--full-page".into());
        }
        args.push(self.url.clone().into());
        args.push(dest.as_os_str().to_owned());
        args
    }
}

/// Runs `npx playwright screenshot` and decodes the result.
#[derive(Clone, Debug)]
pub struct PlaywrightCapture {
    program: PathBuf,
}

impl Default for PlaywrightCapture {
    fn default() -> Self {
        Self {
            program: PathBuf::from("npx"),
        }
    }
}

impl PlaywrightCapture {
    /// Use `program` in place of `npx`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// True if the launcher answers `--version`.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Capture `req` into `dest` and return the decoded bitmap.
    #[tracing::instrument(skip(self, dest), fields(dest = %dest.display()))]
    pub fn capture(&self, req: &CaptureRequest, dest: &Path) -> AuditResult<image::RgbaImage> {
        req.validate()?;
        ensure_parent_dir(dest)?;

        let out = Command::new(&self.program)
            .args(req.args(dest))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AuditError::capture(format!(
                        "{} not found; ensure Node.js is installed and on PATH",
                        self.program.display()
                    ))
                } else {
                    AuditError::capture(format!(
                        "failed to run {}: {e}",
                        self.program.display()
                    ))
                }
            })?;
        if !out.status.success() {
            return Err(AuditError::capture(format!(
                "screenshot failed ({}): {}; {INSTALL_HINT}",
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let img = image::open(dest).map_err(|e| {
            AuditError::capture(format!(
                "screenshot '{}' could not be decoded: {e}",
                dest.display()
            ))
        })?;
        tracing::info!(width = img.width(), height = img.height(), "captured page");
        Ok(img.to_rgba8())
    }
}

fn ensure_parent_dir(path: &Path) -> AuditResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/capture.rs"]
mod tests;
