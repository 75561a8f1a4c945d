//! Template lookup: probes an ordered list of candidate paths and loads the
//! first one that exists, is non-empty and parses as a .docx.
//!
//! First match wins. Nothing is cached: every render re-reads the file, and
//! the file handle is closed before `probe` returns.

use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use docx_rs::Docx;
use serde::Serialize;
use tracing::{info, warn};

use crate::report::TemplateError;

pub const DEFAULT_TEMPLATE_NAME: &str = "template.docx";

#[derive(Debug)]
pub enum TemplateProbe {
    Found { path: PathBuf, docx: Docx },
    /// No candidate was usable; `reason` describes the last rejection.
    Unavailable { reason: String },
}

/// A candidate path as seen on disk, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateStatus {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct TemplateLocator {
    candidates: Vec<PathBuf>,
}

impl TemplateLocator {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Standard probe order for `file_name`, after `explicit` if one is configured:
    /// 1. the bare name (relative to the working directory)
    /// 2. next to the running executable
    /// 3. the absolute form of the bare name
    /// 4. the working directory joined explicitly
    pub fn standard(file_name: &str, explicit: Option<PathBuf>) -> Self {
        let mut candidates: Vec<PathBuf> = explicit.into_iter().collect();
        candidates.push(PathBuf::from(file_name));

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join(file_name));
        }
        if let Ok(absolute) = std::path::absolute(file_name) {
            candidates.push(absolute);
        }
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(file_name));
        }

        Self::new(candidates)
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    pub fn probe(&self) -> TemplateProbe {
        let mut last_rejection = None;

        for path in &self.candidates {
            info!("Checking for template at: {}", path.display());
            match load_template(path) {
                Ok(docx) => {
                    info!("Template loaded from: {}", path.display());
                    return TemplateProbe::Found {
                        path: path.clone(),
                        docx,
                    };
                }
                Err(e @ TemplateError::MissingOrEmpty(_)) => {
                    info!("{e}");
                    last_rejection = Some(e);
                }
                Err(e @ TemplateError::Load { .. }) => {
                    warn!("{e}");
                    last_rejection = Some(e);
                }
            }
        }

        let reason = match last_rejection {
            Some(e) => format!(
                "no usable template among {} candidates (last: {e})",
                self.candidates.len()
            ),
            None => "no template candidates configured".to_string(),
        };
        TemplateProbe::Unavailable { reason }
    }

    pub fn candidate_report(&self) -> Vec<CandidateStatus> {
        self.candidates
            .iter()
            .map(|path| {
                let size_bytes = fs::metadata(path)
                    .ok()
                    .filter(|m| m.is_file())
                    .map(|m| m.len());
                CandidateStatus {
                    path: path.clone(),
                    exists: size_bytes.is_some(),
                    size_bytes,
                }
            })
            .collect()
    }
}

fn load_template(path: &Path) -> Result<Docx, TemplateError> {
    let metadata = match fs::metadata(path) {
        Ok(m) if m.is_file() => m,
        _ => return Err(TemplateError::MissingOrEmpty(path.to_path_buf())),
    };
    if metadata.len() == 0 {
        warn!("Template file exists but is empty: {}", path.display());
        return Err(TemplateError::MissingOrEmpty(path.to_path_buf()));
    }

    let load_error = |reason: String| TemplateError::Load {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = fs::read(path).map_err(|e| load_error(e.to_string()))?;
    match catch_unwind(AssertUnwindSafe(|| docx_rs::read_docx(&bytes))) {
        Ok(Ok(docx)) => Ok(docx),
        Ok(Err(e)) => Err(load_error(e.to_string())),
        Err(_) => Err(load_error("template parser panicked".to_string())),
    }
}
