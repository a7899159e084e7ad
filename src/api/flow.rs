//! Input → loading → results progression of a single analysis.
//!
//! The draft (document and expectations) survives a failed submission: the flow drops back to
//! [`Stage::Input`] with everything the user entered still in place, ready to resubmit.

use anyhow::{Result, bail};
use tracing::warn;

use super::client::AnalysisApi;
use super::request::AnalysisRequest;
use crate::models::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    Loading,
    Results,
}

#[derive(Debug)]
pub struct AnalysisFlow {
    stage: Stage,
    draft: Option<AnalysisRequest>,
    result: Option<AnalysisResult>,
    last_error: Option<String>,
}

impl Default for AnalysisFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisFlow {
    pub fn new() -> Self {
        Self { stage: Stage::Input, draft: None, result: None, last_error: None }
    }

    pub fn with_draft(draft: AnalysisRequest) -> Self {
        Self { draft: Some(draft), ..Self::new() }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn draft(&self) -> Option<&AnalysisRequest> {
        self.draft.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_draft(&mut self, draft: AnalysisRequest) {
        self.draft = Some(draft);
    }

    pub fn can_submit(&self) -> bool {
        self.stage != Stage::Loading && self.draft.as_ref().is_some_and(|d| d.validate().is_ok())
    }

    /// Submit the current draft
    ///
    /// On success the flow moves to [`Stage::Results`]. On failure it returns to
    /// [`Stage::Input`], keeps the draft unchanged and records the error.
    pub fn submit(&mut self, api: &dyn AnalysisApi) -> Result<&AnalysisResult> {
        let Some(draft) = self.draft.as_ref() else {
            bail!("No contract selected");
        };
        draft.validate()?;

        self.stage = Stage::Loading;
        self.last_error = None;

        match api.analyze(draft) {
            Ok(result) => {
                self.stage = Stage::Results;
                Ok(self.result.insert(result))
            }
            Err(e) => {
                warn!(error = %e, "analysis submission failed");
                self.stage = Stage::Input;
                self.last_error = Some(format!("{:#}", e));
                Err(e)
            }
        }
    }

    /// Show a previously stored report
    pub fn show_result(&mut self, result: AnalysisResult) {
        self.result = Some(result);
        self.stage = Stage::Results;
    }

    /// Discard draft and result and start over
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
