//! Client side of the ContractIQ analysis service.
//!
//! The service accepts a multipart form (`file`, `user_explanation`) on
//! `POST /api/v1/analyze` and answers with `{"analysis": AnalysisResult}`. Everything the
//! client needs from it sits behind the [`AnalysisApi`] trait so the submission flow can be
//! driven by a fake in tests.

pub mod client;
pub mod flow;
pub mod request;

pub use client::{ANALYZE_PATH, AnalysisApi, HttpAnalysisClient, SUBMISSION_FAILED_MESSAGE};
pub use flow::{AnalysisFlow, Stage};
pub use request::{AnalysisRequest, MAX_DOCUMENT_SIZE_BYTES};
