use serde::{Deserialize, Serialize};

use crate::infrastructure::ingestion::IngestReport;

/// Largest accepted upload (10 MB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// POST /api/upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub chunks_added: usize,
    pub title: String,
    pub document_id: String,
}

impl From<IngestReport> for UploadResponse {
    fn from(report: IngestReport) -> Self {
        Self {
            status: "ok".to_string(),
            chunks_added: report.chunks_added,
            title: report.title,
            document_id: report.document_id,
        }
    }
}
