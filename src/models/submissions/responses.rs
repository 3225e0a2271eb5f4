use serde::Serialize;
use ts_rs::TS;

use super::entities::{Grade, Submission};

/// 提交响应（不包含文件内容）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionResponse {
    pub id: i64,
    pub user_email: String,
    pub file_name: String,
    pub file_size: i64,
    pub grading: Option<Grade>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            file_size: submission.file_data.len() as i64,
            user_email: submission.user_email,
            file_name: submission.file_name,
            grading: submission.grading,
            created_at: submission.created_at,
            updated_at: submission.updated_at,
        }
    }
}

/// 提交列表响应（无分页）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionResponse>,
}

impl From<Vec<Submission>> for SubmissionListResponse {
    fn from(submissions: Vec<Submission>) -> Self {
        Self {
            items: submissions.into_iter().map(SubmissionResponse::from).collect(),
        }
    }
}
