use serde::Deserialize;
use ts_rs::TS;

use super::entities::Grade;

// 评分参数：PUT /submissions/grading/{id}?grading=GUT
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeQuery {
    pub grading: Grade,
}
