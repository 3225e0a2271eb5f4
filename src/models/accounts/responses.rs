use serde::Serialize;
use ts_rs::TS;

use super::entities::AccountRecord;

/// 学生列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct StudentListResponse {
    pub items: Vec<AccountRecord>,
}
