use serde::Serialize;
use ts_rs::TS;

// GET /user 响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UserInfoResponse {
    pub name: String,
    pub role: String,
}
