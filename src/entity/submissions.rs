//! 提交实体

use sea_orm::entity::prelude::*;

use crate::models::submissions::entities::{Grade, Submission};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_email: String,
    pub file_name: String,
    pub file_data: Vec<u8>,
    pub grading: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(self) -> Submission {
        use chrono::{DateTime, Utc};

        Submission {
            id: self.id,
            user_email: self.user_email,
            file_name: self.file_name,
            file_data: self.file_data,
            // 无法识别的成绩按未评分处理
            grading: self.grading.and_then(|g| g.parse::<Grade>().ok()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
