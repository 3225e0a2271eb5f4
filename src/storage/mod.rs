use std::sync::Arc;

use crate::errors::Result;
use crate::models::submissions::entities::{Grade, Submission};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 提交管理方法
    // 创建提交
    async fn create_submission(
        &self,
        owner_email: &str,
        file_name: &str,
        file_data: Vec<u8>,
    ) -> Result<Submission>;
    // 替换提交的文件（所有者与成绩不变）
    async fn replace_submission_file(
        &self,
        id: i64,
        file_name: &str,
        file_data: Vec<u8>,
    ) -> Result<Submission>;
    // 设置成绩
    async fn set_submission_grade(&self, id: i64, grade: Grade) -> Result<Submission>;
    // 删除提交
    async fn delete_submission(&self, id: i64) -> Result<()>;
    // 通过ID获取提交，不存在时返回 NotFound
    async fn get_submission_by_id(&self, id: i64) -> Result<Submission>;
    // 列出某个邮箱的全部提交（按创建顺序）
    async fn list_submissions_by_owner(&self, owner_email: &str) -> Result<Vec<Submission>>;
    // 提交总数
    async fn count_submissions(&self) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
