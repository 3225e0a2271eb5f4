//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model};
use crate::errors::{PortalError, Result};
use crate::models::submissions::entities::{Grade, Submission};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(
        &self,
        owner_email: &str,
        file_name: &str,
        file_data: Vec<u8>,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_email: Set(owner_email.to_string()),
            file_name: Set(file_name.to_string()),
            file_data: Set(file_data),
            grading: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 替换提交文件
    pub async fn replace_submission_file_impl(
        &self,
        id: i64,
        file_name: &str,
        file_data: Vec<u8>,
    ) -> Result<Submission> {
        let mut model = self.find_submission_model(id).await?.into_active_model();
        model.file_name = Set(file_name.to_string());
        model.file_data = Set(file_data);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 设置成绩
    pub async fn set_submission_grade_impl(&self, id: i64, grade: Grade) -> Result<Submission> {
        let mut model = self.find_submission_model(id).await?.into_active_model();
        model.grading = Set(Some(grade.to_string()));
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新成绩失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 删除提交
    pub async fn delete_submission_impl(&self, id: i64) -> Result<()> {
        let result = Submissions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除提交失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(PortalError::not_found(format!("Submission {id} not found")));
        }
        Ok(())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Submission> {
        Ok(self.find_submission_model(id).await?.into_submission())
    }

    /// 列出某个邮箱的全部提交
    pub async fn list_submissions_by_owner_impl(
        &self,
        owner_email: &str,
    ) -> Result<Vec<Submission>> {
        let submissions = Submissions::find()
            .filter(Column::UserEmail.eq(owner_email))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 统计提交总数
    pub async fn count_submissions_impl(&self) -> Result<u64> {
        Submissions::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计提交失败: {e}")))
    }

    async fn find_submission_model(&self, id: i64) -> Result<Model> {
        Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| PortalError::not_found(format!("Submission {id} not found")))
    }
}
