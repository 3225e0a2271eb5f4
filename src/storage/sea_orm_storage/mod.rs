//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod submissions;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(database: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&database.url)?;

        let db = if Self::is_sqlite(&db_url) {
            Self::connect_sqlite(&db_url, database).await?
        } else {
            Self::connect_generic(&db_url, database).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    fn is_sqlite(url: &str) -> bool {
        url.starts_with("sqlite:")
    }

    fn is_in_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存库每个连接各自独立，只能使用单连接且不启用 WAL
        let in_memory = Self::is_in_memory(url);
        let max_connections = if in_memory { 1 } else { database.pool_size.max(1) };
        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(database.timeout));
        if in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        } else {
            pool_options = pool_options.idle_timeout(Duration::from_secs(300));
        }

        let pool = pool_options
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(database.timeout))
            .acquire_timeout(Duration::from_secs(database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if Self::is_sqlite(url) {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::submissions::entities::{Grade, Submission};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn create_submission(
        &self,
        owner_email: &str,
        file_name: &str,
        file_data: Vec<u8>,
    ) -> Result<Submission> {
        self.create_submission_impl(owner_email, file_name, file_data)
            .await
    }

    async fn replace_submission_file(
        &self,
        id: i64,
        file_name: &str,
        file_data: Vec<u8>,
    ) -> Result<Submission> {
        self.replace_submission_file_impl(id, file_name, file_data)
            .await
    }

    async fn set_submission_grade(&self, id: i64, grade: Grade) -> Result<Submission> {
        self.set_submission_grade_impl(id, grade).await
    }

    async fn delete_submission(&self, id: i64) -> Result<()> {
        self.delete_submission_impl(id).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Submission> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_submissions_by_owner(&self, owner_email: &str) -> Result<Vec<Submission>> {
        self.list_submissions_by_owner_impl(owner_email).await
    }

    async fn count_submissions(&self) -> Result<u64> {
        self.count_submissions_impl().await
    }
}
