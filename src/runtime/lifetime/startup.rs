use crate::config::AppConfig;
use crate::errors::Result;
use crate::identity::{IdentityProvider, create_identity_provider};
use crate::models::submissions::entities::Grade;
use crate::storage::Storage;
use crate::utils::jwt::TokenValidator;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub token_validator: Arc<TokenValidator>,
}

/// 演示数据：(邮箱, 数量, 是否已评分)
const DEMO_SUBMISSIONS: &[(&str, usize, bool)] = &[
    ("tom@gmail.com", 1, true),
    ("tom@gmail.com", 2, false),
    ("lukas@gmail.com", 3, true),
    ("lukas@gmail.com", 4, false),
    ("laura@gmail.com", 5, true),
    ("laura@gmail.com", 6, false),
];

/// 写入演示提交
/// 只在提交表为空时写入，返回写入的条数
pub async fn seed_demo_submissions(storage: &Arc<dyn Storage>) -> Result<usize> {
    let existing = storage.count_submissions().await?;
    if existing > 0 {
        debug!(
            "Database already has {} submission(s), skipping demo seed",
            existing
        );
        return Ok(0);
    }

    let mut created = 0;
    for (email, count, graded) in DEMO_SUBMISSIONS {
        for i in 1..=*count {
            let submission = storage
                .create_submission(
                    email,
                    &format!("submission_{i}.pdf"),
                    format!("Dummy content for submission {i}").into_bytes(),
                )
                .await?;
            if *graded {
                storage
                    .set_submission_grade(submission.id, Grade::SehrGut)
                    .await?;
            }
            created += 1;
        }
    }

    info!("Seeded {} demo submissions", created);
    Ok(created)
}

/// 准备服务器启动的上下文
/// 包括存储、身份提供方和令牌校验器
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    if config.seed.demo_submissions
        && let Err(e) = seed_demo_submissions(&storage).await
    {
        warn!("Failed to seed demo submissions: {}", e);
    }

    let identity_provider =
        create_identity_provider().expect("Failed to create identity provider client");
    warn!(
        "Identity provider: {} (client '{}')",
        config.admin_realm_url(),
        config.keycloak.client_id
    );

    let token_validator =
        Arc::new(TokenValidator::from_config(config).expect("Failed to create token validator"));

    StartupContext {
        storage,
        identity_provider,
        token_validator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_seed_only_into_empty_table() {
        let database = DatabaseConfig {
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        };
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::connect(&database).await.unwrap());

        assert_eq!(seed_demo_submissions(&storage).await.unwrap(), 21);
        assert_eq!(seed_demo_submissions(&storage).await.unwrap(), 0);

        let tom = storage.list_submissions_by_owner("tom@gmail.com").await.unwrap();
        assert_eq!(tom.len(), 3);
        assert_eq!(tom[0].file_name, "submission_1.pdf");
        assert_eq!(tom[0].grading, Some(Grade::SehrGut));
        assert_eq!(tom[1].grading, None);
        assert_eq!(tom[2].file_data, b"Dummy content for submission 2".to_vec());

        let laura = storage.list_submissions_by_owner("laura@gmail.com").await.unwrap();
        assert_eq!(laura.len(), 11);
        assert_eq!(
            laura.iter().filter(|s| s.grading.is_some()).count(),
            5
        );
    }
}
