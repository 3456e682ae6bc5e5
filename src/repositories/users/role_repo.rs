//! `user_roles` 테이블 리포지토리

use std::collections::HashMap;
use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::entities::users::user::{Role, UserRole};
use crate::errors::errors::AppError;

const TABLE: &str = "user_roles";

pub struct RoleRepository {
    db: Arc<Database>,
}

static ROLE_REPOSITORY_INSTANCE: OnceCell<Arc<RoleRepository>> = OnceCell::new();

impl RoleRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn instance() -> Arc<Self> {
        ROLE_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ServiceLocator::get::<Database>())))
            .clone()
    }

    /// 여러 사용자의 역할을 한 번에 조회해 사용자 ID별로 묶습니다.
    pub async fn roles_by_user(&self, user_ids: &[String]) -> Result<HashMap<String, Vec<String>>, AppError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<UserRole> = self
            .db
            .table(TABLE)
            .select("user_id,role")
            .in_("user_id", user_ids)
            .fetch()
            .await?;

        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            grouped.entry(row.user_id).or_default().push(row.role);
        }
        Ok(grouped)
    }

    /// 기존 역할 행을 지우고 새 역할 하나를 넣습니다. 두 호출은 원자적이지 않습니다.
    pub async fn replace_role(&self, user_id: &str, role: Role) -> Result<(), AppError> {
        self.delete_for_user(user_id).await?;

        let row = UserRole {
            user_id: user_id.to_string(),
            role: role.as_str().to_string(),
        };
        let _: Vec<UserRole> = self.db.table(TABLE).insert(&row).await?;
        Ok(())
    }

    pub async fn delete_for_user(&self, user_id: &str) -> Result<(), AppError> {
        self.db.table(TABLE).eq("user_id", user_id).delete().await
    }
}

fn role_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(RoleRepository::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::RepositoryRegistration {
        name: "role_repository",
        constructor: role_repository_constructor,
    }
}
