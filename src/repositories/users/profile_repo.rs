use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::errors::errors::AppError;

const TABLE: &str = "profiles";

/// `profiles` 테이블 리포지토리
pub struct ProfileRepository {
    db: Arc<Database>,
}

static PROFILE_REPOSITORY_INSTANCE: OnceCell<Arc<ProfileRepository>> = OnceCell::new();

impl ProfileRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn instance() -> Arc<Self> {
        PROFILE_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ServiceLocator::get::<Database>())))
            .clone()
    }

    pub async fn delete(&self, user_id: &str) -> Result<(), AppError> {
        self.db.table(TABLE).eq("id", user_id).delete().await
    }
}

fn profile_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(ProfileRepository::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::RepositoryRegistration {
        name: "profile_repository",
        constructor: profile_repository_constructor,
    }
}
