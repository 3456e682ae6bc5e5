use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::entities::leads::message::Message;
use crate::errors::errors::AppError;

const TABLE: &str = "messages";

/// `messages` 테이블 리포지토리
///
/// 항상 `user_id`로 필터링합니다.
pub struct MessageRepository {
    db: Arc<Database>,
}

static MESSAGE_REPOSITORY_INSTANCE: OnceCell<Arc<MessageRepository>> = OnceCell::new();

impl MessageRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn instance() -> Arc<Self> {
        MESSAGE_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ServiceLocator::get::<Database>())))
            .clone()
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Message>, AppError> {
        self.db
            .table(TABLE)
            .select("id,user_id,profile_id,message_type,created_at")
            .eq("user_id", user_id)
            .fetch()
            .await
    }

    pub async fn count_by_user(&self, user_id: &str) -> Result<u64, AppError> {
        self.db.table(TABLE).select("id").eq("user_id", user_id).count().await
    }
}

fn message_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(MessageRepository::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::RepositoryRegistration {
        name: "message_repository",
        constructor: message_repository_constructor,
    }
}
