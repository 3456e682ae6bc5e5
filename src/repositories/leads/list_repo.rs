//! # 연락처 리스트 리포지토리
//!
//! `lists`와 그에 딸린 `list_profiles`, `campaign_profiles`를 조회합니다.
//! 리스트 ID 목록으로 조회하는 메서드는 빈 목록이면 요청 없이 빈 결과를 반환합니다.

use std::sync::Arc;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::entities::leads::contact_list::{CampaignProfile, ContactList};
use crate::errors::errors::AppError;

pub struct ListRepository {
    db: Arc<Database>,
}

#[derive(Deserialize)]
struct ListIdRow {
    list_id: String,
}

static LIST_REPOSITORY_INSTANCE: OnceCell<Arc<ListRepository>> = OnceCell::new();

impl ListRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn instance() -> Arc<Self> {
        LIST_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ServiceLocator::get::<Database>())))
            .clone()
    }

    /// 사용자의 리스트 (최신순)
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<ContactList>, AppError> {
        self.db
            .table("lists")
            .select("id,user_id,name,created_at")
            .eq("user_id", user_id)
            .order("created_at", false)
            .fetch()
            .await
    }

    pub async fn count_by_user(&self, user_id: &str) -> Result<u64, AppError> {
        self.db.table("lists").select("id").eq("user_id", user_id).count().await
    }

    /// 리스트들에 연결된 캠페인 프로필
    pub async fn campaign_profiles(&self, list_ids: &[String]) -> Result<Vec<CampaignProfile>, AppError> {
        if list_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.db
            .table("campaign_profiles")
            .select("id,list_id,profile_id,status")
            .in_("list_id", list_ids)
            .fetch()
            .await
    }

    /// `list_profiles` 행의 `list_id`만 가져옵니다. 리스트별 프로필 수 집계용입니다.
    pub async fn list_profile_list_ids(&self, list_ids: &[String]) -> Result<Vec<String>, AppError> {
        if list_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<ListIdRow> = self
            .db
            .table("list_profiles")
            .select("list_id")
            .in_("list_id", list_ids)
            .fetch()
            .await?;

        Ok(rows.into_iter().map(|row| row.list_id).collect())
    }

    pub async fn count_list_profiles(&self, list_ids: &[String]) -> Result<u64, AppError> {
        if list_ids.is_empty() {
            return Ok(0);
        }

        self.db
            .table("list_profiles")
            .select("id")
            .in_("list_id", list_ids)
            .count()
            .await
    }
}

fn list_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(ListRepository::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::RepositoryRegistration {
        name: "list_repository",
        constructor: list_repository_constructor,
    }
}
