use std::sync::Arc;
use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::entities::conversions::conversion_event::ConversionEvent;
use crate::errors::errors::AppError;

const TABLE: &str = "conversion_events";

/// `conversion_events` 테이블 리포지토리
pub struct ConversionRepository {
    db: Arc<Database>,
}

static CONVERSION_REPOSITORY_INSTANCE: OnceCell<Arc<ConversionRepository>> = OnceCell::new();

impl ConversionRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn instance() -> Arc<Self> {
        CONVERSION_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ServiceLocator::get::<Database>())))
            .clone()
    }

    pub async fn insert(&self, event: &ConversionEvent) -> Result<(), AppError> {
        let _: Vec<ConversionEvent> = self.db.table(TABLE).insert(event).await?;
        Ok(())
    }

    /// 기간(양끝 날짜 포함)의 이벤트를 시간순으로 가져옵니다.
    pub async fn find_between(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Vec<ConversionEvent>, AppError> {
        let mut query = self.db.table(TABLE).select("*");
        if let Some(from) = from {
            query = query.gte("created_at", from.format("%Y-%m-%d"));
        }
        if let Some(to) = to.and_then(|d| d.succ_opt()) {
            query = query.lt("created_at", to.format("%Y-%m-%d"));
        }

        query.order("created_at", true).fetch().await
    }
}

fn conversion_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(ConversionRepository::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::RepositoryRegistration {
        name: "conversion_repository",
        constructor: conversion_repository_constructor,
    }
}
