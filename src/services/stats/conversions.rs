//! # 전환 이벤트 기록/집계

use std::collections::BTreeMap;
use std::sync::Arc;
use once_cell::sync::OnceCell;
use validator::Validate;
use crate::domain::dto::conversions::{ConversionQuery, ConversionReport, DateCount, TrackConversionRequest, TypeCount};
use crate::domain::entities::conversions::ConversionEvent;
use crate::errors::errors::AppError;
use crate::repositories::conversions::ConversionRepository;
use crate::services::stats::funnel::share_percentages;
use crate::utils::string_utils::require_field;

/// 날짜별(오름차순), 타입별(개수 내림차순) 집계. 시각이 없는 이벤트는 날짜 집계에서 빠집니다.
pub fn aggregate_conversions(events: &[ConversionEvent]) -> ConversionReport {
    let mut by_date: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_type: BTreeMap<&str, u64> = BTreeMap::new();

    for event in events {
        if let Some(created_at) = event.created_at {
            *by_date.entry(created_at.format("%Y-%m-%d").to_string()).or_default() += 1;
        }
        *by_type.entry(event.event_type.as_str()).or_default() += 1;
    }

    let total = events.len() as u64;
    let counts: Vec<u64> = by_type.values().copied().collect();
    let mut types: Vec<TypeCount> = by_type
        .into_iter()
        .zip(share_percentages(&counts, total))
        .map(|((event_type, count), percentage)| TypeCount {
            event_type: event_type.to_string(),
            count,
            percentage,
        })
        .collect();
    types.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.event_type.cmp(&b.event_type)));

    ConversionReport {
        total,
        by_date: by_date
            .into_iter()
            .map(|(date, count)| DateCount { date, count })
            .collect(),
        by_type: types,
    }
}

pub struct ConversionService {
    conversions: Arc<ConversionRepository>,
}

static CONVERSION_SERVICE_INSTANCE: OnceCell<Arc<ConversionService>> = OnceCell::new();

impl ConversionService {
    pub fn new(conversions: Arc<ConversionRepository>) -> Self {
        Self { conversions }
    }

    pub fn instance() -> Arc<Self> {
        CONVERSION_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ConversionRepository::instance())))
            .clone()
    }

    /// `eventType`은 필수입니다.
    pub async fn track(&self, request: TrackConversionRequest) -> Result<(), AppError> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        let event_type = require_field(request.event_type.as_deref(), "eventType")?;

        let event = ConversionEvent::new(&event_type, request.source, request.user_id, request.metadata);
        self.conversions.insert(&event).await?;

        log::info!("전환 이벤트 기록: {}", event_type);
        Ok(())
    }

    pub async fn record(&self, event: &ConversionEvent) -> Result<(), AppError> {
        self.conversions.insert(event).await
    }

    pub async fn report(&self, query: &ConversionQuery) -> Result<ConversionReport, AppError> {
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(AppError::ValidationError("from은 to보다 늦을 수 없습니다".to_string()));
            }
        }

        let events = self.conversions.find_between(query.from, query.to).await?;
        Ok(aggregate_conversions(&events))
    }
}

fn conversion_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(ConversionService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "conversion_service",
        constructor: conversion_service_constructor,
    }
}
