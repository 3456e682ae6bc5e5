//! 대시보드 집계 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 퍼널 단계별 메시지 수
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunnelStage {
    pub stage: String,
    pub count: u64,
    /// 리스트 전체 메시지 대비 비율 (0-100)
    pub percentage: f64,
}

/// 리스트 하나의 리드 퍼널
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListFunnel {
    pub list_id: String,
    pub list_name: String,
    pub total_profiles: u64,
    /// 메시지를 한 번 이상 받은 프로필 수
    pub contacted: u64,
    pub total_messages: u64,
    pub contact_rate: f64,
    pub stages: Vec<FunnelStage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageTypeCount {
    pub message_type: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageBreakdown {
    pub total: u64,
    pub by_type: Vec<MessageTypeCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListSummary {
    pub id: String,
    pub name: String,
    pub profile_count: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// 한 자원의 사용량
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UsageMetric {
    pub used: u64,
    pub limit: u64,
    /// 0-100으로 제한
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UsageSummary {
    pub lists: UsageMetric,
    pub profiles: UsageMetric,
    pub messages: UsageMetric,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferralStats {
    pub total: u64,
    pub converted: u64,
    pub pending: u64,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferralCode {
    pub code: String,
}
