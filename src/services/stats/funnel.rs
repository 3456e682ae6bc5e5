//! # 리드 퍼널 집계
//!
//! 리스트별로 캠페인 프로필과 메시지를 모아 8단계 퍼널을 계산합니다.
//! 집계 자체는 순수 함수([`compute_list_funnels`], [`message_breakdown`])이고
//! [`FunnelService`]는 필요한 행을 가져와 넘기기만 합니다.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::domain::dto::stats::{FunnelStage, ListFunnel, ListSummary, MessageBreakdown, MessageTypeCount};
use crate::domain::entities::leads::{CampaignProfile, ContactList, Message};
use crate::errors::errors::AppError;
use crate::repositories::leads::{ListRepository, MessageRepository};
use crate::utils::string_utils::normalize_key;

/// 고정된 퍼널 단계 (표시 순서)
pub const FUNNEL_STAGES: [&str; 8] = [
    "initial_message",
    "follow_up_1",
    "follow_up_2",
    "follow_up_3",
    "replied",
    "interested",
    "call_booked",
    "closed",
];

/// `part / total × 100`을 0.01 단위로 내림합니다. `total`이 0이면 0
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        basis_points(part, total) as f64 / 100.0
    }
}

fn basis_points(part: u64, total: u64) -> u64 {
    part.saturating_mul(10_000) / total
}

/// 같은 모수를 나눠 가지는 비율 목록. 순서대로 더한 f64 합이 100을 넘지 않습니다.
///
/// 각 값은 0.01 단위 내림입니다. 나눗셈이 모두 떨어지면 내림 손실이 없어
/// f64 덧셈 오차로 100을 넘을 수 있으므로, 그때는 가장 큰 몫에서 0.01을 뺍니다.
pub fn share_percentages(counts: &[u64], total: u64) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; counts.len()];
    }

    let mut points: Vec<u64> = counts.iter().map(|count| basis_points(*count, total)).collect();
    let shares = to_percentages(&points);
    if shares.iter().sum::<f64>() <= 100.0 {
        return shares;
    }

    let largest = points.iter().copied().max().unwrap_or(0);
    if let Some(index) = points.iter().position(|p| *p == largest) {
        points[index] = largest.saturating_sub(1);
    }
    to_percentages(&points)
}

fn to_percentages(points: &[u64]) -> Vec<f64> {
    points.iter().map(|p| *p as f64 / 100.0).collect()
}

/// 리스트별 퍼널을 계산합니다.
///
/// - 리스트에 속하지 않은 프로필의 메시지는 무시됩니다.
/// - 한 프로필이 여러 리스트에 있으면 각 리스트에 모두 집계됩니다.
/// - 알 수 없는 메시지 타입은 `total_messages`에만 포함됩니다.
pub fn compute_list_funnels(
    lists: &[ContactList],
    campaign_profiles: &[CampaignProfile],
    messages: &[Message],
) -> Vec<ListFunnel> {
    let mut profiles_by_list: HashMap<&str, HashSet<&str>> = HashMap::new();
    for cp in campaign_profiles {
        profiles_by_list
            .entry(cp.list_id.as_str())
            .or_default()
            .insert(cp.profile_id.as_str());
    }

    let mut messages_by_profile: HashMap<&str, Vec<String>> = HashMap::new();
    for message in messages {
        messages_by_profile
            .entry(message.profile_id.as_str())
            .or_default()
            .push(normalize_key(&message.message_type));
    }

    lists
        .iter()
        .map(|list| {
            let empty = HashSet::new();
            let profiles = profiles_by_list.get(list.id.as_str()).unwrap_or(&empty);

            let mut contacted = 0u64;
            let mut total_messages = 0u64;
            let mut stage_counts: HashMap<&str, u64> = HashMap::new();

            for profile_id in profiles {
                let Some(types) = messages_by_profile.get(profile_id) else {
                    continue;
                };
                if !types.is_empty() {
                    contacted += 1;
                }
                for message_type in types {
                    total_messages += 1;
                    if let Some(stage) = FUNNEL_STAGES.iter().find(|s| **s == message_type.as_str()) {
                        *stage_counts.entry(*stage).or_default() += 1;
                    }
                }
            }

            let counts: Vec<u64> = FUNNEL_STAGES
                .iter()
                .map(|stage| stage_counts.get(stage).copied().unwrap_or(0))
                .collect();
            let stages = FUNNEL_STAGES
                .iter()
                .zip(counts.iter().zip(share_percentages(&counts, total_messages)))
                .map(|(stage, (count, percentage))| FunnelStage {
                    stage: stage.to_string(),
                    count: *count,
                    percentage,
                })
                .collect();

            let total_profiles = profiles.len() as u64;
            ListFunnel {
                list_id: list.id.clone(),
                list_name: list.name.clone(),
                total_profiles,
                contacted,
                total_messages,
                contact_rate: percentage(contacted, total_profiles),
                stages,
            }
        })
        .collect()
}

/// 메시지 타입별 개수와 비율. 타입 이름 오름차순입니다.
pub fn message_breakdown(messages: &[Message]) -> MessageBreakdown {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for message in messages {
        *counts.entry(normalize_key(&message.message_type)).or_default() += 1;
    }

    let total = messages.len() as u64;
    let values: Vec<u64> = counts.values().copied().collect();
    MessageBreakdown {
        total,
        by_type: counts
            .into_iter()
            .zip(share_percentages(&values, total))
            .map(|((message_type, count), percentage)| MessageTypeCount {
                message_type,
                count,
                percentage,
            })
            .collect(),
    }
}

/// 리스트 목록에 `list_profiles` 개수를 붙입니다.
pub fn list_summaries(lists: &[ContactList], profile_list_ids: &[String]) -> Vec<ListSummary> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for list_id in profile_list_ids {
        *counts.entry(list_id.as_str()).or_default() += 1;
    }

    lists
        .iter()
        .map(|list| ListSummary {
            id: list.id.clone(),
            name: list.name.clone(),
            profile_count: counts.get(list.id.as_str()).copied().unwrap_or(0),
            created_at: list.created_at,
        })
        .collect()
}

/// 대시보드 리스트/퍼널/메시지 통계 서비스
pub struct FunnelService {
    lists: Arc<ListRepository>,
    messages: Arc<MessageRepository>,
}

static FUNNEL_SERVICE_INSTANCE: OnceCell<Arc<FunnelService>> = OnceCell::new();

impl FunnelService {
    pub fn new(lists: Arc<ListRepository>, messages: Arc<MessageRepository>) -> Self {
        Self { lists, messages }
    }

    pub fn instance() -> Arc<Self> {
        FUNNEL_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ListRepository::instance(), MessageRepository::instance())))
            .clone()
    }

    pub async fn funnel_for_user(&self, user_id: &str) -> Result<Vec<ListFunnel>, AppError> {
        let lists = self.lists.find_by_user(user_id).await?;
        let list_ids: Vec<String> = lists.iter().map(|l| l.id.clone()).collect();
        let campaign_profiles = self.lists.campaign_profiles(&list_ids).await?;
        let messages = self.messages.find_by_user(user_id).await?;

        log::debug!(
            "퍼널 집계: 사용자 {}, 리스트 {}개, 캠페인 프로필 {}개, 메시지 {}개",
            user_id,
            lists.len(),
            campaign_profiles.len(),
            messages.len()
        );

        Ok(compute_list_funnels(&lists, &campaign_profiles, &messages))
    }

    pub async fn message_breakdown_for_user(&self, user_id: &str) -> Result<MessageBreakdown, AppError> {
        let messages = self.messages.find_by_user(user_id).await?;
        Ok(message_breakdown(&messages))
    }

    pub async fn lists_for_user(&self, user_id: &str) -> Result<Vec<ListSummary>, AppError> {
        let lists = self.lists.find_by_user(user_id).await?;
        let list_ids: Vec<String> = lists.iter().map(|l| l.id.clone()).collect();
        let profile_list_ids = self.lists.list_profile_list_ids(&list_ids).await?;

        Ok(list_summaries(&lists, &profile_list_ids))
    }
}

fn funnel_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(FunnelService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "funnel_service",
        constructor: funnel_service_constructor,
    }
}
