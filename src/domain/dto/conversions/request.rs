use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 전환 이벤트 기록 요청 (공개 엔드포인트)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackConversionRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "source는 100자 이하여야 합니다"))]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// 기간 필터 (`?from=2024-01-01&to=2024-01-31`, 양끝 포함)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConversionQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// 추천 코드 사용 기록 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackReferralRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,
}
