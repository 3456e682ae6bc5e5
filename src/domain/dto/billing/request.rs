//! 결제 요청 DTO
//!
//! 필수 필드 검증은 핸들러가 업스트림 호출 전에 수행합니다.

use serde::Deserialize;
use crate::errors::errors::AppError;
use crate::utils::string_utils::{deserialize_optional_string, require_field};

/// 체크아웃 세션 생성 요청
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub price_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub plan_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub customer_email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub temp_user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub referral_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub success_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub cancel_url: Option<String>,
}

/// 필수 필드 검증을 통과한 체크아웃 요청
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCheckout {
    pub price_id: String,
    pub plan_name: String,
    pub customer_email: String,
    pub user_id: Option<String>,
    pub temp_user_id: Option<String>,
    pub referral_code: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
}

impl CreateCheckoutRequest {
    /// `priceId`, `planName`, `customerEmail`이 모두 있어야 합니다.
    pub fn validate(self) -> Result<ValidatedCheckout, AppError> {
        Ok(ValidatedCheckout {
            price_id: require_field(self.price_id.as_deref(), "priceId")?,
            plan_name: require_field(self.plan_name.as_deref(), "planName")?,
            customer_email: require_field(self.customer_email.as_deref(), "customerEmail")?,
            user_id: self.user_id,
            temp_user_id: self.temp_user_id,
            referral_code: self.referral_code,
            success_url: self.success_url,
            cancel_url: self.cancel_url,
        })
    }
}

/// 빌링 포털 세션 생성 요청
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortalRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub return_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_complete_request() {
        let request: CreateCheckoutRequest = serde_json::from_str(
            r#"{"priceId":"price_1","planName":"Pro","customerEmail":"a@b.com","tempUserId":"t1","referralCode":""}"#,
        )
        .unwrap();

        let validated = request.validate().unwrap();
        assert_eq!(validated.price_id, "price_1");
        assert_eq!(validated.temp_user_id.as_deref(), Some("t1"));
        assert_eq!(validated.referral_code, None);
    }

    #[test]
    fn test_validate_rejects_missing_email() {
        let request: CreateCheckoutRequest =
            serde_json::from_str(r#"{"priceId":"price_1","planName":"Pro"}"#).unwrap();

        match request.validate() {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("customerEmail")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_blank_price() {
        let request: CreateCheckoutRequest = serde_json::from_str(
            r#"{"priceId":"   ","planName":"Pro","customerEmail":"a@b.com"}"#,
        )
        .unwrap();

        assert!(matches!(request.validate(), Err(AppError::ValidationError(_))));
    }
}
