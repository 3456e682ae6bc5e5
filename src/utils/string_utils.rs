//! # 문자열 유틸리티
//!
//! 요청 필드 검증과 라벨 정규화에 쓰이는 공통 함수들입니다.

use serde::Deserialize;
use crate::errors::errors::AppError;

/// 필수 필드를 검증하고 앞뒤 공백을 제거한 값을 반환합니다.
///
/// 값이 없거나 공백뿐이면 `ValidationError`를 반환합니다.
pub fn require_field(value: Option<&str>, field_name: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(AppError::ValidationError(format!(
            "{}은(는) 필수입니다",
            field_name
        ))),
    }
}

pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 빈 문자열을 `None`으로 취급하는 serde 역직렬화 함수
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 자유 형식 라벨을 `snake_case` 키로 정규화합니다.
///
/// `"Follow-up 1"` → `"follow_up_1"`
pub fn normalize_key(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some("price_123"), "priceId").unwrap(), "price_123");
        assert_eq!(require_field(Some("  pro  "), "planName").unwrap(), "pro");

        assert!(require_field(None, "customerEmail").is_err());
        assert!(require_field(Some(""), "customerEmail").is_err());
        assert!(require_field(Some(" \t\n"), "customerEmail").is_err());
    }

    #[test]
    fn test_require_field_message_names_field() {
        match require_field(None, "customerEmail") {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("customerEmail")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some(" abc ".to_string())), Some("abc".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            code: Option<String>,
        }

        let blank: Probe = serde_json::from_str(r#"{"code": "  "}"#).unwrap();
        assert_eq!(blank.code, None);

        let filled: Probe = serde_json::from_str(r#"{"code": " AB12 "}"#).unwrap();
        assert_eq!(filled.code.as_deref(), Some("AB12"));

        let missing: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.code, None);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Follow-up 1"), "follow_up_1");
        assert_eq!(normalize_key("  CALL BOOKED "), "call_booked");
        assert_eq!(normalize_key("replied"), "replied");
    }
}
