//! # 웹훅 서명 검증
//!
//! `Stripe-Signature: t=<unix>,v1=<hex>[,v1=<hex>...]`
//!
//! 기대값은 `hex(HMAC-SHA256(secret, "{t}.{payload}"))`이며 `v1` 값 중 하나와
//! 상수 시간 비교로 일치해야 합니다. 타임스탬프는 허용 오차 안에 있어야 합니다.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use crate::errors::errors::{AppError, ErrorContext};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, PartialEq)]
struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_header(header: &str) -> Result<SignatureHeader, AppError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse::<i64>().ok(),
            "v1" => signatures.push(value.to_string()),
            _ => {}
        }
    }

    let timestamp = timestamp
        .ok_or_else(|| AppError::ValidationError("서명 헤더에 타임스탬프가 없습니다".to_string()))?;
    if signatures.is_empty() {
        return Err(AppError::ValidationError("서명 헤더에 v1 서명이 없습니다".to_string()));
    }

    Ok(SignatureHeader { timestamp, signatures })
}

fn compute_signature(payload: &[u8], secret: &str, timestamp: i64) -> Result<String, AppError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .context("HMAC 키 생성 실패")?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// 서명 헤더 값을 만듭니다 (`t=...,v1=...`).
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> Result<String, AppError> {
    Ok(format!("t={},v1={}", timestamp, compute_signature(payload, secret, timestamp)?))
}

/// 서명을 검증합니다. 실패는 모두 `ValidationError`(400)입니다.
pub fn verify_signature(
    payload: &[u8],
    header: Option<&str>,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), AppError> {
    let header = header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::ValidationError("Stripe-Signature 헤더가 없습니다".to_string()))?;
    let parsed = parse_header(header)?;

    if (now - parsed.timestamp).abs() > tolerance_secs {
        return Err(AppError::ValidationError("서명 타임스탬프가 허용 범위를 벗어났습니다".to_string()));
    }

    let expected = compute_signature(payload, secret, parsed.timestamp)?;
    let matched = parsed
        .signatures
        .iter()
        .any(|candidate| bool::from(candidate.as_bytes().ct_eq(expected.as_bytes())));

    if matched {
        Ok(())
    } else {
        Err(AppError::ValidationError("웹훅 서명이 일치하지 않습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";
    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_valid_signature() {
        let payload = br#"{"id":"evt_1"}"#;
        let header = sign_payload(payload, SECRET, NOW).unwrap();

        assert!(verify_signature(payload, Some(&header), SECRET, 300, NOW + 10).is_ok());
    }

    #[test]
    fn test_any_of_multiple_v1_may_match() {
        let payload = b"{}";
        let good = compute_signature(payload, SECRET, NOW).unwrap();
        let header = format!("t={},v1={},v1={}", NOW, "00".repeat(32), good);

        assert!(verify_signature(payload, Some(&header), SECRET, 300, NOW).is_ok());
    }

    #[test]
    fn test_missing_header_is_rejected() {
        assert!(matches!(
            verify_signature(b"{}", None, SECRET, 300, NOW),
            Err(AppError::ValidationError(_))
        ));
        assert!(verify_signature(b"{}", Some("  "), SECRET, 300, NOW).is_err());
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let header = sign_payload(br#"{"amount":100}"#, SECRET, NOW).unwrap();

        assert!(verify_signature(br#"{"amount":1}"#, Some(&header), SECRET, 300, NOW).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let header = sign_payload(b"{}", "whsec_other", NOW).unwrap();

        assert!(verify_signature(b"{}", Some(&header), SECRET, 300, NOW).is_err());
    }

    #[test]
    fn test_stale_timestamp_is_rejected() {
        let header = sign_payload(b"{}", SECRET, NOW).unwrap();

        assert!(verify_signature(b"{}", Some(&header), SECRET, 300, NOW + 301).is_err());
        assert!(verify_signature(b"{}", Some(&header), SECRET, 300, NOW + 300).is_ok());
    }

    #[test]
    fn test_malformed_header() {
        assert!(parse_header("v1=abc").is_err());
        assert!(parse_header("t=123").is_err());
        assert_eq!(
            parse_header("t=123, v1=abc, v0=zzz").unwrap(),
            SignatureHeader { timestamp: 123, signatures: vec!["abc".to_string()] }
        );
    }
}
