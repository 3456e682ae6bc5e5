use serde::Deserialize;

/// 일회용 로그인 토큰 교환 요청
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeLoginTokenRequest {
    #[serde(alias = "loginToken")]
    pub token: String,
}
