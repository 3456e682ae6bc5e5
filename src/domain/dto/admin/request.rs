use serde::Deserialize;

/// 역할 변경 요청. 값 검증은 서비스에서 [`crate::domain::entities::Role::parse`]로 합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}
