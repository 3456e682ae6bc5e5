use serde::{Deserialize, Serialize};

/// API 응답 봉투
///
/// 성공 시 `{"data": ..., "error": null}`, 실패 시 `AppError`가
/// `{"data": null, "error": "..."}`를 만듭니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }
}

/// 페이지 쿼리 (`?page=1&per_page=20`)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PageQuery {
    pub const DEFAULT_PER_PAGE: u64 = 20;
    pub const MAX_PER_PAGE: u64 = 100;

    /// 1부터 시작하는 페이지 번호
    pub fn page(&self) -> u64 {
        self.page.filter(|&p| p > 0).unwrap_or(1)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
            .filter(|&n| n > 0)
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .min(Self::MAX_PER_PAGE)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.per_page()
    }
}

/// 페이지 단위 목록 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults_and_caps() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 20);
        assert_eq!(query.offset(), 0);

        let query = PageQuery { page: Some(3), per_page: Some(500) };
        assert_eq!(query.per_page(), 100);
        assert_eq!(query.offset(), 200);

        let query = PageQuery { page: Some(0), per_page: Some(0) };
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 20);
    }

    #[test]
    fn test_api_response_success_shape() {
        let json = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"data": [1, 2], "error": null}));
    }
}
