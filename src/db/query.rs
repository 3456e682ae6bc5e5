//! 테이블 쿼리 빌더
//!
//! 필터/정렬/페이징을 쿼리 파라미터로 누적한 뒤 종단 연산
//! (`fetch`, `fetch_one`, `count`, `insert`, `upsert`, `update`, `delete`)으로 요청을 보냅니다.
//!
//! | 빌더 메서드 | 쿼리 파라미터 |
//! |---|---|
//! | `select("id,name")` | `select=id,name` |
//! | `eq("user_id", id)` | `user_id=eq.<id>` |
//! | `in_("list_id", ids)` | `list_id=in.("a","b")` |
//! | `is_null("deleted_at")` | `deleted_at=is.null` |
//! | `order("created_at", false)` | `order=created_at.desc` |
//! | `limit(20)` / `offset(40)` | `limit=20` / `offset=40` |

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use crate::db::Database;
use crate::errors::errors::AppError;

pub struct TableQuery<'a> {
    db: &'a Database,
    table: String,
    params: Vec<(String, String)>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(db: &'a Database, table: &str) -> Self {
        Self {
            db,
            table: table.to_string(),
            params: Vec::new(),
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    fn filter(mut self, column: &str, operator: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("{}.{}", operator, value.to_string())));
        self
    }

    pub fn eq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "eq", value)
    }

    pub fn neq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "neq", value)
    }

    pub fn gt(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "gt", value)
    }

    pub fn gte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "gte", value)
    }

    pub fn lt(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "lt", value)
    }

    pub fn lte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "lte", value)
    }

    /// 값 목록 필터. 값은 큰따옴표로 감싸므로 콤마가 포함되어도 안전합니다.
    pub fn in_<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let quoted: Vec<String> = values
            .into_iter()
            .map(|v| format!("\"{}\"", v.to_string().replace('"', "\\\"")))
            .collect();
        self.params
            .push((column.to_string(), format!("in.({})", quoted.join(","))));
        self
    }

    pub fn is_null(mut self, column: &str) -> Self {
        self.params.push((column.to_string(), "is.null".to_string()));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{}.{}", column, direction)));
        self
    }

    pub fn limit(mut self, count: u64) -> Self {
        self.params.push(("limit".to_string(), count.to_string()));
        self
    }

    pub fn offset(mut self, count: u64) -> Self {
        self.params.push(("offset".to_string(), count.to_string()));
        self
    }

    /// `from`..=`to` 범위의 행 (0부터 시작, 양끝 포함)
    pub fn range(self, from: u64, to: u64) -> Self {
        self.offset(from).limit(to.saturating_sub(from) + 1)
    }

    /// URL 인코딩된 쿼리 문자열
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn url(&self) -> String {
        let base = self.db.rest_url(&self.table);
        if self.params.is_empty() {
            base
        } else {
            format!("{}?{}", base, self.query_string())
        }
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        self.db.authorized(self.db.http().request(method, self.url()))
    }

    fn context(&self, operation: &str) -> String {
        format!("{} {}", self.table, operation)
    }

    /// 조건에 맞는 행 전체를 가져옵니다.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, AppError> {
        let context = self.context("조회");
        let response = self
            .request(Method::GET)
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("{} 요청 실패: {}", context, e)))?;

        Database::read_json(response, &context).await
    }

    /// 첫 번째 행만 가져옵니다.
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<Option<T>, AppError> {
        let rows: Vec<T> = self.limit(1).fetch().await?;
        Ok(rows.into_iter().next())
    }

    /// 조건에 맞는 행 개수 (`Prefer: count=exact`)
    pub async fn count(self) -> Result<u64, AppError> {
        let context = self.context("개수 조회");
        let response = self
            .request(Method::HEAD)
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("{} 요청 실패: {}", context, e)))?;

        let response = Database::ensure_success(response, &context).await?;
        let content_range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        parse_content_range_total(content_range).ok_or_else(|| {
            AppError::DatabaseError(format!(
                "{}: Content-Range 헤더 해석 실패 ({:?})",
                context, content_range
            ))
        })
    }

    /// 행을 삽입하고 삽입된 행을 반환합니다. `body`는 단일 객체 또는 배열입니다.
    pub async fn insert<B, T>(self, body: &B) -> Result<Vec<T>, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let context = self.context("삽입");
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("{} 요청 실패: {}", context, e)))?;

        Database::read_json(response, &context).await
    }

    /// `on_conflict` 컬럼 기준으로 병합 삽입합니다.
    pub async fn upsert<B, T>(mut self, body: &B, on_conflict: &str) -> Result<Vec<T>, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.params
            .push(("on_conflict".to_string(), on_conflict.to_string()));
        let context = self.context("업서트");
        let response = self
            .request(Method::POST)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("{} 요청 실패: {}", context, e)))?;

        Database::read_json(response, &context).await
    }

    /// 필터에 맞는 행을 부분 수정하고 수정된 행을 반환합니다.
    pub async fn update<B, T>(self, body: &B) -> Result<Vec<T>, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let context = self.context("수정");
        let response = self
            .request(Method::PATCH)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("{} 요청 실패: {}", context, e)))?;

        Database::read_json(response, &context).await
    }

    /// 필터에 맞는 행을 삭제합니다.
    pub async fn delete(self) -> Result<(), AppError> {
        let context = self.context("삭제");
        let response = self
            .request(Method::DELETE)
            .header("Prefer", "return=minimal")
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("{} 요청 실패: {}", context, e)))?;

        Database::ensure_success(response, &context).await?;
        Ok(())
    }
}

/// `0-24/3573`, `*/0` 형태에서 전체 개수를 꺼냅니다.
pub(crate) fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}
