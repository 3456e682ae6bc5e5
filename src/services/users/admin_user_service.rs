//! # 관리자 사용자 관리 서비스
//!
//! 사용자 목록은 `users`, `user_roles`, `subscriptions` 세 테이블을 따로 조회한 뒤
//! 메모리에서 사용자 ID로 합칩니다.

use std::collections::HashMap;
use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::dto::admin::{AdminUserSummary, RoleAssigned, UserDeleted};
use crate::domain::dto::common::{Page, PageQuery};
use crate::domain::entities::billing::Subscription;
use crate::domain::entities::users::user::{Role, User};
use crate::errors::errors::AppError;
use crate::repositories::billing::SubscriptionRepository;
use crate::repositories::users::{ProfileRepository, RoleRepository, UserRepository};

/// 역할/구독 정보를 사용자 행에 붙입니다.
pub fn summarize_users(
    users: Vec<User>,
    mut roles: HashMap<String, Vec<String>>,
    subscriptions: Vec<Subscription>,
) -> Vec<AdminUserSummary> {
    let mut subscriptions: HashMap<String, Subscription> = subscriptions
        .into_iter()
        .map(|s| (s.user_id.clone(), s))
        .collect();

    users
        .into_iter()
        .map(|user| {
            let subscription = subscriptions.remove(&user.id);
            AdminUserSummary {
                roles: roles.remove(&user.id).unwrap_or_default(),
                subscription_status: subscription.as_ref().map(|s| s.status.clone()),
                plan_name: subscription.and_then(|s| s.plan_name),
                id: user.id,
                email: user.email,
                full_name: user.full_name,
                created_at: user.created_at,
            }
        })
        .collect()
}

pub struct AdminUserService {
    db: Arc<Database>,
    users: Arc<UserRepository>,
    profiles: Arc<ProfileRepository>,
    roles: Arc<RoleRepository>,
    subscriptions: Arc<SubscriptionRepository>,
}

static ADMIN_USER_SERVICE_INSTANCE: OnceCell<Arc<AdminUserService>> = OnceCell::new();

impl AdminUserService {
    pub fn new(
        db: Arc<Database>,
        users: Arc<UserRepository>,
        profiles: Arc<ProfileRepository>,
        roles: Arc<RoleRepository>,
        subscriptions: Arc<SubscriptionRepository>,
    ) -> Self {
        Self { db, users, profiles, roles, subscriptions }
    }

    pub fn instance() -> Arc<Self> {
        ADMIN_USER_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    ServiceLocator::get::<Database>(),
                    UserRepository::instance(),
                    ProfileRepository::instance(),
                    RoleRepository::instance(),
                    SubscriptionRepository::instance(),
                ))
            })
            .clone()
    }

    /// 가입일 내림차순으로 한 페이지를 조회합니다.
    pub async fn list_users(&self, query: &PageQuery) -> Result<Page<AdminUserSummary>, AppError> {
        let users = self.users.find_page(query.offset(), query.per_page()).await?;
        let total = self.users.count().await?;

        let ids: Vec<String> = users.iter().map(|u| u.id.clone()).collect();
        let roles = self.roles.roles_by_user(&ids).await?;
        let subscriptions = self.subscriptions.find_by_users(&ids).await?;

        Ok(Page {
            items: summarize_users(users, roles, subscriptions),
            page: query.page(),
            per_page: query.per_page(),
            total,
        })
    }

    /// `user`/`admin` 외의 역할은 400
    pub async fn set_role(&self, user_id: &str, role: &str) -> Result<RoleAssigned, AppError> {
        let role = Role::parse(role)
            .ok_or_else(|| AppError::ValidationError(format!("알 수 없는 역할입니다: {}", role)))?;

        self.roles.replace_role(user_id, role).await?;

        log::info!("사용자 {} 역할 변경: {}", user_id, role.as_str());
        Ok(RoleAssigned {
            user_id: user_id.to_string(),
            role: role.as_str().to_string(),
        })
    }

    /// 사용자와 연관 데이터를 삭제합니다.
    ///
    /// # 삭제 순서
    ///
    /// ```text
    /// 1. user_roles  (user_id)
    /// 2. profiles    (id)
    /// 3. users       (id)
    /// 4. Auth 사용자  (DELETE /auth/v1/admin/users/{id})
    /// ```
    ///
    /// 네 호출은 독립적이며 롤백이 없습니다. 중간 단계가 실패하면 그 이전 단계의
    /// 삭제는 그대로 남고 에러가 반환됩니다. 같은 요청을 다시 보내면 남은 단계가 이어서 진행됩니다.
    pub async fn delete_user(&self, user_id: &str) -> Result<UserDeleted, AppError> {
        self.roles.delete_for_user(user_id).await?;
        self.profiles.delete(user_id).await?;
        self.users.delete(user_id).await?;

        if let Err(e) = self.db.delete_auth_user(user_id).await {
            log::error!("사용자 {} Auth 계정 삭제 실패 (테이블 행은 이미 삭제됨): {}", user_id, e);
            return Err(e);
        }

        log::warn!("사용자 삭제 완료: {}", user_id);
        Ok(UserDeleted {
            user_id: user_id.to_string(),
        })
    }
}

fn admin_user_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(AdminUserService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "admin_user_service",
        constructor: admin_user_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::HEAD;
    use serde_json::json;

    fn service_for(server: &MockServer) -> AdminUserService {
        let db = Arc::new(Database::with_credentials(&server.base_url(), "service-key", 5).unwrap());
        AdminUserService::new(
            db.clone(),
            Arc::new(UserRepository::new(db.clone())),
            Arc::new(ProfileRepository::new(db.clone())),
            Arc::new(RoleRepository::new(db.clone())),
            Arc::new(SubscriptionRepository::new(db)),
        )
    }

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            full_name: None,
            stripe_customer_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_summarize_users_joins_roles_and_subscription() {
        let mut roles = HashMap::new();
        roles.insert("u1".to_string(), vec!["admin".to_string()]);
        let subscriptions = vec![Subscription {
            id: None,
            user_id: "u2".to_string(),
            stripe_customer_id: None,
            stripe_subscription_id: None,
            plan_name: Some("Pro".to_string()),
            price_id: None,
            status: "active".to_string(),
            current_period_end: None,
            cancel_at_period_end: false,
            updated_at: None,
        }];

        let summaries = summarize_users(vec![user("u1"), user("u2")], roles, subscriptions);

        assert_eq!(summaries[0].roles, vec!["admin".to_string()]);
        assert_eq!(summaries[0].subscription_status, None);
        assert!(summaries[1].roles.is_empty());
        assert_eq!(summaries[1].subscription_status.as_deref(), Some("active"));
        assert_eq!(summaries[1].plan_name.as_deref(), Some("Pro"));
    }

    #[tokio::test]
    async fn test_set_role_rejects_unknown_role_without_writes() {
        let server = MockServer::start_async().await;
        let any_call = server
            .mock_async(|when, then| {
                when.path_contains("/");
                then.status(200).json_body(json!([]));
            })
            .await;

        let result = service_for(&server).set_role("u1", "superuser").await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(any_call.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_auth_delete_failure_keeps_earlier_deletions() {
        let server = MockServer::start_async().await;
        let roles = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/rest/v1/user_roles").query_param("user_id", "eq.u1");
                then.status(204);
            })
            .await;
        let profiles = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/rest/v1/profiles").query_param("id", "eq.u1");
                then.status(204);
            })
            .await;
        let users = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/rest/v1/users").query_param("id", "eq.u1");
                then.status(204);
            })
            .await;
        let auth = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/auth/v1/admin/users/u1");
                then.status(500).json_body(json!({"msg": "auth service unavailable"}));
            })
            .await;

        let result = service_for(&server).delete_user("u1").await;

        assert!(matches!(result, Err(AppError::DatabaseError(msg)) if msg.contains("auth service unavailable")));
        roles.assert_async().await;
        profiles.assert_async().await;
        users.assert_async().await;
        auth.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_users_pages_and_counts() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/users")
                    .query_param("offset", "20")
                    .query_param("limit", "20");
                then.status(200).json_body(json!([{"id": "u1", "email": "u1@example.com"}]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(HEAD).path("/rest/v1/users");
                then.status(200).header("content-range", "20-20/21");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/user_roles");
                then.status(200).json_body(json!([{"user_id": "u1", "role": "user"}]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/subscriptions");
                then.status(200).json_body(json!([]));
            })
            .await;

        let page = service_for(&server)
            .list_users(&PageQuery { page: Some(2), per_page: None })
            .await
            .unwrap();

        assert_eq!(page.total, 21);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].roles, vec!["user".to_string()]);
    }
}
