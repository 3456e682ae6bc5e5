//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! 인프라 컴포넌트(`Database`, `RedisClient`, `StripeClient`)는 `main`에서
//! [`ServiceLocator::set`]으로 직접 등록하고, 리포지토리/서비스는 각자
//! `once_cell` 싱글톤(`instance()`)을 가지며 `inventory::submit!`으로 생성자를
//! 레지스트리에 제출합니다.
//!
//! ```text
//! 1. 런타임 초기화 (Infrastructure)
//!    └─ ServiceLocator::set(Arc<Database>) ...
//!
//! 2. ServiceLocator::initialize_all()
//!    ├─ RepositoryRegistration 생성자 호출 → 리포지토리 싱글톤 생성
//!    └─ ServiceRegistration 생성자 호출   → 서비스 싱글톤 생성
//!
//! 3. 요청 처리
//!    └─ FunnelService::instance() → 이미 생성된 Arc 반환
//! ```
//!
//! 각 싱글톤은 생성 시점에 `ServiceLocator::get::<Database>()` 등으로 인프라를 가져오므로
//! 인프라 등록이 `initialize_all()`보다 먼저 끝나야 합니다.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_banner, print_component, print_phase, print_phase_done, print_registry_summary,
};

/// 리포지토리 등록 정보
///
/// 각 리포지토리 모듈이 `inventory::submit!`으로 제출합니다.
pub struct RepositoryRegistration {
    /// 리포지토리 이름 (로그 출력용)
    pub name: &'static str,
    /// 싱글톤을 생성(또는 반환)하는 함수
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 서비스 등록 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(RepositoryRegistration);
inventory::collect!(ServiceRegistration);

/// 인프라 인스턴스 컨테이너
///
/// `TypeId`를 키로 타입당 하나의 인스턴스를 보관합니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 외부에서 생성된 인스턴스를 등록합니다. 같은 타입을 다시 등록하면 교체됩니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());
        log::info!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 인스턴스를 조회합니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 등록된 인스턴스를 조회합니다.
    ///
    /// # Panics
    ///
    /// 인스턴스가 등록되지 않은 경우. 기동 순서 오류이므로 즉시 실패합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        match Self::try_get::<T>() {
            Some(instance) => instance,
            None => {
                let type_name = std::any::type_name::<T>();
                panic!(
                    "Component not registered: {}. Register it with ServiceLocator::set() before initialize_all()",
                    type_name
                );
            }
        }
    }

    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }

    /// 제출된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저, 서비스를 나중에 생성합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_banner("🔄 leadflow registry bootstrap");

        let repo_count = Self::construct_phase(
            1,
            "repositories",
            inventory::iter::<RepositoryRegistration>().map(|r| (r.name, r.constructor)),
        );
        let service_count = Self::construct_phase(
            2,
            "services",
            inventory::iter::<ServiceRegistration>().map(|r| (r.name, r.constructor)),
        );

        print_registry_summary(Self::client_count(), repo_count, service_count);

        Ok(())
    }

    fn construct_phase<'a>(
        phase: u8,
        label: &str,
        registrations: impl Iterator<Item = (&'a str, fn() -> Box<dyn Any + Send + Sync>)>,
    ) -> usize {
        print_phase(phase, 2, label);

        let mut count = 0;
        for (name, constructor) in registrations {
            let _instance = constructor();
            print_component(name);
            count += 1;
        }

        print_phase_done(count);
        count
    }

    /// `set`으로 등록된 인프라 인스턴스 수
    pub fn client_count() -> usize {
        LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
