//! # Service Registry
//!
//! 부트스트랩 시점에 조립된 서비스 인스턴스를 타입별로 보관하는 전역 레지스트리입니다.
//! `main`이 모든 어댑터와 서비스를 `Arc`로 생성해 등록하고,
//! HTTP 핸들러는 요청마다 [`ServiceLocator::get`]으로 필요한 서비스를 꺼내 씁니다.
//!
//! 서비스 간 의존성은 레지스트리를 거치지 않고 생성자 주입(`Arc<dyn Trait>`)으로 연결됩니다.
//! 덕분에 단위 테스트는 레지스트리 없이 인메모리 구현체를 직접 주입할 수 있습니다.
//!
//! ```rust,ignore
//! // main.rs
//! ServiceLocator::set(Arc::new(signup_service));
//!
//! // handler
//! let signup_service = ServiceLocator::get::<SignupService>()?;
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use once_cell::sync::Lazy;
use crate::core::errors::{AppError, AppResult};

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 인스턴스를 등록합니다. 같은 타입이 이미 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let mut instances = LOCATOR
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
        log::debug!("서비스 등록: {}", std::any::type_name::<T>());
    }

    /// 등록된 인스턴스를 조회합니다.
    ///
    /// # Errors
    ///
    /// 등록되지 않은 타입이면 `AppError::InternalError`를 반환합니다.
    pub fn get<T: 'static + Send + Sync>() -> AppResult<Arc<T>> {
        let type_name = std::any::type_name::<T>();
        let instances = LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| AppError::InternalError(format!("등록되지 않은 서비스입니다: {}", type_name)))?
            .downcast::<T>()
            .map_err(|_| AppError::InternalError(format!("서비스 타입 불일치: {}", type_name)))
    }

    pub fn contains<T: 'static + Send + Sync>() -> bool {
        LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(&TypeId::of::<T>())
    }

    /// 등록된 서비스 수
    pub fn len() -> usize {
        LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
