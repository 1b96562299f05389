//! 对象缓存
//!
//! 缓存后端以插件形式注册（名称 → 构造函数），启动时按 `cache.type` 选择。
//! 值统一以 JSON 字符串存储，类型化读写见 [`ObjectCacheExt`]。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错（键可能存在但无法读取）
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 类型化读写
#[async_trait]
pub trait ObjectCacheExt {
    async fn get_json<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T>;
    async fn insert_json<T: Serialize + Sync>(&self, key: String, value: &T, ttl: u64);
}

#[async_trait]
impl<C: ObjectCache + ?Sized> ObjectCacheExt for C {
    async fn get_json<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.get_raw(key).await {
            CacheResult::Found(json) => match serde_json::from_str::<T>(&json) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!("Dropping undecodable cache entry '{}': {}", key, e);
                    self.remove(key).await;
                    None
                }
            },
            _ => None,
        }
    }

    async fn insert_json<T: Serialize + Sync>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(json) => self.insert_raw(key, json, ttl).await,
            Err(e) => tracing::warn!("Failed to serialize cache entry '{}': {}", key, e),
        }
    }
}

/// 声明缓存插件：生成 `register()`，把后端构造函数登记到注册表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        pub fn register() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        match <$ty>::new() {
                            Ok(cache) => Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>),
                            Err(e) => Err($crate::errors::SkillHubError::cache_connection(e)),
                        }
                    })
                }),
            );
        }
    };
}

/// 注册内置缓存后端
pub fn register_builtin_caches() {
    object_cache::moka::register();
    object_cache::redis::register();
}
