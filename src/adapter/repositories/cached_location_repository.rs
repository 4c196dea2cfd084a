//! Cached Location Repository
//!
//! 州ごとの地区一覧をTTL付きでキャッシュするデコレータ

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::domain::entities::region::District;
use crate::domain::repositories::location_repository::LocationRepository;

struct CacheEntry {
    districts: Vec<District>,
    fetched_at: Instant,
}

/// 州ID → 地区一覧のキャッシュ
///
/// 明示的に注入されるオブジェクト。エントリはTTLで失効し、
/// `invalidate` / `clear` で明示的に破棄できる
pub struct DistrictCache {
    ttl: Duration,
    entries: RwLock<HashMap<u32, CacheEntry>>,
}

impl DistrictCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 有効期限内のエントリを返す
    pub fn get(&self, state_id: u32) -> Option<Vec<District>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(&state_id)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.districts.clone())
    }

    pub fn insert(&self, state_id: u32, districts: Vec<District>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            state_id,
            CacheEntry {
                districts,
                fetched_at: Instant::now(),
            },
        );
    }

    /// 州のエントリを破棄する
    pub fn invalidate(&self, state_id: u32) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.remove(&state_id).is_some() {
            debug!("Invalidated district cache for state {}", state_id);
        }
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    /// 保持しているエントリ数（失効済みを含む）
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// キャッシュ付きロケーションリポジトリ
///
/// 成功した応答だけをキャッシュする。失敗は毎回上流に問い合わせ直す
pub struct CachedLocationRepository<R: LocationRepository> {
    inner: Arc<R>,
    cache: Arc<DistrictCache>,
}

impl<R: LocationRepository> CachedLocationRepository<R> {
    /// 新しいリポジトリを作成
    ///
    /// # Arguments
    ///
    /// * `inner` - 実際に問い合わせるリポジトリ
    /// * `cache` - 共有するキャッシュ
    pub fn new(inner: Arc<R>, cache: Arc<DistrictCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<DistrictCache> {
        &self.cache
    }
}

#[async_trait]
impl<R: LocationRepository> LocationRepository for CachedLocationRepository<R> {
    async fn list_districts(&self, state_id: u32) -> Result<Vec<District>> {
        if let Some(districts) = self.cache.get(state_id) {
            info!("District cache hit for state {}", state_id);
            return Ok(districts);
        }

        let districts = self.inner.list_districts(state_id).await?;
        self.cache.insert(state_id, districts.clone());
        Ok(districts)
    }
}
