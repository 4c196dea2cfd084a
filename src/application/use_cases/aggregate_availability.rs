//! # Aggregate Availability Use Case
//!
//! 地区ごとの接種枠を取得・抽出し、1つのテーブルに集計するユースケース

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::application::dto::availability_query::AvailabilityQuery;
use crate::domain::entities::region::{DistrictSelector, RegionSelector};
use crate::domain::entities::slot_record::{AvailabilityReport, SlotRecord};
use crate::domain::repositories::location_repository::LocationRepository;
use crate::domain::repositories::session_repository::SessionRepository;
use crate::domain::services::slot_filter::{SlotCriteria, SlotFilterService};

pub const DEFAULT_MAX_CONCURRENCY: usize = 4;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// 集計の実行オプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationOptions {
    /// 同時に問い合わせる地区数の上限
    pub max_concurrency: usize,
    /// 上流サービスへの1回の問い合わせのタイムアウト
    pub fetch_timeout: Duration,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

/// 接種枠集計ユースケース（Availability Aggregator）
///
/// 地区の取得は並行して行うが、結果は解決された地区の順に組み立て直す。
/// 地区ごとの失敗は0行として扱い、他の地区の集計は続ける
pub struct AggregateAvailabilityUseCase<L: LocationRepository, S: SessionRepository> {
    location_repository: Arc<L>,
    session_repository: Arc<S>,
    options: AggregationOptions,
}

impl<L: LocationRepository, S: SessionRepository> AggregateAvailabilityUseCase<L, S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `location_repository` - 地区一覧の解決に使うリポジトリ
    /// * `session_repository` - 地区ごとの接種枠を取得するリポジトリ
    pub fn new(location_repository: Arc<L>, session_repository: Arc<S>) -> Self {
        Self {
            location_repository,
            session_repository,
            options: AggregationOptions::default(),
        }
    }

    /// 実行オプションを差し替える
    pub fn with_options(mut self, options: AggregationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AggregationOptions {
        &self.options
    }

    /// 接種枠を集計する
    ///
    /// # Arguments
    ///
    /// * `query` - 問い合わせパラメータ
    ///
    /// # Returns
    ///
    /// 行とステータスからなるレポート。
    /// 行が空なら `NoSlots`、地区の解決に失敗した場合は `QueryFailed`
    pub async fn execute(&self, query: &AvailabilityQuery) -> AvailabilityReport {
        info!(
            "Getting availability for state {} ({}), min age {}, start date {}",
            query.region.state_id, query.region.district, query.min_age, query.date
        );

        let district_ids = match self.resolve_district_ids(&query.region).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(
                    "Failed to resolve districts for state {}: {:#}",
                    query.region.state_id, e
                );
                return AvailabilityReport::failed();
            }
        };

        let criteria = query.criteria();
        let per_district: Vec<Vec<SlotRecord>> = stream::iter(district_ids)
            .map(|district_id| self.fetch_district_slots(district_id, query.date, &criteria))
            .buffered(self.options.max_concurrency.max(1))
            .collect()
            .await;

        let rows: Vec<SlotRecord> = per_district.into_iter().flatten().collect();
        info!("Found {} matching slots", rows.len());

        AvailabilityReport::from_rows(rows)
    }

    /// 対象地区のIDを解決する
    async fn resolve_district_ids(&self, region: &RegionSelector) -> Result<Vec<u32>> {
        match region.district {
            DistrictSelector::One(district_id) => Ok(vec![district_id]),
            DistrictSelector::All => {
                let districts = timeout(
                    self.options.fetch_timeout,
                    self.location_repository.list_districts(region.state_id),
                )
                .await
                .map_err(|_| {
                    anyhow!(
                        "district lookup timed out after {:?}",
                        self.options.fetch_timeout
                    )
                })??;

                debug!(
                    "Resolved {} districts for state {}",
                    districts.len(),
                    region.state_id
                );
                Ok(districts.into_iter().map(|district| district.id).collect())
            }
        }
    }

    /// 1地区分の行を取得する。失敗・タイムアウトは0行
    async fn fetch_district_slots(
        &self,
        district_id: u32,
        date: NaiveDate,
        criteria: &SlotCriteria,
    ) -> Vec<SlotRecord> {
        let fetched = timeout(
            self.options.fetch_timeout,
            self.session_repository.find_centers(district_id, date),
        )
        .await;

        match fetched {
            Ok(Ok(centers)) => {
                let rows = SlotFilterService::collect_slots(&centers, criteria);
                debug!(
                    "District {}: {} centers, {} matching slots",
                    district_id,
                    centers.len(),
                    rows.len()
                );
                rows
            }
            Ok(Err(e)) => {
                warn!("Skipping district {}: {:#}", district_id, e);
                Vec::new()
            }
            Err(_) => {
                warn!(
                    "Skipping district {}: timed out after {:?}",
                    district_id, self.options.fetch_timeout
                );
                Vec::new()
            }
        }
    }
}
