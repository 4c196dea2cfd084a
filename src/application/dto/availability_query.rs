//! # Availability Query DTO
//!
//! 接種枠検索の問い合わせパラメータ

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::entities::region::RegionSelector;
use crate::domain::services::slot_filter::{DateFilter, SlotCriteria};

/// 日付ピッカーと同じ入力形式
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// 問い合わせパラメータのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unsupported min age {min_age}: expected one of {allowed:?}")]
    UnsupportedMinAge { min_age: u32, allowed: Vec<u32> },

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// `YYYY-MM-DD` 形式の日付を解釈する
pub fn parse_query_date(input: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(input.trim(), QUERY_DATE_FORMAT)
        .map_err(|_| QueryError::InvalidDate(input.to_string()))
}

/// 接種枠検索の問い合わせ
///
/// 問い合わせごとに作成され、永続化されない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub region: RegionSelector,
    /// 年齢区分（設定された区分のいずれかと完全一致すること）
    pub min_age: u32,
    /// 検索開始日
    pub date: NaiveDate,
    pub date_filter: DateFilter,
}

impl AvailabilityQuery {
    /// 新しい問い合わせを作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use vaxslots::application::dto::availability_query::AvailabilityQuery;
    /// use vaxslots::domain::entities::region::RegionSelector;
    /// use vaxslots::domain::services::slot_filter::DateFilter;
    ///
    /// let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
    /// let query = AvailabilityQuery::new(
    ///     RegionSelector::all_districts(12),
    ///     45,
    ///     date,
    ///     DateFilter::Window,
    ///     &[18, 45],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(query.min_age, 45);
    ///
    /// // 区分にない年齢は受け付けない
    /// let invalid = AvailabilityQuery::new(
    ///     RegionSelector::all_districts(12),
    ///     30,
    ///     date,
    ///     DateFilter::Window,
    ///     &[18, 45],
    /// );
    /// assert!(invalid.is_err());
    /// ```
    pub fn new(
        region: RegionSelector,
        min_age: u32,
        date: NaiveDate,
        date_filter: DateFilter,
        allowed_min_ages: &[u32],
    ) -> Result<Self, QueryError> {
        if !allowed_min_ages.contains(&min_age) {
            return Err(QueryError::UnsupportedMinAge {
                min_age,
                allowed: allowed_min_ages.to_vec(),
            });
        }

        Ok(Self {
            region,
            min_age,
            date,
            date_filter,
        })
    }

    /// 抽出条件を作成
    pub fn criteria(&self) -> SlotCriteria {
        SlotCriteria::new(self.min_age, self.date, self.date_filter)
    }
}
