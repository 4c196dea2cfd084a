//! # Region Entities
//!
//! 州（State）と地区（District）、および検索対象地域の指定

use serde::{Deserialize, Serialize};
use std::fmt;

/// 州
///
/// 静的な州ディレクトリから読み込まれ、プロセスの生存期間中は変更されない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub state_id: u32,
    pub state_name: String,
}

/// 地区
///
/// Location Directory が所有する。取得後は不変
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: u32,
    pub name: String,
}

impl District {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// 地区の指定
///
/// `All` は州内の全地区を集計対象にすることを意味する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistrictSelector {
    All,
    One(u32),
}

impl DistrictSelector {
    /// `None` を全地区として扱う
    pub fn from_option(district_id: Option<u32>) -> Self {
        match district_id {
            Some(id) => DistrictSelector::One(id),
            None => DistrictSelector::All,
        }
    }

    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, DistrictSelector::All)
    }
}

impl fmt::Display for DistrictSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistrictSelector::All => write!(f, "all districts"),
            DistrictSelector::One(id) => write!(f, "district {}", id),
        }
    }
}

/// 検索対象地域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSelector {
    pub state_id: u32,
    pub district: DistrictSelector,
}

impl RegionSelector {
    pub fn new(state_id: u32, district: DistrictSelector) -> Self {
        Self { state_id, district }
    }

    /// 州内の全地区を対象にする
    pub fn all_districts(state_id: u32) -> Self {
        Self::new(state_id, DistrictSelector::All)
    }

    /// 単一の地区を対象にする
    pub fn single_district(state_id: u32, district_id: u32) -> Self {
        Self::new(state_id, DistrictSelector::One(district_id))
    }
}
