//! # Slot Filter Service
//!
//! 接種枠の抽出ルール

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::center::{Center, Session};
use crate::domain::entities::slot_record::SlotRecord;

/// 上流サービスの日付形式
pub const UPSTREAM_DATE_FORMAT: &str = "%d-%m-%Y";

/// 日付を上流サービスの形式（DD-MM-YYYY）に変換
pub fn format_upstream_date(date: NaiveDate) -> String {
    date.format(UPSTREAM_DATE_FORMAT).to_string()
}

/// 日付フィルタ
///
/// 上流サービスは検索開始日から1週間分を返す。
/// `Window` はその全てを対象にし、`ExactDate` は検索日と一致する接種枠だけを残す
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    Window,
    ExactDate,
}

/// 抽出条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCriteria {
    /// 年齢区分（完全一致で比較する）
    pub min_age: u32,
    pub date_filter: DateFilter,
    target_date: String,
}

impl SlotCriteria {
    pub fn new(min_age: u32, date: NaiveDate, date_filter: DateFilter) -> Self {
        Self {
            min_age,
            date_filter,
            target_date: format_upstream_date(date),
        }
    }

    /// 検索日（DD-MM-YYYY）
    pub fn target_date(&self) -> &str {
        &self.target_date
    }
}

/// 接種枠フィルタサービス
pub struct SlotFilterService;

impl SlotFilterService {
    /// 接種枠が条件を満たすか
    ///
    /// 年齢区分は閾値ではなく完全一致。18歳区分の枠は45歳区分の検索には含まれず、逆も同じ
    pub fn matches(session: &Session, criteria: &SlotCriteria) -> bool {
        if session.min_age_limit != criteria.min_age || !session.has_capacity() {
            return false;
        }

        match criteria.date_filter {
            DateFilter::Window => true,
            DateFilter::ExactDate => session.date == criteria.target_date,
        }
    }

    /// 会場一覧から条件を満たす行を抽出
    ///
    /// # Arguments
    ///
    /// * `centers` - 上流サービスの応答順の会場
    /// * `criteria` - 抽出条件
    ///
    /// # Returns
    ///
    /// 会場順、会場内では接種枠順に並んだ行
    pub fn collect_slots(centers: &[Center], criteria: &SlotCriteria) -> Vec<SlotRecord> {
        centers
            .iter()
            .flat_map(|center| {
                center
                    .sessions
                    .iter()
                    .filter(|session| Self::matches(session, criteria))
                    .map(move |session| SlotRecord::from_center_session(center, session))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_session(date: &str, min_age_limit: u32, capacity: i64) -> Session {
        Session {
            date: date.to_string(),
            min_age_limit,
            available_capacity: capacity,
            vaccine: "COVISHIELD".to_string(),
        }
    }

    fn create_test_center(name: &str, sessions: Vec<Session>) -> Center {
        Center {
            name: name.to_string(),
            pincode: "110001".to_string(),
            address: "Main Road".to_string(),
            fee_type: "Free".to_string(),
            district_name: "Alpha".to_string(),
            sessions,
        }
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()
    }

    #[test]
    fn test_format_upstream_date() {
        assert_eq!(format_upstream_date(june_first()), "01-06-2021");
    }

    #[test]
    fn test_matches_exact_age_band() {
        let criteria = SlotCriteria::new(45, june_first(), DateFilter::Window);

        assert!(SlotFilterService::matches(
            &create_test_session("01-06-2021", 45, 5),
            &criteria
        ));
        // 閾値ではないので 18 は 45 の検索に含まれない
        assert!(!SlotFilterService::matches(
            &create_test_session("01-06-2021", 18, 5),
            &criteria
        ));
    }

    #[test]
    fn test_matches_younger_band_excludes_older() {
        let criteria = SlotCriteria::new(18, june_first(), DateFilter::Window);

        assert!(!SlotFilterService::matches(
            &create_test_session("01-06-2021", 45, 5),
            &criteria
        ));
    }

    #[test]
    fn test_matches_requires_capacity() {
        let criteria = SlotCriteria::new(45, june_first(), DateFilter::Window);

        assert!(!SlotFilterService::matches(
            &create_test_session("01-06-2021", 45, 0),
            &criteria
        ));
    }

    #[test]
    fn test_window_keeps_whole_week() {
        let criteria = SlotCriteria::new(45, june_first(), DateFilter::Window);

        assert!(SlotFilterService::matches(
            &create_test_session("05-06-2021", 45, 2),
            &criteria
        ));
    }

    #[test]
    fn test_exact_date_drops_other_days() {
        let criteria = SlotCriteria::new(45, june_first(), DateFilter::ExactDate);

        assert!(SlotFilterService::matches(
            &create_test_session("01-06-2021", 45, 2),
            &criteria
        ));
        assert!(!SlotFilterService::matches(
            &create_test_session("05-06-2021", 45, 2),
            &criteria
        ));
    }

    #[test]
    fn test_collect_slots_preserves_order() {
        let centers = vec![
            create_test_center(
                "First",
                vec![
                    create_test_session("01-06-2021", 45, 1),
                    create_test_session("02-06-2021", 18, 9),
                    create_test_session("03-06-2021", 45, 3),
                ],
            ),
            create_test_center("Second", vec![create_test_session("01-06-2021", 45, 2)]),
        ];
        let criteria = SlotCriteria::new(45, june_first(), DateFilter::Window);

        let rows = SlotFilterService::collect_slots(&centers, &criteria);

        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].center.as_str(), rows[0].availability), ("First", 1));
        assert_eq!((rows[1].center.as_str(), rows[1].availability), ("First", 3));
        assert_eq!((rows[2].center.as_str(), rows[2].availability), ("Second", 2));
    }

    #[test]
    fn test_collect_slots_keeps_duplicates() {
        let session = create_test_session("01-06-2021", 45, 4);
        let centers = vec![
            create_test_center("Same", vec![session.clone()]),
            create_test_center("Same", vec![session]),
        ];
        let criteria = SlotCriteria::new(45, june_first(), DateFilter::Window);

        let rows = SlotFilterService::collect_slots(&centers, &criteria);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);
    }

    #[test]
    fn test_collect_slots_empty() {
        let criteria = SlotCriteria::new(45, june_first(), DateFilter::Window);
        assert!(SlotFilterService::collect_slots(&[], &criteria).is_empty());
    }

    #[test]
    fn test_date_filter_deserialization() {
        let window: DateFilter = serde_json::from_str("\"window\"").unwrap();
        let exact: DateFilter = serde_json::from_str("\"exact_date\"").unwrap();

        assert_eq!(window, DateFilter::Window);
        assert_eq!(exact, DateFilter::ExactDate);
        assert_eq!(DateFilter::default(), DateFilter::Window);
    }
}
