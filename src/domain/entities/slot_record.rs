//! # SlotRecord Entity
//!
//! 集計結果の1行（会場 × 接種枠）と、集計レポート

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::center::{Center, Session};

/// 空き枠がない場合のステータス文言
pub const NO_SLOTS_MESSAGE: &str = "No slots available";
/// 集計自体が失敗した場合のステータス文言
pub const QUERY_FAILED_MESSAGE: &str = "Query failed";

/// 接種枠レコード
///
/// フィルタを通過した (Center, Session) の組ごとに1行。
/// 値の組以外に識別子は持たず、重複もマージしない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SlotRecord {
    pub date: String,
    pub district: String,
    pub center: String,
    pub pincode: String,
    pub address: String,
    pub availability: i64,
    pub vaccine: String,
    pub fee: String,
}

impl SlotRecord {
    /// 会場と接種枠から行を作成
    pub fn from_center_session(center: &Center, session: &Session) -> Self {
        Self {
            date: session.date.clone(),
            district: center.district_name.clone(),
            center: center.name.clone(),
            pincode: center.pincode.clone(),
            address: center.address.clone(),
            availability: session.available_capacity,
            vaccine: session.vaccine.clone(),
            fee: center.fee_type.clone(),
        }
    }

    /// 指定列の値で比較する
    ///
    /// `Date` は DD-MM-YYYY を日付として比較し、解釈できない値は文字列比較にフォールバックする
    pub fn compare_by(&self, other: &Self, column: SlotColumn) -> Ordering {
        match column {
            SlotColumn::Date => compare_dates(&self.date, &other.date),
            SlotColumn::District => self.district.cmp(&other.district),
            SlotColumn::Center => self.center.cmp(&other.center),
            SlotColumn::Pincode => self.pincode.cmp(&other.pincode),
            SlotColumn::Address => self.address.cmp(&other.address),
            SlotColumn::Availability => self.availability.cmp(&other.availability),
            SlotColumn::Vaccine => self.vaccine.cmp(&other.vaccine),
            SlotColumn::Fee => self.fee.cmp(&other.fee),
        }
    }

    /// 列の表示用の値
    pub fn cell(&self, column: SlotColumn) -> String {
        match column {
            SlotColumn::Date => self.date.clone(),
            SlotColumn::District => self.district.clone(),
            SlotColumn::Center => self.center.clone(),
            SlotColumn::Pincode => self.pincode.clone(),
            SlotColumn::Address => self.address.clone(),
            SlotColumn::Availability => self.availability.to_string(),
            SlotColumn::Vaccine => self.vaccine.clone(),
            SlotColumn::Fee => self.fee.clone(),
        }
    }
}

/// 日付として解釈できない値は、解釈できる値より後ろに並べる
fn compare_dates(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%d-%m-%Y").ok();
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// 出力テーブルの列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotColumn {
    Date,
    District,
    Center,
    Pincode,
    Address,
    Availability,
    Vaccine,
    Fee,
}

impl SlotColumn {
    /// 表示順の全列
    pub const ALL: [SlotColumn; 8] = [
        SlotColumn::Date,
        SlotColumn::District,
        SlotColumn::Center,
        SlotColumn::Pincode,
        SlotColumn::Address,
        SlotColumn::Availability,
        SlotColumn::Vaccine,
        SlotColumn::Fee,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            SlotColumn::Date => "Date",
            SlotColumn::District => "District",
            SlotColumn::Center => "Center",
            SlotColumn::Pincode => "Pincode",
            SlotColumn::Address => "Address",
            SlotColumn::Availability => "Availability",
            SlotColumn::Vaccine => "Vaccine",
            SlotColumn::Fee => "Fee",
        }
    }
}

/// 複数列による安定ソート
///
/// 先頭の列が優先され、同値の場合は次の列で比較する。全列が同値の行は元の順序を保つ
pub fn sort_records(rows: &mut [SlotRecord], columns: &[SlotColumn], descending: bool) {
    if columns.is_empty() {
        return;
    }

    rows.sort_by(|a, b| {
        let ordering = columns
            .iter()
            .map(|column| a.compare_by(b, *column))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal);

        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// 集計ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// 1行以上の接種枠が見つかった
    Available,
    /// 接種枠が1つも見つからなかった
    NoSlots,
    /// 地区の解決など、集計そのものが失敗した
    QueryFailed,
}

impl AvailabilityStatus {
    /// 利用者に見せるステータス文言
    pub fn message(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "",
            AvailabilityStatus::NoSlots => NO_SLOTS_MESSAGE,
            AvailabilityStatus::QueryFailed => QUERY_FAILED_MESSAGE,
        }
    }
}

/// 集計レポート
///
/// Presentation 層に渡す `(rows, status)` の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityReport {
    pub rows: Vec<SlotRecord>,
    pub status: AvailabilityStatus,
}

impl AvailabilityReport {
    /// 行からレポートを作成。空ならステータスは `NoSlots`
    pub fn from_rows(rows: Vec<SlotRecord>) -> Self {
        let status = if rows.is_empty() {
            AvailabilityStatus::NoSlots
        } else {
            AvailabilityStatus::Available
        };
        Self { rows, status }
    }

    /// 集計失敗のレポート
    pub fn failed() -> Self {
        Self {
            rows: Vec::new(),
            status: AvailabilityStatus::QueryFailed,
        }
    }

    #[inline]
    pub fn status_text(&self) -> &'static str {
        self.status.message()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
