//! # State Directory Trait
//!
//! 静的な州ディレクトリ（state_id → state_name）

use crate::domain::entities::region::State;

/// 州ディレクトリ
///
/// プロセス起動時に一度だけ読み込まれ、以後は読み取り専用
pub trait StateDirectory: Send + Sync {
    /// 全ての州（定義順）
    fn states(&self) -> &[State];

    /// 州IDから州名を引く
    fn state_name(&self, state_id: u32) -> Option<&str> {
        self.states()
            .iter()
            .find(|state| state.state_id == state_id)
            .map(|state| state.state_name.as_str())
    }

    /// 州IDが登録されているか
    fn contains(&self, state_id: u32) -> bool {
        self.state_name(state_id).is_some()
    }
}
