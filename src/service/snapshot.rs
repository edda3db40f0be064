//! 對戰狀態快照
//!
//! 供顯示層讀取的不可變視圖：畫面標籤、回合進度、剩餘卡片統計、
//! 最近一次回合結果。可序列化為 JSON 交給任意宿主。

use serde::Serialize;

use super::state::{MatchOutcome, MatchState, Phase};
use crate::game::cards::{RhymeGroup, RHYME_GROUP_COUNT};
use crate::game::constants::{MAX_TURNS, TURN_SLOT_COUNT};
use crate::game::scoring::TurnResult;

/// 對戰狀態快照
#[derive(Clone, Debug, Serialize)]
pub struct MatchSnapshot {
    pub screen: &'static str,
    pub phase: Phase,
    pub turn: u32,
    pub max_turns: u32,
    pub total_score: u32,
    pub remaining_total: usize,
    pub remaining_by_group: [usize; RHYME_GROUP_COUNT],
    pub slots: [Option<&'static str>; TURN_SLOT_COUNT],
    pub slots_complete: bool,
    pub combo: u32,
    pub max_combo: u32,
    pub enemy_lyrics: Option<&'static str>,
    pub hint_mood: Option<&'static str>,
    pub hint_rhyming: Option<&'static str>,
    pub last_result: Option<TurnResult>,
    pub outcome: Option<MatchOutcome>,
}

impl MatchSnapshot {
    /// 由對戰狀態建立快照
    pub fn from_state(state: &MatchState) -> Self {
        let pool = state.pool();
        let mut remaining_by_group = [0usize; RHYME_GROUP_COUNT];
        for (idx, group) in RhymeGroup::real_groups().iter().enumerate() {
            remaining_by_group[idx] = pool.count_by_group(*group);
        }

        let mut slots = [None; TURN_SLOT_COUNT];
        for (slot, card) in state.slots().iter().enumerate() {
            slots[slot] = card.as_ref().map(|c| c.id);
        }

        Self {
            screen: state.phase().screen_tag(),
            phase: state.phase(),
            turn: state.turn(),
            max_turns: MAX_TURNS,
            total_score: state.total_score(),
            remaining_total: pool.len(),
            remaining_by_group,
            slots,
            slots_complete: state.slots_complete(),
            combo: state.combo(),
            max_combo: state.max_combo(),
            enemy_lyrics: state.enemy_info().map(|i| i.lyrics),
            hint_mood: state.enemy_info().map(|i| i.hint_mood),
            hint_rhyming: state.enemy_info().map(|i| i.hint_rhyming),
            last_result: state.turn_history().last().cloned(),
            outcome: state.outcome(),
        }
    }

    /// 序列化為 JSON（顯示層邊界格式）
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

// ============================================================================
// 單元測試
// ============================================================================
