//! 回合計分引擎
//!
//! 三個子評價（節奏、連鎖、相性）各自獨立執行、互不共享狀態，
//! 再以固定權重合成總分。所有計分函式對任何合法輸入都是全函式：
//! 不完整的回合退化為低分，不會失敗。

use serde::Serialize;

use super::cards::{Card, CardType};
use super::chain::{evaluate_rhyme_chain, ChainEvaluation};
use super::constants::{CHAIN_WEIGHT, RHYTHM_WEIGHT, TURN_SLOT_COUNT, TYPE_WEIGHT};
use super::matchup::{evaluate_type_matchup, MatchupEvaluation};
use super::rhythm::{evaluate_rhythm, RhythmEvaluation, TapJudgement};

/// 一回合的出牌記錄（計分輸入）
///
/// 正常流程下四個欄位皆已填滿；被迫提早結束的回合可能留空。
#[derive(Clone, Debug)]
pub struct TurnPlay {
    pub slots: [Option<Card>; TURN_SLOT_COUNT],
    pub taps: Vec<TapJudgement>,
    pub enemy_type: CardType,
}

/// 回合計分結果（建立後不再變動）
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TurnResult {
    pub rhythm: RhythmEvaluation,
    pub chain: ChainEvaluation,
    pub matchup: MatchupEvaluation,
    pub total_score: u32,
}

/// 計算一回合的總分
///
/// 加權總分只在最後捨入一次（四捨五入），子分數不捨入。
pub fn score_turn(play: &TurnPlay) -> TurnResult {
    let rhythm = evaluate_rhythm(&play.taps);
    let chain = evaluate_rhyme_chain(&play.slots);
    let matchup = evaluate_type_matchup(&play.slots, play.enemy_type);

    let weighted =
        rhythm.score * RHYTHM_WEIGHT + chain.score * CHAIN_WEIGHT + matchup.score * TYPE_WEIGHT;

    TurnResult {
        rhythm,
        chain,
        matchup,
        total_score: weighted.round() as u32,
    }
}

// ============================================================================
// 單元測試
// ============================================================================
