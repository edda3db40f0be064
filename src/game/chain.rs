//! 韻腳連鎖評價
//!
//! 同韻腳卡片的最長連鎖決定倍率。只看分組歸屬，與出牌順序無關。

use serde::Serialize;

use super::cards::{Card, RHYME_GROUP_COUNT};
use super::constants::CHAIN_BASE_SCORE;

/// 連鎖數對應的倍率
///
/// 表外的連鎖數（0、或放寬同組限制後可能出現的 5 以上）一律退回
/// 1.0，屬定義行為而非錯誤。
pub fn chain_multiplier(chain_count: u32) -> f64 {
    match chain_count {
        1 => 1.0,
        2 => 1.5,
        3 => 2.0,
        4 => 3.0,
        _ => 1.0,
    }
}

/// 韻腳連鎖評價結果
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChainEvaluation {
    pub chain_count: u32,
    pub multiplier: f64,
    pub score: f64,
}

/// 計算選中卡片的連鎖評價
///
/// 空欄位與不參與連鎖的分組先排除；沒有有效卡片時連鎖數為 0、
/// 分數為 0。
pub fn evaluate_rhyme_chain(slots: &[Option<Card>]) -> ChainEvaluation {
    let mut counts = [0u32; RHYME_GROUP_COUNT];
    for card in slots.iter().flatten() {
        if let Some(idx) = card.rhyme_group.bucket_index() {
            counts[idx] += 1;
        }
    }

    let chain_count = counts.iter().copied().max().unwrap_or(0);
    if chain_count == 0 {
        return ChainEvaluation {
            chain_count: 0,
            multiplier: 1.0,
            score: 0.0,
        };
    }

    let multiplier = chain_multiplier(chain_count);
    ChainEvaluation {
        chain_count,
        multiplier,
        score: CHAIN_BASE_SCORE * multiplier,
    }
}

// ============================================================================
// 單元測試
// ============================================================================
