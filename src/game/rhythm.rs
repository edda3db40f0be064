//! 節奏判定與評價
//!
//! 包含：
//! - Tap 判定等級與固定配分
//! - 判定視窗（含寬鬆度縮放，宿主端可完全自訂）
//! - 節奏評價：判定序列 → 正規化到 [0,100] 的分數
//! - 攻擊階段的拍點時間軸（卡片 2 拍、填充詞 1 拍）
//! - Tap 目標追蹤：每個目標恰好解決一次，視窗關閉自動 Miss
//!
//! 核心不讀牆鐘；所有時刻都由宿主端以毫秒值顯式傳入。

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::cards::{Card, Filler};
use super::catalog::FILLERS;
use super::constants::{
    BAD_WINDOW_MS, BEAT_MS, EASY_WINDOW_SCALE, FILLER_BEATS, GOOD_WINDOW_MS, HARD_WINDOW_SCALE,
    NORMAL_WINDOW_SCALE, PERFECT_WINDOW_MS, PHRASE_BEATS,
};

/// Tap 判定等級
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TapJudgement {
    Perfect,
    Good,
    Bad,
    Miss,
}

impl TapJudgement {
    /// 判定的固定配分
    pub fn points(&self) -> u32 {
        match self {
            TapJudgement::Perfect => 100,
            TapJudgement::Good => 70,
            TapJudgement::Bad => 30,
            TapJudgement::Miss => 0,
        }
    }

    /// 是否延續 combo
    pub fn keeps_combo(&self) -> bool {
        matches!(self, TapJudgement::Perfect | TapJudgement::Good)
    }
}

/// 判定寬鬆度（設定畫面的「甘め／普通／厳しめ」）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum JudgeLeniency {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl JudgeLeniency {
    /// 視窗縮放比例（Easy 放寬、Hard 收窄）
    pub fn scale(&self) -> f64 {
        match self {
            JudgeLeniency::Easy => EASY_WINDOW_SCALE,
            JudgeLeniency::Normal => NORMAL_WINDOW_SCALE,
            JudgeLeniency::Hard => HARD_WINDOW_SCALE,
        }
    }
}

/// 判定視窗（毫秒）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JudgeWindows {
    pub perfect_ms: f64,
    pub good_ms: f64,
    pub bad_ms: f64,
}

impl JudgeWindows {
    /// 基準視窗（Normal）
    pub fn base() -> Self {
        Self {
            perfect_ms: PERFECT_WINDOW_MS,
            good_ms: GOOD_WINDOW_MS,
            bad_ms: BAD_WINDOW_MS,
        }
    }

    /// 依寬鬆度等比縮放三層視窗
    pub fn with_leniency(leniency: JudgeLeniency) -> Self {
        let scale = leniency.scale();
        Self {
            perfect_ms: PERFECT_WINDOW_MS * scale,
            good_ms: GOOD_WINDOW_MS * scale,
            bad_ms: BAD_WINDOW_MS * scale,
        }
    }

    /// 依時間差分類判定
    ///
    /// 嚴格小於：差值恰為視窗值時落到次一級。
    pub fn judge(&self, diff_ms: f64) -> TapJudgement {
        let diff = diff_ms.abs();
        if diff < self.perfect_ms {
            TapJudgement::Perfect
        } else if diff < self.good_ms {
            TapJudgement::Good
        } else if diff < self.bad_ms {
            TapJudgement::Bad
        } else {
            TapJudgement::Miss
        }
    }
}

impl Default for JudgeWindows {
    fn default() -> Self {
        Self::base()
    }
}

/// 節奏評價結果
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RhythmEvaluation {
    pub perfect_count: u32,
    pub good_count: u32,
    pub bad_count: u32,
    pub miss_count: u32,
    pub score: f64,
}

/// 將一回合的判定序列彙總為節奏分數
///
/// 分數正規化到 [0,100]；空序列得 0。與輸入順序無關。
pub fn evaluate_rhythm(judgements: &[TapJudgement]) -> RhythmEvaluation {
    let mut perfect_count = 0u32;
    let mut good_count = 0u32;
    let mut bad_count = 0u32;
    let mut miss_count = 0u32;

    for judgement in judgements {
        match judgement {
            TapJudgement::Perfect => perfect_count += 1,
            TapJudgement::Good => good_count += 1,
            TapJudgement::Bad => bad_count += 1,
            TapJudgement::Miss => miss_count += 1,
        }
    }

    let raw_score: u32 = judgements.iter().map(|j| j.points()).sum();
    let max_score = judgements.len() as u32 * TapJudgement::Perfect.points();

    let score = if max_score > 0 {
        raw_score as f64 / max_score as f64 * 100.0
    } else {
        0.0
    };

    RhythmEvaluation {
        perfect_count,
        good_count,
        bad_count,
        miss_count,
        score,
    }
}

// ============================================================================
// 拍點時間軸
// ============================================================================

/// 時間軸項目種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TimelineKind {
    Phrase,
    Filler,
}

/// 拍點時間軸項目（一個項目對應一個 tap 目標）
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineItem {
    pub id: u32,
    pub kind: TimelineKind,
    pub text: &'static str,
    pub start_ms: f64,
    pub duration_ms: f64,
}

/// 由選中的卡片產生攻擊階段時間軸
///
/// 卡片佔 2 拍、填充詞佔 1 拍，卡片之間各插入一個隨機填充詞。
/// 4 張卡片共 11 拍（BPM 120 下為 5500ms）。
pub fn build_timeline(slots: &[Option<Card>], rng: &mut StdRng) -> Vec<TimelineItem> {
    let cards: Vec<&Card> = slots.iter().flatten().collect();

    let mut timeline = Vec::new();
    let mut cursor = 0.0;
    let mut next_id = 0u32;

    for (i, card) in cards.iter().enumerate() {
        timeline.push(TimelineItem {
            id: next_id,
            kind: TimelineKind::Phrase,
            text: card.text,
            start_ms: cursor,
            duration_ms: BEAT_MS * PHRASE_BEATS as f64,
        });
        next_id += 1;
        cursor += BEAT_MS * PHRASE_BEATS as f64;

        // 最後一張之後不插填充詞
        if i + 1 < cards.len() {
            let filler: &Filler = FILLERS.choose(rng).unwrap_or(&FILLERS[0]);
            timeline.push(TimelineItem {
                id: next_id,
                kind: TimelineKind::Filler,
                text: filler.text,
                start_ms: cursor,
                duration_ms: BEAT_MS * FILLER_BEATS as f64,
            });
            next_id += 1;
            cursor += BEAT_MS * FILLER_BEATS as f64;
        }
    }

    timeline
}

/// 時間軸總長度
pub fn timeline_duration_ms(timeline: &[TimelineItem]) -> f64 {
    timeline
        .last()
        .map(|item| item.start_ms + item.duration_ms)
        .unwrap_or(0.0)
}

// ============================================================================
// Tap 目標追蹤
// ============================================================================

/// 單一 tap 目標的狀態
#[derive(Clone, Debug)]
struct TapTarget {
    id: u32,
    target_ms: f64,
    judgement: Option<TapJudgement>,
}

/// 追蹤一回合內所有 tap 目標
///
/// 每個目標恰好解決一次：最先到達的解決方式生效。輸入解決後的
/// 自動 Miss、自動 Miss 後的輸入，一律是 no-op。
#[derive(Clone, Debug)]
pub struct TapTracker {
    windows: JudgeWindows,
    targets: Vec<TapTarget>,
    combo: u32,
    max_combo: u32,
}

impl TapTracker {
    /// 由時間軸建立（每個項目的開始拍即為目標時刻）
    pub fn from_timeline(windows: JudgeWindows, timeline: &[TimelineItem]) -> Self {
        let targets = timeline
            .iter()
            .map(|item| TapTarget {
                id: item.id,
                target_ms: item.start_ms,
                judgement: Option::None,
            })
            .collect();
        Self {
            windows,
            targets,
            combo: 0,
            max_combo: 0,
        }
    }

    /// 處理一次 tap 輸入
    ///
    /// 回傳判定；目標不存在或已解決時回傳 None（輸入被忽略）。
    pub fn register_tap(&mut self, target_id: u32, tap_ms: f64) -> Option<TapJudgement> {
        let windows = self.windows;
        let target = self.targets.iter_mut().find(|t| t.id == target_id)?;
        if target.judgement.is_some() {
            return Option::None;
        }
        let judgement = windows.judge(tap_ms - target.target_ms);
        target.judgement = Some(judgement);
        self.update_combo(judgement);
        Some(judgement)
    }

    /// 將視窗已關閉而未解決的目標記為 Miss
    ///
    /// 「視窗關閉」= 目標時刻 + Bad 視窗已過。
    pub fn resolve_elapsed(&mut self, now_ms: f64) {
        let bad_ms = self.windows.bad_ms;
        let mut misses = 0;
        for target in &mut self.targets {
            if target.judgement.is_none() && now_ms >= target.target_ms + bad_ms {
                target.judgement = Some(TapJudgement::Miss);
                misses += 1;
            }
        }
        for _ in 0..misses {
            self.update_combo(TapJudgement::Miss);
        }
    }

    /// 結束追蹤：未解決目標記為 Miss，回傳時間軸順序的判定序列
    pub fn finish(mut self) -> Vec<TapJudgement> {
        for target in &mut self.targets {
            if target.judgement.is_none() {
                target.judgement = Some(TapJudgement::Miss);
            }
        }
        self.targets
            .iter()
            .map(|t| t.judgement.unwrap_or(TapJudgement::Miss))
            .collect()
    }

    /// 已解決的目標數
    pub fn resolved_count(&self) -> usize {
        self.targets.iter().filter(|t| t.judgement.is_some()).count()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    fn update_combo(&mut self, judgement: TapJudgement) {
        if judgement.keeps_combo() {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
        } else {
            self.combo = 0;
        }
    }
}

// ============================================================================
// 單元測試
// ============================================================================
