//! 對戰核心模組
//!
//! 包含饒舌對戰的核心定義：
//! - `constants`: 規則常量
//! - `cards`: 卡片、類型、韻腳分組定義
//! - `catalog`: 卡片目錄（靜態資料）
//! - `rhythm`: Tap 判定、節奏評價與拍點時間軸
//! - `chain`: 韻腳連鎖評價
//! - `matchup`: 類型相性評價
//! - `scoring`: 回合計分引擎
//! - `pool`: 牌組驗證與剩餘卡片池
//! - `enemy`: 敵方饒舌資料來源
//!
//! 注意：畫面呈現與音訊播放由宿主端處理，核心只提供狀態與計分

pub mod constants;
pub mod cards;
pub mod catalog;
pub mod rhythm;
pub mod chain;
pub mod matchup;
pub mod scoring;
pub mod pool;
pub mod enemy;

// Re-export 常用類型（公開 API）
pub use constants::*;
pub use cards::{Card, CardType, Filler, RhymeGroup, CARD_TYPE_COUNT, RHYME_GROUP_COUNT};
pub use catalog::{
    build_deck, card_by_id, cards_by_rhyme_group, cards_by_type, filler_by_id, CatalogError,
    CARD_CATALOG, FILLERS,
};
pub use rhythm::{
    build_timeline, evaluate_rhythm, timeline_duration_ms, JudgeLeniency, JudgeWindows,
    RhythmEvaluation, TapJudgement, TapTracker, TimelineItem, TimelineKind,
};
pub use chain::{chain_multiplier, evaluate_rhyme_chain, ChainEvaluation};
pub use matchup::{
    evaluate_type_matchup, matchup_multiplier, MatchupEvaluation, TypeMatchup, TYPE_MATCHUP_TABLE,
};
pub use scoring::{score_turn, TurnPlay, TurnResult};
pub use pool::{Deck, DeckBuilder, DeckError, RemainingPool};
pub use enemy::{
    EnemyRap, EnemyRapSource, EnemyTurnInfo, RandomRapSource, ScriptedRapSource, ENEMY_RAPS_TURN1,
    ENEMY_RAPS_TURN2, TUTORIAL_LEVEL2_RAPS, TUTORIAL_RAP,
};
