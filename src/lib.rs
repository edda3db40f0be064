//! 饒舌對戰核心引擎
//!
//! 回合制饒舌對戰小遊戲的計分核心與資源狀態機。玩家從牌組選出
//! 4 張短句卡片並完成節奏輸入，回合分數由三個獨立評價合成：
//! 節奏精度、韻腳連鎖、類型相性。兩回合合計分數對上固定門檻
//! 決定勝負。
//!
//! 畫面呈現、音訊播放、輸入擷取與計時器皆由宿主端負責；本 crate
//! 以顯式狀態與純函式提供對戰邏輯，不依賴任何全域單例或牆鐘。

pub mod game;
pub mod service;

pub use game::{
    Card, CardType, Deck, DeckBuilder, EnemyRapSource, EnemyTurnInfo, Filler, JudgeLeniency,
    JudgeWindows, RandomRapSource, RhymeGroup, ScriptedRapSource, TapJudgement, TurnPlay,
    TurnResult,
};
pub use service::{
    MatchError, MatchFailure, MatchOutcome, MatchSession, MatchSnapshot, MatchState, Phase,
    SessionError, UiSupportSettings,
};
