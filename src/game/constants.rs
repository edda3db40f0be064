//! 遊戲常量定義

// ============================================================================
// 對戰規則常量
// ============================================================================

pub const MAX_TURNS: u32 = 2;            // 每場對戰的玩家攻擊回合數
pub const MIN_DECK_SIZE: usize = 15;     // 牌組卡片數下限
pub const MAX_DECK_SIZE: usize = 20;     // 牌組卡片數上限
pub const TURN_SLOT_COUNT: usize = 4;    // 每回合選出的卡片數
pub const WIN_THRESHOLD: u32 = 150;      // 兩回合合計達標即勝利

// ============================================================================
// 計分權重（合計必為 1.0）
// ============================================================================

pub const RHYTHM_WEIGHT: f64 = 0.25;     // 節奏評價
pub const CHAIN_WEIGHT: f64 = 0.45;      // 韻腳連鎖評價
pub const TYPE_WEIGHT: f64 = 0.30;       // 類型相性評價

pub const CHAIN_BASE_SCORE: f64 = 100.0; // 連鎖評價基礎分
pub const TYPE_BASE_SCORE: f64 = 100.0;  // 類型相性評價基礎分

// ============================================================================
// Tap 判定視窗（毫秒）
// ============================================================================

// 分類採嚴格小於：差值恰為視窗值時落到次一級
pub const PERFECT_WINDOW_MS: f64 = 100.0;
pub const GOOD_WINDOW_MS: f64 = 200.0;
pub const BAD_WINDOW_MS: f64 = 300.0;

// 判定寬鬆度的視窗縮放比例
pub const EASY_WINDOW_SCALE: f64 = 1.5;
pub const NORMAL_WINDOW_SCALE: f64 = 1.0;
pub const HARD_WINDOW_SCALE: f64 = 0.6;

// ============================================================================
// 拍點時間軸
// ============================================================================

pub const BPM: u32 = 120;                          // 攻擊階段節拍速度
pub const BEAT_MS: f64 = 60_000.0 / BPM as f64;    // 一拍 = 500ms
pub const PHRASE_BEATS: u32 = 2;                   // 每張卡片佔 2 拍
pub const FILLER_BEATS: u32 = 1;                   // 每個填充詞佔 1 拍

// ============================================================================
// 階段倒數（毫秒）
// ============================================================================

pub const ENEMY_TURN_MS: u64 = 8_000;
pub const PREPARE_PHASE_MS: u64 = 8_000;
pub const ATTACK_PHASE_MS: u64 = 8_000;
