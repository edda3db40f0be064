//! 對戰狀態機
//!
//! `MatchState` 獨佔持有一場對戰的全部可變狀態，依階段推進：
//! DeckSelect → EnemyTurn → PlayerPrepare → PlayerAttack → TurnResult
//! →（下一回合 EnemyTurn 或 FinalResult）。準備階段入口檢查剩餘
//! 卡片，不足一回合時轉入 Failed，需呼叫端顯式 `reset` 才能重來。
//!
//! 所有倒數到期都以顯式事件（`handle_timeout`）輸入，核心不碰牆鐘。

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::game::cards::Card;
use crate::game::constants::{MAX_TURNS, TURN_SLOT_COUNT, WIN_THRESHOLD};
use crate::game::enemy::EnemyTurnInfo;
use crate::game::pool::{Deck, RemainingPool};
use crate::game::rhythm::{build_timeline, JudgeWindows, TapJudgement, TapTracker, TimelineItem};
use crate::game::scoring::{score_turn, TurnPlay, TurnResult};

/// 對戰結果
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    Win,
    Lose,
}

/// 致命失敗原因
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MatchFailure {
    /// 剩餘卡片不足以供應一個完整回合
    ResourceDepleted,
    /// 其他不可回復的狀態
    Unknown,
}

/// 對戰階段
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    DeckSelect,
    EnemyTurn,
    PlayerPrepare,
    PlayerAttack,
    TurnResult,
    FinalResult(MatchOutcome),
    Failed(MatchFailure),
}

impl Phase {
    /// 畫面路由用標籤
    pub fn screen_tag(&self) -> &'static str {
        match self {
            Phase::DeckSelect => "deck-select",
            Phase::EnemyTurn => "enemy-turn",
            Phase::PlayerPrepare => "battle-prepare",
            Phase::PlayerAttack => "battle-attack",
            Phase::TurnResult => "turn-result",
            Phase::FinalResult(_) => "final-result",
            Phase::Failed(_) => "error",
        }
    }

    /// 是否為終端階段
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::FinalResult(_) | Phase::Failed(_))
    }
}

/// 對戰操作錯誤
///
/// `ResourceDepleted` 對整場對戰致命（狀態機同時轉入 Failed）；
/// `Phase` 表示在不允許的階段呼叫操作。欄位選擇的非法輸入不屬於
/// 錯誤，一律以 no-op 處理。
#[derive(Error, Debug, PartialEq)]
pub enum MatchError {
    #[error("remaining pool has {remaining} cards, cannot supply a turn of {needed}", needed = TURN_SLOT_COUNT)]
    ResourceDepleted { remaining: usize },

    #[error("operation `{op}` is not valid in phase {phase:?}")]
    Phase { op: &'static str, phase: Phase },
}

/// 對戰狀態
///
/// 單場對戰的全部可變狀態由此結構獨佔持有，呼叫端自行決定生命週期；
/// 並行呼叫端必須自行序列化變更（見 `service::session`）。
pub struct MatchState {
    rng: StdRng,
    windows: JudgeWindows,

    phase: Phase,
    turn: u32,

    deck: Deck,
    pool: RemainingPool,

    enemy_info: Option<EnemyTurnInfo>,
    slots: [Option<Card>; TURN_SLOT_COUNT],

    timeline: Vec<TimelineItem>,
    tracker: Option<TapTracker>,

    turn_history: Vec<TurnResult>,
    total_score: u32,
}

impl MatchState {
    /// 建立對戰（預設判定視窗）
    pub fn new(deck: Deck, seed: u64) -> Self {
        Self::with_windows(deck, seed, JudgeWindows::base())
    }

    /// 建立對戰並指定判定視窗（設定畫面的寬鬆度）
    pub fn with_windows(deck: Deck, seed: u64, windows: JudgeWindows) -> Self {
        let pool = RemainingPool::new(deck.cards());
        Self {
            rng: StdRng::seed_from_u64(seed),
            windows,
            phase: Phase::DeckSelect,
            turn: 1,
            deck,
            pool,
            enemy_info: None,
            slots: [None; TURN_SLOT_COUNT],
            timeline: Vec::new(),
            tracker: None,
            turn_history: Vec::new(),
            total_score: 0,
        }
    }

    fn require_phase(&self, expected: Phase, op: &'static str) -> Result<(), MatchError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(MatchError::Phase {
                op,
                phase: self.phase,
            })
        }
    }

    /// 開始對戰：進入第一個敵方回合
    pub fn start(&mut self) -> Result<(), MatchError> {
        self.require_phase(Phase::DeckSelect, "start")?;
        debug!(deck_size = self.deck.len(), "match started");
        self.phase = Phase::EnemyTurn;
        Ok(())
    }

    /// 供應本回合的敵方回合資訊（外部資料來源產出）
    pub fn begin_enemy_turn(&mut self, info: EnemyTurnInfo) -> Result<(), MatchError> {
        self.require_phase(Phase::EnemyTurn, "begin_enemy_turn")?;
        debug!(turn = self.turn, enemy_type = ?info.card_type, "enemy turn info set");
        self.enemy_info = Some(info);
        Ok(())
    }

    /// 進入準備階段
    ///
    /// 先做耗盡檢查：剩餘卡片不足一回合時整場對戰失敗。
    pub fn proceed_to_prepare(&mut self) -> Result<(), MatchError> {
        self.require_phase(Phase::EnemyTurn, "proceed_to_prepare")?;
        if self.enemy_info.is_none() {
            return Err(MatchError::Phase {
                op: "proceed_to_prepare",
                phase: self.phase,
            });
        }
        if self.pool.is_depleted() {
            let remaining = self.pool.len();
            error!(remaining, "remaining pool depleted, match failed");
            self.phase = Phase::Failed(MatchFailure::ResourceDepleted);
            return Err(MatchError::ResourceDepleted { remaining });
        }
        self.slots = [None; TURN_SLOT_COUNT];
        self.timeline.clear();
        self.tracker = None;
        self.phase = Phase::PlayerPrepare;
        Ok(())
    }

    /// 為指定欄位選擇卡片
    ///
    /// 非法選擇（欄位越界、卡片已被選用、卡片不在剩餘池中）一律
    /// 拒絕並回傳 `Ok(false)`，狀態不變。
    pub fn select_slot(&mut self, slot: usize, card_id: &str) -> Result<bool, MatchError> {
        self.require_phase(Phase::PlayerPrepare, "select_slot")?;

        if slot >= TURN_SLOT_COUNT {
            warn!(slot, "slot index out of range, selection ignored");
            return Ok(false);
        }
        if self.slots.iter().flatten().any(|c| c.id == card_id) {
            warn!(card_id, "card already selected, selection ignored");
            return Ok(false);
        }
        let card = match self.pool.card_by_id(card_id) {
            Some(card) => *card,
            None => {
                warn!(card_id, "card not in remaining pool, selection ignored");
                return Ok(false);
            }
        };
        self.slots[slot] = Some(card);
        Ok(true)
    }

    /// 清空指定欄位（空欄位與越界為 no-op）
    pub fn clear_slot(&mut self, slot: usize) -> Result<(), MatchError> {
        self.require_phase(Phase::PlayerPrepare, "clear_slot")?;
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
        Ok(())
    }

    /// 四個欄位是否皆已填滿
    pub fn slots_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    /// 進入攻擊階段
    ///
    /// 需四欄全滿；未滿時維持原狀並回傳 `Ok(false)`（倒數到期也
    /// 無法強行進入）。
    pub fn proceed_to_attack(&mut self) -> Result<bool, MatchError> {
        self.require_phase(Phase::PlayerPrepare, "proceed_to_attack")?;
        if !self.slots_complete() {
            return Ok(false);
        }
        self.timeline = build_timeline(&self.slots, &mut self.rng);
        self.tracker = Some(TapTracker::from_timeline(self.windows, &self.timeline));
        debug!(turn = self.turn, targets = self.timeline.len(), "attack phase started");
        self.phase = Phase::PlayerAttack;
        Ok(true)
    }

    /// 攻擊階段的 tap 輸入
    ///
    /// 回傳判定；目標已解決（含視窗關閉自動 Miss 之後）時回傳 None。
    pub fn register_tap(
        &mut self,
        target_id: u32,
        tap_ms: f64,
    ) -> Result<Option<TapJudgement>, MatchError> {
        self.require_phase(Phase::PlayerAttack, "register_tap")?;
        Ok(self
            .tracker
            .as_mut()
            .and_then(|t| t.register_tap(target_id, tap_ms)))
    }

    /// 推進攻擊階段時間，自動解決視窗已關閉的目標
    pub fn advance_attack_clock(&mut self, now_ms: f64) -> Result<(), MatchError> {
        self.require_phase(Phase::PlayerAttack, "advance_attack_clock")?;
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.resolve_elapsed(now_ms);
        }
        Ok(())
    }

    /// 結束攻擊階段：計分、記入歷史、從剩餘池移除用掉的卡片
    ///
    /// 「回合完成」與「資源消耗」是同一次原子轉移，每個完成的回合
    /// 恰好執行一次；未完成的回合（耗盡、重置）不會動到剩餘池。
    pub fn finish_attack(&mut self) -> Result<TurnResult, MatchError> {
        self.require_phase(Phase::PlayerAttack, "finish_attack")?;
        let enemy_type = match &self.enemy_info {
            Some(info) => info.card_type,
            None => {
                return Err(MatchError::Phase {
                    op: "finish_attack",
                    phase: self.phase,
                })
            }
        };
        let taps = match self.tracker.take() {
            Some(tracker) => tracker.finish(),
            None => Vec::new(),
        };
        let play = TurnPlay {
            slots: self.slots,
            taps,
            enemy_type,
        };
        let result = score_turn(&play);

        self.pool.remove(&play.slots);
        self.total_score += result.total_score;
        debug!(
            turn = self.turn,
            score = result.total_score,
            match_total = self.total_score,
            remaining = self.pool.len(),
            "turn scored"
        );
        self.turn_history.push(result.clone());
        self.phase = Phase::TurnResult;
        Ok(result)
    }

    /// 回合結算後前進：最終結果或下一回合
    pub fn proceed_after_result(&mut self) -> Result<(), MatchError> {
        self.require_phase(Phase::TurnResult, "proceed_after_result")?;
        if self.turn >= MAX_TURNS {
            let outcome = if self.total_score >= WIN_THRESHOLD {
                MatchOutcome::Win
            } else {
                MatchOutcome::Lose
            };
            debug!(total = self.total_score, ?outcome, "match finished");
            self.phase = Phase::FinalResult(outcome);
        } else {
            self.turn += 1;
            self.enemy_info = None;
            self.phase = Phase::EnemyTurn;
        }
        Ok(())
    }

    /// 倒數到期事件（由宿主端計時器注入）
    ///
    /// - 敵方回合：資訊已供應則進入準備階段（可能因耗盡而失敗）
    /// - 準備階段：四欄已滿才前進，未滿則停留原地
    /// - 攻擊階段：以目前已解決的判定強制結算，未解決的目標記 Miss
    /// - 其他階段：過期計時器視為 no-op（計時器可能與操作競速）
    pub fn handle_timeout(&mut self) -> Result<(), MatchError> {
        match self.phase {
            Phase::EnemyTurn if self.enemy_info.is_some() => self.proceed_to_prepare(),
            Phase::PlayerPrepare => {
                self.proceed_to_attack()?;
                Ok(())
            }
            Phase::PlayerAttack => {
                self.finish_attack()?;
                Ok(())
            }
            _ => {
                debug!(phase = ?self.phase, "stale timeout ignored");
                Ok(())
            }
        }
    }

    /// 重置對戰：放棄所有進行中的狀態，回到牌組選擇
    pub fn reset(&mut self) {
        debug!("match reset");
        self.pool = RemainingPool::new(self.deck.cards());
        self.phase = Phase::DeckSelect;
        self.turn = 1;
        self.enemy_info = None;
        self.slots = [None; TURN_SLOT_COUNT];
        self.timeline.clear();
        self.tracker = None;
        self.turn_history.clear();
        self.total_score = 0;
    }

    // ========================================================================
    // 存取器
    // ========================================================================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn turn_history(&self) -> &[TurnResult] {
        &self.turn_history
    }

    pub fn pool(&self) -> &RemainingPool {
        &self.pool
    }

    pub fn enemy_info(&self) -> Option<&EnemyTurnInfo> {
        self.enemy_info.as_ref()
    }

    pub fn slots(&self) -> &[Option<Card>; TURN_SLOT_COUNT] {
        &self.slots
    }

    pub fn timeline(&self) -> &[TimelineItem] {
        &self.timeline
    }

    pub fn combo(&self) -> u32 {
        self.tracker.as_ref().map(|t| t.combo()).unwrap_or(0)
    }

    pub fn max_combo(&self) -> u32 {
        self.tracker.as_ref().map(|t| t.max_combo()).unwrap_or(0)
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self.phase {
            Phase::FinalResult(outcome) => Some(outcome),
            _ => None,
        }
    }
}
