//! 對戰會話
//!
//! 一場對戰 = 一個持有狀態的 task：所有變更指令經由 mpsc 佇列依序
//! 套用，對並行呼叫端天然序列化。進入敵方回合時自動向資料來源
//! 拉取回合資訊。把手全部丟棄時 task 結束，對戰隨之棄置。

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::snapshot::MatchSnapshot;
use super::state::{MatchError, MatchState, Phase};
use crate::game::enemy::EnemyRapSource;
use crate::game::pool::Deck;
use crate::game::rhythm::JudgeWindows;

/// 會話層錯誤
#[derive(Error, Debug)]
pub enum SessionError {
    /// 會話 task 已結束
    #[error("match session has terminated")]
    Closed,

    #[error(transparent)]
    Match(#[from] MatchError),
}

enum Command {
    Start,
    ProceedToPrepare,
    SelectSlot { slot: usize, card_id: String },
    ClearSlot { slot: usize },
    ProceedToAttack,
    RegisterTap { target_id: u32, tap_ms: f64 },
    AdvanceClock { now_ms: f64 },
    FinishAttack,
    ProceedAfterResult,
    Timeout,
    Reset,
    Snapshot,
}

struct Request {
    command: Command,
    reply: oneshot::Sender<Result<MatchSnapshot, MatchError>>,
}

/// 對戰會話把手（可複製，所有把手共用同一個狀態 task）
#[derive(Clone)]
pub struct MatchSession {
    tx: mpsc::Sender<Request>,
}

impl MatchSession {
    /// 啟動會話 task
    pub fn spawn(
        deck: Deck,
        seed: u64,
        windows: JudgeWindows,
        mut raps: Box<dyn EnemyRapSource + Send>,
    ) -> Self {
        let (tx, mut rx) = mpsc::channel::<Request>(32);

        tokio::spawn(async move {
            let mut state = MatchState::with_windows(deck, seed, windows);

            while let Some(request) = rx.recv().await {
                let result = apply(&mut state, request.command);

                // 進入敵方回合且資訊未供應時，自動向資料來源拉取
                if state.phase() == Phase::EnemyTurn && state.enemy_info().is_none() {
                    let info = raps.next_rap(state.turn());
                    let _ = state.begin_enemy_turn(info);
                }

                let reply = result.map(|_| MatchSnapshot::from_state(&state));
                let _ = request.reply.send(reply);
            }
            debug!("match session closed");
        });

        Self { tx }
    }

    async fn send(&self, command: Command) -> Result<MatchSnapshot, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Request {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx
            .await
            .map_err(|_| SessionError::Closed)?
            .map_err(SessionError::from)
    }

    pub async fn start(&self) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::Start).await
    }

    pub async fn proceed_to_prepare(&self) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::ProceedToPrepare).await
    }

    pub async fn select_slot(
        &self,
        slot: usize,
        card_id: &str,
    ) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::SelectSlot {
            slot,
            card_id: card_id.to_string(),
        })
        .await
    }

    pub async fn clear_slot(&self, slot: usize) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::ClearSlot { slot }).await
    }

    pub async fn proceed_to_attack(&self) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::ProceedToAttack).await
    }

    pub async fn register_tap(
        &self,
        target_id: u32,
        tap_ms: f64,
    ) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::RegisterTap { target_id, tap_ms }).await
    }

    pub async fn advance_clock(&self, now_ms: f64) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::AdvanceClock { now_ms }).await
    }

    pub async fn finish_attack(&self) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::FinishAttack).await
    }

    pub async fn proceed_after_result(&self) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::ProceedAfterResult).await
    }

    pub async fn timeout(&self) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::Timeout).await
    }

    pub async fn reset(&self) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::Reset).await
    }

    pub async fn snapshot(&self) -> Result<MatchSnapshot, SessionError> {
        self.send(Command::Snapshot).await
    }
}

fn apply(state: &mut MatchState, command: Command) -> Result<(), MatchError> {
    match command {
        Command::Start => state.start(),
        Command::ProceedToPrepare => state.proceed_to_prepare(),
        Command::SelectSlot { slot, card_id } => state.select_slot(slot, &card_id).map(|_| ()),
        Command::ClearSlot { slot } => state.clear_slot(slot),
        Command::ProceedToAttack => state.proceed_to_attack().map(|_| ()),
        Command::RegisterTap { target_id, tap_ms } => {
            state.register_tap(target_id, tap_ms).map(|_| ())
        }
        Command::AdvanceClock { now_ms } => state.advance_attack_clock(now_ms),
        Command::FinishAttack => state.finish_attack().map(|_| ()),
        Command::ProceedAfterResult => state.proceed_after_result(),
        Command::Timeout => state.handle_timeout(),
        Command::Reset => {
            state.reset();
            Ok(())
        }
        Command::Snapshot => Ok(()),
    }
}
