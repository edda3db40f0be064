//! 對戰服務模組
//!
//! - `state`: 對戰狀態機（MatchState 與階段轉移）
//! - `snapshot`: 顯示層快照
//! - `annotations`: 準備階段的卡片提示計算
//! - `session`: 以單一 task 序列化所有變更的會話層

pub mod annotations;
pub mod session;
pub mod snapshot;
pub mod state;


pub use annotations::{card_annotations, AnnotationKind, CardAnnotation, UiSupportSettings};
pub use session::{MatchSession, SessionError};
pub use snapshot::MatchSnapshot;
pub use state::{MatchError, MatchFailure, MatchOutcome, MatchState, Phase};
