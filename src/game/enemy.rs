//! 敵方饒舌資料與回合資訊來源
//!
//! 對戰核心把敵方選詞視為外部資料來源：每回合由來源產出
//! `EnemyTurnInfo`（歌詞、類型、韻腳與兩種提示）。腳本化來源供
//! 教學流程使用，隨機來源供一般對戰使用。

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use super::cards::{CardType, RhymeGroup};

/// 敵方回合資訊
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EnemyTurnInfo {
    pub lyrics: &'static str,
    pub card_type: CardType,
    pub rhyme_group: RhymeGroup,
    pub hint_mood: &'static str,
    pub hint_rhyming: &'static str,
}

/// 敵方饒舌資料
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyRap {
    pub id: &'static str,
    pub turn: u32,
    pub lyrics: &'static str,
    pub card_type: CardType,
    pub rhyme_group: RhymeGroup,
    pub hint_mood: &'static str,
    pub hint_rhyming: &'static str,
}

impl EnemyRap {
    /// 轉為回合資訊
    pub fn turn_info(&self) -> EnemyTurnInfo {
        EnemyTurnInfo {
            lyrics: self.lyrics,
            card_type: self.card_type,
            rhyme_group: self.rhyme_group,
            hint_mood: self.hint_mood,
            hint_rhyming: self.hint_rhyming,
        }
    }
}

/// 第一回合的敵方饒舌
pub static ENEMY_RAPS_TURN1: [EnemyRap; 3] = [
    EnemyRap {
        id: "enemy_t1_1",
        turn: 1,
        lyrics: "お前のライムはぬるま湯みたい",
        card_type: CardType::Attack,
        rhyme_group: RhymeGroup::A,
        hint_mood: "挑発的",
        hint_rhyming: "〜い系（A系）",
    },
    EnemyRap {
        id: "enemy_t1_2",
        turn: 1,
        lyrics: "俺の前じゃお前は赤ん坊",
        card_type: CardType::Attack,
        rhyme_group: RhymeGroup::B,
        hint_mood: "見下している",
        hint_rhyming: "〜あ系（B系）",
    },
    EnemyRap {
        id: "enemy_t1_3",
        turn: 1,
        lyrics: "お前のスキルはまだまだ",
        card_type: CardType::Attack,
        rhyme_group: RhymeGroup::B,
        hint_mood: "批判的",
        hint_rhyming: "〜あ系（B系）",
    },
];

/// 第二回合的敵方饒舌
pub static ENEMY_RAPS_TURN2: [EnemyRap; 3] = [
    EnemyRap {
        id: "enemy_t2_1",
        turn: 2,
        lyrics: "お前の言葉は軽い",
        card_type: CardType::Counter,
        rhyme_group: RhymeGroup::A,
        hint_mood: "反撃的",
        hint_rhyming: "〜い系（A系）",
    },
    EnemyRap {
        id: "enemy_t2_2",
        turn: 2,
        lyrics: "俺のフロウは止まらん",
        card_type: CardType::Boast,
        rhyme_group: RhymeGroup::C,
        hint_mood: "自信満々",
        hint_rhyming: "〜ん系（C系）",
    },
    EnemyRap {
        id: "enemy_t2_3",
        turn: 2,
        lyrics: "まだまだ修行が足りん",
        card_type: CardType::Attack,
        rhyme_group: RhymeGroup::C,
        hint_mood: "辛辣",
        hint_rhyming: "〜ん系（C系）",
    },
];

/// 教學用固定饒舌（單回合教學）
pub static TUTORIAL_RAP: EnemyRap = EnemyRap {
    id: "tutorial_enemy",
    turn: 1,
    lyrics: "お前のスキルはまだまだだ",
    card_type: CardType::Attack,
    rhyme_group: RhymeGroup::B,
    hint_mood: "挑発的",
    hint_rhyming: "〜あ系（B系）で返そう",
};

/// 教學第二關的兩回合饒舌
pub static TUTORIAL_LEVEL2_RAPS: [EnemyRap; 2] = [
    EnemyRap {
        id: "tutorial_lv2_t1",
        turn: 1,
        lyrics: "お前のライムは薄っぺらい",
        card_type: CardType::Attack,
        rhyme_group: RhymeGroup::A,
        hint_mood: "批判的",
        hint_rhyming: "〜い系（A系）でチェーンを狙おう",
    },
    EnemyRap {
        id: "tutorial_lv2_t2",
        turn: 2,
        lyrics: "俺のフロウは止まらん",
        card_type: CardType::Boast,
        rhyme_group: RhymeGroup::C,
        hint_mood: "自信満々",
        hint_rhyming: "タイプ相性を考えよう",
    },
];

/// 敵方回合資訊來源
///
/// 回傳值對任何回合數都有定義（全函式），選詞演算法由實作決定。
pub trait EnemyRapSource {
    /// 產出指定回合（1 起算）的敵方回合資訊
    fn next_rap(&mut self, turn: u32) -> EnemyTurnInfo;
}

/// 腳本化來源：依回合照表供應，超出腳本時停在最後一則
#[derive(Clone, Debug)]
pub struct ScriptedRapSource {
    raps: Vec<EnemyRap>,
}

impl ScriptedRapSource {
    pub fn new(raps: Vec<EnemyRap>) -> Self {
        Self { raps }
    }

    /// 單回合教學的腳本
    pub fn tutorial() -> Self {
        Self::new(vec![TUTORIAL_RAP])
    }

    /// 教學第二關的腳本
    pub fn tutorial_level2() -> Self {
        Self::new(TUTORIAL_LEVEL2_RAPS.to_vec())
    }
}

impl EnemyRapSource for ScriptedRapSource {
    fn next_rap(&mut self, turn: u32) -> EnemyTurnInfo {
        let idx = (turn.max(1) as usize - 1).min(self.raps.len().saturating_sub(1));
        self.raps
            .get(idx)
            .map(EnemyRap::turn_info)
            .unwrap_or_else(|| TUTORIAL_RAP.turn_info())
    }
}

/// 隨機來源：依回合從對應資料表抽選
#[derive(Clone, Debug)]
pub struct RandomRapSource {
    rng: StdRng,
}

impl RandomRapSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl EnemyRapSource for RandomRapSource {
    fn next_rap(&mut self, turn: u32) -> EnemyTurnInfo {
        let table: &[EnemyRap] = if turn <= 1 {
            &ENEMY_RAPS_TURN1
        } else {
            &ENEMY_RAPS_TURN2
        };
        table
            .choose(&mut self.rng)
            .unwrap_or(&TUTORIAL_RAP)
            .turn_info()
    }
}

// ============================================================================
// 單元測試
// ============================================================================
