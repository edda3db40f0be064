//! 卡片、類型與韻腳分組定義

use serde::Serialize;

/// 卡片類型（歌詞的對戰屬性）
///
/// 宣告順序即類型同票時的決定性判定順序。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CardType {
    Attack,
    Boast,
    Immersed,
    Counter,
}

impl CardType {
    /// 顯示用標籤
    pub fn label(&self) -> &'static str {
        match self {
            CardType::Attack => "#攻撃",
            CardType::Boast => "#自慢",
            CardType::Immersed => "#夢中",
            CardType::Counter => "#カウンター",
        }
    }

    /// 氣氛提示（敵方回合畫面用）
    pub fn mood_hint(&self) -> &'static str {
        match self {
            CardType::Attack => "攻撃的",
            CardType::Boast => "自慢げ",
            CardType::Immersed => "マイペース",
            CardType::Counter => "反論的",
        }
    }

    /// 所有類型（統計與遍歷用）
    pub fn all() -> &'static [CardType] {
        &[
            CardType::Attack,
            CardType::Boast,
            CardType::Immersed,
            CardType::Counter,
        ]
    }

    /// 轉換為統計桶索引
    pub fn to_index(&self) -> usize {
        match self {
            CardType::Attack => 0,
            CardType::Boast => 1,
            CardType::Immersed => 2,
            CardType::Counter => 3,
        }
    }
}

pub const CARD_TYPE_COUNT: usize = 4;

/// 韻腳分組
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RhymeGroup {
    A,
    B,
    C,
    D,
    /// 不參與連鎖計分（填充詞等）
    None,
}

impl RhymeGroup {
    /// 參與連鎖計分的四個分組
    pub fn real_groups() -> &'static [RhymeGroup] {
        &[RhymeGroup::A, RhymeGroup::B, RhymeGroup::C, RhymeGroup::D]
    }

    /// 分組桶索引（None 不參與）
    pub fn bucket_index(&self) -> Option<usize> {
        match self {
            RhymeGroup::A => Some(0),
            RhymeGroup::B => Some(1),
            RhymeGroup::C => Some(2),
            RhymeGroup::D => Some(3),
            RhymeGroup::None => Option::None,
        }
    }

    /// 韻腳提示（準備畫面用）
    pub fn rhyme_hint(&self) -> &'static str {
        match self {
            RhymeGroup::A => "A系(〜い、〜ない)",
            RhymeGroup::B => "B系(〜あ、〜だ)",
            RhymeGroup::C => "C系(〜ん、〜さ)",
            RhymeGroup::D => "D系(〜イフ、〜イス)",
            RhymeGroup::None => "-",
        }
    }
}

pub const RHYME_GROUP_COUNT: usize = 4;

/// 短句卡片
///
/// 由卡片目錄在啟動時建立一次，之後不再變動。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: &'static str,
    pub text: &'static str,
    pub card_type: CardType,
    pub rhyme_group: RhymeGroup,
}

impl Card {
    pub const fn new(
        id: &'static str,
        text: &'static str,
        card_type: CardType,
        rhyme_group: RhymeGroup,
    ) -> Self {
        Self {
            id,
            text,
            card_type,
            rhyme_group,
        }
    }
}

/// 填充詞（節奏階段的即興詞）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Filler {
    pub id: &'static str,
    pub text: &'static str,
}

impl Filler {
    pub const fn new(id: &'static str, text: &'static str) -> Self {
        Self { id, text }
    }
}

// ============================================================================
// 單元測試
// ============================================================================
