//! 卡片目錄（靜態資料）
//!
//! 全部短句卡片與填充詞的固定資料表，以及依 id／分組／類型的查詢。
//! 未知 id 屬於資料編寫錯誤：查詢在初始化路徑上立即失敗。

use thiserror::Error;

use super::cards::{Card, CardType, Filler, RhymeGroup};
use super::pool::{Deck, DeckError};

/// 目錄查詢錯誤
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("unknown card id: {0}")]
    UnknownCard(String),

    #[error("unknown filler id: {0}")]
    UnknownFiller(String),

    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// 全部短句卡片（32 張）
pub static CARD_CATALOG: [Card; 32] = [
    // 韻腳A: 〜い系 - 9張
    Card::new("a01", "じいちゃんの銀歯みたい", CardType::Attack, RhymeGroup::A),
    Card::new("a02", "綺麗ごとで耳が痛い", CardType::Attack, RhymeGroup::A),
    Card::new("a03", "常に前だけ見てる後ろ見ない", CardType::Immersed, RhymeGroup::A),
    Card::new("a04", "これはただの消化試合", CardType::Attack, RhymeGroup::A),
    Card::new("a05", "そんなの関係ない", CardType::Counter, RhymeGroup::A),
    Card::new("a06", "お前こそ痛い", CardType::Counter, RhymeGroup::A),
    Card::new("a07", "まだまだ言葉がいい足りない", CardType::Immersed, RhymeGroup::A),
    Card::new("a08", "ポルシェをもう一台買いたい", CardType::Boast, RhymeGroup::A),
    Card::new("a09", "君はここで敗退", CardType::Attack, RhymeGroup::A),
    // 韻腳B: 〜あ系 - 8張
    Card::new("b01", "ここで抜く刀", CardType::Boast, RhymeGroup::B),
    Card::new("b02", "大丈夫か頭", CardType::Attack, RhymeGroup::B),
    Card::new("b03", "勝てると思うな馬鹿が", CardType::Attack, RhymeGroup::B),
    Card::new("b04", "あがってく心と体", CardType::Immersed, RhymeGroup::B),
    Card::new("b05", "陸に上がった魚", CardType::Attack, RhymeGroup::B),
    Card::new("b06", "おれは日本の宝", CardType::Boast, RhymeGroup::B),
    Card::new("b07", "お前のスキルまだまだだ", CardType::Counter, RhymeGroup::B),
    Card::new("b08", "それじゃおれには敵わん", CardType::Counter, RhymeGroup::B),
    // 韻腳C: 〜ん系 - 7張
    Card::new("c01", "おまえはここではお客さん", CardType::Attack, RhymeGroup::C),
    Card::new("c02", "ここでかます爆弾", CardType::Boast, RhymeGroup::C),
    Card::new("c03", "はじめますかまずは", CardType::Immersed, RhymeGroup::C),
    Card::new("c04", "見せつけるお前との落差", CardType::Boast, RhymeGroup::C),
    Card::new("c05", "俺のリスナーがたくさん", CardType::Boast, RhymeGroup::C),
    Card::new("c06", "言葉返すサルが", CardType::Counter, RhymeGroup::C),
    Card::new("c07", "きかない言葉の軽さ", CardType::Counter, RhymeGroup::C),
    // 韻腳D: 〜イフ系 - 8張
    Card::new("d01", "これがマイライフ", CardType::Immersed, RhymeGroup::D),
    Card::new("d02", "パンパンになった財布", CardType::Boast, RhymeGroup::D),
    Card::new("d03", "言葉はまるでナイフ", CardType::Boast, RhymeGroup::D),
    Card::new("d04", "ありがとう今日のライブ", CardType::Immersed, RhymeGroup::D),
    Card::new("d05", "たいしたことない小細工", CardType::Attack, RhymeGroup::D),
    Card::new("d06", "いらないアドバイス", CardType::Attack, RhymeGroup::D),
    Card::new("d07", "返してもらうマイク", CardType::Counter, RhymeGroup::D),
    Card::new("d08", "それはラップじゃなくて俳句", CardType::Counter, RhymeGroup::D),
];

/// 全部填充詞
pub static FILLERS: [Filler; 2] = [Filler::new("f01", "ya"), Filler::new("f02", "エイ")];

/// 依 id 查卡片
pub fn card_by_id(id: &str) -> Result<&'static Card, CatalogError> {
    CARD_CATALOG
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| CatalogError::UnknownCard(id.to_string()))
}

/// 依韻腳分組取卡片
pub fn cards_by_rhyme_group(group: RhymeGroup) -> Vec<&'static Card> {
    CARD_CATALOG
        .iter()
        .filter(|c| c.rhyme_group == group)
        .collect()
}

/// 依類型取卡片
pub fn cards_by_type(card_type: CardType) -> Vec<&'static Card> {
    CARD_CATALOG
        .iter()
        .filter(|c| c.card_type == card_type)
        .collect()
}

/// 依 id 查填充詞
pub fn filler_by_id(id: &str) -> Result<&'static Filler, CatalogError> {
    FILLERS
        .iter()
        .find(|f| f.id == id)
        .ok_or_else(|| CatalogError::UnknownFiller(id.to_string()))
}

/// 由 id 列表建立並驗證牌組
///
/// 初始化路徑：任何未知 id 或牌組違規都立即失敗。
pub fn build_deck(ids: &[&str]) -> Result<Deck, CatalogError> {
    let mut cards = Vec::with_capacity(ids.len());
    for id in ids {
        cards.push(*card_by_id(id)?);
    }
    Ok(Deck::new(cards)?)
}

// ============================================================================
// 單元測試
// ============================================================================
