//! 牌組驗證與剩餘卡片池
//!
//! `Deck` 是對戰開始前驗證完成的選卡；`RemainingPool` 是對戰中
//! 尚未打出的卡片，依韻腳分組建立索引供快速查詢。

use std::collections::HashSet;

use thiserror::Error;

use super::cards::{Card, RhymeGroup, RHYME_GROUP_COUNT};
use super::constants::{MAX_DECK_SIZE, MIN_DECK_SIZE, TURN_SLOT_COUNT};

/// 牌組驗證錯誤
#[derive(Error, Debug, PartialEq)]
pub enum DeckError {
    #[error("deck has {0} cards, below the minimum of {min}", min = MIN_DECK_SIZE)]
    TooSmall(usize),

    #[error("deck has {0} cards, above the maximum of {max}", max = MAX_DECK_SIZE)]
    TooLarge(usize),

    #[error("duplicate card id in deck: {0}")]
    DuplicateCard(String),
}

/// 經過驗證的牌組
#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// 驗證並建立牌組：張數在界內、無重複 id
    pub fn new(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() < MIN_DECK_SIZE {
            return Err(DeckError::TooSmall(cards.len()));
        }
        if cards.len() > MAX_DECK_SIZE {
            return Err(DeckError::TooLarge(cards.len()));
        }
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.id) {
                return Err(DeckError::DuplicateCard(card.id.to_string()));
            }
        }
        Ok(Self { cards })
    }

    /// 不經驗證建立牌組
    ///
    /// 教學關卡等預設牌組可能不符張數界限；對戰中的耗盡檢查仍會把關。
    pub fn preset(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// 牌組編輯器（選卡畫面的增減操作）
#[derive(Clone, Debug, Default)]
pub struct DeckBuilder {
    cards: Vec<Card>,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 卡片在牌組中則移除；不在且未達上限則加入
    ///
    /// 回傳操作後卡片是否在牌組中。
    pub fn toggle(&mut self, card: Card) -> bool {
        if let Some(pos) = self.cards.iter().position(|c| c.id == card.id) {
            self.cards.remove(pos);
            false
        } else if self.can_add() {
            self.cards.push(card);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    pub fn can_add(&self) -> bool {
        self.cards.len() < MAX_DECK_SIZE
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// 完成編輯並驗證
    pub fn build(self) -> Result<Deck, DeckError> {
        Deck::new(self.cards)
    }
}

/// 剩餘卡片池
///
/// 不變量：`by_rhyme_group[g]` 恆等於 `all` 依分組過濾的結果。
/// 每次變更後整批重建，不做增量修補，避免兩者發散。
#[derive(Clone, Debug, Default)]
pub struct RemainingPool {
    all: Vec<Card>,
    by_rhyme_group: [Vec<Card>; RHYME_GROUP_COUNT],
}

impl RemainingPool {
    /// 由牌組卡片建立
    pub fn new(cards: &[Card]) -> Self {
        let mut pool = Self {
            all: cards.to_vec(),
            by_rhyme_group: Default::default(),
        };
        pool.rebuild_groups();
        pool
    }

    fn rebuild_groups(&mut self) {
        for (idx, group) in RhymeGroup::real_groups().iter().enumerate() {
            self.by_rhyme_group[idx] = self
                .all
                .iter()
                .filter(|c| c.rhyme_group == *group)
                .copied()
                .collect();
        }
    }

    /// 移除打出的卡片
    ///
    /// 空欄位忽略；不在池中的 id 亦忽略（重複移除為冪等操作）。
    pub fn remove(&mut self, played: &[Option<Card>]) {
        let used: HashSet<&str> = played.iter().flatten().map(|c| c.id).collect();
        if used.is_empty() {
            return;
        }
        self.all.retain(|c| !used.contains(c.id));
        self.rebuild_groups();
    }

    /// 池中卡片不足一回合所需即為耗盡
    pub fn is_depleted(&self) -> bool {
        self.all.len() < TURN_SLOT_COUNT
    }

    pub fn all(&self) -> &[Card] {
        &self.all
    }

    /// 指定分組的剩餘卡片（None 分組恆為空）
    pub fn by_rhyme_group(&self, group: RhymeGroup) -> &[Card] {
        match group.bucket_index() {
            Some(idx) => &self.by_rhyme_group[idx],
            Option::None => &[],
        }
    }

    pub fn count_by_group(&self, group: RhymeGroup) -> usize {
        self.by_rhyme_group(group).len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.all.iter().any(|c| c.id == id)
    }

    pub fn card_by_id(&self, id: &str) -> Option<&Card> {
        self.all.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::game::catalog::CARD_CATALOG;

    fn sample_cards(count: usize) -> Vec<Card> {
        CARD_CATALOG.iter().take(count).copied().collect()
    }

    #[test]
    fn test_deck_size_bounds() {
        assert_eq!(
            Deck::new(sample_cards(14)).unwrap_err(),
            DeckError::TooSmall(14)
        );
        assert_eq!(
            Deck::new(sample_cards(21)).unwrap_err(),
            DeckError::TooLarge(21)
        );
        assert!(Deck::new(sample_cards(15)).is_ok());
        assert!(Deck::new(sample_cards(20)).is_ok());
    }

    #[test]
    fn test_deck_rejects_duplicates() {
        let mut cards = sample_cards(15);
        cards[14] = cards[0];
        assert_eq!(
            Deck::new(cards).unwrap_err(),
            DeckError::DuplicateCard("a01".to_string())
        );
    }

    #[test]
    fn test_deck_builder_toggle() {
        let mut builder = DeckBuilder::new();
        let card = CARD_CATALOG[0];

        assert!(builder.toggle(card));
        assert!(builder.contains(card.id));
        assert!(!builder.toggle(card));
        assert!(!builder.contains(card.id));
    }

    #[test]
    fn test_deck_builder_respects_max_size() {
        let mut builder = DeckBuilder::new();
        for card in CARD_CATALOG.iter().take(MAX_DECK_SIZE) {
            assert!(builder.toggle(*card));
        }
        assert!(!builder.can_add());
        // 已滿時加入被拒絕
        assert!(!builder.toggle(CARD_CATALOG[MAX_DECK_SIZE]));
        assert_eq!(builder.len(), MAX_DECK_SIZE);

        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_pool_initial_partition() {
        let cards = sample_cards(17); // A 9張 + B 8張
        let pool = RemainingPool::new(&cards);

        assert_eq!(pool.len(), cards.len());
        assert_eq!(pool.count_by_group(RhymeGroup::A), 9);
        assert_eq!(pool.count_by_group(RhymeGroup::B), 8);
        assert_eq!(pool.count_by_group(RhymeGroup::C), 0);

        let partition_total: usize = RhymeGroup::real_groups()
            .iter()
            .map(|g| pool.count_by_group(*g))
            .sum();
        assert_eq!(partition_total, pool.len());
    }

    #[test]
    fn test_remove_rebuilds_groups() {
        let cards = sample_cards(17);
        let mut pool = RemainingPool::new(&cards);

        let played = [
            Some(cards[0]),
            Some(cards[1]),
            Some(cards[9]), // B 組
            Option::None,
        ];
        pool.remove(&played);

        assert_eq!(pool.len(), 14);
        assert_eq!(pool.count_by_group(RhymeGroup::A), 7);
        assert_eq!(pool.count_by_group(RhymeGroup::B), 7);
        assert!(!pool.contains(cards[0].id));
        assert!(pool.contains(cards[2].id));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let cards = sample_cards(16);
        let mut pool = RemainingPool::new(&cards);

        let played = [Some(cards[0]), Some(cards[1]), Option::None, Option::None];
        pool.remove(&played);
        let after_once = pool.all().to_vec();

        pool.remove(&played);
        assert_eq!(pool.all(), after_once.as_slice());
        assert_eq!(pool.count_by_group(RhymeGroup::A), 7);
    }

    #[test]
    fn test_remove_ignores_unknown_and_none() {
        let cards = sample_cards(16);
        let mut pool = RemainingPool::new(&cards);

        let stranger = Card::new(
            "zz99",
            "知らない",
            crate::game::cards::CardType::Attack,
            RhymeGroup::A,
        );
        pool.remove(&[Some(stranger), Option::None]);
        assert_eq!(pool.len(), 16);

        pool.remove(&[]);
        assert_eq!(pool.len(), 16);
    }

    #[test]
    fn test_depletion_threshold() {
        let cards = sample_cards(4);
        let mut pool = RemainingPool::new(&cards);
        assert!(!pool.is_depleted());

        pool.remove(&[Some(cards[0])]);
        assert!(pool.is_depleted());

        let empty = RemainingPool::new(&[]);
        assert!(empty.is_depleted());
    }

    // ========================================================================
    // 性質測試
    // ========================================================================

    proptest! {
        #[test]
        fn prop_partition_matches_all(count in 0usize..=32) {
            let cards = sample_cards(count);
            let pool = RemainingPool::new(&cards);
            let partition_total: usize = RhymeGroup::real_groups()
                .iter()
                .map(|g| pool.count_by_group(*g))
                .sum();
            prop_assert_eq!(partition_total, pool.len());
            prop_assert_eq!(pool.len(), count);
        }

        #[test]
        fn prop_remove_idempotent(indices in prop::collection::vec(0usize..16, 0..8)) {
            let cards = sample_cards(16);
            let played: Vec<Option<Card>> = indices.iter().map(|i| Some(cards[*i])).collect();

            let mut once = RemainingPool::new(&cards);
            once.remove(&played);

            let mut twice = RemainingPool::new(&cards);
            twice.remove(&played);
            twice.remove(&played);

            prop_assert_eq!(once.all(), twice.all());
            for group in RhymeGroup::real_groups() {
                prop_assert_eq!(once.count_by_group(*group), twice.count_by_group(*group));
            }
        }
    }
}
