//! 類型相性評價
//!
//! 玩家選卡中使用最多的類型，對上敵方宣告的類型查固定相性表。

use serde::Serialize;

use super::cards::{Card, CardType, CARD_TYPE_COUNT};
use super::constants::TYPE_BASE_SCORE;

/// 相性表條目（敵方類型 × 有效回應類型）
#[derive(Clone, Copy, Debug)]
pub struct TypeMatchup {
    pub enemy_type: CardType,
    pub effective_type: CardType,
    pub multiplier: f64,
}

/// 固定的方向性相性表
///
/// 只列出有加成的組合；查無條目時倍率為 1.0。
pub static TYPE_MATCHUP_TABLE: [TypeMatchup; 6] = [
    TypeMatchup { enemy_type: CardType::Attack, effective_type: CardType::Counter, multiplier: 1.5 },
    TypeMatchup { enemy_type: CardType::Attack, effective_type: CardType::Immersed, multiplier: 1.3 },
    TypeMatchup { enemy_type: CardType::Boast, effective_type: CardType::Attack, multiplier: 1.3 },
    TypeMatchup { enemy_type: CardType::Boast, effective_type: CardType::Counter, multiplier: 1.2 },
    TypeMatchup { enemy_type: CardType::Immersed, effective_type: CardType::Attack, multiplier: 1.2 },
    TypeMatchup { enemy_type: CardType::Counter, effective_type: CardType::Boast, multiplier: 1.3 },
];

/// 查相性表
pub fn matchup_multiplier(enemy_type: CardType, effective_type: CardType) -> Option<f64> {
    TYPE_MATCHUP_TABLE
        .iter()
        .find(|m| m.enemy_type == enemy_type && m.effective_type == effective_type)
        .map(|m| m.multiplier)
}

/// 類型相性評價結果
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MatchupEvaluation {
    pub is_compatible: bool,
    pub multiplier: f64,
    pub score: f64,
}

/// 計算選中卡片對敵方類型的相性評價
///
/// 取使用最多的類型查表；同票時採 `CardType` 宣告順序中先出現者。
/// 沒有有效卡片時分數為 0。
pub fn evaluate_type_matchup(slots: &[Option<Card>], enemy_type: CardType) -> MatchupEvaluation {
    let mut counts = [0u32; CARD_TYPE_COUNT];
    let mut total = 0u32;
    for card in slots.iter().flatten() {
        counts[card.card_type.to_index()] += 1;
        total += 1;
    }

    if total == 0 {
        return MatchupEvaluation {
            is_compatible: false,
            multiplier: 1.0,
            score: 0.0,
        };
    }

    // 宣告順序掃描，同票取先出現者
    let mut most_used = CardType::Attack;
    let mut best_count = 0u32;
    for card_type in CardType::all() {
        let count = counts[card_type.to_index()];
        if count > best_count {
            best_count = count;
            most_used = *card_type;
        }
    }

    match matchup_multiplier(enemy_type, most_used) {
        Some(multiplier) => MatchupEvaluation {
            is_compatible: true,
            multiplier,
            score: TYPE_BASE_SCORE * multiplier,
        },
        Option::None => MatchupEvaluation {
            is_compatible: false,
            multiplier: 1.0,
            score: TYPE_BASE_SCORE,
        },
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::RhymeGroup;

    fn card(id: &'static str, card_type: CardType) -> Option<Card> {
        Some(Card::new(id, "テスト", card_type, RhymeGroup::A))
    }

    #[test]
    fn test_table_has_six_directed_entries() {
        assert_eq!(TYPE_MATCHUP_TABLE.len(), 6);
        // 方向性：Attack 被 Counter 剋制，反向無條目
        assert_eq!(matchup_multiplier(CardType::Attack, CardType::Counter), Some(1.5));
        assert_eq!(matchup_multiplier(CardType::Counter, CardType::Attack), Option::None);
    }

    #[test]
    fn test_counter_against_attack() {
        let slots = [
            card("c1", CardType::Counter),
            card("c2", CardType::Counter),
            card("c3", CardType::Counter),
            card("c4", CardType::Counter),
        ];
        let eval = evaluate_type_matchup(&slots, CardType::Attack);
        assert!(eval.is_compatible);
        assert_eq!(eval.multiplier, 1.5);
        assert_eq!(eval.score, 150.0);
    }

    #[test]
    fn test_no_table_entry_is_neutral() {
        let slots = [
            card("a1", CardType::Attack),
            card("a2", CardType::Attack),
            card("a3", CardType::Attack),
            card("a4", CardType::Attack),
        ];
        // Attack 對 Counter 沒有條目
        let eval = evaluate_type_matchup(&slots, CardType::Counter);
        assert!(!eval.is_compatible);
        assert_eq!(eval.multiplier, 1.0);
        assert_eq!(eval.score, 100.0);
    }

    #[test]
    fn test_most_used_type_wins() {
        let slots = [
            card("c1", CardType::Counter),
            card("c2", CardType::Counter),
            card("c3", CardType::Counter),
            card("b1", CardType::Boast),
        ];
        let eval = evaluate_type_matchup(&slots, CardType::Attack);
        assert!(eval.is_compatible);
        assert_eq!(eval.multiplier, 1.5);
    }

    #[test]
    fn test_tie_break_uses_declaration_order() {
        // Attack 與 Counter 各 2 張：宣告順序上 Attack 在前
        let slots = [
            card("x1", CardType::Counter),
            card("x2", CardType::Attack),
            card("x3", CardType::Counter),
            card("x4", CardType::Attack),
        ];
        // 敵方 Boast：Attack 有條目 1.3（若 tie-break 選了 Counter 會是 1.2）
        let eval = evaluate_type_matchup(&slots, CardType::Boast);
        assert!(eval.is_compatible);
        assert_eq!(eval.multiplier, 1.3);
    }

    #[test]
    fn test_empty_slots_score_zero() {
        let slots = [Option::None, Option::None, Option::None, Option::None];
        let eval = evaluate_type_matchup(&slots, CardType::Attack);
        assert!(!eval.is_compatible);
        assert_eq!(eval.multiplier, 1.0);
        assert_eq!(eval.score, 0.0);
    }

    #[test]
    fn test_partial_slots_still_evaluated() {
        let slots = [card("c1", CardType::Immersed), Option::None, Option::None, Option::None];
        let eval = evaluate_type_matchup(&slots, CardType::Attack);
        assert!(eval.is_compatible);
        assert_eq!(eval.multiplier, 1.3);
        assert_eq!(eval.score, 130.0);
    }
}
