//! 卡片提示計算
//!
//! 準備階段的 UI 輔助：連鎖預測、類型相性、剩餘張數警告。
//! 依 `UiSupportSettings` 個別開關，全部關閉時不產生任何提示。

use crate::game::cards::{Card, CardType, RhymeGroup};
use crate::game::chain::chain_multiplier;
use crate::game::constants::TURN_SLOT_COUNT;
use crate::game::matchup::matchup_multiplier;
use crate::game::pool::RemainingPool;
use crate::game::rhythm::JudgeLeniency;

/// UI 輔助設定（宿主端設定畫面提供）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UiSupportSettings {
    pub hints_enabled: bool,
    pub deck_display_enabled: bool,
    pub chain_prediction_enabled: bool,
    pub type_matching_enabled: bool,
    pub tap_judgement: JudgeLeniency,
}

impl Default for UiSupportSettings {
    fn default() -> Self {
        Self {
            hints_enabled: true,
            deck_display_enabled: true,
            chain_prediction_enabled: true,
            type_matching_enabled: true,
            tap_judgement: JudgeLeniency::Normal,
        }
    }
}

/// 提示種類
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationKind {
    Chain,
    TypeMatch,
    Warning,
}

/// 單一卡片的提示
#[derive(Clone, Debug, PartialEq)]
pub struct CardAnnotation {
    pub kind: AnnotationKind,
    pub text: String,
    pub subtext: Option<String>,
}

/// 同韻腳剩餘張數低於此值時提出警告
const LOW_STOCK_THRESHOLD: usize = 2;

/// 計算候選卡片的提示列表
pub fn card_annotations(
    card: &Card,
    slots: &[Option<Card>; TURN_SLOT_COUNT],
    enemy_type: Option<CardType>,
    pool: &RemainingPool,
    settings: &UiSupportSettings,
) -> Vec<CardAnnotation> {
    let mut annotations = Vec::new();
    if !settings.hints_enabled {
        return annotations;
    }

    // 連鎖預測：已選卡片中同韻腳者 +1 即為達成的連鎖長度
    if settings.chain_prediction_enabled && card.rhyme_group != RhymeGroup::None {
        let same_count = slots
            .iter()
            .flatten()
            .filter(|c| c.rhyme_group == card.rhyme_group)
            .count();
        if same_count > 0 {
            let chain_len = same_count as u32 + 1;
            let multiplier = chain_multiplier(chain_len);
            annotations.push(CardAnnotation {
                kind: AnnotationKind::Chain,
                text: format!("{}チェーン達成!", chain_len),
                subtext: Some(format!("ボーナス: x{}倍", multiplier)),
            });
        }
    }

    // 類型相性：對當前敵方類型有效的卡片
    if settings.type_matching_enabled {
        if let Some(enemy_type) = enemy_type {
            if let Some(multiplier) = matchup_multiplier(enemy_type, card.card_type) {
                annotations.push(CardAnnotation {
                    kind: AnnotationKind::TypeMatch,
                    text: "タイプ相性良し!".to_string(),
                    subtext: Some(format!("ボーナス: x{}倍", multiplier)),
                });
            }
        }
    }

    // 剩餘張數警告
    let remaining = pool.count_by_group(card.rhyme_group);
    if remaining > 0 && remaining <= LOW_STOCK_THRESHOLD {
        annotations.push(CardAnnotation {
            kind: AnnotationKind::Warning,
            text: format!("韻{:?}残り{}枚", card.rhyme_group, remaining),
            subtext: None,
        });
    }

    annotations
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &'static str, card_type: CardType, group: RhymeGroup) -> Card {
        Card::new(id, "テスト", card_type, group)
    }

    fn empty_slots() -> [Option<Card>; TURN_SLOT_COUNT] {
        [None, None, None, None]
    }

    #[test]
    fn test_chain_prediction() {
        let candidate = card("a3", CardType::Attack, RhymeGroup::A);
        let mut slots = empty_slots();
        slots[0] = Some(card("a1", CardType::Attack, RhymeGroup::A));
        slots[1] = Some(card("a2", CardType::Attack, RhymeGroup::A));

        let pool = RemainingPool::new(&[candidate]);
        let annotations = card_annotations(
            &candidate,
            &slots,
            None,
            &pool,
            &UiSupportSettings::default(),
        );

        let chain = annotations
            .iter()
            .find(|a| a.kind == AnnotationKind::Chain)
            .expect("chain hint");
        assert_eq!(chain.text, "3チェーン達成!");
        assert_eq!(chain.subtext.as_deref(), Some("ボーナス: x2倍"));
    }

    #[test]
    fn test_type_match_hint() {
        let candidate = card("c1", CardType::Counter, RhymeGroup::B);
        let pool = RemainingPool::new(&[candidate]);
        let annotations = card_annotations(
            &candidate,
            &empty_slots(),
            Some(CardType::Attack),
            &pool,
            &UiSupportSettings::default(),
        );

        let hint = annotations
            .iter()
            .find(|a| a.kind == AnnotationKind::TypeMatch)
            .expect("type hint");
        assert_eq!(hint.subtext.as_deref(), Some("ボーナス: x1.5倍"));
    }

    #[test]
    fn test_low_stock_warning() {
        let candidate = card("a1", CardType::Attack, RhymeGroup::A);
        let other = card("a2", CardType::Attack, RhymeGroup::A);
        let pool = RemainingPool::new(&[candidate, other]);

        let annotations = card_annotations(
            &candidate,
            &empty_slots(),
            None,
            &pool,
            &UiSupportSettings::default(),
        );

        let warning = annotations
            .iter()
            .find(|a| a.kind == AnnotationKind::Warning)
            .expect("stock warning");
        assert_eq!(warning.text, "韻A残り2枚");
    }

    #[test]
    fn test_hints_disabled_yields_nothing() {
        let candidate = card("c1", CardType::Counter, RhymeGroup::A);
        let mut slots = empty_slots();
        slots[0] = Some(card("a1", CardType::Counter, RhymeGroup::A));
        let pool = RemainingPool::new(&[candidate]);

        let settings = UiSupportSettings {
            hints_enabled: false,
            ..UiSupportSettings::default()
        };
        let annotations =
            card_annotations(&candidate, &slots, Some(CardType::Attack), &pool, &settings);
        assert!(annotations.is_empty());
    }

    #[test]
    fn test_individual_toggles() {
        let candidate = card("c1", CardType::Counter, RhymeGroup::A);
        let mut slots = empty_slots();
        slots[0] = Some(card("a1", CardType::Counter, RhymeGroup::A));
        // 充足的剩餘張數避免警告干擾
        let pool_cards: Vec<Card> = (0..4)
            .map(|i| {
                card(
                    ["p1", "p2", "p3", "p4"][i],
                    CardType::Counter,
                    RhymeGroup::A,
                )
            })
            .collect();
        let pool = RemainingPool::new(&pool_cards);

        let settings = UiSupportSettings {
            chain_prediction_enabled: false,
            ..UiSupportSettings::default()
        };
        let annotations =
            card_annotations(&candidate, &slots, Some(CardType::Attack), &pool, &settings);
        assert!(annotations.iter().all(|a| a.kind != AnnotationKind::Chain));
        assert!(annotations.iter().any(|a| a.kind == AnnotationKind::TypeMatch));
    }
}
