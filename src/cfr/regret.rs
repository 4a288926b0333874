use crate::engine::action_mask::ActionMask;

/// 遗憾匹配：正遗憾归一化为策略，全部非正时返回均匀分布
#[must_use]
pub fn regret_match(regrets: &[f64]) -> Vec<f64> {
    let positive_sum: f64 = regrets.iter().filter(|&&r| r > 0.0).sum();

    if positive_sum > 0.0 {
        regrets
            .iter()
            .map(|&r| if r > 0.0 { r / positive_sum } else { 0.0 })
            .collect()
    } else {
        #[allow(clippy::cast_precision_loss)]
        let uniform = 1.0 / regrets.len() as f64;
        vec![uniform; regrets.len()]
    }
}

/// 只在合法动作上做遗憾匹配
///
/// 返回长度与 `regrets` 相同的向量，不合法动作的概率为 0；
/// 合法动作的正遗憾全为 0 时在合法动作上均匀分布
#[must_use]
pub fn regret_match_masked(regrets: &[f64], mask: &ActionMask) -> Vec<f64> {
    let mut strategy = vec![0.0; regrets.len()];
    let legal = mask.legal_actions();
    if legal.is_empty() {
        return strategy;
    }

    let positive_sum: f64 = legal
        .iter()
        .filter_map(|&a| regrets.get(a))
        .filter(|&&r| r > 0.0)
        .sum();

    if positive_sum > 0.0 {
        for &a in legal {
            if let Some(&r) = regrets.get(a) {
                strategy[a] = if r > 0.0 { r / positive_sum } else { 0.0 };
            }
        }
    } else {
        #[allow(clippy::cast_precision_loss)]
        let uniform = 1.0 / legal.len() as f64;
        for &a in legal {
            if let Some(p) = strategy.get_mut(a) {
                *p = uniform;
            }
        }
    }
    strategy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::ACTION_COUNT;
    use crate::game::state::{GameState, Phase};
    use crate::tile::{Tile, Wall};

    fn mask_for(tiles: &[Tile]) -> ActionMask {
        let mut state = GameState::deal(Wall::from_draw_order(Vec::new()));
        for &t in tiles {
            state.players[0].hand.add_tile(t);
        }
        state.phase = Phase::AwaitingDiscard;
        ActionMask::from_state(&state)
    }

    #[test]
    fn positive_regrets_normalized() {
        let strategy = regret_match(&[1.0, 2.0, 3.0]);
        assert!((strategy[0] - 1.0 / 6.0).abs() < 1e-10);
        assert!((strategy[2] - 3.0 / 6.0).abs() < 1e-10);
        let sum: f64 = strategy.iter().sum();
        assert!((sum - 1.0).abs() < 1e-10);
    }

    #[test]
    fn all_non_positive_returns_uniform() {
        let strategy = regret_match(&[-1.0, -2.0, 0.0]);
        for &p in &strategy {
            assert!((p - 1.0 / 3.0).abs() < 1e-10);
        }
    }

    #[test]
    fn masked_ignores_illegal_regret() {
        // 合法动作：出 1 万（0）和 2 筒（10）
        let mask = mask_for(&[Tile::Man(1), Tile::Pin(2)]);
        let mut regrets = vec![0.0; ACTION_COUNT];
        regrets[0] = 1.0;
        regrets[10] = 3.0;
        regrets[5] = 100.0;

        let strategy = regret_match_masked(&regrets, &mask);
        assert_eq!(strategy.len(), ACTION_COUNT);
        assert!((strategy[0] - 0.25).abs() < 1e-10);
        assert!((strategy[10] - 0.75).abs() < 1e-10);
        assert_eq!(strategy[5], 0.0);
    }

    #[test]
    fn masked_uniform_over_legal() {
        let mask = mask_for(&[Tile::Man(1), Tile::Pin(2), Tile::Sou(3), Tile::Sou(3)]);
        let mut regrets = vec![0.0; ACTION_COUNT];
        regrets[0] = -5.0;
        regrets[100] = 7.0;

        let strategy = regret_match_masked(&regrets, &mask);
        let sum: f64 = strategy.iter().sum();
        assert!((sum - 1.0).abs() < 1e-10);
        for &a in mask.legal_actions() {
            assert!((strategy[a] - 1.0 / 3.0).abs() < 1e-10);
        }
        assert_eq!(strategy[100], 0.0);
    }
}
