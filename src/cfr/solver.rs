use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::cfr::config::{Sampling, SolverConfig};
use crate::cfr::regret::regret_match_masked;
use crate::engine::action_mask::ActionMask;
use crate::game::action::{ActionId, ACTION_COUNT};
use crate::game::config::RuleConfig;
use crate::game::constants::NUM_SEATS;
use crate::game::error::GameError;
use crate::game::game_engine::GameEngine;
use crate::game::info_set::InfoSetKey;
use crate::game::seat::Seat;
use crate::game::state::Phase;

/// 一次遍历的返回值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeValue {
    /// 训练座位的期望收益
    pub utility: f64,
    /// 子树中是否有节点因深度上限被截断
    pub truncated: bool,
}

/// 训练统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainStats {
    pub iterations: u64,
    /// 访问过的非叶子节点（含摸牌节点）
    pub nodes: u64,
    /// 到达的终局
    pub terminals: u64,
    /// 因深度上限截断的叶子
    pub truncations: u64,
}

impl TrainStats {
    /// 叶子中被截断的比例
    pub fn truncation_ratio(&self) -> f64 {
        let leaves = self.terminals + self.truncations;
        if leaves == 0 {
            0.0
        } else {
            self.truncations as f64 / leaves as f64
        }
    }
}

/// 表格型 CFR 求解器
///
/// 按信息集累计遗憾值和策略和；每个动作在独立克隆的引擎上展开
pub struct CfrSolver {
    config: SolverConfig,
    rules: RuleConfig,
    /// 累计遗憾：信息集 -> 每个动作的遗憾
    regret_sum: FxHashMap<InfoSetKey, Vec<f64>>,
    /// 累计策略（用于求平均策略）
    strategy_sum: FxHashMap<InfoSetKey, Vec<f64>>,
    rng: SmallRng,
    stats: TrainStats,
}

impl CfrSolver {
    pub fn new(config: SolverConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            rules: RuleConfig::default(),
            regret_sum: FxHashMap::default(),
            strategy_sum: FxHashMap::default(),
            stats: TrainStats::default(),
        })
    }

    /// 训练时发牌使用的规则
    pub fn with_rules(mut self, rules: RuleConfig) -> Result<Self, GameError> {
        rules.validate()?;
        self.rules = rules;
        Ok(self)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// 训练 `iterations` 轮
    ///
    /// 每轮重新洗牌发牌、摸第一张牌，然后从该局面完整遍历一次；
    /// 遗憾表和策略表在各轮之间持续累计
    pub fn train(&mut self, iterations: u64, seat: Seat) -> Result<TrainStats, GameError> {
        for it in 0..iterations {
            let mut engine = GameEngine::with_rng(&mut self.rng).with_config(self.rules.clone())?;
            engine.step(None)?;
            self.traverse(&engine, [1.0; NUM_SEATS], seat)?;
            self.stats.iterations += 1;

            if (it + 1) % self.config.log_every == 0 {
                log::info!(
                    "iteration {}: {} info sets, {} truncated leaves",
                    self.stats.iterations,
                    self.regret_sum.len(),
                    self.stats.truncations
                );
            }
        }

        if self.stats.truncation_ratio() > 0.5 {
            log::warn!(
                "{:.0}% of traversal leaves hit the depth limit of {}",
                self.stats.truncation_ratio() * 100.0,
                self.config.max_depth
            );
        }
        Ok(self.stats)
    }

    /// 从 `engine` 开始遍历，更新 `seat` 的遗憾表
    ///
    /// # 参数
    ///
    /// - `engine`: 起始局面（不会被修改）
    /// - `reach`: 四个座位的到达概率
    /// - `seat`: 训练的座位
    pub fn traverse(
        &mut self,
        engine: &GameEngine,
        reach: [f64; NUM_SEATS],
        seat: Seat,
    ) -> Result<NodeValue, GameError> {
        self.cfr(engine, reach, seat, 0)
    }

    fn cfr(
        &mut self,
        engine: &GameEngine,
        reach: [f64; NUM_SEATS],
        seat: Seat,
        depth: usize,
    ) -> Result<NodeValue, GameError> {
        if engine.is_terminal() {
            self.stats.terminals += 1;
            return Ok(NodeValue { utility: engine.reward(seat), truncated: false });
        }
        if depth > self.config.max_depth {
            self.stats.truncations += 1;
            return Ok(NodeValue { utility: 0.0, truncated: true });
        }
        self.stats.nodes += 1;

        // 摸牌没有选择，不形成决策节点
        if engine.state.phase == Phase::AwaitingDraw {
            let mut next = engine.clone();
            next.step(None)?;
            return self.cfr(&next, reach, seat, depth + 1);
        }

        let acting = engine.current_seat();
        let mask = engine.action_mask();
        let key = engine.info_set(acting);
        let strategy = self.strategy(&key, &mask);
        let legal = mask.legal_actions();

        if self.config.sampling == Sampling::External && acting != seat {
            self.accumulate_strategy(&key, &strategy, reach[acting.index()]);
            let action = self.sample(&strategy, legal);
            let mut next = engine.clone();
            next.step(Some(action))?;
            return self.cfr(&next, reach, seat, depth + 1);
        }

        let mut action_utils = Vec::with_capacity(legal.len());
        let mut node_util = 0.0;
        let mut truncated = false;
        for &action in legal {
            let mut next = engine.clone();
            next.step(Some(action))?;

            let mut next_reach = reach;
            next_reach[acting.index()] *= strategy[action];

            let value = self.cfr(&next, next_reach, seat, depth + 1)?;
            truncated |= value.truncated;
            node_util += strategy[action] * value.utility;
            action_utils.push(value.utility);
        }

        if acting == seat {
            let opponent_reach: f64 = if self.config.reach_weighted_regrets {
                Seat::ALL
                    .iter()
                    .filter(|s| **s != acting)
                    .map(|s| reach[s.index()])
                    .product()
            } else {
                1.0
            };

            let regrets = self
                .regret_sum
                .entry(key.clone())
                .or_insert_with(|| vec![0.0; ACTION_COUNT]);
            for (&action, &util) in legal.iter().zip(action_utils.iter()) {
                regrets[action] += opponent_reach * (util - node_util);
            }

            self.accumulate_strategy(&key, &strategy, reach[acting.index()]);
        }

        Ok(NodeValue { utility: node_util, truncated })
    }

    fn accumulate_strategy(&mut self, key: &InfoSetKey, strategy: &[f64], my_reach: f64) {
        let sums = self
            .strategy_sum
            .entry(key.clone())
            .or_insert_with(|| vec![0.0; ACTION_COUNT]);
        for (sum, &p) in sums.iter_mut().zip(strategy) {
            *sum += my_reach * p;
        }
    }

    /// 按策略采样一个合法动作
    fn sample(&mut self, strategy: &[f64], legal: &[ActionId]) -> ActionId {
        let mut target: f64 = self.rng.gen();
        for &action in legal {
            target -= strategy[action];
            if target <= 0.0 {
                return action;
            }
        }
        // 浮点误差导致没选中时取最后一个
        legal.last().copied().unwrap_or(0)
    }

    /// 当前的遗憾匹配策略（不合法动作为 0）
    pub fn strategy(&self, key: &InfoSetKey, mask: &ActionMask) -> Vec<f64> {
        match self.regret_sum.get(key) {
            Some(regrets) => regret_match_masked(regrets, mask),
            None => regret_match_masked(&[0.0; ACTION_COUNT], mask),
        }
    }

    /// 平均策略（近似均衡）；没有累计过时返回 None
    pub fn average_strategy(&self, key: &InfoSetKey) -> Option<Vec<f64>> {
        let sums = self.strategy_sum.get(key)?;
        let total: f64 = sums.iter().sum();
        if total <= 0.0 {
            return None;
        }
        Some(sums.iter().map(|&s| s / total).collect())
    }

    /// 累计遗憾
    pub fn regrets(&self, key: &InfoSetKey) -> Option<&[f64]> {
        self.regret_sum.get(key).map(Vec::as_slice)
    }

    pub fn info_set_count(&self) -> usize {
        self.regret_sum.len()
    }

    pub fn info_sets(&self) -> impl Iterator<Item = &InfoSetKey> {
        self.strategy_sum.keys()
    }

    pub fn stats(&self) -> TrainStats {
        self.stats
    }
}
