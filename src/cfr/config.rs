use crate::game::constants::DEFAULT_MAX_DEPTH;
use crate::game::error::GameError;
use serde::{Deserialize, Serialize};

/// 遍历方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// 每个节点展开所有合法动作
    #[default]
    Full,
    /// 训练座位展开所有动作，其他座位按当前策略采样一个动作
    External,
}

/// CFR 训练配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// 递归深度上限（摸牌也计入深度）
    pub max_depth: usize,
    /// 遗憾值乘以对手到达概率
    pub reach_weighted_regrets: bool,
    pub sampling: Sampling,
    /// 发牌和采样的随机种子
    pub seed: u64,
    /// 每隔多少轮输出一次进度
    pub log_every: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            reach_weighted_regrets: true,
            sampling: Sampling::Full,
            seed: 42,
            log_every: 100,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_depth == 0 {
            return Err(GameError::Config("max_depth must be > 0".into()));
        }
        if self.log_every == 0 {
            return Err(GameError::Config("log_every must be > 0".into()));
        }
        Ok(())
    }

    /// 从 TOML 文本解析并校验
    pub fn from_toml_str(text: &str) -> Result<Self, GameError> {
        let config: Self = toml::from_str(text).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
