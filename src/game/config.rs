use crate::game::error::GameError;
use serde::{Deserialize, Serialize};

/// 吃碰杠的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimMode {
    /// 出牌后立即执行仲裁结果
    #[default]
    Automatic,
    /// 仲裁选出的座位在响应阶段选择吃碰杠或过
    Optional,
}

/// 规则配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub claim_mode: ClaimMode,
    /// 杠后补摸一张牌
    pub kan_replacement_draw: bool,
    /// 启用七对和十三幺
    pub special_shapes: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            claim_mode: ClaimMode::Automatic,
            kan_replacement_draw: false,
            special_shapes: true,
        }
    }
}

impl RuleConfig {
    /// 校验配置（目前所有组合都合法）
    pub fn validate(&self) -> Result<(), GameError> {
        Ok(())
    }

    /// 从 TOML 文本解析并校验
    pub fn from_toml_str(text: &str) -> Result<Self, GameError> {
        let config: Self = toml::from_str(text).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RuleConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let config = RuleConfig::from_toml_str("claim_mode = \"optional\"\n").unwrap();
        assert_eq!(config.claim_mode, ClaimMode::Optional);
        assert!(config.special_shapes);
        assert!(!config.kan_replacement_draw);
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = RuleConfig::from_toml_str("claim_mode = \"sometimes\"").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }
}
