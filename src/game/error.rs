use crate::game::action::ActionId;
use crate::tile::Tile;

/// 游戏引擎错误
///
/// 所有会修改状态的入口都先校验再修改，返回 `Err` 时状态保持不变
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// 当前状态下不合法的动作
    #[error("illegal action {action}: {reason}")]
    IllegalAction { action: String, reason: String },

    /// 吃碰杠所需的牌不足
    #[error("illegal claim on {tile}: {reason}")]
    IllegalClaim { tile: Tile, reason: String },

    /// 动作编码/解码失败
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// type_id 超出范围
    #[error("invalid tile type id: {0}")]
    InvalidTile(u8),

    /// 配置校验或解析失败
    #[error("configuration error: {0}")]
    Config(String),
}

impl GameError {
    pub(crate) fn illegal(action: Option<ActionId>, reason: impl Into<String>) -> Self {
        let action = match action {
            Some(id) => id.to_string(),
            None => "draw".to_string(),
        };
        GameError::IllegalAction {
            action,
            reason: reason.into(),
        }
    }

    pub(crate) fn claim(tile: Tile, reason: impl Into<String>) -> Self {
        GameError::IllegalClaim {
            tile,
            reason: reason.into(),
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;
