use crate::game::error::GameError;
use crate::game::meld::Meld;
use crate::game::player::Player;
use crate::tile::Tile;

/// 杠类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum KongType {
    /// 直杠（别人打出的牌，你杠）
    Direct,
    /// 加杠/补杠（你已经碰了三张，手中有第四张）
    Added,
    /// 暗杠（手牌中有四张相同的牌，自己杠）
    Concealed,
}

/// 杠操作器
pub struct KongHandler;

impl KongHandler {
    /// 检查是否可以加杠（补杠）
    ///
    /// 加杠条件：
    /// 1. 玩家已经碰了这张牌
    /// 2. 手牌中有第四张相同的牌
    pub fn can_add_kong(player: &Player, tile: Tile) -> Option<KongType> {
        (player.has_pon(tile) && player.hand.has_tile(tile)).then_some(KongType::Added)
    }

    /// 检查是否可以直杠（手牌中恰好三张，别人打出第四张）
    pub fn can_direct_kong(player: &Player, tile: Tile) -> Option<KongType> {
        player.can_minkan(tile).then_some(KongType::Direct)
    }

    /// 检查是否可以暗杠（手牌中有四张）
    pub fn can_concealed_kong(player: &Player, tile: Tile) -> Option<KongType> {
        (!tile.is_bonus() && player.hand.tile_count(tile) == 4).then_some(KongType::Concealed)
    }

    /// 出牌阶段可以自己宣告的杠（暗杠或加杠）
    pub fn self_kong_type(player: &Player, tile: Tile) -> Option<KongType> {
        Self::can_concealed_kong(player, tile).or_else(|| Self::can_add_kong(player, tile))
    }

    /// 执行加杠：碰变成杠，原来的三张不重复计算
    ///
    /// # 返回
    ///
    /// 新的副露；失败时玩家状态不变
    pub fn add_kong(player: &mut Player, tile: Tile) -> Result<Meld, GameError> {
        if Self::can_add_kong(player, tile).is_none() {
            return Err(GameError::claim(tile, "added kan needs a pon and the fourth tile"));
        }
        let Some(slot) = player
            .melds
            .iter()
            .position(|m| matches!(*m, Meld::Pon { tile: t } if t == tile))
        else {
            return Err(GameError::claim(tile, "no pon to promote"));
        };

        if !player.hand.remove_tile(tile) {
            return Err(GameError::claim(tile, "added kan needs the fourth tile in hand"));
        }
        let meld = Meld::Kan { tile, kind: KongType::Added };
        player.melds[slot] = meld;
        log::debug!("seat {} added kan {}", player.seat, tile);
        Ok(meld)
    }

    /// 执行直杠
    ///
    /// # 参数
    ///
    /// - `player`: 玩家（可变引用）
    /// - `tile`: 别人打出的牌（由调用方从弃牌堆中移除）
    pub fn direct_kong(player: &mut Player, tile: Tile) -> Result<Meld, GameError> {
        if Self::can_direct_kong(player, tile).is_none() {
            return Err(GameError::claim(tile, "open kan needs exactly three in hand"));
        }
        if !player.hand.remove_n(tile, 3) {
            return Err(GameError::claim(tile, "open kan needs exactly three in hand"));
        }

        let meld = Meld::Kan { tile, kind: KongType::Direct };
        player.melds.push(meld);
        log::debug!("seat {} open kan {}", player.seat, tile);
        Ok(meld)
    }

    /// 执行暗杠
    pub fn concealed_kong(player: &mut Player, tile: Tile) -> Result<Meld, GameError> {
        if Self::can_concealed_kong(player, tile).is_none() {
            return Err(GameError::claim(tile, "concealed kan needs four in hand"));
        }
        if !player.hand.remove_n(tile, 4) {
            return Err(GameError::claim(tile, "concealed kan needs four in hand"));
        }

        let meld = Meld::Kan { tile, kind: KongType::Concealed };
        player.melds.push(meld);
        log::debug!("seat {} concealed kan {}", player.seat, tile);
        Ok(meld)
    }
}
