use crate::game::error::GameError;
use crate::game::meld::Meld;
use crate::game::player::Player;
use crate::tile::Tile;

/// 碰牌操作器
pub struct PongHandler;

impl PongHandler {
    /// 检查是否可以碰牌
    ///
    /// 碰牌条件：
    /// 1. 手牌中有两张相同的牌
    /// 2. 别人打出了第三张相同的牌
    pub fn can_pong(player: &Player, tile: Tile) -> bool {
        player.can_pon(tile)
    }

    /// 执行碰牌
    ///
    /// # 参数
    ///
    /// - `player`: 玩家（可变引用）
    /// - `tile`: 别人打出的牌（由调用方从弃牌堆中移除）
    ///
    /// # 返回
    ///
    /// 新形成的副露；失败时玩家状态不变
    pub fn pong(player: &mut Player, tile: Tile) -> Result<Meld, GameError> {
        if !Self::can_pong(player, tile) {
            return Err(GameError::claim(tile, "pon needs two matching tiles in hand"));
        }
        if !player.hand.remove_n(tile, 2) {
            return Err(GameError::claim(tile, "pon needs two matching tiles in hand"));
        }

        let meld = Meld::Pon { tile };
        player.melds.push(meld);
        log::debug!("seat {} pon {}", player.seat, tile);
        Ok(meld)
    }
}
