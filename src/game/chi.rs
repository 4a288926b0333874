use crate::game::error::GameError;
use crate::game::meld::Meld;
use crate::game::player::Player;
use crate::tile::Tile;
use smallvec::SmallVec;

/// 吃牌操作器
///
/// 任何座位都可以吃，不限于上家打出的牌
pub struct ChiHandler;

impl ChiHandler {
    /// 检查能否用 `discard` 吃成以 `start` 开头的顺子
    pub fn can_chi(player: &Player, discard: Tile, start: Tile) -> bool {
        player.can_chi(discard).contains(&start)
    }

    /// 执行吃牌
    ///
    /// # 参数
    ///
    /// - `player`: 玩家（可变引用）
    /// - `discard`: 别人打出的牌
    /// - `start`: 顺子的第一张
    ///
    /// # 返回
    ///
    /// 新形成的副露；手牌缺少另外两张时返回 `IllegalClaim` 且不修改玩家
    pub fn chi(player: &mut Player, discard: Tile, start: Tile) -> Result<Meld, GameError> {
        if !Self::can_chi(player, discard, start) {
            return Err(GameError::claim(
                discard,
                format!("no run starting at {start} can be completed from hand"),
            ));
        }

        let meld = Meld::Chi { start };
        let from_hand: SmallVec<[Tile; 2]> =
            meld.tiles().into_iter().filter(|t| *t != discard).collect();
        // 顺子中三张牌种类不同，检查通过后逐张移除不会失败
        for tile in &from_hand {
            player.hand.remove_tile(*tile);
        }
        player.melds.push(meld);
        log::debug!("seat {} chi {} with {}", player.seat, start, discard);
        Ok(meld)
    }
}
