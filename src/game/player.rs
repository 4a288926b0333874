use crate::game::meld::{Meld, MeldKind};
use crate::game::seat::Seat;
use crate::game::constants::{CHI_STARTS_PER_SUIT, WINNING_HAND_SIZE};
use crate::tile::{Hand, Tile, WinChecker, WinResult};
use smallvec::SmallVec;

/// 玩家状态
///
/// 一个座位的暗牌、副露和亮出的花牌
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    /// 座位
    pub seat: Seat,
    /// 暗牌
    pub hand: Hand,
    /// 已吃/碰/杠的牌组（按形成顺序）
    pub melds: Vec<Meld>,
    /// 亮出的花牌和季牌
    pub bonus: Vec<Tile>,
}

impl Player {
    /// 创建新玩家
    pub fn new(seat: Seat) -> Self {
        Self {
            seat,
            hand: Hand::new(),
            melds: Vec::new(),
            bonus: Vec::new(),
        }
    }

    /// 亮出一张花牌
    pub fn add_bonus_tile(&mut self, tile: Tile) {
        self.bonus.push(tile);
    }

    /// 手牌中至少有两张才能碰
    pub fn can_pon(&self, tile: Tile) -> bool {
        !tile.is_bonus() && self.hand.tile_count(tile) >= 2
    }

    /// 用 `tile` 吃牌的所有可能顺子起点
    ///
    /// # 返回
    ///
    /// 按起点升序排列，手牌需要提供顺子中另外两张
    pub fn can_chi(&self, tile: Tile) -> SmallVec<[Tile; 3]> {
        let mut starts = SmallVec::new();
        let (Some(suit), Some(rank)) = (tile.suit(), tile.rank()) else {
            return starts;
        };
        for start_rank in rank.saturating_sub(2).max(1)..=rank {
            if start_rank as usize > CHI_STARTS_PER_SUIT {
                break;
            }
            let needs_from_hand = (start_rank..start_rank + 3)
                .filter(|&r| r != rank)
                .filter_map(|r| Tile::new(suit, r))
                .all(|t| self.hand.has_tile(t));
            if needs_from_hand {
                if let Some(start) = Tile::new(suit, start_rank) {
                    starts.push(start);
                }
            }
        }
        starts
    }

    /// 可以暗杠的牌（手中四张）
    pub fn can_ankan(&self) -> SmallVec<[Tile; 4]> {
        Tile::all_types()
            .filter(|t| !t.is_bonus() && self.hand.tile_count(*t) == 4)
            .collect()
    }

    /// 手牌中恰好三张才能明杠
    pub fn can_minkan(&self, tile: Tile) -> bool {
        !tile.is_bonus() && self.hand.tile_count(tile) == 3
    }

    /// 可以加杠的牌（已碰且手中有第四张）
    pub fn can_shominkan(&self) -> SmallVec<[Tile; 4]> {
        self.melds
            .iter()
            .filter_map(|m| match *m {
                Meld::Pon { tile } if self.hand.has_tile(tile) => Some(tile),
                _ => None,
            })
            .collect()
    }

    /// 是否已经碰过这张牌
    pub fn has_pon(&self, tile: Tile) -> bool {
        self.melds.iter().any(|m| matches!(*m, Meld::Pon { tile: t } if t == tile))
    }

    /// 副露组数
    pub fn meld_count(&self) -> usize {
        self.melds.len()
    }

    /// 某种副露的数量
    pub fn count_melds(&self, kind: MeldKind) -> usize {
        self.melds.iter().filter(|m| m.kind() == kind).count()
    }

    /// 该座位持有的总牌数：暗牌 + 副露 + 花牌
    pub fn tile_count(&self) -> usize {
        self.hand.total_count()
            + self.melds.iter().map(Meld::size).sum::<usize>()
            + self.bonus.len()
    }

    /// 当前暗牌加副露是否胡牌（自摸判定）
    pub fn check_win(&self, checker: &WinChecker) -> WinResult {
        self.judge(&self.hand, checker)
    }

    /// 加上别人打出的 `tile` 是否胡牌（点炮判定）
    pub fn check_win_with(&self, tile: Tile, checker: &WinChecker) -> WinResult {
        let mut test_hand = self.hand.clone();
        test_hand.add_tile(tile);
        self.judge(&test_hand, checker)
    }

    /// 副露摊平回暗牌后按 14 张判定；杠后补过牌时多出的杠牌按一组计
    fn judge(&self, concealed: &Hand, checker: &WinChecker) -> WinResult {
        if self.melds.is_empty() {
            return checker.check_win(concealed);
        }
        let flat: Hand = concealed
            .to_sorted_vec()
            .into_iter()
            .chain(self.melds.iter().flat_map(Meld::tiles))
            .collect();
        if flat.total_count() == WINNING_HAND_SIZE {
            return checker.check_standard(&flat);
        }
        checker.check_with_melds(concealed, self.melds.len())
    }

    /// 暗牌和副露里的所有牌（不含花牌）
    pub fn all_tiles(&self) -> Vec<Tile> {
        let mut tiles = self.hand.to_sorted_vec();
        for meld in &self.melds {
            tiles.extend(meld.tiles());
        }
        tiles
    }
}
