use super::{Hand, Tile};
use crate::game::constants::{GROUPS_PER_HAND, NUM_TILE_TYPES, WINNING_HAND_SIZE};
use smallvec::SmallVec;
use std::fmt;

/// 胡牌判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinResult {
    /// 是否胡牌
    pub is_win: bool,
    /// 胡牌类型
    pub win_type: WinType,
    /// 对子（基本胡牌型才有）
    pub pair: Option<Tile>,
    /// 暗牌部分拆出的顺子/刻子
    pub groups: SmallVec<[Group; 4]>,
}

impl WinResult {
    fn none() -> Self {
        Self {
            is_win: false,
            win_type: WinType::Normal,
            pair: None,
            groups: SmallVec::new(),
        }
    }
}

/// 胡牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinType {
    /// 平胡（基本胡牌型：1个对子 + 4个顺子/刻子）
    Normal,
    /// 七对（七种不同的对子）
    SevenPairs,
    /// 十三幺（十三种幺九字牌各一张，其中一种成对）
    ThirteenOrphans,
}

/// 牌组（顺子或刻子）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// 顺子（连续三张牌，start 为最小的一张）
    Sequence { start: Tile },
    /// 刻子（三张相同牌）
    Triplet { tile: Tile },
}

/// 特殊牌型判定
///
/// 在基本胡牌型之前依次检查，第一个匹配的牌型决定 `WinType`
pub trait SpecialShape: Send + Sync + fmt::Debug {
    /// 匹配时返回的胡牌类型
    fn win_type(&self) -> WinType;

    /// 14 张暗牌是否构成该牌型
    fn matches(&self, hand: &Hand) -> bool;
}

/// 七对：七种不同的牌各两张
#[derive(Debug, Clone, Copy, Default)]
pub struct SevenPairs;

impl SpecialShape for SevenPairs {
    fn win_type(&self) -> WinType {
        WinType::SevenPairs
    }

    fn matches(&self, hand: &Hand) -> bool {
        let mut pairs = 0;
        for &count in hand.counts() {
            match count {
                0 => continue,
                2 => pairs += 1,
                // 四张相同的牌不算两对
                _ => return false,
            }
        }
        pairs == 7
    }
}

/// 十三幺：1/9 万筒索 + 东南西北 + 中发白，各至少一张，总共 14 张
#[derive(Debug, Clone, Copy, Default)]
pub struct ThirteenOrphans;

impl ThirteenOrphans {
    fn is_orphan(tile: Tile) -> bool {
        tile.is_terminal() || tile.is_honor()
    }
}

impl SpecialShape for ThirteenOrphans {
    fn win_type(&self) -> WinType {
        WinType::ThirteenOrphans
    }

    fn matches(&self, hand: &Hand) -> bool {
        let mut has_pair = false;
        for tile in Tile::all_types() {
            let count = hand.tile_count(tile);
            if !Self::is_orphan(tile) {
                if count > 0 {
                    return false;
                }
                continue;
            }
            match count {
                1 => {}
                2 if !has_pair => has_pair = true,
                _ => return false,
            }
        }
        has_pair
    }
}

/// 胡牌判定器
///
/// 先检查特殊牌型，再用递归回溯检查基本胡牌型
#[derive(Debug)]
pub struct WinChecker {
    special_shapes: Vec<Box<dyn SpecialShape>>,
}

impl WinChecker {
    /// 带七对和十三幺的判定器
    pub fn new() -> Self {
        Self {
            special_shapes: vec![Box::new(SevenPairs), Box::new(ThirteenOrphans)],
        }
    }

    /// 只判定基本胡牌型
    pub fn standard_only() -> Self {
        Self {
            special_shapes: Vec::new(),
        }
    }

    /// 追加一个特殊牌型
    pub fn with_shape(mut self, shape: impl SpecialShape + 'static) -> Self {
        self.special_shapes.push(Box::new(shape));
        self
    }

    pub fn special_shapes(&self) -> impl Iterator<Item = &dyn SpecialShape> {
        self.special_shapes.iter().map(|s| s.as_ref())
    }

    /// 判定 14 张暗牌是否胡牌
    #[inline]
    pub fn check_win(&self, hand: &Hand) -> WinResult {
        self.check_with_melds(hand, 0)
    }

    /// 只判定基本胡牌型：14 张牌拆成一个对子和四组
    ///
    /// 副露摊平回多重集合后用这个判定，特殊牌型只适用于门前清
    pub fn check_standard(&self, tiles: &Hand) -> WinResult {
        if tiles.total_count() != WINNING_HAND_SIZE {
            return WinResult::none();
        }
        Self::check_normal_win(tiles, GROUPS_PER_HAND).unwrap_or_else(WinResult::none)
    }

    /// 判定手牌是否胡牌（已经副露的牌组视为完成的组）
    ///
    /// # 参数
    ///
    /// - `hand`: 暗牌
    /// - `melds_count`: 吃碰杠的组数，暗牌需要补足剩余的组和一个对子
    pub fn check_with_melds(&self, hand: &Hand, melds_count: usize) -> WinResult {
        if melds_count > GROUPS_PER_HAND {
            return WinResult::none();
        }
        let groups_needed = GROUPS_PER_HAND - melds_count;
        if hand.total_count() != groups_needed * 3 + 2 {
            return WinResult::none();
        }

        // 特殊牌型只适用于门前清
        if melds_count == 0 && hand.total_count() == WINNING_HAND_SIZE {
            if let Some(shape) = self.special_shapes.iter().find(|s| s.matches(hand)) {
                return WinResult {
                    is_win: true,
                    win_type: shape.win_type(),
                    pair: None,
                    groups: SmallVec::new(),
                };
            }
        }

        Self::check_normal_win(hand, groups_needed).unwrap_or_else(WinResult::none)
    }

    /// 检查基本胡牌型（递归回溯）
    ///
    /// 依次尝试每一种对子，剩下的牌从最小的一张开始拆组
    fn check_normal_win(hand: &Hand, groups_needed: usize) -> Option<WinResult> {
        let mut counts = *hand.counts();
        for pair_id in 0..NUM_TILE_TYPES {
            if counts[pair_id] < 2 {
                continue;
            }
            counts[pair_id] -= 2;
            let mut groups = SmallVec::new();
            let found = Self::find_groups(&mut counts, groups_needed, &mut groups);
            counts[pair_id] += 2;
            if found {
                return Some(WinResult {
                    is_win: true,
                    win_type: WinType::Normal,
                    pair: Tile::from_type_id(pair_id as u8),
                    groups,
                });
            }
        }
        None
    }

    /// 把剩余的牌拆成 `remaining` 个顺子/刻子
    ///
    /// 总是处理 type_id 最小的牌：先试刻子，再试顺子，失败回溯
    fn find_groups(
        counts: &mut [u8; NUM_TILE_TYPES],
        remaining: usize,
        groups: &mut SmallVec<[Group; 4]>,
    ) -> bool {
        let Some(first) = counts.iter().position(|&c| c > 0) else {
            return remaining == 0;
        };
        if remaining == 0 {
            return false;
        }
        let Some(tile) = Tile::from_type_id(first as u8) else {
            return false;
        };

        // 刻子
        if counts[first] >= 3 {
            counts[first] -= 3;
            groups.push(Group::Triplet { tile });
            if Self::find_groups(counts, remaining - 1, groups) {
                return true;
            }
            groups.pop();
            counts[first] += 3;
        }

        // 顺子：只有数牌 1-7 可以作为起点，不会跨花色
        if matches!(tile.rank(), Some(1..=7)) && counts[first + 1] > 0 && counts[first + 2] > 0 {
            counts[first] -= 1;
            counts[first + 1] -= 1;
            counts[first + 2] -= 1;
            groups.push(Group::Sequence { start: tile });
            if Self::find_groups(counts, remaining - 1, groups) {
                return true;
            }
            groups.pop();
            counts[first] += 1;
            counts[first + 1] += 1;
            counts[first + 2] += 1;
        }

        false
    }
}

impl Default for WinChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// 便捷函数：检查 14 张手牌是否胡牌
pub fn is_win(hand: &Hand) -> bool {
    check_win(hand).is_win
}

/// 便捷函数：获取胡牌结果
pub fn check_win(hand: &Hand) -> WinResult {
    WinChecker::new().check_win(hand)
}
