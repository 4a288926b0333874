/// 游戏常量定义
///
/// 集中管理所有魔法数字，动作空间的边界全部由这里推导

/// 座位数量
pub const NUM_SEATS: usize = 4;

/// 牌的种类数（42 种：万筒索 27 种 + 风 4 种 + 箭 3 种 + 花 4 种 + 季 4 种）
pub const NUM_TILE_TYPES: usize = 42;

/// 数牌种类数（27 种：3 种花色 × 9 种牌）
pub const NUM_SUITED_TYPES: usize = 27;

/// 每种花色的牌数（9 种：1-9）
pub const RANKS_PER_SUIT: usize = 9;

/// 每种普通牌的数量（4 张）
pub const COPIES_PER_TILE: u8 = 4;

/// 总牌数（144 张：136 张普通牌 + 8 张花牌）
pub const TOTAL_TILES: usize = 144;

/// 起手牌数
pub const HAND_SIZE: usize = 13;

/// 胡牌时的牌数（4 组 + 1 对）
pub const WINNING_HAND_SIZE: usize = 14;

/// 胡牌所需的组数（顺子/刻子/杠）
pub const GROUPS_PER_HAND: usize = 4;

/// 每种花色可以作为吃牌起点的数字（1-7）
pub const CHI_STARTS_PER_SUIT: usize = RANKS_PER_SUIT - 2;

/// CFR 默认的递归深度上限
pub const DEFAULT_MAX_DEPTH: usize = 100;
