use crate::game::constants::{COPIES_PER_TILE, NUM_TILE_TYPES, RANKS_PER_SUIT, TOTAL_TILES};
use std::fmt;

/// 麻将牌类型
///
/// 144 张牌：万、筒、索各 36 张（1-9 各 4 张），风牌 16 张，箭牌 12 张，花牌 4 张，季牌 4 张
///
/// 牌是不可变的值类型，同一种牌的 4 张副本完全等价，`type_id`（0-41）是唯一的身份标识
///
/// 数牌的点数只能是 1-9，花牌和季牌的序号只能是 1-4；
/// 超出范围的牌请用 `Tile::new` 或 `Tile::from_type_id` 构造，它们会返回 `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    /// 万子（1-9）
    Man(u8),
    /// 筒子（1-9）
    Pin(u8),
    /// 索子（1-9）
    Sou(u8),
    /// 风牌
    Wind(Wind),
    /// 箭牌
    Dragon(Dragon),
    /// 花牌（1-4：梅兰菊竹）
    Flower(u8),
    /// 季牌（1-4：春夏秋冬）
    Season(u8),
}

/// 数牌花色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Man = 0,
    Pin = 1,
    Sou = 2,
}

impl Suit {
    /// 所有花色
    pub fn all() -> [Suit; 3] {
        [Suit::Man, Suit::Pin, Suit::Sou]
    }

    /// 该花色 1 的 type_id
    pub fn base_type_id(self) -> u8 {
        self as u8 * RANKS_PER_SUIT as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Man => "Man",
            Suit::Pin => "Pin",
            Suit::Sou => "Sou",
        }
    }
}

/// 风牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Wind {
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Wind {
    pub fn all() -> [Wind; 4] {
        [Wind::East, Wind::South, Wind::West, Wind::North]
    }
}

/// 箭牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Dragon {
    Red = 0,
    Green = 1,
    White = 2,
}

impl Dragon {
    pub fn all() -> [Dragon; 3] {
        [Dragon::Red, Dragon::Green, Dragon::White]
    }
}

/// 牌的大类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Suited(Suit),
    Wind,
    Dragon,
    Flower,
    Season,
}

impl Tile {
    /// 风牌起始 type_id
    pub const WIND_BASE: u8 = 27;
    /// 箭牌起始 type_id
    pub const DRAGON_BASE: u8 = 31;
    /// 花牌起始 type_id
    pub const FLOWER_BASE: u8 = 34;
    /// 季牌起始 type_id
    pub const SEASON_BASE: u8 = 38;

    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 9;

    /// 创建一张数牌，验证输入有效性
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        if !(Self::MIN_RANK..=Self::MAX_RANK).contains(&rank) {
            return None;
        }
        Some(match suit {
            Suit::Man => Tile::Man(rank),
            Suit::Pin => Tile::Pin(rank),
            Suit::Sou => Tile::Sou(rank),
        })
    }

    /// 转换为 type_id（0-41）
    ///
    /// - 万子：0-8
    /// - 筒子：9-17
    /// - 索子：18-26
    /// - 东南西北：27-30
    /// - 中发白：31-33
    /// - 花：34-37，季：38-41
    pub fn type_id(&self) -> u8 {
        debug_assert!(self.is_valid(), "tile out of range: {self:?}");
        match *self {
            Tile::Man(r) => r - 1,
            Tile::Pin(r) => 9 + r - 1,
            Tile::Sou(r) => 18 + r - 1,
            Tile::Wind(w) => Self::WIND_BASE + w as u8,
            Tile::Dragon(d) => Self::DRAGON_BASE + d as u8,
            Tile::Flower(n) => Self::FLOWER_BASE + n - 1,
            Tile::Season(n) => Self::SEASON_BASE + n - 1,
        }
    }

    /// 点数或序号是否在合法范围内
    pub fn is_valid(&self) -> bool {
        match *self {
            Tile::Man(r) | Tile::Pin(r) | Tile::Sou(r) => (Self::MIN_RANK..=Self::MAX_RANK).contains(&r),
            Tile::Wind(_) | Tile::Dragon(_) => true,
            Tile::Flower(n) | Tile::Season(n) => (1..=4).contains(&n),
        }
    }

    /// 从 type_id 创建牌
    pub fn from_type_id(id: u8) -> Option<Self> {
        let tile = match id {
            0..=8 => Tile::Man(id + 1),
            9..=17 => Tile::Pin(id - 9 + 1),
            18..=26 => Tile::Sou(id - 18 + 1),
            27..=30 => Tile::Wind(Wind::all()[(id - Self::WIND_BASE) as usize]),
            31..=33 => Tile::Dragon(Dragon::all()[(id - Self::DRAGON_BASE) as usize]),
            34..=37 => Tile::Flower(id - Self::FLOWER_BASE + 1),
            38..=41 => Tile::Season(id - Self::SEASON_BASE + 1),
            _ => return None,
        };
        Some(tile)
    }

    /// 所有 42 种牌，按 type_id 排序
    pub fn all_types() -> impl Iterator<Item = Tile> {
        (0..NUM_TILE_TYPES as u8).filter_map(Tile::from_type_id)
    }

    pub fn category(&self) -> Category {
        match self {
            Tile::Man(_) => Category::Suited(Suit::Man),
            Tile::Pin(_) => Category::Suited(Suit::Pin),
            Tile::Sou(_) => Category::Suited(Suit::Sou),
            Tile::Wind(_) => Category::Wind,
            Tile::Dragon(_) => Category::Dragon,
            Tile::Flower(_) => Category::Flower,
            Tile::Season(_) => Category::Season,
        }
    }

    /// 数牌的花色，字牌和花牌返回 None
    pub fn suit(&self) -> Option<Suit> {
        match self.category() {
            Category::Suited(suit) => Some(suit),
            _ => None,
        }
    }

    /// 数牌的数字（1-9），字牌和花牌返回 None
    pub fn rank(&self) -> Option<u8> {
        match *self {
            Tile::Man(r) | Tile::Pin(r) | Tile::Sou(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_suited(&self) -> bool {
        self.suit().is_some()
    }

    /// 字牌（风、箭）
    pub fn is_honor(&self) -> bool {
        matches!(self, Tile::Wind(_) | Tile::Dragon(_))
    }

    /// 幺九牌（数牌 1 或 9）
    pub fn is_terminal(&self) -> bool {
        matches!(self.rank(), Some(1) | Some(9))
    }

    /// 花牌和季牌：摸到后立即亮出并补牌
    pub fn is_bonus(&self) -> bool {
        matches!(self, Tile::Flower(_) | Tile::Season(_))
    }

    /// 同花色的下一张数牌（9 之后没有）
    pub fn next_in_suit(&self) -> Option<Tile> {
        Tile::new(self.suit()?, self.rank()? + 1)
    }

    /// 检查是否可以组成顺子（连续三张，同一花色）
    pub fn can_form_sequence(&self, other1: &Tile, other2: &Tile) -> bool {
        let (Some(suit), Some(s1), Some(s2)) = (self.suit(), other1.suit(), other2.suit()) else {
            return false;
        };
        if suit != s1 || suit != s2 {
            return false;
        }
        let mut ids = [self.type_id(), other1.type_id(), other2.type_id()];
        ids.sort_unstable();
        ids[0] + 1 == ids[1] && ids[1] + 1 == ids[2]
    }

    /// 一副完整的 144 张牌（未洗牌，按 type_id 排序）
    pub fn full_deck() -> Vec<Tile> {
        let mut deck = Vec::with_capacity(TOTAL_TILES);
        for tile in Tile::all_types() {
            let copies = if tile.is_bonus() { 1 } else { COPIES_PER_TILE };
            for _ in 0..copies {
                deck.push(tile);
            }
        }
        deck
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Man(r) => write!(f, "Man {r}"),
            Tile::Pin(r) => write!(f, "Pin {r}"),
            Tile::Sou(r) => write!(f, "Sou {r}"),
            Tile::Wind(w) => write!(f, "Wind {w:?}"),
            Tile::Dragon(d) => write!(f, "Dragon {d:?}"),
            Tile::Flower(n) => {
                let name = ["Plum", "Orchid", "Chrysanthemum", "Bamboo"][n.saturating_sub(1) as usize % 4];
                write!(f, "Flower {name}")
            }
            Tile::Season(n) => {
                let name = ["Spring", "Summer", "Autumn", "Winter"][n.saturating_sub(1) as usize % 4];
                write!(f, "Season {name}")
            }
        }
    }
}
