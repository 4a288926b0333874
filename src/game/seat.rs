use crate::game::constants::NUM_SEATS;
use std::fmt;

/// 座位（东南西北），也是出牌顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Seat {
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Seat {
    pub const ALL: [Seat; NUM_SEATS] = [Seat::East, Seat::South, Seat::West, Seat::North];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// 从 0-3 创建座位
    pub fn from_index(index: usize) -> Option<Seat> {
        Self::ALL.get(index).copied()
    }

    /// 下家
    #[inline]
    pub fn next(self) -> Seat {
        self.offset(1)
    }

    /// 按出牌顺序往后数 n 个座位
    pub fn offset(self, n: usize) -> Seat {
        Self::ALL[(self.index() + n) % NUM_SEATS]
    }

    /// 其余三家，从下家开始按出牌顺序排列
    pub fn others(self) -> [Seat; NUM_SEATS - 1] {
        [self.offset(1), self.offset(2), self.offset(3)]
    }

    pub fn name(self) -> &'static str {
        match self {
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
            Seat::North => "North",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
