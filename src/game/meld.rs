use crate::game::kong::KongType;
use crate::tile::Tile;
use smallvec::{smallvec, SmallVec};

/// 副露的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum MeldKind {
    Chi,
    Pon,
    Kan,
}

impl MeldKind {
    pub fn name(self) -> &'static str {
        match self {
            MeldKind::Chi => "CHI",
            MeldKind::Pon => "PON",
            MeldKind::Kan => "KAN",
        }
    }
}

/// 副露（吃、碰、杠）
///
/// 纯值类型，牌由种类和数量推导，不持有任何共享引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Meld {
    /// 吃（顺子，start 为最小的一张）
    Chi { start: Tile },
    /// 碰（刻子）
    Pon { tile: Tile },
    /// 杠
    Kan { tile: Tile, kind: KongType },
}

impl Meld {
    pub fn kind(&self) -> MeldKind {
        match self {
            Meld::Chi { .. } => MeldKind::Chi,
            Meld::Pon { .. } => MeldKind::Pon,
            Meld::Kan { .. } => MeldKind::Kan,
        }
    }

    /// 组成副露的牌（3 或 4 张）
    pub fn tiles(&self) -> SmallVec<[Tile; 4]> {
        match *self {
            Meld::Chi { start } => {
                let mut tiles = smallvec![start];
                let mut cur = start;
                for _ in 0..2 {
                    if let Some(next) = cur.next_in_suit() {
                        tiles.push(next);
                        cur = next;
                    }
                }
                tiles
            }
            Meld::Pon { tile } => smallvec![tile; 3],
            Meld::Kan { tile, .. } => smallvec![tile; 4],
        }
    }

    /// 副露的牌数
    pub fn size(&self) -> usize {
        match self {
            Meld::Kan { .. } => 4,
            _ => 3,
        }
    }
}
