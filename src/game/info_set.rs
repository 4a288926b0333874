use crate::game::constants::NUM_TILE_TYPES;
use crate::game::meld::MeldKind;
use crate::game::seat::Seat;
use crate::game::state::GameState;
use crate::tile::Tile;
use smallvec::SmallVec;
use std::fmt;

/// 信息集键
///
/// 一个座位可观察到的状态：暗牌计数、最近的弃牌及出牌者、自己副露的类型。
/// 同样可观察状态的两个局面得到相等的键，可直接作为哈希表的键
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoSetKey {
    pub seat: Seat,
    pub counts: [u8; NUM_TILE_TYPES],
    pub last_discard: Option<Tile>,
    pub discarded_by: Option<Seat>,
    pub melds: SmallVec<[MeldKind; 4]>,
}

impl InfoSetKey {
    pub fn from_state(state: &GameState, seat: Seat) -> Self {
        let player = state.player(seat);
        Self {
            seat,
            counts: *player.hand.counts(),
            last_discard: state.last_discard.map(|(tile, _)| tile),
            discarded_by: state.last_discard.map(|(_, by)| by),
            melds: player.melds.iter().map(|m| m.kind()).collect(),
        }
    }
}

/// 文本形式：`East|H:0,1,...|L:5|BY:South|M:PON,CHI`
impl fmt::Display for InfoSetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|H:", self.seat)?;
        for (i, count) in self.counts.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{count}")?;
        }
        match self.last_discard {
            Some(tile) => write!(f, "|L:{}", tile.type_id())?,
            None => f.write_str("|L:-1")?,
        }
        match self.discarded_by {
            Some(seat) => write!(f, "|BY:{seat}")?,
            None => f.write_str("|BY:None")?,
        }
        f.write_str("|M:")?;
        if self.melds.is_empty() {
            return f.write_str("None");
        }
        for (i, kind) in self.melds.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(kind.name())?;
        }
        Ok(())
    }
}
