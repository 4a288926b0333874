use crate::game::constants::{CHI_STARTS_PER_SUIT, NUM_TILE_TYPES};
use crate::game::error::GameError;
use crate::tile::{Suit, Tile};
use std::fmt;
use std::str::FromStr;

/// 动作编号（扁平动作空间中的下标）
pub type ActionId = usize;

/// 出牌：0..42
pub const DISCARD_START: ActionId = 0;
/// 碰：42..84
pub const PON_START: ActionId = DISCARD_START + NUM_TILE_TYPES;
/// 过：84
pub const PASS_ID: ActionId = PON_START + NUM_TILE_TYPES;
/// 吃：85..106（万筒索各 7 个起点）
pub const CHI_START: ActionId = PASS_ID + 1;
/// 吃的动作数
pub const NUM_CHI_ACTIONS: usize = 3 * CHI_STARTS_PER_SUIT;
/// 杠：106..148
pub const KAN_START: ActionId = CHI_START + NUM_CHI_ACTIONS;
/// 动作空间大小
pub const ACTION_COUNT: usize = KAN_START + NUM_TILE_TYPES;

/// 语义动作
///
/// `Kan` 的含义由所处阶段决定：出牌阶段是暗杠或加杠，响应阶段是明杠
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Action {
    /// 出牌
    Discard(Tile),
    /// 碰
    Pon(Tile),
    /// 吃（顺子中最小的一张）
    Chi(Tile),
    /// 杠
    Kan(Tile),
    /// 过（放弃）
    Pass,
}

impl Action {
    /// 编码为动作编号
    ///
    /// 吃的起点必须是 1-7 的数牌，否则返回 `InvalidEncoding`
    pub fn encode(&self) -> Result<ActionId, GameError> {
        match *self {
            Action::Discard(tile) => Ok(DISCARD_START + tile.type_id() as usize),
            Action::Pon(tile) => Ok(PON_START + tile.type_id() as usize),
            Action::Kan(tile) => Ok(KAN_START + tile.type_id() as usize),
            Action::Pass => Ok(PASS_ID),
            Action::Chi(start) => {
                let (Some(suit), Some(rank)) = (start.suit(), start.rank()) else {
                    return Err(GameError::InvalidEncoding(format!(
                        "chi must start on a suited tile, got {start}"
                    )));
                };
                if rank as usize > CHI_STARTS_PER_SUIT {
                    return Err(GameError::InvalidEncoding(format!(
                        "chi starting at {start} runs off the end of the suit"
                    )));
                }
                Ok(CHI_START + suit as usize * CHI_STARTS_PER_SUIT + (rank as usize - 1))
            }
        }
    }

    /// 从动作编号解码
    pub fn decode(id: ActionId) -> Result<Action, GameError> {
        let tile_at = |offset: ActionId| {
            Tile::from_type_id(offset as u8).ok_or(GameError::InvalidTile(offset as u8))
        };
        match id {
            _ if id < PON_START => Ok(Action::Discard(tile_at(id - DISCARD_START)?)),
            _ if id < PASS_ID => Ok(Action::Pon(tile_at(id - PON_START)?)),
            PASS_ID => Ok(Action::Pass),
            _ if id < KAN_START => {
                let offset = id - CHI_START;
                let suit = Suit::all()[offset / CHI_STARTS_PER_SUIT];
                let rank = (offset % CHI_STARTS_PER_SUIT) as u8 + 1;
                Tile::new(suit, rank)
                    .map(Action::Chi)
                    .ok_or_else(|| GameError::InvalidEncoding(format!("bad chi id {id}")))
            }
            _ if id < ACTION_COUNT => Ok(Action::Kan(tile_at(id - KAN_START)?)),
            _ => Err(GameError::InvalidEncoding(format!(
                "action id {id} out of range 0..{ACTION_COUNT}"
            ))),
        }
    }

    /// 从三张牌的顺子构造吃
    ///
    /// # 参数
    ///
    /// - `run`: 三张牌（任意顺序），必须是同一花色的连续三张
    pub fn chi_from_run(run: [Tile; 3]) -> Result<Action, GameError> {
        let mut sorted = run;
        sorted.sort_unstable();
        if !sorted[0].can_form_sequence(&sorted[1], &sorted[2]) {
            return Err(GameError::InvalidEncoding(format!(
                "{}, {}, {} is not a run",
                sorted[0], sorted[1], sorted[2]
            )));
        }
        Ok(Action::Chi(sorted[0]))
    }

    /// 动作涉及的牌（吃返回起点）
    pub fn tile(&self) -> Option<Tile> {
        match *self {
            Action::Discard(t) | Action::Pon(t) | Action::Chi(t) | Action::Kan(t) => Some(t),
            Action::Pass => None,
        }
    }
}

/// 从出牌/碰/杠的动作编号取出牌的种类
pub fn tile_type_from_action(id: ActionId) -> Result<Tile, GameError> {
    match Action::decode(id)? {
        Action::Discard(tile) | Action::Pon(tile) | Action::Kan(tile) => Ok(tile),
        other => Err(GameError::InvalidEncoding(format!(
            "action {other} does not name a single tile type"
        ))),
    }
}

/// 便捷函数：编码
#[inline]
pub fn encode(action: Action) -> Result<ActionId, GameError> {
    action.encode()
}

/// 便捷函数：解码
#[inline]
pub fn decode(id: ActionId) -> Result<Action, GameError> {
    Action::decode(id)
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Discard(t) => write!(f, "DISCARD_{}", t.type_id()),
            Action::Pon(t) => write!(f, "PON_{}", t.type_id()),
            Action::Kan(t) => write!(f, "KAN_{}", t.type_id()),
            Action::Pass => f.write_str("PASS"),
            Action::Chi(t) => match (t.suit(), t.rank()) {
                (Some(suit), Some(rank)) => {
                    write!(f, "CHI_{}_{}", suit.name().to_ascii_uppercase(), rank)
                }
                _ => write!(f, "CHI_{}", t.type_id()),
            },
        }
    }
}

impl FromStr for Action {
    type Err = GameError;

    /// 解析 `DISCARD_5`、`PON_12`、`KAN_33`、`CHI_PIN_4`、`PASS`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || GameError::InvalidEncoding(format!("unknown action name {s:?}"));
        if s == "PASS" {
            return Ok(Action::Pass);
        }
        let (kind, rest) = s.split_once('_').ok_or_else(bad)?;
        let tile_from = |text: &str| -> Result<Tile, GameError> {
            let id: u8 = text.parse().map_err(|_| bad())?;
            Tile::from_type_id(id).ok_or(GameError::InvalidTile(id))
        };
        match kind {
            "DISCARD" => Ok(Action::Discard(tile_from(rest)?)),
            "PON" => Ok(Action::Pon(tile_from(rest)?)),
            "KAN" => Ok(Action::Kan(tile_from(rest)?)),
            "CHI" => {
                let (suit, rank) = rest.split_once('_').ok_or_else(bad)?;
                let suit = Suit::all()
                    .into_iter()
                    .find(|s| s.name().eq_ignore_ascii_case(suit))
                    .ok_or_else(bad)?;
                let rank: u8 = rank.parse().map_err(|_| bad())?;
                let action = Action::Chi(Tile::new(suit, rank).ok_or_else(bad)?);
                action.encode()?;
                Ok(action)
            }
            _ => Err(bad()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::tile::{Dragon, Wind};

    #[test]
    fn test_layout() {
        assert_eq!(PON_START, 42);
        assert_eq!(PASS_ID, 84);
        assert_eq!(CHI_START, 85);
        assert_eq!(KAN_START, 106);
        assert_eq!(ACTION_COUNT, 148);
    }

    #[test]
    fn test_every_id_round_trips() {
        for id in 0..ACTION_COUNT {
            let action = Action::decode(id).unwrap();
            assert_eq!(action.encode().unwrap(), id, "{action}");
        }
        assert!(Action::decode(ACTION_COUNT).is_err());
    }

    #[test]
    fn test_chi_ids() {
        assert_eq!(Action::Chi(Tile::Man(1)).encode().unwrap(), 85);
        assert_eq!(Action::Chi(Tile::Pin(1)).encode().unwrap(), 92);
        assert_eq!(Action::Chi(Tile::Sou(7)).encode().unwrap(), 105);
    }

    #[test]
    fn test_chi_off_the_end_fails() {
        assert!(Action::Chi(Tile::Man(8)).encode().is_err());
        assert!(Action::Chi(Tile::Sou(9)).encode().is_err());
        assert!(Action::Chi(Tile::Wind(Wind::East)).encode().is_err());
        assert!(Action::Chi(Tile::Flower(1)).encode().is_err());
    }

    #[test]
    fn test_chi_from_run() {
        let chi = Action::chi_from_run([Tile::Pin(5), Tile::Pin(3), Tile::Pin(4)]).unwrap();
        assert_eq!(chi, Action::Chi(Tile::Pin(3)));
        assert!(Action::chi_from_run([Tile::Man(8), Tile::Man(9), Tile::Pin(1)]).is_err());
        assert!(Action::chi_from_run([Tile::Man(1), Tile::Man(2), Tile::Man(4)]).is_err());
    }

    #[test]
    fn test_tile_type_from_action() {
        assert_eq!(tile_type_from_action(5).unwrap(), Tile::Man(6));
        assert_eq!(tile_type_from_action(PON_START + 31).unwrap(), Tile::Dragon(Dragon::Red));
        assert_eq!(tile_type_from_action(KAN_START + 41).unwrap(), Tile::Season(4));
        assert!(tile_type_from_action(PASS_ID).is_err());
        assert!(tile_type_from_action(CHI_START).is_err());
        assert!(tile_type_from_action(ACTION_COUNT).is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for id in 0..ACTION_COUNT {
            let action = Action::decode(id).unwrap();
            let name = action.to_string();
            assert_eq!(name.parse::<Action>().unwrap(), action);
        }
        assert_eq!(Action::Chi(Tile::Man(3)).to_string(), "CHI_MAN_3");
        assert!("CHI_MAN_8".parse::<Action>().is_err());
        assert!("DISCARD_42".parse::<Action>().is_err());
        assert!("DRAW".parse::<Action>().is_err());
    }
}
