use crate::game::player::Player;
use crate::game::seat::Seat;
use crate::game::constants::NUM_SEATS;
use crate::tile::{Tile, WinChecker};
use smallvec::SmallVec;

/// 对弃牌的响应类型，按优先级从高到低排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClaimKind {
    Ron,
    Kan,
    Pon,
    Chi,
}

/// 一个座位对弃牌能做的最高优先级响应
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub seat: Seat,
    pub kind: ClaimKind,
}

/// 仲裁结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 没有人响应
    NoClaim,
    /// 点炮，所有能胡的座位同时胡
    Ron { winners: SmallVec<[Seat; 3]> },
    /// 明杠
    Kan { seat: Seat },
    /// 碰
    Pon { seat: Seat },
    /// 吃，starts 为所有可行的顺子起点
    Chi { seat: Seat, starts: SmallVec<[Tile; 3]> },
}

impl Resolution {
    /// 得到响应权的座位（胡牌时为第一个）
    pub fn seat(&self) -> Option<Seat> {
        match self {
            Resolution::NoClaim => None,
            Resolution::Ron { winners } => winners.first().copied(),
            Resolution::Kan { seat } | Resolution::Pon { seat } | Resolution::Chi { seat, .. } => {
                Some(*seat)
            }
        }
    }

    pub fn kind(&self) -> Option<ClaimKind> {
        match self {
            Resolution::NoClaim => None,
            Resolution::Ron { .. } => Some(ClaimKind::Ron),
            Resolution::Kan { .. } => Some(ClaimKind::Kan),
            Resolution::Pon { .. } => Some(ClaimKind::Pon),
            Resolution::Chi { .. } => Some(ClaimKind::Chi),
        }
    }
}

/// 弃牌响应仲裁
///
/// 优先级：胡 > 杠 > 碰 > 吃。胡牌收集所有座位；同一种吃碰杠有多个座位时，
/// 从出牌者的下家开始按出牌顺序取第一个（离出牌者最近的座位）
pub struct ClaimArbiter;

impl ClaimArbiter {
    /// 每个座位对 `tile` 的最高优先级响应（出牌者和不能响应的座位为 None）
    pub fn eligible(
        players: &[Player; NUM_SEATS],
        tile: Tile,
        discarder: Seat,
        checker: &WinChecker,
    ) -> [Option<ClaimKind>; NUM_SEATS] {
        let mut result = [None; NUM_SEATS];
        for seat in discarder.others() {
            result[seat.index()] = Self::best_claim(&players[seat.index()], tile, checker);
        }
        result
    }

    fn best_claim(player: &Player, tile: Tile, checker: &WinChecker) -> Option<ClaimKind> {
        if player.check_win_with(tile, checker).is_win {
            Some(ClaimKind::Ron)
        } else if player.can_minkan(tile) {
            Some(ClaimKind::Kan)
        } else if player.can_pon(tile) {
            Some(ClaimKind::Pon)
        } else if !player.can_chi(tile).is_empty() {
            Some(ClaimKind::Chi)
        } else {
            None
        }
    }

    /// 按优先级仲裁
    ///
    /// # 参数
    ///
    /// - `players`: 四个座位
    /// - `tile`: 刚打出的牌
    /// - `discarder`: 出牌的座位
    /// - `checker`: 胡牌判定器
    pub fn resolve(
        players: &[Player; NUM_SEATS],
        tile: Tile,
        discarder: Seat,
        checker: &WinChecker,
    ) -> Resolution {
        let eligible = Self::eligible(players, tile, discarder, checker);
        let order = discarder.others();

        let winners: SmallVec<[Seat; 3]> = order
            .iter()
            .copied()
            .filter(|s| eligible[s.index()] == Some(ClaimKind::Ron))
            .collect();
        if !winners.is_empty() {
            return Resolution::Ron { winners };
        }

        let first_with = |kind: ClaimKind| {
            order.iter().copied().find(|s| eligible[s.index()] == Some(kind))
        };
        if let Some(seat) = first_with(ClaimKind::Kan) {
            return Resolution::Kan { seat };
        }
        if let Some(seat) = first_with(ClaimKind::Pon) {
            return Resolution::Pon { seat };
        }
        if let Some(seat) = first_with(ClaimKind::Chi) {
            let starts = players[seat.index()].can_chi(tile);
            return Resolution::Chi { seat, starts };
        }
        Resolution::NoClaim
    }
}
