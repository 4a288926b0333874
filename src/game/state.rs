use crate::game::claim::Resolution;
use crate::game::constants::{HAND_SIZE, NUM_SEATS};
use crate::game::player::Player;
use crate::game::seat::Seat;
use crate::tile::{Tile, Wall};
use smallvec::SmallVec;

/// 游戏阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// 等待当前座位摸牌（`step(None)`）
    AwaitingDraw,
    /// 当前座位出牌或自己杠
    AwaitingDiscard,
    /// 当前座位决定是否吃碰杠别人的弃牌
    AwaitingReaction,
}

/// 游戏状态
///
/// 只能通过 `GameEngine` 修改；克隆时牌墙共享牌序，其余部分是独立的值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// 牌墙
    pub wall: Wall,
    /// 四个座位
    pub players: [Player; NUM_SEATS],
    /// 每个座位的弃牌堆（按打出顺序）
    pub discards: [Vec<Tile>; NUM_SEATS],
    /// 当前行动的座位
    pub turn: Seat,
    /// 当前阶段
    pub phase: Phase,
    /// 最近一张弃牌和打出它的座位（被吃碰杠后清空）
    pub last_discard: Option<(Tile, Seat)>,
    /// 等待响应的仲裁结果（只在响应阶段存在）
    pub pending_claim: Option<Resolution>,
    /// 是否已经结束
    pub terminal: bool,
    /// 胡牌的座位
    pub winners: SmallVec<[Seat; 3]>,
    /// 已执行的步数
    pub step_count: u32,
}

impl GameState {
    /// 从牌墙发牌：每个座位 13 张，摸到花牌亮出并补牌
    pub fn deal(mut wall: Wall) -> Self {
        let mut players = Seat::ALL.map(Player::new);
        for player in players.iter_mut() {
            while player.hand.total_count() < HAND_SIZE {
                let Some(tile) = wall.draw() else {
                    break;
                };
                if tile.is_bonus() {
                    player.add_bonus_tile(tile);
                } else {
                    player.hand.add_tile(tile);
                }
            }
        }

        Self {
            wall,
            players,
            discards: Default::default(),
            turn: Seat::East,
            phase: Phase::AwaitingDraw,
            last_discard: None,
            pending_claim: None,
            terminal: false,
            winners: SmallVec::new(),
            step_count: 0,
        }
    }

    /// 获取当前玩家
    pub fn current_player(&self) -> &Player {
        &self.players[self.turn.index()]
    }

    /// 获取玩家（不可变引用）
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// 获取玩家（可变引用）
    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    /// 牌墙 + 所有暗牌、副露、花牌 + 所有弃牌，任何时刻都应等于 144
    pub fn total_tiles(&self) -> usize {
        self.wall.remaining_count()
            + self.players.iter().map(Player::tile_count).sum::<usize>()
            + self.discards.iter().map(Vec::len).sum::<usize>()
    }

    /// 标记结束
    pub(crate) fn finish(&mut self, winners: SmallVec<[Seat; 3]>) {
        self.terminal = true;
        self.winners = winners;
        self.pending_claim = None;
    }
}
