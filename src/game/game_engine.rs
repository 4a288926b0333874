use crate::engine::action_mask::ActionMask;
use crate::game::action::{Action, ActionId};
use crate::game::chi::ChiHandler;
use crate::game::claim::{ClaimArbiter, Resolution};
use crate::game::config::{ClaimMode, RuleConfig};
use crate::game::constants::NUM_SEATS;
use crate::game::error::{GameError, GameResult};
use crate::game::info_set::InfoSetKey;
use crate::game::kong::{KongHandler, KongType};
use crate::game::meld::Meld;
use crate::game::pong::PongHandler;
use crate::game::scoring::HandScore;
use crate::game::seat::Seat;
use crate::game::state::{GameState, Phase};
use crate::tile::{Tile, Wall, WinChecker};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::smallvec;
use std::sync::Arc;

/// 单步执行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// 摸到一张牌（花牌已亮出并补牌）
    Drawn { tile: Tile },
    /// 牌墙摸完，流局
    Exhausted,
    /// 出牌，附带仲裁结果
    Discarded { tile: Tile, resolution: Resolution },
    /// 吃碰杠
    Melded { seat: Seat, meld: Meld },
    /// 放弃响应
    Passed,
}

/// 游戏引擎
///
/// 负责管理游戏流程和动作处理，是游戏状态唯一的修改者
#[derive(Debug, Clone)]
pub struct GameEngine {
    /// 游戏状态
    pub state: GameState,
    config: RuleConfig,
    checker: Arc<WinChecker>,
}

impl GameEngine {
    /// 用线程随机数洗牌并发牌
    pub fn new() -> Self {
        Self::from_wall(Wall::shuffled_default())
    }

    /// 用固定种子洗牌并发牌
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(&mut SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_wall(Wall::shuffled(rng))
    }

    /// 从给定牌墙发牌
    pub fn from_wall(wall: Wall) -> Self {
        Self::from_state(GameState::deal(wall))
    }

    /// 从任意状态开始（用于构造固定局面）
    pub fn from_state(state: GameState) -> Self {
        let config = RuleConfig::default();
        let checker = Arc::new(Self::build_checker(&config));
        Self { state, config, checker }
    }

    /// 替换规则配置
    pub fn with_config(mut self, config: RuleConfig) -> GameResult<Self> {
        config.validate()?;
        self.checker = Arc::new(Self::build_checker(&config));
        self.config = config;
        Ok(self)
    }

    fn build_checker(config: &RuleConfig) -> WinChecker {
        if config.special_shapes {
            WinChecker::new()
        } else {
            WinChecker::standard_only()
        }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn checker(&self) -> &WinChecker {
        &self.checker
    }

    /// 执行一步
    ///
    /// # 参数
    ///
    /// - `action`: `None` 表示摸牌（只在摸牌阶段合法），否则为动作编号
    ///
    /// # 返回
    ///
    /// 不合法的动作返回 `IllegalAction`，此时状态不变
    pub fn step(&mut self, action: Option<ActionId>) -> GameResult<ActionResult> {
        if self.state.terminal {
            return Err(GameError::illegal(action, "game is over"));
        }

        let result = match (self.state.phase, action) {
            (Phase::AwaitingDraw, None) => self.handle_draw(),
            (Phase::AwaitingDraw, Some(id)) => {
                Err(GameError::illegal(Some(id), "current seat must draw first"))
            }
            (_, None) => Err(GameError::illegal(None, "draw is only legal in the draw phase")),
            (_, Some(id)) => {
                if !self.action_mask().is_legal(id) {
                    return Err(GameError::illegal(
                        Some(id),
                        format!("not legal for {} in {:?}", self.state.turn, self.state.phase),
                    ));
                }
                let action = Action::decode(id)?;
                self.apply(action)
            }
        }?;

        self.state.step_count += 1;
        Ok(result)
    }

    fn apply(&mut self, action: Action) -> GameResult<ActionResult> {
        match (self.state.phase, action) {
            (Phase::AwaitingDiscard, Action::Discard(tile)) => self.handle_discard(tile),
            (Phase::AwaitingDiscard, Action::Kan(tile)) => self.handle_self_kan(tile),
            (Phase::AwaitingReaction, Action::Pass) => self.handle_pass(),
            (Phase::AwaitingReaction, claim @ (Action::Pon(_) | Action::Chi(_) | Action::Kan(_))) => {
                self.apply_claim(self.state.turn, claim)
            }
            (phase, other) => Err(GameError::IllegalAction {
                action: other.to_string(),
                reason: format!("not available in {phase:?}"),
            }),
        }
    }

    /// 处理摸牌
    fn handle_draw(&mut self) -> GameResult<ActionResult> {
        let seat = self.state.turn;
        let Some(tile) = self.draw_for(seat) else {
            log::debug!("wall exhausted on {seat}'s draw");
            self.state.finish(smallvec![]);
            return Ok(ActionResult::Exhausted);
        };
        self.state.phase = Phase::AwaitingDiscard;
        self.check_self_draw(seat);
        Ok(ActionResult::Drawn { tile })
    }

    /// 从牌墙摸牌，花牌亮出后继续摸，直到摸到普通牌或牌墙为空
    fn draw_for(&mut self, seat: Seat) -> Option<Tile> {
        loop {
            let tile = self.state.wall.draw()?;
            let player = self.state.player_mut(seat);
            if tile.is_bonus() {
                log::trace!("{seat} reveals bonus {tile}");
                player.add_bonus_tile(tile);
                continue;
            }
            player.hand.add_tile(tile);
            log::trace!("{seat} draws {tile}");
            return Some(tile);
        }
    }

    /// 处理出牌
    fn handle_discard(&mut self, tile: Tile) -> GameResult<ActionResult> {
        let seat = self.state.turn;
        let previous_discard = self.push_discard(seat, tile)?;

        let resolution = ClaimArbiter::resolve(&self.state.players, tile, seat, &self.checker);
        match &resolution {
            Resolution::NoClaim => {
                self.state.turn = seat.next();
                self.state.phase = Phase::AwaitingDraw;
            }
            Resolution::Ron { winners } => {
                // 弃牌交给离出牌者最近的胡牌者，其余胡牌者按这张牌计分
                self.state.discards[seat.index()].pop();
                if let Some(&first) = winners.first() {
                    self.state.player_mut(first).hand.add_tile(tile);
                }
                log::debug!("ron on {tile} from {seat}: {winners:?}");
                self.state.finish(winners.clone());
            }
            claim => {
                let claimant = claim.seat().unwrap_or(seat);
                match self.config.claim_mode {
                    ClaimMode::Automatic => {
                        let action = Self::default_claim_action(claim, tile);
                        if let Err(err) = self.apply_claim(claimant, action) {
                            self.undo_discard(seat, tile, previous_discard);
                            return Err(err);
                        }
                    }
                    ClaimMode::Optional => {
                        log::debug!("{claimant} may claim {tile} ({:?})", claim.kind());
                        self.state.turn = claimant;
                        self.state.phase = Phase::AwaitingReaction;
                        self.state.pending_claim = Some(claim.clone());
                    }
                }
            }
        }
        Ok(ActionResult::Discarded { tile, resolution })
    }

    /// 牌从手中移到弃牌堆，返回之前的最后一张弃牌
    fn push_discard(&mut self, seat: Seat, tile: Tile) -> GameResult<Option<(Tile, Seat)>> {
        if !self.state.player_mut(seat).hand.remove_tile(tile) {
            return Err(GameError::illegal(None, format!("{seat} does not hold {tile}")));
        }
        let previous = self.state.last_discard.replace((tile, seat));
        self.state.discards[seat.index()].push(tile);
        log::trace!("{seat} discards {tile}");
        Ok(previous)
    }

    /// 撤回一次出牌：牌回到手中，弃牌堆和最后一张弃牌恢复原样
    fn undo_discard(&mut self, seat: Seat, tile: Tile, previous: Option<(Tile, Seat)>) {
        self.state.discards[seat.index()].pop();
        self.state.last_discard = previous;
        self.state.player_mut(seat).hand.add_tile(tile);
        log::warn!("claim on {tile} from {seat} failed, discard rolled back");
    }

    /// 自动模式下仲裁结果对应的动作（吃取最小的顺子起点）
    fn default_claim_action(claim: &Resolution, tile: Tile) -> Action {
        match claim {
            Resolution::Kan { .. } => Action::Kan(tile),
            Resolution::Pon { .. } => Action::Pon(tile),
            Resolution::Chi { starts, .. } => Action::Chi(starts.first().copied().unwrap_or(tile)),
            Resolution::Ron { .. } | Resolution::NoClaim => Action::Pass,
        }
    }

    /// 吃碰杠别人的弃牌：弃牌从弃牌堆移到副露，轮到响应者出牌
    fn apply_claim(&mut self, seat: Seat, action: Action) -> GameResult<ActionResult> {
        let Some((tile, discarder)) = self.state.last_discard else {
            return Err(GameError::illegal(action.encode().ok(), "no discard to claim"));
        };

        let player = self.state.player_mut(seat);
        let meld = match action {
            Action::Pon(_) => PongHandler::pong(player, tile)?,
            Action::Chi(start) => ChiHandler::chi(player, tile, start)?,
            Action::Kan(_) => KongHandler::direct_kong(player, tile)?,
            other => {
                return Err(GameError::illegal(other.encode().ok(), "not a claim"));
            }
        };

        self.state.discards[discarder.index()].pop();
        self.state.last_discard = None;
        self.state.pending_claim = None;
        self.state.turn = seat;
        self.state.phase = Phase::AwaitingDiscard;

        self.after_meld(seat, &meld);
        Ok(ActionResult::Melded { seat, meld })
    }

    /// 出牌阶段的暗杠或加杠，之后仍由同一座位出牌
    fn handle_self_kan(&mut self, tile: Tile) -> GameResult<ActionResult> {
        let seat = self.state.turn;
        let player = self.state.player_mut(seat);
        let meld = match KongHandler::self_kong_type(player, tile) {
            Some(KongType::Concealed) => KongHandler::concealed_kong(player, tile)?,
            Some(KongType::Added) => KongHandler::add_kong(player, tile)?,
            _ => return Err(GameError::claim(tile, "no kan available from hand")),
        };
        self.after_meld(seat, &meld);
        Ok(ActionResult::Melded { seat, meld })
    }

    /// 副露之后：按规则杠后补牌；暗牌全部用完时也补一张，保证有牌可出
    fn after_meld(&mut self, seat: Seat, meld: &Meld) {
        let kan_draw = self.config.kan_replacement_draw && matches!(meld, Meld::Kan { .. });
        let needs_draw = kan_draw || self.state.player(seat).hand.is_empty();
        if needs_draw && self.draw_for(seat).is_none() {
            log::debug!("wall exhausted on {seat}'s replacement draw");
            self.state.finish(smallvec![]);
            return;
        }
        self.check_self_draw(seat);
    }

    /// 放弃响应：轮到出牌者的下家摸牌
    fn handle_pass(&mut self) -> GameResult<ActionResult> {
        let Some((_, discarder)) = self.state.last_discard else {
            return Err(GameError::illegal(None, "nothing to pass on"));
        };
        self.state.pending_claim = None;
        self.state.turn = discarder.next();
        self.state.phase = Phase::AwaitingDraw;
        Ok(ActionResult::Passed)
    }

    /// 自摸检查
    fn check_self_draw(&mut self, seat: Seat) {
        if self.state.player(seat).check_win(&self.checker).is_win {
            log::debug!("{seat} wins by self-draw");
            self.state.finish(smallvec![seat]);
        }
    }

    /// 当前座位的动作掩码
    pub fn action_mask(&self) -> ActionMask {
        ActionMask::from_state(&self.state)
    }

    /// 当前座位的合法动作（升序）；摸牌阶段和结束时为空
    pub fn legal_actions(&self) -> Vec<ActionId> {
        self.action_mask().legal_actions().to_vec()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.terminal
    }

    /// 胡牌得 1，其他 0
    pub fn reward(&self, seat: Seat) -> f64 {
        if self.state.winners.contains(&seat) {
            1.0
        } else {
            0.0
        }
    }

    pub fn current_seat(&self) -> Seat {
        self.state.turn
    }

    pub fn winners(&self) -> &[Seat] {
        &self.state.winners
    }

    pub fn info_set(&self, seat: Seat) -> InfoSetKey {
        InfoSetKey::from_state(&self.state, seat)
    }

    /// 信息集的文本形式
    pub fn info_set_key(&self, seat: Seat) -> String {
        self.info_set(seat).to_string()
    }

    /// 每个座位的得分，未胡牌为 0
    pub fn scores(&self) -> [u32; NUM_SEATS] {
        let mut scores = [0; NUM_SEATS];
        for (i, &seat) in self.state.winners.iter().enumerate() {
            let player = self.state.player(seat);
            scores[seat.index()] = match self.state.last_discard {
                // 一炮多响时只有第一位胡牌者手里有这张牌
                Some((tile, _)) if i > 0 => HandScore::calculate_with(player, tile, &self.checker),
                _ => HandScore::calculate(player, &self.checker),
            };
        }
        scores
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
