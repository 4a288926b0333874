use crate::game::action::{Action, ActionId, ACTION_COUNT};
use crate::game::claim::Resolution;
use crate::game::state::{GameState, Phase};

/// 动作掩码
///
/// 长度为 `ACTION_COUNT` 的布尔向量，以及按编号升序排列的合法动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMask {
    mask: Vec<bool>,
    legal: Vec<ActionId>,
}

impl ActionMask {
    /// 没有任何合法动作（摸牌阶段、已结束）
    pub fn empty() -> Self {
        Self {
            mask: vec![false; ACTION_COUNT],
            legal: Vec::new(),
        }
    }

    /// 根据状态生成当前座位的动作掩码
    ///
    /// - 出牌阶段：手中每种牌一个出牌动作，暗杠和加杠
    /// - 响应阶段：仲裁选出的吃/碰/杠，以及过
    /// - 摸牌阶段和结束状态：空
    pub fn from_state(state: &GameState) -> Self {
        let mut mask = Self::empty();
        if state.terminal {
            return mask;
        }

        let player = state.current_player();
        match state.phase {
            Phase::AwaitingDraw => {}
            Phase::AwaitingDiscard => {
                for tile in player.hand.distinct_tiles() {
                    mask.allow(Action::Discard(tile));
                }
                for tile in player.can_ankan() {
                    mask.allow(Action::Kan(tile));
                }
                for tile in player.can_shominkan() {
                    mask.allow(Action::Kan(tile));
                }
            }
            Phase::AwaitingReaction => {
                if let (Some((tile, _)), Some(pending)) = (state.last_discard, &state.pending_claim)
                {
                    match pending {
                        Resolution::Kan { .. } => mask.allow(Action::Kan(tile)),
                        Resolution::Pon { .. } => mask.allow(Action::Pon(tile)),
                        Resolution::Chi { starts, .. } => {
                            for &start in starts {
                                mask.allow(Action::Chi(start));
                            }
                        }
                        Resolution::Ron { .. } | Resolution::NoClaim => {}
                    }
                }
                mask.allow(Action::Pass);
            }
        }
        mask.finish()
    }

    fn allow(&mut self, action: Action) {
        if let Ok(id) = action.encode() {
            self.mask[id] = true;
        }
    }

    fn finish(mut self) -> Self {
        self.legal = self
            .mask
            .iter()
            .enumerate()
            .filter_map(|(id, &ok)| ok.then_some(id))
            .collect();
        self
    }

    /// 检查动作是否合法
    #[inline]
    pub fn is_legal(&self, id: ActionId) -> bool {
        self.mask.get(id).copied().unwrap_or(false)
    }

    /// 合法动作（升序）
    pub fn legal_actions(&self) -> &[ActionId] {
        &self.legal
    }

    /// 布尔向量
    pub fn as_slice(&self) -> &[bool] {
        &self.mask
    }

    pub fn len(&self) -> usize {
        self.legal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legal.is_empty()
    }
}

impl Default for ActionMask {
    fn default() -> Self {
        Self::empty()
    }
}
