use crate::game::meld::MeldKind;
use crate::game::player::Player;
use crate::tile::{Tile, WinChecker};

/// 简化的计分
///
/// 只在胡牌时计分：底分 2，再按牌型加分，最低 2 分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandScore {
    /// 底分
    pub base: u32,
    /// 清一色（数牌只有一种花色）
    pub one_suit: u32,
    /// 全幺九字牌
    pub terminals_and_honors: u32,
    /// 断幺九（全是 2-8 的数牌）
    pub all_simples: u32,
    /// 每个杠
    pub kans: u32,
    /// 副露全是吃
    pub all_chi: u32,
    /// 每张花牌/季牌
    pub bonus_tiles: u32,
    /// 四张花牌齐
    pub four_flowers: u32,
    /// 四张季牌齐
    pub four_seasons: u32,
}

impl HandScore {
    pub const BASE: u32 = 2;
    pub const ONE_SUIT: u32 = 6;
    pub const TERMINALS_AND_HONORS: u32 = 4;
    pub const ALL_SIMPLES: u32 = 1;
    pub const PER_KAN: u32 = 2;
    pub const ALL_CHI: u32 = 1;
    pub const PER_BONUS_TILE: u32 = 1;
    pub const FULL_BONUS_SET: u32 = 3;

    /// 计算玩家当前手牌的得分，不胡牌为 0
    pub fn calculate(player: &Player, checker: &WinChecker) -> u32 {
        Self::breakdown(player, None, checker).map_or(0, |s| s.total())
    }

    /// 带上点炮的牌计算得分
    pub fn calculate_with(player: &Player, winning_tile: Tile, checker: &WinChecker) -> u32 {
        Self::breakdown(player, Some(winning_tile), checker).map_or(0, |s| s.total())
    }

    /// 逐项计分
    ///
    /// # 参数
    ///
    /// - `player`: 玩家
    /// - `extra`: 不在手牌中的胡牌张（点炮时）
    /// - `checker`: 胡牌判定器
    ///
    /// # 返回
    ///
    /// 不胡牌时返回 `None`
    pub fn breakdown(player: &Player, extra: Option<Tile>, checker: &WinChecker) -> Option<Self> {
        let is_win = match extra {
            Some(tile) => player.check_win_with(tile, checker).is_win,
            None => player.check_win(checker).is_win,
        };
        if !is_win {
            return None;
        }

        let mut tiles = player.all_tiles();
        tiles.extend(extra);

        let mut score = HandScore { base: Self::BASE, ..Default::default() };

        let mut suits: Vec<_> = tiles.iter().filter_map(Tile::suit).collect();
        suits.sort_unstable();
        suits.dedup();
        if suits.len() == 1 {
            score.one_suit = Self::ONE_SUIT;
        }

        if tiles.iter().all(|t| t.is_terminal() || t.is_honor()) {
            score.terminals_and_honors = Self::TERMINALS_AND_HONORS;
        }
        if tiles.iter().all(|t| t.is_suited() && !t.is_terminal()) {
            score.all_simples = Self::ALL_SIMPLES;
        }

        score.kans = Self::PER_KAN * player.count_melds(MeldKind::Kan) as u32;
        if !player.melds.is_empty() && player.count_melds(MeldKind::Chi) == player.melds.len() {
            score.all_chi = Self::ALL_CHI;
        }

        let flowers = player.bonus.iter().filter(|t| matches!(t, Tile::Flower(_))).count() as u32;
        let seasons = player.bonus.iter().filter(|t| matches!(t, Tile::Season(_))).count() as u32;
        score.bonus_tiles = Self::PER_BONUS_TILE * (flowers + seasons);
        if flowers == 4 {
            score.four_flowers = Self::FULL_BONUS_SET;
        }
        if seasons == 4 {
            score.four_seasons = Self::FULL_BONUS_SET;
        }

        Some(score)
    }

    /// 总分（最低 2 分）
    pub fn total(&self) -> u32 {
        let sum = self.base
            + self.one_suit
            + self.terminals_and_honors
            + self.all_simples
            + self.kans
            + self.all_chi
            + self.bonus_tiles
            + self.four_flowers
            + self.four_seasons;
        sum.max(Self::BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::kong::KongType;
    use crate::game::meld::Meld;
    use crate::game::seat::Seat;
    use crate::tile::tile::{Dragon, Wind};

    fn player_with(tiles: &[Tile]) -> Player {
        let mut player = Player::new(Seat::East);
        for &t in tiles {
            player.hand.add_tile(t);
        }
        player
    }

    #[test]
    fn test_not_winning_scores_zero() {
        let player = player_with(&[Tile::Man(1), Tile::Man(2)]);
        assert_eq!(HandScore::calculate(&player, &WinChecker::new()), 0);
    }

    #[test]
    fn test_basic_win() {
        let player = player_with(&[
            Tile::Man(1), Tile::Man(2), Tile::Man(3),
            Tile::Pin(4), Tile::Pin(5), Tile::Pin(6),
            Tile::Sou(7), Tile::Sou(8), Tile::Sou(9),
            Tile::Wind(Wind::East), Tile::Wind(Wind::East), Tile::Wind(Wind::East),
            Tile::Sou(2), Tile::Sou(2),
        ]);
        assert_eq!(HandScore::calculate(&player, &WinChecker::new()), 2);
    }

    #[test]
    fn test_one_suit_all_simples() {
        let player = player_with(&[
            Tile::Pin(2), Tile::Pin(3), Tile::Pin(4),
            Tile::Pin(3), Tile::Pin(4), Tile::Pin(5),
            Tile::Pin(5), Tile::Pin(6), Tile::Pin(7),
            Tile::Pin(6), Tile::Pin(7), Tile::Pin(8),
            Tile::Pin(8), Tile::Pin(8),
        ]);
        let score = HandScore::breakdown(&player, None, &WinChecker::new()).unwrap();
        assert_eq!(score.one_suit, 6);
        assert_eq!(score.all_simples, 1);
        assert_eq!(score.total(), 9);
    }

    #[test]
    fn test_melds_and_bonus() {
        let mut player = player_with(&[
            Tile::Man(1), Tile::Man(1), Tile::Man(1),
            Tile::Dragon(Dragon::Red), Tile::Dragon(Dragon::Red),
        ]);
        player.melds.push(Meld::Kan { tile: Tile::Pin(9), kind: KongType::Concealed });
        player.melds.push(Meld::Pon { tile: Tile::Sou(1) });
        player.melds.push(Meld::Kan { tile: Tile::Wind(Wind::North), kind: KongType::Direct });
        for n in 1..=4 {
            player.add_bonus_tile(Tile::Flower(n));
        }
        player.add_bonus_tile(Tile::Season(1));

        let score = HandScore::breakdown(&player, None, &WinChecker::new()).unwrap();
        assert_eq!(score.terminals_and_honors, 4);
        assert_eq!(score.kans, 4);
        assert_eq!(score.all_chi, 0);
        assert_eq!(score.bonus_tiles, 5);
        assert_eq!(score.four_flowers, 3);
        assert_eq!(score.four_seasons, 0);
        assert_eq!(score.total(), 2 + 4 + 4 + 5 + 3);
    }

    #[test]
    fn test_ron_tile_counts() {
        let mut player = player_with(&[
            Tile::Sou(3), Tile::Sou(4),
            Tile::Sou(6), Tile::Sou(6),
            Tile::Sou(7), Tile::Sou(8), Tile::Sou(9),
            Tile::Sou(2), Tile::Sou(3), Tile::Sou(4),
        ]);
        player.melds.push(Meld::Chi { start: Tile::Sou(1) });
        let checker = WinChecker::new();
        assert_eq!(HandScore::calculate(&player, &checker), 0);
        // 清一色 + 全吃
        assert_eq!(HandScore::calculate_with(&player, Tile::Sou(5), &checker), 2 + 6 + 1);
    }
}
