use super::tile::Tile;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use std::sync::Arc;

/// 牌墙（Wall）
///
/// 存储洗好的 144 张牌，只支持从顶部抽牌
///
/// 牌序一旦确定就不再改变，使用 `Arc<[Tile]>` 共享，克隆牌墙只复制游标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wall {
    /// 牌堆（按抽牌顺序排列）
    tiles: Arc<[Tile]>,
    /// 已抽取的牌数
    drawn_count: usize,
}

impl Wall {
    /// 创建一副完整的牌墙（144 张，未洗牌）
    pub fn new() -> Self {
        Self::from_draw_order(Tile::full_deck())
    }

    /// 使用线程随机数洗牌
    pub fn shuffled_default() -> Self {
        Self::shuffled(&mut thread_rng())
    }

    /// 使用给定的随机数生成器洗牌
    ///
    /// Fisher-Yates，时间复杂度 O(n)
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles = Tile::full_deck();
        tiles.shuffle(rng);
        Self::from_draw_order(tiles)
    }

    /// 按给定顺序构造牌墙，第一张最先被抽到
    pub fn from_draw_order(tiles: Vec<Tile>) -> Self {
        Self {
            tiles: tiles.into(),
            drawn_count: 0,
        }
    }

    /// 抽取一张牌
    ///
    /// # Returns
    ///
    /// - `Some(Tile)`：成功抽取一张牌
    /// - `None`：牌墙已空
    pub fn draw(&mut self) -> Option<Tile> {
        let tile = self.tiles.get(self.drawn_count).copied()?;
        self.drawn_count += 1;
        Some(tile)
    }

    /// 查询剩余牌数
    pub fn remaining_count(&self) -> usize {
        self.tiles.len().saturating_sub(self.drawn_count)
    }

    /// 检查牌墙是否为空
    pub fn is_empty(&self) -> bool {
        self.remaining_count() == 0
    }

    /// 剩余的牌（按抽牌顺序）
    pub fn remaining(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles[self.drawn_count.min(self.tiles.len())..].iter().copied()
    }

    /// 获取已抽取的牌数
    pub fn drawn_count(&self) -> usize {
        self.drawn_count
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.tiles.len()
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new()
    }
}
