use super::tile::Tile;
use crate::game::constants::{COPIES_PER_TILE, NUM_TILE_TYPES};
use smallvec::SmallVec;

/// 手牌（Hand）
///
/// 暗牌的计数多重集合：每种 type_id 一个计数，添加、移除、查询都是 O(1)
///
/// 固定大小的数组，克隆就是一次内存复制
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hand {
    /// 牌的数量：type_id -> 数量（0-4）
    counts: [u8; NUM_TILE_TYPES],
    /// 总牌数（用于快速查询）
    total_count: usize,
}

impl Hand {
    /// 创建空手牌
    pub fn new() -> Self {
        Self {
            counts: [0; NUM_TILE_TYPES],
            total_count: 0,
        }
    }

    /// 添加一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功添加
    /// - `false`：该牌已有 4 张（理论上不应该发生）
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        let count = &mut self.counts[tile.type_id() as usize];
        if *count >= COPIES_PER_TILE {
            return false;
        }
        *count += 1;
        self.total_count += 1;
        true
    }

    /// 移除一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功移除
    /// - `false`：手牌中没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        self.remove_n(tile, 1)
    }

    /// 移除 n 张同种牌，数量不足时不做任何修改
    pub fn remove_n(&mut self, tile: Tile, n: u8) -> bool {
        let count = &mut self.counts[tile.type_id() as usize];
        if *count < n {
            return false;
        }
        *count -= n;
        self.total_count -= n as usize;
        true
    }

    /// 检查是否有某张牌
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tile_count(tile) > 0
    }

    /// 查询某张牌的数量
    pub fn tile_count(&self, tile: Tile) -> u8 {
        self.counts[tile.type_id() as usize]
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// 按 type_id 的计数数组
    pub fn counts(&self) -> &[u8; NUM_TILE_TYPES] {
        &self.counts
    }

    /// 转换为排序后的牌向量（按 type_id）
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        let mut result = Vec::with_capacity(self.total_count);
        for tile in Tile::all_types() {
            for _ in 0..self.tile_count(tile) {
                result.push(tile);
            }
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn clear(&mut self) {
        self.counts = [0; NUM_TILE_TYPES];
        self.total_count = 0;
    }

    /// 所有不同的牌（按 type_id 升序）
    pub fn distinct_tiles(&self) -> SmallVec<[Tile; 14]> {
        Tile::all_types().filter(|t| self.has_tile(*t)).collect()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Tile> for Hand {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut hand = Hand::new();
        for tile in iter {
            hand.add_tile(tile);
        }
        hand
    }
}
