/// 引擎辅助模块
///
/// 合法动作掩码，供游戏引擎和 CFR 使用

pub mod action_mask;

pub use action_mask::ActionMask;
