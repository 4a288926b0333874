/// 游戏逻辑模块
///
/// 包含动作编码、座位与玩家、吃碰杠、弃牌仲裁、游戏状态、引擎、计分和信息集

pub mod constants;
pub mod error;
pub mod config;
pub mod seat;
pub mod action;
pub mod meld;
pub mod player;
pub mod pong;
pub mod chi;
pub mod kong;
pub mod claim;
pub mod state;
pub mod info_set;
pub mod scoring;
pub mod game_engine;
