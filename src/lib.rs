/// 四人麻将规则引擎与 CFR 自我对弈训练
///
/// 规则引擎负责摸牌、出牌、吃碰杠仲裁和胡牌判定；训练器在引擎上做遗憾最小化搜索

pub mod tile;
pub mod game;
pub mod engine;
pub mod cfr;

// 重新导出常用类型
pub use tile::{Tile, Suit, Wall, Hand, WinChecker, WinResult, WinType};
pub use game::action::{Action, ActionId, ACTION_COUNT, tile_type_from_action};
pub use game::claim::{ClaimArbiter, ClaimKind, Resolution};
pub use game::config::{ClaimMode, RuleConfig};
pub use game::error::{GameError, GameResult};
pub use game::game_engine::{ActionResult, GameEngine};
pub use game::info_set::InfoSetKey;
pub use game::kong::{KongHandler, KongType};
pub use game::meld::{Meld, MeldKind};
pub use game::player::Player;
pub use game::pong::PongHandler;
pub use game::chi::ChiHandler;
pub use game::scoring::HandScore;
pub use game::seat::Seat;
pub use game::state::{GameState, Phase};
pub use engine::action_mask::ActionMask;
pub use cfr::{CfrSolver, NodeValue, Sampling, SolverConfig, TrainStats};
