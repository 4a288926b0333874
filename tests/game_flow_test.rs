use mahjong_cfr::game::action::PASS_ID;
use mahjong_cfr::game::constants::TOTAL_TILES;
use mahjong_cfr::tile::Wind;
use mahjong_cfr::{ActionResult, GameEngine, GameError, GameState, Phase, Seat, Tile, Wall};

/// 空牌墙发牌得到空手牌，再按需摆牌
fn table(hands: [&[Tile]; 4], wall: Vec<Tile>) -> GameState {
    let mut state = GameState::deal(Wall::from_draw_order(Vec::new()));
    for (player, tiles) in state.players.iter_mut().zip(hands) {
        for &tile in tiles {
            assert!(player.hand.add_tile(tile));
        }
    }
    state.wall = Wall::from_draw_order(wall);
    state
}

/// 一、二、三万 四、五、六万 一、二、三索 四、五、六索 一筒（单钓一筒）
fn waiting_on_pin1() -> Vec<Tile> {
    vec![
        Tile::Man(1), Tile::Man(2), Tile::Man(3),
        Tile::Man(4), Tile::Man(5), Tile::Man(6),
        Tile::Sou(1), Tile::Sou(2), Tile::Sou(3),
        Tile::Sou(4), Tile::Sou(5), Tile::Sou(6),
        Tile::Pin(1),
    ]
}

#[test]
fn test_fresh_deal() {
    let engine = GameEngine::with_seed(7);
    let state = &engine.state;

    for player in &state.players {
        assert_eq!(player.hand.total_count(), 13);
        assert!(player.bonus.iter().all(|t| t.is_bonus()));
    }
    assert_eq!(state.turn, Seat::East);
    assert_eq!(state.phase, Phase::AwaitingDraw);
    assert_eq!(state.total_tiles(), TOTAL_TILES);
    assert_eq!(
        state.wall.remaining_count(),
        TOTAL_TILES - 52 - state.players.iter().map(|p| p.bonus.len()).sum::<usize>()
    );
}

#[test]
fn test_self_draw_win() {
    let east = waiting_on_pin1();
    let state = table([&east, &[], &[], &[]], vec![Tile::Pin(1)]);
    let mut engine = GameEngine::from_state(state);

    let result = engine.step(None).unwrap();
    assert_eq!(result, ActionResult::Drawn { tile: Tile::Pin(1) });
    assert!(engine.is_terminal());
    assert_eq!(engine.winners(), &[Seat::East]);
    assert_eq!(engine.reward(Seat::East), 1.0);
    assert_eq!(engine.reward(Seat::South), 0.0);
    assert!(engine.scores()[Seat::East.index()] >= 2);
    assert!(engine.legal_actions().is_empty());
}

#[test]
fn test_one_tile_short_is_not_a_win() {
    let east = waiting_on_pin1();
    let state = table([&east, &[], &[], &[]], vec![Tile::Pin(2)]);
    let mut engine = GameEngine::from_state(state);

    engine.step(None).unwrap();
    assert!(!engine.is_terminal());
    assert_eq!(engine.state.phase, Phase::AwaitingDiscard);
    assert_eq!(engine.scores(), [0; 4]);
}

#[test]
fn test_bonus_tiles_are_set_aside() {
    let east = waiting_on_pin1();
    let wall = vec![Tile::Flower(1), Tile::Season(3), Tile::Man(9)];
    let mut engine = GameEngine::from_state(table([&east, &[], &[], &[]], wall));

    let result = engine.step(None).unwrap();
    assert_eq!(result, ActionResult::Drawn { tile: Tile::Man(9) });

    let player = engine.state.player(Seat::East);
    assert_eq!(player.bonus, vec![Tile::Flower(1), Tile::Season(3)]);
    assert_eq!(player.hand.total_count(), 14);
    assert_eq!(engine.state.phase, Phase::AwaitingDiscard);
}

#[test]
fn test_wall_exhaustion_ends_without_winner() {
    let east = waiting_on_pin1();
    let mut engine = GameEngine::from_state(table([&east, &[], &[], &[]], vec![Tile::Flower(2)]));

    let result = engine.step(None).unwrap();
    assert_eq!(result, ActionResult::Exhausted);
    assert!(engine.is_terminal());
    assert!(engine.winners().is_empty());
    for seat in Seat::ALL {
        assert_eq!(engine.reward(seat), 0.0);
    }
    // 花牌仍然亮出
    assert_eq!(engine.state.player(Seat::East).bonus, vec![Tile::Flower(2)]);
}

#[test]
fn test_discard_without_claim_passes_turn() {
    let east = waiting_on_pin1();
    let wall = vec![Tile::Wind(Wind::North), Tile::Man(9)];
    let mut engine = GameEngine::from_state(table([&east, &[], &[], &[]], wall));

    engine.step(None).unwrap();
    let north = Tile::Wind(Wind::North).type_id() as usize;
    let result = engine.step(Some(north)).unwrap();
    assert!(matches!(result, ActionResult::Discarded { tile: Tile::Wind(Wind::North), .. }));

    assert_eq!(engine.state.turn, Seat::South);
    assert_eq!(engine.state.phase, Phase::AwaitingDraw);
    assert_eq!(engine.state.discards[Seat::East.index()], vec![Tile::Wind(Wind::North)]);
    assert_eq!(engine.state.last_discard, Some((Tile::Wind(Wind::North), Seat::East)));

    engine.step(None).unwrap();
    assert_eq!(engine.state.player(Seat::South).hand.to_sorted_vec(), vec![Tile::Man(9)]);
}

#[test]
fn test_illegal_steps_are_rejected() {
    let east = waiting_on_pin1();
    let mut engine = GameEngine::from_state(table([&east, &[], &[], &[]], vec![Tile::Man(9)]));

    // 摸牌阶段不能出牌
    let before = engine.state.clone();
    assert!(matches!(engine.step(Some(0)), Err(GameError::IllegalAction { .. })));
    assert_eq!(engine.state, before);

    engine.step(None).unwrap();
    let before = engine.state.clone();
    // 手里没有的牌、PASS、摸牌都不合法
    assert!(engine.step(Some(Tile::Pin(9).type_id() as usize)).is_err());
    assert!(engine.step(Some(PASS_ID)).is_err());
    assert!(engine.step(None).is_err());
    assert!(engine.step(Some(10_000)).is_err());
    assert_eq!(engine.state, before);
}

#[test]
fn test_terminal_state_rejects_steps() {
    let east = waiting_on_pin1();
    let mut engine = GameEngine::from_state(table([&east, &[], &[], &[]], vec![Tile::Pin(1)]));
    engine.step(None).unwrap();
    assert!(engine.is_terminal());

    let before = engine.state.clone();
    assert!(engine.step(None).is_err());
    assert!(engine.step(Some(0)).is_err());
    assert_eq!(engine.state, before);
}

#[test]
fn test_info_set_key_string() {
    let east = waiting_on_pin1();
    let mut engine = GameEngine::from_state(table([&east, &[], &[], &[]], vec![Tile::Man(9)]));
    engine.step(None).unwrap();

    let key = engine.info_set_key(Seat::East);
    assert!(key.starts_with("East|H:1,1,1,1,1,1,0,0,1,1,"));
    assert!(key.ends_with("|L:-1|BY:None|M:None"));

    engine.step(Some(Tile::Man(9).type_id() as usize)).unwrap();
    assert!(engine.info_set_key(Seat::South).ends_with("|L:8|BY:East|M:None"));
}
