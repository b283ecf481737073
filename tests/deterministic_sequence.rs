use torus_snake::clock::Timestamp;
use torus_snake::config::GridSize;
use torus_snake::food::{FoodField, FoodItem, FoodKind};
use torus_snake::game::{GameState, GameStatus};
use torus_snake::grid::Position;
use torus_snake::input::{Direction, GameInput};
use torus_snake::settings::GameSettings;

#[test]
fn stepwise_food_collection_wrap_and_turns() {
    let mut state = GameState::new_with_seed(
        GameSettings {
            grid: GridSize {
                width: 12,
                height: 14,
            },
            ..GameSettings::default()
        },
        42,
    );
    state.apply_input(GameInput::Confirm);
    assert_eq!(state.status, GameStatus::Playing);
    state.food = FoodField::from_items(vec![FoodItem::food(Position::new(9, 12))]);

    state.advance(200);
    assert_eq!(state.score(), 1);
    assert_eq!(state.snake.head(), Position::new(9, 12));

    state.advance(400);
    assert_eq!(state.snake.head(), Position::new(11, 12));

    // Crossing the right edge comes back in on the left.
    state.advance(200);
    assert_eq!(state.snake.head(), Position::new(0, 12));

    state.apply_input(GameInput::Direction(Direction::Down));
    state.apply_input(GameInput::Direction(Direction::Left));
    state.advance(200);
    assert_eq!(state.snake.head(), Position::new(0, 13));

    state.advance(200);
    assert_eq!(state.snake.head(), Position::new(0, 0));
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.snake.len(), 4);
}

#[test]
fn same_seed_replays_the_same_spawns() {
    let run = |seed| {
        let mut state = GameState::new_with_seed(
            GameSettings {
                poison_spawn_interval_ms: Some(5_000),
                ..GameSettings::default()
            },
            seed,
        );
        state.start();
        for _ in 0..120 {
            state.advance(100);
        }
        state.food.items().to_vec()
    };

    let first = run(7);
    let second = run(7);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn spawn_and_expiry_cadences_keep_a_rolling_set() {
    let mut state = GameState::new_with_seed(GameSettings::default(), 3);
    state.start();

    // Turn on every move so the snake circles a 2x2 loop.
    let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
    for step in 0..200 {
        state.apply_input(GameInput::Direction(turns[step % 4]));
        state.advance(200);

        let now = state.now();
        for item in state.food.items() {
            assert_eq!(item.kind, FoodKind::Food);
            assert!(item.age_at(now) <= 10_000);
        }
    }

    // 40 s in: items from 30 s, 33 s, 36 s and 39 s are live.
    assert_eq!(state.now(), Timestamp::from_millis(40_000));
    assert!(state.food.len() <= 4);
}
