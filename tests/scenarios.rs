use torus_snake::clock::Timestamp;
use torus_snake::config::GridSize;
use torus_snake::food::{FoodField, FoodItem, FoodKind};
use torus_snake::game::{GameState, GameStatus};
use torus_snake::grid::Position;
use torus_snake::input::Direction;
use torus_snake::settings::GameSettings;
use torus_snake::snake::Snake;

fn playing(settings: GameSettings) -> GameState {
    let mut state = GameState::new_with_seed(settings, 2024);
    state.start();
    state
}

fn body(state: &GameState) -> Vec<(i32, i32)> {
    state.snake.segments().map(|p| (p.x, p.y)).collect()
}

fn snake_of(points: &[(i32, i32)], direction: Direction) -> Snake {
    Snake::from_segments(points.iter().copied().map(Position::from).collect(), direction)
}

#[test]
fn eating_food_grows_the_snake_and_scores() {
    let mut state = playing(GameSettings::default());
    assert_eq!(body(&state), vec![(8, 12), (7, 12), (6, 12)]);
    state.food = FoodField::from_items(vec![FoodItem::food(Position::new(9, 12))]);

    state.advance(200);

    assert_eq!(body(&state), vec![(9, 12), (8, 12), (7, 12), (6, 12)]);
    assert!(state.food.is_empty());
    assert_eq!(state.score(), 1);
}

#[test]
fn moving_after_a_wrap_drops_the_tail() {
    let mut state = playing(GameSettings::default());
    state.snake = snake_of(&[(0, 5), (24, 5), (23, 5)], Direction::Right);

    state.advance(200);

    assert_eq!(body(&state), vec![(1, 5), (0, 5), (24, 5)]);
    assert_eq!(state.score(), 0);
}

#[test]
fn self_collision_resets_to_the_default_snake() {
    let mut state = playing(GameSettings::default());
    state.snake = snake_of(&[(5, 5), (6, 5), (7, 5)], Direction::Left);

    state.advance(200);

    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(body(&state), vec![(8, 12), (7, 12), (6, 12)]);
    assert_eq!(state.direction(), Direction::Right);
    assert_eq!(state.score(), 0);
    assert_eq!(state.deaths, 1);
}

#[test]
fn food_lives_exactly_its_lifetime() {
    let mut state = playing(GameSettings {
        move_interval_ms: 1_000_000,
        expiry_check_interval_ms: 1,
        ..GameSettings::default()
    });
    let first_spawn = Timestamp::from_millis(3_000);
    let is_live = |state: &GameState| {
        state
            .food
            .items()
            .iter()
            .any(|item| item.created_at == first_spawn)
    };

    state.advance(3_000);
    assert!(is_live(&state));

    state.advance(9_999);
    assert_eq!(state.now(), Timestamp::from_millis(12_999));
    assert!(is_live(&state));

    state.advance(2);
    assert!(!is_live(&state));
}

#[test]
fn explicit_expire_call_removes_stale_food() {
    let spawned = Timestamp::from_millis(4_200);
    let mut field = FoodField::from_items(vec![FoodItem::new(
        Position::new(3, 3),
        FoodKind::Food,
        spawned,
    )]);

    field.expire(spawned.add_millis(9_999), 10_000);
    assert_eq!(field.len(), 1);

    field.expire(spawned.add_millis(10_001), 10_000);
    assert!(field.is_empty());
}

#[test]
fn spawn_on_a_full_board_is_skipped_and_retried_next_cycle() {
    // 4x1 board: the snake covers three cells, one is left for food.
    let mut state = playing(GameSettings {
        grid: GridSize {
            width: 4,
            height: 1,
        },
        move_interval_ms: 1_000_000,
        food_lifetime_ms: 4_000,
        ..GameSettings::default()
    });
    assert_eq!(body(&state), vec![(0, 0), (3, 0), (2, 0)]);

    state.advance(3_000);
    assert_eq!(state.food.len(), 1);
    assert_eq!(state.food.items()[0].position, Position::new(1, 0));

    // Second spawn finds no free cell.
    state.advance(3_000);
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.food.len(), 1);
    assert_eq!(state.food.items()[0].created_at, Timestamp::from_millis(3_000));

    state.advance(1_200);
    assert!(state.food.is_empty());

    state.advance(1_800);
    assert_eq!(state.food.len(), 1);
    assert_eq!(state.food.items()[0].created_at, Timestamp::from_millis(9_000));
    assert_eq!(state.deaths, 0);
}

#[test]
fn reversal_is_rejected_until_the_heading_changes() {
    let mut state = playing(GameSettings::default());

    assert!(!state.on_direction_key(Direction::Left));
    state.advance(200);
    assert_eq!(state.direction(), Direction::Right);
    assert_eq!(state.snake.head(), Position::new(9, 12));

    assert!(state.on_direction_key(Direction::Down));
    state.advance(200);
    assert!(state.on_direction_key(Direction::Left));
    state.advance(200);

    assert_eq!(state.direction(), Direction::Left);
    assert_eq!(state.snake.head(), Position::new(8, 13));
}
