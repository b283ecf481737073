use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::clock::Timestamp;
use crate::config::{GridSize, INITIAL_SNAKE_LEN, REPLAY_SEEK_STEP_MS};
use crate::food::{FoodField, FoodKind};
use crate::grid::Position;
use crate::history::{History, ReplayCursor};
use crate::input::{Direction, DirectionController, GameInput};
use crate::scheduler::{ScheduledTick, TickEvent, TickScheduler};
use crate::settings::{CollisionPolicy, GameSettings};
use crate::snake::{Snake, StepOutcome};
use crate::snapshot::Snapshot;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Not running. The initial state and the state after a finished game.
    Idle,
    Playing,
    Paused,
    /// Showing the recording of the last game.
    Replaying,
}

/// Complete mutable game state for one session.
///
/// Every transition takes `&mut self` and runs to completion, so a snapshot
/// taken between calls always sees a fully applied state.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: FoodField,
    pub status: GameStatus,
    pub deaths: u32,
    pub food_eaten: u32,
    pub poison_eaten: u32,
    /// Score of the most recently finished game.
    pub last_score: Option<u32>,
    controller: DirectionController,
    scheduler: TickScheduler,
    history: History,
    replay: Option<ReplayCursor>,
    settings: GameSettings,
    rng: StdRng,
}

impl GameState {
    /// Creates an idle state, seeded from the settings or randomly.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::new_with_seed(settings, seed)
    }

    /// Creates a deterministic idle state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(settings: GameSettings, seed: u64) -> Self {
        info!(
            seed,
            width = settings.grid.width,
            height = settings.grid.height,
            policy = ?settings.collision_policy,
            "new game session"
        );

        Self {
            snake: Snake::spawn_default(settings.grid),
            food: FoodField::new(),
            status: GameStatus::Idle,
            deaths: 0,
            food_eaten: 0,
            poison_eaten: 0,
            last_score: None,
            controller: DirectionController::new(Direction::Right),
            scheduler: build_scheduler(&settings),
            history: History::new(settings.history_capacity),
            replay: None,
            rng: StdRng::seed_from_u64(seed),
            settings,
        }
    }

    /// Begins a new game from idle or from a replay.
    pub fn start(&mut self) {
        if !matches!(self.status, GameStatus::Idle | GameStatus::Replaying) {
            return;
        }

        self.new_round();
        self.history.clear();
        self.deaths = 0;
        self.food_eaten = 0;
        self.poison_eaten = 0;
        self.status = GameStatus::Playing;
        info!("game started");
    }

    /// Stops the clock. Direction keys are ignored until resumed.
    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
            debug!(now = self.now().as_millis(), "game paused");
        }
    }

    /// Continues the same clock and cadences after a pause.
    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
            debug!(now = self.now().as_millis(), "game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Playing => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::Idle | GameStatus::Replaying => {}
        }
    }

    /// Abandons whatever is running and returns to idle with a fresh board.
    pub fn reset(&mut self) {
        self.new_round();
        self.history.clear();
        self.status = GameStatus::Idle;
        info!("game reset");
    }

    /// Enters replay of the last game. Returns false when there is nothing
    /// to replay or a game is in progress.
    pub fn replay(&mut self) -> bool {
        if self.status != GameStatus::Idle || self.history.is_empty() {
            return false;
        }

        self.replay = Some(ReplayCursor::new(&self.history));
        self.status = GameStatus::Replaying;
        info!(frames = self.history.len(), "replay started");
        true
    }

    /// Leaves the replay and returns to idle, keeping the recording.
    pub fn stop_replay(&mut self) {
        if self.status == GameStatus::Replaying {
            self.replay = None;
            self.status = GameStatus::Idle;
        }
    }

    /// Records a direction key. Only honoured while playing; returns whether
    /// the key became the pending direction.
    pub fn on_direction_key(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.controller.press(direction)
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if !self.on_direction_key(direction) {
                    debug!(?direction, status = ?self.status, "direction key rejected");
                }
            }
            GameInput::Pause => self.toggle_pause(),
            GameInput::Confirm => match self.status {
                GameStatus::Idle | GameStatus::Replaying => self.start(),
                GameStatus::Paused => self.resume(),
                GameStatus::Playing => {}
            },
            GameInput::Reset => self.reset(),
            GameInput::Replay => {
                if self.status == GameStatus::Replaying {
                    self.stop_replay();
                } else if !self.replay() {
                    debug!(status = ?self.status, "nothing to replay");
                }
            }
            GameInput::ReplaySeekBack => self.with_replay(|cursor| {
                cursor.seek_by(-(REPLAY_SEEK_STEP_MS as i64));
            }),
            GameInput::ReplaySeekForward => self.with_replay(|cursor| {
                cursor.seek_by(REPLAY_SEEK_STEP_MS as i64);
            }),
            GameInput::ReplaySlower => self.with_replay(ReplayCursor::slower),
            GameInput::ReplayFaster => self.with_replay(ReplayCursor::faster),
            GameInput::Quit => {}
        }
    }

    /// Feeds `elapsed_ms` of frame time into the running game or replay.
    ///
    /// While playing, every tick that fell due is applied in order. A game
    /// that finishes part way through drops the remaining ticks.
    pub fn advance(&mut self, elapsed_ms: u64) {
        match self.status {
            GameStatus::Playing => {
                for tick in self.scheduler.advance(elapsed_ms) {
                    self.apply(tick);
                    if self.status != GameStatus::Playing {
                        break;
                    }
                }
            }
            GameStatus::Replaying => self.with_replay(|cursor| cursor.advance(elapsed_ms)),
            GameStatus::Idle | GameStatus::Paused => {}
        }
    }

    /// Applies one scheduled tick at its due time.
    pub fn apply(&mut self, tick: ScheduledTick) {
        match tick.event {
            TickEvent::Move => self.move_snake(tick.at),
            TickEvent::Spawn(kind) => self.spawn_item(kind, tick.at),
            TickEvent::Expire => self.expire_items(tick.at),
        }
    }

    /// Read-only view of the live game.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_at(self.now())
    }

    /// Frame under the replay cursor while replaying.
    #[must_use]
    pub fn replay_frame(&self) -> Option<&Snapshot> {
        let cursor = self.replay.as_ref()?;
        self.history.frame_at(cursor.time())
    }

    #[must_use]
    pub fn replay_cursor(&self) -> Option<&ReplayCursor> {
        self.replay.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Snake length above the starting length.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.snake.len().saturating_sub(INITIAL_SNAKE_LEN)).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.scheduler.now()
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.settings.grid
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Direction used by the last movement step.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.controller.committed()
    }

    /// Direction the next movement step will use.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.controller.pending()
    }

    #[must_use]
    pub fn is_start_screen(&self) -> bool {
        self.status == GameStatus::Idle && self.last_score.is_none()
    }

    fn move_snake(&mut self, at: Timestamp) {
        let direction = self.controller.commit();

        match self.snake.step(direction, self.settings.grid, &self.food) {
            StepOutcome::Moved { snake, eaten } => {
                if !eaten.is_empty() {
                    let consumed = self.food.consume(snake.head());
                    for item in &consumed {
                        match item.kind {
                            FoodKind::Food => self.food_eaten += 1,
                            FoodKind::Poison => self.poison_eaten += 1,
                        }
                    }
                    debug!(
                        x = snake.head().x,
                        y = snake.head().y,
                        items = consumed.len(),
                        length = snake.len(),
                        "snake ate"
                    );
                }
                self.snake = snake;
            }
            StepOutcome::Collided { head } => self.handle_collision(head),
        }

        if self.status == GameStatus::Playing {
            let frame = self.snapshot_at(at);
            self.history.record(frame);
        }
    }

    fn handle_collision(&mut self, head: Position) {
        let score = self.score();
        self.deaths += 1;
        self.last_score = Some(score);
        info!(
            score,
            x = head.x,
            y = head.y,
            policy = ?self.settings.collision_policy,
            "snake collided with itself"
        );

        self.snake = Snake::spawn_default(self.settings.grid);
        self.controller.reset(Direction::Right);
        if self.settings.clear_food_on_reset {
            self.food.clear();
        }

        if self.settings.collision_policy == CollisionPolicy::Finish {
            self.status = GameStatus::Idle;
            info!(score, "game finished");
        }
    }

    fn spawn_item(&mut self, kind: FoodKind, at: Timestamp) {
        match self.food.spawn(
            kind,
            at,
            &mut self.rng,
            self.settings.grid,
            &self.snake,
            self.settings.avoid_cross_type_overlap,
        ) {
            Ok(item) => debug!(
                kind = ?item.kind,
                x = item.position.x,
                y = item.position.y,
                at = at.as_millis(),
                "item spawned"
            ),
            Err(error) => warn!(%error, kind = ?kind, "skipping spawn this cycle"),
        }
    }

    fn expire_items(&mut self, at: Timestamp) {
        let removed = self.food.expire(at, self.settings.food_lifetime_ms);
        if removed > 0 {
            debug!(removed, at = at.as_millis(), "items expired");
        }
    }

    fn new_round(&mut self) {
        self.snake = Snake::spawn_default(self.settings.grid);
        self.food.clear();
        self.controller.reset(Direction::Right);
        self.scheduler = build_scheduler(&self.settings);
        self.replay = None;
    }

    fn with_replay(&mut self, f: impl FnOnce(&mut ReplayCursor)) {
        if self.status != GameStatus::Replaying {
            return;
        }
        if let Some(cursor) = self.replay.as_mut() {
            f(cursor);
        }
    }

    fn snapshot_at(&self, now: Timestamp) -> Snapshot {
        Snapshot {
            bounds: self.settings.grid,
            snake: self.snake.segments().copied().collect(),
            direction: self.snake.direction(),
            food: self.food.items().to_vec(),
            status: self.status,
            now,
            food_lifetime_ms: self.settings.food_lifetime_ms,
        }
    }
}

fn build_scheduler(settings: &GameSettings) -> TickScheduler {
    let scheduler = TickScheduler::new()
        .with_cadence(TickEvent::Move, settings.move_interval_ms)
        .with_cadence(TickEvent::Spawn(FoodKind::Food), settings.food_spawn_interval_ms)
        .with_cadence(TickEvent::Expire, settings.expiry_check_interval_ms);

    match settings.poison_spawn_interval_ms {
        Some(interval) => scheduler.with_cadence(TickEvent::Spawn(FoodKind::Poison), interval),
        None => scheduler,
    }
}
