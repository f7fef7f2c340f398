//! Game session: both boards, phase and turn tracking, the one-move-per-turn
//! rule and the opponent's shot loop.

use alloc::collections::VecDeque;
use alloc::string::String;
use rand::Rng;

use crate::{
    ai::TargetingStrategy,
    board::{Board, FiringView},
    common::{BoardError, Coord, ShotOutcome, Side},
    config::{GameConfig, EVENT_LOG_CAPACITY},
    placement,
};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Setup,
    InProgress,
    Finished,
}

/// Current status of a game from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Something that happened during play, for the caller's log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    Started,
    Shot {
        shooter: Side,
        at: Coord,
        outcome: ShotOutcome,
        /// Size of the ship struck, if any.
        ship_size: Option<usize>,
    },
    ShipMoved { size: usize },
    Won,
    Lost,
}

/// A shot fired by the automated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentShot {
    pub at: Coord,
    pub outcome: ShotOutcome,
}

/// Human player against the automated opponent.
pub struct GameSession {
    config: GameConfig,
    phase: Phase,
    turn: Side,
    player_board: Board,
    opponent_board: Board,
    strategy: TargetingStrategy,
    moved_this_turn: bool,
    events: VecDeque<GameEvent>,
    event_count: usize,
}

impl GameSession {
    /// New session in the setup phase: empty player board, randomly placed
    /// opponent fleet.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, BoardError> {
        config.validate()?;
        let empty = Board::new(config.board_size)?;
        let opponent_board = placement::random_placement(
            &empty,
            &config.fleet,
            Side::Opponent,
            config.enforce_no_touch,
            rng,
        )?;
        Ok(Self {
            strategy: TargetingStrategy::new(config.board_size),
            phase: Phase::Setup,
            turn: Side::Player,
            player_board: empty,
            opponent_board,
            moved_this_turn: false,
            events: VecDeque::new(),
            event_count: 0,
            config,
        })
    }

    /// Start over with the same configuration.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        *self = Self::new(self.config.clone(), rng)?;
        Ok(())
    }

    /// Replace the configuration and start over. Only allowed during setup.
    pub fn reconfigure<R: Rng + ?Sized>(&mut self, config: GameConfig, rng: &mut R) -> Result<(), BoardError> {
        if self.phase != Phase::Setup {
            return Err(BoardError::WrongPhase);
        }
        *self = Self::new(config, rng)?;
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    /// The opponent's board as the player may see it.
    pub fn opponent_view(&self) -> FiringView<'_> {
        self.opponent_board.view_for(Side::Player)
    }

    /// Full opponent board, for revealing the fleet once the game is over.
    pub fn opponent_board(&self) -> &Board {
        &self.opponent_board
    }

    pub fn strategy(&self) -> &TargetingStrategy {
        &self.strategy
    }

    /// Event log, newest first.
    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Events recorded since the session began, including those dropped
    /// from the capped log.
    pub fn event_count(&self) -> usize {
        self.event_count
    }

    pub fn moved_this_turn(&self) -> bool {
        self.moved_this_turn
    }

    pub fn remaining_player_ships(&self) -> usize {
        self.player_board.remaining_ships()
    }

    pub fn remaining_opponent_ships(&self) -> usize {
        self.opponent_board.remaining_ships()
    }

    /// Shots fired so far by `side`.
    pub fn shots_fired(&self, side: Side) -> usize {
        match side {
            Side::Player => self.opponent_board.shots_by(Side::Player),
            Side::Opponent => self.player_board.shots_by(Side::Opponent),
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.phase == Phase::Setup {
            GameStatus::InProgress
        } else if self.opponent_board.all_sunk() {
            GameStatus::Won
        } else if self.player_board.all_sunk() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// The player fleet matches the configured fleet and is on the grid.
    pub fn fleet_ready(&self) -> bool {
        let ships = self.player_board.ships();
        ships.len() == self.config.fleet.len() && ships.iter().all(|s| self.player_board.is_placed(s.id()))
    }

    fn require_setup(&self) -> Result<(), BoardError> {
        if self.phase == Phase::Setup {
            Ok(())
        } else {
            Err(BoardError::WrongPhase)
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        self.events.push_front(event);
        self.event_count += 1;
        self.events.truncate(EVENT_LOG_CAPACITY);
    }

    /// Randomly place the whole configured fleet for the player.
    pub fn auto_place_player<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        self.require_setup()?;
        let empty = Board::new(self.config.board_size)?;
        self.player_board = placement::random_placement(
            &empty,
            &self.config.fleet,
            Side::Player,
            self.config.enforce_no_touch,
            rng,
        )?;
        Ok(())
    }

    /// Install a player board assembled elsewhere, e.g. by a [`crate::Player`].
    pub fn set_player_board(&mut self, board: Board) -> Result<(), BoardError> {
        self.require_setup()?;
        if board.size() != self.config.board_size {
            return Err(BoardError::InvalidBoardSize);
        }
        self.player_board = board;
        Ok(())
    }

    /// Draw a new random opponent fleet.
    pub fn regenerate_opponent<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        self.require_setup()?;
        let empty = Board::new(self.config.board_size)?;
        self.opponent_board = placement::random_placement(
            &empty,
            &self.config.fleet,
            Side::Opponent,
            self.config.enforce_no_touch,
            rng,
        )?;
        Ok(())
    }

    /// Add an unplaced ship of `size` to the player's fleet. Returns its id.
    pub fn add_player_ship<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) -> Result<String, BoardError> {
        self.require_setup()?;
        let (board, id) = placement::add_ship(&self.player_board, size, Side::Player, rng)?;
        self.player_board = board;
        Ok(id)
    }

    pub fn remove_last_player_ship(&mut self) -> Result<(), BoardError> {
        self.require_setup()?;
        self.player_board = placement::remove_last_ship(&self.player_board)?;
        Ok(())
    }

    /// Relocation is free during setup; during play it needs `allow_move`,
    /// the player's turn and an unused move.
    fn relocate_player_ship<F>(&mut self, id: &str, f: F) -> Result<(), BoardError>
    where
        F: FnOnce(&Board, bool) -> Result<Board, BoardError>,
    {
        match self.phase {
            Phase::Setup => {}
            Phase::InProgress => {
                if !self.config.allow_move {
                    return Err(BoardError::MovingDisabled);
                }
                if self.turn != Side::Player {
                    return Err(BoardError::NotYourTurn);
                }
                if self.moved_this_turn {
                    return Err(BoardError::MoveAlreadyUsed);
                }
            }
            Phase::Finished => return Err(BoardError::WrongPhase),
        }
        let next = f(&self.player_board, self.config.enforce_no_touch)?;
        if self.phase == Phase::InProgress {
            self.moved_this_turn = true;
            let size = next.ship(id).map(|s| s.size()).unwrap_or_default();
            log::info!("player moved ship {}", id);
            self.push_event(GameEvent::ShipMoved { size });
        }
        self.player_board = next;
        Ok(())
    }

    /// Move a player ship so its bow sits on `bow`.
    pub fn move_player_ship(&mut self, id: &str, bow: Coord) -> Result<(), BoardError> {
        self.relocate_player_ship(id, |b, no_touch| placement::move_ship_to(b, id, bow, no_touch))
    }

    pub fn rotate_player_ship(&mut self, id: &str) -> Result<(), BoardError> {
        self.relocate_player_ship(id, |b, no_touch| placement::rotate_ship(b, id, no_touch))
    }

    pub fn nudge_player_ship(&mut self, id: &str, dx: isize, dy: isize) -> Result<(), BoardError> {
        self.relocate_player_ship(id, |b, no_touch| placement::nudge_ship(b, id, dx, dy, no_touch))
    }

    /// Leave setup. The player fleet must be complete.
    pub fn start(&mut self) -> Result<(), BoardError> {
        self.require_setup()?;
        if !self.fleet_ready() {
            return Err(BoardError::FleetIncomplete);
        }
        self.phase = Phase::InProgress;
        self.turn = Side::Player;
        self.moved_this_turn = false;
        log::info!("game started, player to move");
        self.push_event(GameEvent::Started);
        Ok(())
    }

    fn require_turn(&self, side: Side) -> Result<(), BoardError> {
        if self.phase != Phase::InProgress {
            return Err(BoardError::WrongPhase);
        }
        if self.turn != side {
            return Err(BoardError::NotYourTurn);
        }
        Ok(())
    }

    /// Apply a resolved shot: turn handoff on a miss, win check on a hit.
    fn after_shot(&mut self, shooter: Side, at: Coord, outcome: ShotOutcome, ship_size: Option<usize>) {
        self.push_event(GameEvent::Shot {
            shooter,
            at,
            outcome,
            ship_size,
        });
        match outcome {
            ShotOutcome::Repeat => {}
            ShotOutcome::Miss => {
                self.turn = shooter.other();
                self.moved_this_turn = false;
                log::info!("{} missed at ({}), {} to move", shooter, at, self.turn);
            }
            ShotOutcome::Hit | ShotOutcome::Sunk => {
                let target = match shooter {
                    Side::Player => &self.opponent_board,
                    Side::Opponent => &self.player_board,
                };
                if target.all_sunk() {
                    self.phase = Phase::Finished;
                    let event = match shooter {
                        Side::Player => GameEvent::Won,
                        Side::Opponent => GameEvent::Lost,
                    };
                    log::info!("game over: {:?}", event);
                    self.push_event(event);
                }
            }
        }
    }

    /// Player fires at `at` on the opponent board. A repeated shot changes
    /// nothing and keeps the turn.
    pub fn player_fire(&mut self, at: Coord) -> Result<ShotOutcome, BoardError> {
        self.require_turn(Side::Player)?;
        let shot = self.opponent_board.fire_at(at.x, at.y, Side::Player)?;
        if shot.outcome == ShotOutcome::Repeat {
            return Ok(ShotOutcome::Repeat);
        }
        self.opponent_board = shot.board;
        let size = shot.ship.as_ref().map(|s| s.size());
        self.after_shot(Side::Player, at, shot.outcome, size);
        Ok(shot.outcome)
    }

    /// Let the automated opponent fire one shot.
    ///
    /// Candidates already fired upon on the real board are skipped, so the
    /// strategy's bookkeeping cannot produce a repeat.
    pub fn opponent_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<OpponentShot, BoardError> {
        self.require_turn(Side::Opponent)?;
        let view = self.player_board.view_for(Side::Opponent);
        let at = loop {
            let c = self.strategy.next_shot(rng).ok_or(BoardError::NoUntriedCells)?;
            if view.is_shot(c) {
                self.strategy.mark_tried(c);
                continue;
            }
            break c;
        };
        let shot = self.player_board.fire_at(at.x, at.y, Side::Opponent)?;
        self.player_board = shot.board;
        self.strategy.mark_tried(at);
        if shot.outcome.is_hit() {
            self.strategy.enqueue_neighbors(at);
        }
        let size = shot.ship.as_ref().map(|s| s.size());
        self.after_shot(Side::Opponent, at, shot.outcome, size);
        Ok(OpponentShot {
            at,
            outcome: shot.outcome,
        })
    }
}
