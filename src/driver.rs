#![cfg(feature = "std")]

use rand::Rng;
use tokio::sync::watch;
use tokio::time::{sleep, Duration};

use crate::common::{BoardError, Side};
use crate::config::OPPONENT_DELAY_MS;
use crate::game::{GameSession, OpponentShot, Phase};

/// Result of driving one opponent turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverOutcome {
    /// Shots fired until the turn passed back or the game ended.
    Played(Vec<OpponentShot>),
    /// The turn was cancelled before the next shot. Holds the shots already
    /// applied to the session.
    Cancelled(Vec<OpponentShot>),
}

/// Create a cancellation pair. Sending `true` (or dropping the sender)
/// cancels a pending opponent turn.
pub fn cancel_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Plays the automated opponent's turns with a pause before each shot.
pub struct OpponentDriver {
    delay: Duration,
}

impl Default for OpponentDriver {
    fn default() -> Self {
        Self::new(Duration::from_millis(OPPONENT_DELAY_MS))
    }
}

impl OpponentDriver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Fire opponent shots while it is the opponent's turn.
    ///
    /// Each shot waits for the pacing delay first. If `cancel` fires during
    /// a wait the session is left untouched from that point on.
    pub async fn run_turn<R: Rng + ?Sized>(
        &self,
        session: &mut GameSession,
        rng: &mut R,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<DriverOutcome, BoardError> {
        let mut shots = Vec::new();
        while session.phase() == Phase::InProgress && session.turn() == Side::Opponent {
            if *cancel.borrow_and_update() {
                return Ok(DriverOutcome::Cancelled(shots));
            }
            let elapsed = tokio::select! {
                _ = sleep(self.delay) => true,
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        log::debug!("opponent turn cancelled after {} shots", shots.len());
                        return Ok(DriverOutcome::Cancelled(shots));
                    }
                    false
                }
            };
            if elapsed {
                shots.push(session.opponent_turn(rng)?);
            }
        }
        Ok(DriverOutcome::Played(shots))
    }
}
