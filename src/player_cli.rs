#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};
use std::string::String;

use rand::rngs::SmallRng;
use tokio::sync::{mpsc, watch};

use crate::{
    board::{Board, FiringView},
    common::{BoardError, Coord, ShotOutcome, Side},
    config::GameConfig,
    placement,
    player::Player,
    ui::coord_to_string,
};

/// A line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// `B3`
    Fire(Coord),
    /// `m 2 C5`: move ship number 2 so its bow is at C5.
    Move { ship: usize, to: Coord },
    /// `r 2`: rotate ship number 2.
    Rotate { ship: usize },
    /// `f`: list your fleet.
    Fleet,
    /// `q`
    Quit,
}

const HELP: &str = "Enter a cell like A1, 'm <ship> <cell>', 'r <ship>', 'f' or 'q'.";

/// Parse `B3` into `(x=1, y=2)`, rejecting cells off a `size` board.
/// Columns past `Z` continue as `AA`, `AB`, ...
pub fn parse_coord(input: &str, size: usize) -> Option<Coord> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (letters, digits) = input.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let x = letters.bytes().try_fold(0usize, |acc, b| {
        acc.checked_mul(26)?
            .checked_add((b.to_ascii_uppercase() - b'A') as usize + 1)
    })? - 1;
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    let c = Coord::new(x, row - 1);
    if c.x < size && c.y < size {
        Some(c)
    } else {
        None
    }
}

/// Parse one input line. Ship numbers are 1-based in the input and
/// returned 0-based.
pub fn parse_command(line: &str, size: usize) -> Option<CliCommand> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let cmd = match head.to_ascii_lowercase().as_str() {
        "q" | "quit" => CliCommand::Quit,
        "f" | "fleet" => CliCommand::Fleet,
        "m" | "move" => {
            let ship = parse_ship_number(parts.next()?)?;
            let to = parse_coord(parts.next()?, size)?;
            CliCommand::Move { ship, to }
        }
        "r" | "rotate" => CliCommand::Rotate {
            ship: parse_ship_number(parts.next()?)?,
        },
        _ => CliCommand::Fire(parse_coord(head, size)?),
    };
    if parts.next().is_some() {
        return None;
    }
    Some(cmd)
}

fn parse_ship_number(s: &str) -> Option<usize> {
    s.parse::<usize>().ok()?.checked_sub(1)
}

/// Human player reading commands from a line source.
pub struct CliPlayer<R: BufRead> {
    input: R,
}

impl<R: BufRead> CliPlayer<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Prompt until a well-formed command arrives. End of input reads as
    /// [`CliCommand::Quit`].
    pub fn read_command(&mut self, size: usize) -> io::Result<CliCommand> {
        loop {
            print!("> ");
            io::stdout().flush()?;
            let mut buf = String::new();
            if self.input.read_line(&mut buf)? == 0 {
                return Ok(CliCommand::Quit);
            }
            match parse_command(&buf, size) {
                Some(cmd) => return Ok(cmd),
                None => println!("{}", HELP),
            }
        }
    }
}

impl<R: BufRead> Player for CliPlayer<R> {
    fn place_ships(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        config: &GameConfig,
    ) -> Result<Board, BoardError> {
        placement::random_placement(board, &config.fleet, Side::Player, config.enforce_no_touch, rng)
    }

    fn select_target(&mut self, _rng: &mut SmallRng, view: &FiringView<'_>) -> Option<Coord> {
        loop {
            match self.read_command(view.size()).ok()? {
                CliCommand::Fire(c) if view.is_shot(c) => {
                    println!("You already fired at {}.", coord_to_string(c));
                }
                CliCommand::Fire(c) => return Some(c),
                CliCommand::Quit => return None,
                _ => println!("Only shots are accepted here."),
            }
        }
    }

    fn handle_shot_result(&mut self, coord: Coord, outcome: ShotOutcome) {
        println!("{} -> {:?}", coord_to_string(coord), outcome);
    }
}

/// Commands typed on stdin, readable from async code.
///
/// Lines are read on a detached thread. A blocking tokio task would keep the
/// runtime from shutting down while it waits for input.
pub struct CommandLines {
    lines: mpsc::Receiver<String>,
}

impl CommandLines {
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::channel(1);
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        });
        Self::new(rx)
    }

    /// Read commands from lines sent on `lines`.
    pub fn new(lines: mpsc::Receiver<String>) -> Self {
        Self { lines }
    }

    /// Prompt until a well-formed command arrives.
    ///
    /// Returns `None` once `cancel` is set or its sender is dropped. End of
    /// input reads as [`CliCommand::Quit`].
    pub async fn next_command(
        &mut self,
        size: usize,
        cancel: &mut watch::Receiver<bool>,
    ) -> io::Result<Option<CliCommand>> {
        loop {
            if *cancel.borrow_and_update() {
                return Ok(None);
            }
            print!("> ");
            io::stdout().flush()?;
            tokio::select! {
                line = self.lines.recv() => {
                    let Some(line) = line else {
                        return Ok(Some(CliCommand::Quit));
                    };
                    match parse_command(&line, size) {
                        Some(cmd) => return Ok(Some(cmd)),
                        None => println!("{}", HELP),
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        println!();
                        return Ok(None);
                    }
                }
            }
        }
    }
}
