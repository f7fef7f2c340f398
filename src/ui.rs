#![cfg(feature = "std")]

use std::fmt::Write;
use std::string::String;
use std::vec::Vec;

use crate::{
    board::{Board, FiringView, Mark},
    common::{Coord, ShotOutcome, Side},
    game::{GameEvent, GameSession},
};

/// Column label for `x`: `A` .. `Z`, then `AA`, `AB`, ... as in a
/// spreadsheet.
pub fn column_label(x: usize) -> String {
    let mut n = x + 1;
    let mut label = Vec::new();
    while n > 0 {
        n -= 1;
        label.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    label.iter().rev().collect()
}

/// Width of the widest column label on a `size` board.
fn column_width(size: usize) -> usize {
    column_label(size.saturating_sub(1)).len()
}

/// `B3`-style name of a coordinate.
pub fn coord_to_string(c: Coord) -> String {
    std::format!("{}{}", column_label(c.x), c.y + 1)
}

fn header(out: &mut String, size: usize) {
    let w = column_width(size);
    out.push_str("   ");
    for x in 0..size {
        let _ = write!(out, " {:>w$}", column_label(x));
    }
    out.push('\n');
}

/// Own board with ships revealed: `S` ship, `X` hit, `#` sunk, `o` miss.
pub fn render_own_board(board: &Board) -> String {
    let mut out = String::new();
    let w = column_width(board.size());
    header(&mut out, board.size());
    for (y, row) in board.cells().iter().enumerate() {
        let _ = write!(out, "{:2} ", y + 1);
        for cell in row {
            let ship = cell.ship_id().and_then(|id| board.ship(id));
            let ch = match (ship, cell.shot_by_opponent()) {
                (Some(s), true) if s.is_sunk() => '#',
                (Some(_), true) => 'X',
                (Some(_), false) => 'S',
                (None, true) => 'o',
                (None, false) => '.',
            };
            let _ = write!(out, " {:>w$}", ch);
        }
        out.push('\n');
    }
    out
}

/// Enemy board as the shooter knows it.
pub fn render_target_view(view: &FiringView<'_>) -> String {
    let mut out = String::new();
    let w = column_width(view.size());
    header(&mut out, view.size());
    for y in 0..view.size() {
        let _ = write!(out, "{:2} ", y + 1);
        for x in 0..view.size() {
            let ch = match view.mark(Coord::new(x, y)) {
                Some(Mark::Sunk) => '#',
                Some(Mark::Hit) => 'X',
                Some(Mark::Miss) => 'o',
                None => '.',
            };
            let _ = write!(out, " {:>w$}", ch);
        }
        out.push('\n');
    }
    out
}

/// One-line description of a session event.
pub fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::Started => "Game started! Your move.".into(),
        GameEvent::ShipMoved { size } => std::format!("You moved a ship of size {}.", size),
        GameEvent::Won => "Victory! Every enemy ship is sunk.".into(),
        GameEvent::Lost => "Defeat. All your ships are sunk.".into(),
        GameEvent::Shot {
            shooter,
            at,
            outcome,
            ship_size,
        } => {
            let who = match shooter {
                Side::Player => "You",
                Side::Opponent => "Opponent",
            };
            let at = coord_to_string(*at);
            match outcome {
                ShotOutcome::Repeat => std::format!("{} already fired at {}.", who, at),
                ShotOutcome::Miss => std::format!("{} missed at {}.", who, at),
                ShotOutcome::Hit => std::format!("{} hit at {}!", who, at),
                ShotOutcome::Sunk => std::format!(
                    "{} sank a ship of size {} at {}!",
                    who,
                    ship_size.unwrap_or_default(),
                    at
                ),
            }
        }
    }
}

/// Display the opponent board (top) and the player's board (bottom).
pub fn print_player_view(session: &GameSession) {
    std::println!(
        "Opponent board ({} ships left):",
        session.remaining_opponent_ships()
    );
    std::print!("{}", render_target_view(&session.opponent_view()));
    std::println!("\nYour board ({} ships left):", session.remaining_player_ships());
    std::print!("{}", render_own_board(session.player_board()));
}

/// List the player's ships with the numbers the CLI uses to address them.
pub fn print_fleet(board: &Board) {
    for (i, ship) in board.ships().iter().enumerate() {
        std::println!(
            "  [{}] size {} at {} {:?}{}",
            i + 1,
            ship.size(),
            coord_to_string(ship.bow()),
            ship.orientation(),
            if ship.is_sunk() { " (sunk)" } else { "" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::{Orientation, Ship};

    #[test]
    fn own_board_shows_ship_and_hits() {
        let mut board = Board::new(3).unwrap();
        let ship = Ship::new("s", 2, Coord::new(0, 0), Orientation::Horizontal, Side::Player);
        board.apply_ship(&ship).unwrap();
        board.push_ship(ship);
        let board = board.fire_at(0, 0, Side::Opponent).unwrap().board;
        let board = board.fire_at(2, 2, Side::Opponent).unwrap().board;
        assert_eq!(render_own_board(&board), "    A B C\n 1  X S .\n 2  . . .\n 3  . . o\n");
    }

    #[test]
    fn coords_render_as_letter_number() {
        assert_eq!(coord_to_string(Coord::new(1, 2)), "B3");
        assert_eq!(coord_to_string(Coord::new(27, 0)), "AB1");
    }

    #[test]
    fn columns_past_z_get_two_letters() {
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(51), "AZ");
        assert_eq!(column_label(52), "BA");
        let board = Board::new(28).unwrap();
        let rendered = render_own_board(&board);
        let header = rendered.lines().next().unwrap();
        assert!(header.ends_with(" Z AA AB"));
        assert!(header.starts_with("     A  B"));
    }
}
