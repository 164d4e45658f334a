#![cfg(feature = "std")]

//! Plain-text rendering and input parsing for the terminal front-end.
//! Presentation only; every rule lives in the engine.

use std::fmt::Write;

use crate::{Board, Coord, Game, Orientation};

/// Spreadsheet-style column label: `A`..`Z`, then `AA`, `AB`, ...
pub fn column_label(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Column label plus 1-based row, e.g. `(4, 0)` -> `A5`, `(0, 27)` -> `AB1`.
pub fn coord_to_string(coord: Coord) -> String {
    format!("{}{}", column_label(coord.col), coord.row + 1)
}

/// Parse `A5`-style input, case-insensitive. Range checks are left to the board.
pub fn parse_coord(input: &str) -> Option<Coord> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (letters, digits) = input.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let mut col = 0usize;
    for ch in letters.bytes() {
        let digit = usize::from(ch.to_ascii_uppercase() - b'A') + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some(Coord::new(row - 1, col - 1))
}

/// Parse a placement such as `A5 h` or `c3 vertical`. Orientation defaults
/// to horizontal.
pub fn parse_placement(input: &str) -> Option<(Coord, Orientation)> {
    let mut parts = input.split_whitespace();
    let coord = parts.next().and_then(parse_coord)?;
    let orient = match parts.next() {
        Some(tag) => tag.parse().ok()?,
        None => Orientation::Horizontal,
    };
    Some((coord, orient))
}

/// Widths of the row-number gutter and of one column.
fn widths(size: usize) -> (usize, usize) {
    let rows = size.to_string().len().max(2);
    let cols = column_label(size.saturating_sub(1)).len();
    (rows, cols)
}

fn header(out: &mut String, size: usize) {
    let (rw, cw) = widths(size);
    let _ = write!(out, "{:rw$} ", "");
    for c in 0..size {
        let _ = write!(out, " {:>cw$}", column_label(c));
    }
    out.push('\n');
}

/// Draw a board. `X` hit, `o` miss, `S` ship (only with `reveal`), `.` unknown.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let size = board.size();
    let (rw, cw) = widths(size);
    let mut out = String::new();
    header(&mut out, size);
    for r in 0..size {
        let _ = write!(out, "{:rw$} ", r + 1);
        for c in 0..size {
            let coord = Coord::new(r, c);
            let ch = if board.hits().contains(coord) {
                'X'
            } else if board.misses().contains(coord) {
                'o'
            } else if reveal && board.ship_id_at(coord).is_some() {
                'S'
            } else {
                '.'
            };
            let _ = write!(out, " {:>cw$}", ch);
        }
        out.push('\n');
    }
    out
}

/// The opponent's board (hidden ships) above the viewer's own board.
pub fn render_player_view(game: &Game, viewer: usize) -> String {
    let mut out = String::new();
    let me = &game.players()[viewer];
    let them = &game.players()[1 - viewer];
    let _ = writeln!(out, "{}'s waters:", them.name());
    out.push_str(&render_board(them.board(), false));
    let _ = writeln!(out, "\n{}'s fleet:", me.name());
    out.push_str(&render_board(me.board(), true));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_fleet, Player};

    #[test]
    fn coords_roundtrip_through_text() {
        let c = Coord::new(4, 0);
        assert_eq!(coord_to_string(c), "A5");
        assert_eq!(parse_coord("a5"), Some(c));
        assert_eq!(parse_coord("J10"), Some(Coord::new(9, 9)));
        assert_eq!(parse_coord("A0"), None);
        assert_eq!(parse_coord("5A"), None);
        assert_eq!(parse_coord(""), None);
    }

    #[test]
    fn columns_past_z_use_two_letters() {
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(27), "AB");
        assert_eq!(column_label(51), "AZ");
        assert_eq!(column_label(52), "BA");
        for col in [0, 25, 26, 27, 199, 701, 702] {
            let c = Coord::new(3, col);
            assert_eq!(parse_coord(&coord_to_string(c)), Some(c));
        }
        assert_eq!(coord_to_string(Coord::new(0, 27)), "AB1");
        assert_eq!(parse_coord("ab1"), Some(Coord::new(0, 27)));
        assert_eq!(parse_coord("A-1"), None);
    }

    #[test]
    fn large_boards_render() {
        let out = render_board(&Board::new(200), false);
        assert_eq!(out.lines().count(), 201);
        assert!(out.lines().next().unwrap().trim_end().ends_with("GR"));
        assert!(out.lines().last().unwrap().starts_with("200 "));
    }

    #[test]
    fn placement_input() {
        assert_eq!(
            parse_placement("B2 v"),
            Some((Coord::new(1, 1), Orientation::Vertical))
        );
        assert_eq!(
            parse_placement("C3"),
            Some((Coord::new(2, 2), Orientation::Horizontal))
        );
        assert_eq!(parse_placement("C3 diagonal"), None);
    }

    #[test]
    fn hidden_ships_are_not_drawn() {
        let mut p = Player::human("P", create_fleet(), Board::new(3));
        p.place_ship_named("Cruiser", 0, 0, Orientation::Horizontal).unwrap();
        let shown = render_board(p.board(), true);
        let hidden = render_board(p.board(), false);
        assert!(shown.contains('S'));
        assert!(!hidden.contains('S'));
    }
}
