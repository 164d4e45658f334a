use broadside::{Board, BoardError, Coord, Orientation, Ship, SHIPS};
use proptest::prelude::*;

const SIZE: usize = 10;

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

/// (catalog index, row, col, orientation) for one placement attempt.
fn attempt() -> impl Strategy<Value = (usize, usize, usize, Orientation)> {
    (0..SHIPS.len(), 0..SIZE, 0..SIZE, orientation())
}

fn footprint(len: usize, row: usize, col: usize, o: Orientation) -> Option<Vec<(usize, usize)>> {
    let (dr, dc) = o.step();
    let cells: Vec<_> = (0..len).map(|i| (row + dr * i, col + dc * i)).collect();
    if cells.iter().all(|&(r, c)| r < SIZE && c < SIZE) {
        Some(cells)
    } else {
        None
    }
}

fn touches(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

proptest! {
    #[test]
    fn placement_accepted_iff_in_bounds_and_isolated(attempts in prop::collection::vec(attempt(), 1..20)) {
        let mut board = Board::new(SIZE);
        let mut occupied: Vec<(usize, usize)> = Vec::new();

        for (idx, row, col, o) in attempts {
            let ship = Ship::new(SHIPS[idx]);
            let len = ship.length();
            let expected_ok = match footprint(len, row, col, o) {
                Some(cells) => !cells
                    .iter()
                    .any(|&c| occupied.iter().any(|&taken| touches(c, taken))),
                None => false,
            };

            match board.place_ship(ship, row, col, o) {
                Ok(_) => {
                    prop_assert!(expected_ok);
                    occupied.extend(footprint(len, row, col, o).unwrap());
                }
                Err(e) => {
                    prop_assert!(!expected_ok, "rejected with {}", e.reason);
                    prop_assert_eq!(e.ship.length(), len);
                    prop_assert!(!e.ship.is_placed());
                }
            }
        }

        let total: usize = board.ships().iter().map(|s| s.length()).sum();
        let marked = (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| Coord::new(r, c)))
            .filter(|&c| board.ship_id_at(c).is_some())
            .count();
        prop_assert_eq!(marked, total);
        prop_assert_eq!(occupied.len(), total);
    }

    #[test]
    fn placed_ships_never_touch(attempts in prop::collection::vec(attempt(), 1..30)) {
        let mut board = Board::new(SIZE);
        for (idx, row, col, o) in attempts {
            let _ = board.place_ship(Ship::new(SHIPS[idx]), row, col, o);
        }
        let ships = board.ships();
        for (i, a) in ships.iter().enumerate() {
            for b in &ships[i + 1..] {
                for ca in a.cells() {
                    for cb in b.cells() {
                        prop_assert!(!touches((ca.row, ca.col), (cb.row, cb.col)));
                    }
                }
            }
        }
    }

    #[test]
    fn second_attack_on_a_cell_is_rejected(
        placements in prop::collection::vec(attempt(), 0..10),
        shots in prop::collection::vec((0..SIZE, 0..SIZE), 1..60),
    ) {
        let mut board = Board::new(SIZE);
        for (idx, row, col, o) in placements {
            let _ = board.place_ship(Ship::new(SHIPS[idx]), row, col, o);
        }
        for (r, c) in shots {
            let first_time = !board.is_attacked_before(r, c);
            let result = board.receive_attack(r, c);
            if first_time {
                let outcome = result.unwrap();
                prop_assert_eq!(outcome.ship(), board.ship_id_at(Coord::new(r, c)));
            } else {
                prop_assert_eq!(result, Err(BoardError::AlreadyAttacked));
            }
            prop_assert!(board.is_attacked_before(r, c));
        }
        for ship in board.ships() {
            let hit = ship.cells().filter(|c| board.hits().contains(*c)).count();
            prop_assert_eq!(ship.hit_count(), hit);
        }
    }
}
