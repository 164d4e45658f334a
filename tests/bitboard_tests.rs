use broadside::{BitBoard, BoardError, Coord};

#[test]
fn test_insert_contains_remove() {
    let mut bb = BitBoard::new(4);
    assert!(bb.is_empty());

    assert!(bb.insert(Coord::new(1, 1)).unwrap());
    assert!(!bb.insert(Coord::new(1, 1)).unwrap());
    assert!(bb.contains(Coord::new(1, 1)));
    assert_eq!(bb.count_ones(), 1);

    assert!(bb.remove(Coord::new(1, 1)).unwrap());
    assert!(!bb.contains(Coord::new(1, 1)));
    assert!(bb.is_empty());
}

#[test]
fn test_out_of_bounds() {
    let mut bb = BitBoard::new(3);
    assert_eq!(
        bb.insert(Coord::new(3, 0)).unwrap_err(),
        BoardError::OutOfBounds { row: 3, col: 0 }
    );
    assert!(!bb.contains(Coord::new(0, 7)));
}

#[test]
fn test_boards_wider_than_one_word() {
    let mut bb = BitBoard::new(12);
    bb.insert(Coord::new(11, 11)).unwrap();
    bb.insert(Coord::new(5, 4)).unwrap();
    bb.insert(Coord::new(0, 1)).unwrap();
    let cells: Vec<_> = bb.iter().collect();
    assert_eq!(
        cells,
        vec![Coord::new(0, 1), Coord::new(5, 4), Coord::new(11, 11)]
    );
    bb.clear_all();
    assert_eq!(bb.count_ones(), 0);
}

#[test]
fn test_union() {
    let mut a = BitBoard::new(5);
    let mut b = BitBoard::new(5);
    a.insert(Coord::new(0, 0)).unwrap();
    b.insert(Coord::new(4, 4)).unwrap();
    let u = &a | &b;
    assert_eq!(u.count_ones(), 2);
    assert!(u.contains(Coord::new(0, 0)) && u.contains(Coord::new(4, 4)));
}
