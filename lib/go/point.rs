use derive_more::Constructor;

/// Column letters used by GTP vertices, `I` is skipped.
const COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// The largest board size whose points can be named in both SGF and GTP.
pub const MAX_BOARD_SIZE: u8 = 25;

/// An intersection on the board.
///
/// Columns grow from left to right and rows from top to bottom, both starting at `0`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Point {
    #[cfg_attr(test, strategy(..MAX_BOARD_SIZE))]
    pub x: u8,
    #[cfg_attr(test, strategy(..MAX_BOARD_SIZE))]
    pub y: u8,
}

impl Point {
    /// Whether this point lies on a board of the given size.
    pub fn is_on(&self, size: u8) -> bool {
        self.x < size && self.y < size
    }

    /// Parses an SGF point such as `pd`.
    ///
    /// Returns [`None`] for passes, which SGF writes as an empty value or as `tt` on small boards.
    pub fn from_sgf(s: &str, size: u8) -> Option<Self> {
        match s.as_bytes() {
            [x @ b'a'..=b'z', y @ b'a'..=b'z'] => {
                Some(Point::new(x - b'a', y - b'a')).filter(|p| p.is_on(size))
            }
            _ => None,
        }
    }

    /// The SGF representation of this point.
    pub fn to_sgf(&self) -> String {
        [b'a' + self.x, b'a' + self.y].iter().map(|&c| c as char).collect()
    }

    /// Expands an SGF point list entry, which is either a point or a rectangle such as `aa:cc`.
    pub fn expand_sgf(s: &str, size: u8) -> Vec<Self> {
        match s.split_once(':') {
            None => Point::from_sgf(s, size).into_iter().collect(),
            Some((a, b)) => match (Point::from_sgf(a, size), Point::from_sgf(b, size)) {
                (Some(a), Some(b)) => {
                    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
                    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
                    (y0..=y1)
                        .flat_map(|y| (x0..=x1).map(move |x| Point::new(x, y)))
                        .collect()
                }
                _ => Vec::new(),
            },
        }
    }

    /// Parses a GTP vertex such as `Q16`.
    ///
    /// Returns [`None`] for anything that is not a point on the board, including `pass` and `resign`.
    pub fn from_vertex(s: &str, size: u8) -> Option<Self> {
        let (column, row) = s.split_at(s.char_indices().nth(1)?.0);
        let column = column.to_ascii_uppercase().bytes().next()?;
        let x = COLUMNS.iter().position(|&c| c == column)?;

        if !row.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let row: u8 = row.parse().ok()?;

        if x >= size as usize || row == 0 || row > size {
            return None;
        }

        Some(Point::new(x as u8, size - row))
    }

    /// The GTP vertex of this point on a board of the given size.
    pub fn to_vertex(&self, size: u8) -> String {
        format!("{}{}", COLUMNS[self.x as usize] as char, size - self.y)
    }
}
