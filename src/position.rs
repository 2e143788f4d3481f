//! Source positions and locations.
//!
//! Positions are zero-indexed `(line, column)` pairs; columns count bytes
//! from the start of the line. Locations are half-open: `end` is exclusive.

use serde::Serialize;

/// A point in the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Position {
        Position { line, column }
    }
}

/// A half-open span of source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub begin: Position,
    pub end: Position,
}

impl Location {
    pub fn new(begin: Position, end: Position) -> Location {
        Location { begin, end }
    }

    /// The span from the beginning of `self` through the end of `other`.
    pub fn extended_to(self, other: Location) -> Location {
        Location {
            begin: self.begin,
            end: other.end,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.begin <= pos && pos < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 5) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert_eq!(Position::new(1, 1), Position::new(1, 1));
    }

    #[test]
    fn test_location_contains() {
        let loc = Location::new(Position::new(0, 2), Position::new(0, 5));
        assert!(loc.contains(Position::new(0, 2)));
        assert!(loc.contains(Position::new(0, 4)));
        assert!(!loc.contains(Position::new(0, 5)));
    }

    #[test]
    fn test_extended_to() {
        let a = Location::new(Position::new(0, 0), Position::new(0, 3));
        let b = Location::new(Position::new(1, 0), Position::new(1, 7));
        let joined = a.extended_to(b);
        assert_eq!(joined.begin, Position::new(0, 0));
        assert_eq!(joined.end, Position::new(1, 7));
    }
}
