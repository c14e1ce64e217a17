//! Sequential atlas cell allocation.

/// Column/row position of one atlas cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasPos {
    pub x: u32,
    pub y: u32,
}

impl AtlasPos {
    /// `{ x = .., y = .. }`.
    #[must_use]
    pub fn to_lua(self) -> String {
        format!("{{ x = {}, y = {} }}", self.x, self.y)
    }
}

/// Cells assigned to one item: its face and, with an overlay, the overlay
/// image in the following cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasCell {
    pub index: u32,
    pub pos: AtlasPos,
    pub soul_pos: Option<AtlasPos>,
}

/// Hands out cells left to right, wrapping every `columns` cells.
#[derive(Debug, Clone)]
pub struct AtlasAllocator {
    columns: u32,
    next: u32,
}

impl AtlasAllocator {
    /// A zero column count is treated as one column.
    #[must_use]
    pub fn new(columns: u32) -> Self {
        Self {
            columns: columns.max(1),
            next: 0,
        }
    }

    fn position(&self, index: u32) -> AtlasPos {
        AtlasPos {
            x: index % self.columns,
            y: index / self.columns,
        }
    }

    pub fn allocate(&mut self, overlay: bool) -> AtlasCell {
        let index = self.next;
        self.next += if overlay { 2 } else { 1 };
        AtlasCell {
            index,
            pos: self.position(index),
            soul_pos: overlay.then(|| self.position(index + 1)),
        }
    }

    /// Cells handed out so far.
    #[must_use]
    pub fn used(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_column_count() {
        let mut atlas = AtlasAllocator::new(10);
        let cells: Vec<_> = (0..11).map(|_| atlas.allocate(false).pos).collect();
        assert_eq!(cells[9], AtlasPos { x: 9, y: 0 });
        assert_eq!(cells[10], AtlasPos { x: 0, y: 1 });
    }

    #[test]
    fn overlay_reserves_next_cell() {
        let mut atlas = AtlasAllocator::new(10);
        let first = atlas.allocate(true);
        assert_eq!(first.soul_pos, Some(AtlasPos { x: 1, y: 0 }));
        let second = atlas.allocate(false);
        assert_eq!(second.index, 2);
        assert_eq!(atlas.used(), 3);
    }

    #[test]
    fn overlay_may_wrap_rows() {
        let mut atlas = AtlasAllocator::new(2);
        atlas.allocate(false);
        let cell = atlas.allocate(true);
        assert_eq!(cell.pos, AtlasPos { x: 1, y: 0 });
        assert_eq!(cell.soul_pos, Some(AtlasPos { x: 0, y: 1 }));
        assert_eq!(cell.pos.to_lua(), "{ x = 1, y = 0 }");
    }
}
