// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Walks two-column strips from the bottom right corner, alternating upward and
// downward, right cell before left cell. The vertical timing column is skipped.
pub struct EncRegionIter {
    r: i16,
    // Right column of the current strip
    c: i16,
    left: bool,
    upward: bool,
    width: i16,
}

impl EncRegionIter {
    pub fn new(width: usize) -> Self {
        let w = width as i16;
        Self { r: w - 1, c: w - 1, left: false, upward: true, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 1 {
            return None;
        }

        if !self.left {
            self.left = true;
            return Some((self.r, self.c));
        }

        let res = (self.r, self.c - 1);
        self.left = false;
        let next_r = if self.upward { self.r - 1 } else { self.r + 1 };
        if (0..self.width).contains(&next_r) {
            self.r = next_r;
        } else {
            self.upward = !self.upward;
            self.c -= 2;
            if self.c == VERT_TIMING_COL {
                self.c -= 1;
            }
        }
        Some(res)
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const VERT_TIMING_COL: i16 = 6;
