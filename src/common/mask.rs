use std::ops::Deref;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    // Pattern 3, the only one this encoder applies
    pub const DIAGONAL: MaskPattern = MaskPattern(0b011);
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b011 => mask_functions::diagonal_lines,
            p => panic!("Unsupported mask pattern: {p}"),
        }
    }
}
