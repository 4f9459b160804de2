use std::ops::{Add, AddAssign, Mul, MulAssign};

// Galois field GF(2^8) under the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

pub const PRIMITIVE_POLY: u16 = 0x11D;

/// Multiplies two elements of GF(2^8).
///
/// Carry-less product into a 16 bit accumulator, then reduced by long division
/// against the primitive polynomial from bit 15 down to bit 8.
pub fn multiply(a: u8, b: u8) -> u8 {
    let mut acc: u16 = 0;
    for i in 0..8 {
        if (b >> i) & 1 == 1 {
            acc ^= (a as u16) << i;
        }
    }
    for i in (8..16).rev() {
        if acc & (1 << i) != 0 {
            acc ^= PRIMITIVE_POLY << (i - 8);
        }
    }
    acc as u8
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct G(pub u8);

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

// Addition and subtraction are the same operation in characteristic 2
impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        G(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        G(multiply(self.0, rhs.0))
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        self.0 = multiply(self.0, rhs.0);
    }
}
