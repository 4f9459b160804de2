use std::{fmt::Display, mem};

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

// MSB first bit buffer, written by the framer and read back by the bit placer
#[derive(Debug, Clone)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; capacity.div_ceil(8)], len: 0, capacity, cursor: 0 }
    }

    pub fn from(inp: &[u8]) -> Self {
        let bit_len = inp.len() << 3;
        Self { data: inp.to_vec(), len: bit_len, capacity: bit_len, cursor: 0 }
    }

    // Trailing bits of a partial last byte are zero
    pub fn data(&self) -> &[u8] {
        &self.data[..self.len.div_ceil(8)]
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        match size {
            0 => (),
            1..=8 => {
                let bits = bits.to_u8().unwrap_or(0);
                let offset = self.len & 7;
                let pos = self.len >> 3;

                if offset + size <= 8 {
                    self.data[pos] |= bits << (8 - size - offset);
                } else {
                    self.data[pos] |= bits >> (size + offset - 8);
                    self.data[pos + 1] |= bits << (16 - size - offset);
                }

                self.len += size;
            }
            9..=16 => {
                let bits = bits.to_u16().unwrap_or(0);
                self.push_bits((bits >> 8) as u8, size - 8);
                self.push_bits((bits & 0xFF) as u8, 8);
            }
            _ => panic!("Bits from only u8 and u16 can be pushed"),
        }
    }
}


// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }

        let offset = self.cursor & 7;
        let pos = self.cursor >> 3;
        let bit = (self.data[pos] << offset) >> 7;

        self.cursor += 1;

        Some(bit != 0)
    }
}

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take()
    }
}

#[cfg(test)]
mod bit_stream_take_tests {

    use super::BitStream;

    #[test]
    fn test_iter_msb_first() {
        let bs = BitStream::from(&[0b1010_0001]);
        let bits = bs.collect::<Vec<_>>();
        assert_eq!(bits, [true, false, true, false, false, false, false, true]);
    }

    #[test]
    fn test_take_exhausted() {
        let mut bs = BitStream::from(&[0xFF]);
        for _ in 0..8 {
            assert_eq!(BitStream::take(&mut bs), Some(true));
        }
        assert_eq!(BitStream::take(&mut bs), None);

        let mut empty = BitStream::from(&[]);
        assert_eq!(empty.next(), None);
    }

    #[test]
    fn test_take_partial_byte() {
        // Only pushed bits are readable, not the zero fill of the last byte
        let mut bs = BitStream::new(8);
        bs.push_bits(0b101u8, 3);
        assert_eq!(bs.collect::<Vec<_>>(), [true, false, true]);
    }
}
