use tracing::trace;

use super::galois::G;

// Reed-Solomon encoder
//------------------------------------------------------------------------------

// Computes error correction codewords for a block of data.
//
// Polynomials are little-endian: index i holds the coefficient of z^i. The
// block, reversed, becomes the high order coefficients of data * z^ec_len.
// Leading terms are eliminated from the top down by subtracting multiples of
// the generator; the surviving low order coefficients, reversed back, are the
// error correction codewords.
pub fn ecc(block: &[u8], ec_len: usize) -> Vec<u8> {
    let gen_poly = generator_polynomial(ec_len);
    let len = block.len() + ec_len;

    trace!(data_len = block.len(), ec_len, "Computing error correction codewords");

    let mut rem = vec![G(0); len];
    for (r, &b) in rem[ec_len..].iter_mut().zip(block.iter().rev()) {
        *r = G(b);
    }

    for i in (ec_len..len).rev() {
        let lead = rem[i];
        if lead == G(0) {
            continue;
        }
        for (r, &g) in rem[i - ec_len..i].iter_mut().zip(gen_poly.iter()) {
            *r += G(g) * lead;
        }
        // Generator is monic, so the leading term cancels out
        rem[i] = G(0);
    }

    rem[..ec_len].iter().rev().map(|&g| g.into()).collect()
}

pub fn generator_polynomial(ec_len: usize) -> &'static [u8] {
    match ec_len {
        18 => &GENERATOR_POLY_18,
        22 => &GENERATOR_POLY_22,
        24 => &GENERATOR_POLY_24,
        _ => panic!("Unsupported error correction codeword count: {ec_len}"),
    }
}


// Global constants
//------------------------------------------------------------------------------

// Generator polynomials without their leading (monic) term, little-endian
static GENERATOR_POLY_18: [u8; 18] = [
    0x92, 0xd9, 0x43, 0x20, 0x4b, 0xad, 0x52, 0x49, 0xdc, 0xf0, 0xd7, 0xc7, 0xaf, 0x95, 0x71, 0xb7,
    0xfb, 0xef,
];

static GENERATOR_POLY_22: [u8; 22] = [
    0xf5, 0x91, 0x1a, 0xe6, 0xda, 0x56, 0xfd, 0x43, 0x7b, 0x1d, 0x89, 0x1c, 0x28, 0x45, 0xbd, 0x13,
    0xf4, 0xb6, 0xb0, 0x83, 0xb3, 0x59,
];

static GENERATOR_POLY_24: [u8; 24] = [
    0x75, 0x90, 0xd9, 0x7f, 0xf7, 0xed, 0x01, 0xce, 0x2b, 0x3d, 0x48, 0x82, 0x49, 0xe5, 0x96, 0x73,
    0x66, 0xd8, 0xed, 0xb2, 0x46, 0xa9, 0x76, 0x7a,
];
