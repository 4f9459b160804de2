mod encoder;
mod galois;

pub use encoder::ecc;
pub use galois::multiply as gf_multiply;
