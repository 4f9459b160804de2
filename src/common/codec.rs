use tracing::debug;

use super::bit_utils::BitStream;
use super::error::{QRError, QRResult};
use super::version_db::{VersionInfo, MODE_BITS, MODE_BYTE};

// Encoder
//------------------------------------------------------------------------------

/// Frames `data` as a single byte mode segment filling the data capacity of
/// `info`.
///
/// The header (mode indicator and character count) is 12 or 20 bits long, so
/// every payload byte after it straddles a nibble boundary. Unused capacity is
/// filled by cycling through the framed bytes from the start instead of the
/// alternating pad codewords, so that partial scans still show a repeating
/// message.
pub fn encode(data: &[u8], info: &VersionInfo) -> QRResult<Vec<u8>> {
    let cap = info.input_bytes();
    if data.len() > cap {
        debug!(len = data.len(), cap, "Data exceeds version {} capacity", info.version);
        return Err(QRError::DataTooLong);
    }

    let len_bits = info.char_cnt_bits();
    let mut bs = BitStream::new(MODE_BITS + len_bits + (data.len() << 3));
    push_header(data.len(), len_bits, &mut bs);
    push_byte_data(data, &mut bs);

    let mut encoded = Vec::with_capacity(info.data_bytes());
    encoded.extend_from_slice(bs.data());
    debug_assert_eq!(encoded.len(), data.len() + info.framing_bytes());

    replicate(&mut encoded, info.data_bytes());
    Ok(encoded)
}

fn push_header(char_cnt: usize, len_bits: usize, out: &mut BitStream) {
    debug_assert!(
        char_cnt < (1 << len_bits),
        "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
    );
    out.push_bits(MODE_BYTE, MODE_BITS);
    out.push_bits(char_cnt as u16, len_bits);
}

fn push_byte_data(data: &[u8], out: &mut BitStream) {
    for &b in data {
        out.push_bits(b, 8);
    }
}

// Repeats the framed bytes cyclically until `capacity` bytes are filled
fn replicate(framed: &mut Vec<u8>, capacity: usize) {
    let framed_len = framed.len();
    for i in framed_len..capacity {
        let b = framed[i % framed_len];
        framed.push(b);
    }
}
