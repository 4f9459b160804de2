mod qr;

pub(crate) use qr::QR;

#[cfg(test)]
pub(crate) use qr::Module;

use std::ops::Deref;

use tracing::{debug, debug_span};

use crate::common::{
    codec::encode,
    ec::ecc,
    error::QRResult,
    metadata::MASK_PATTERN,
    version_db::{version_info, VersionInfo},
    BitStream,
};

// Payloads up to this length use the small version
pub const VERSION_THRESHOLD: usize = 84;

const SMALL_VERSION: u8 = 5;

const LARGE_VERSION: u8 = 7;

/// Turns byte payloads into QR symbols at error correction level M with mask
/// pattern 3.
///
/// The module grid is kept between calls and only reallocated when the
/// selected version changes, so a generator must not be shared across
/// threads without a lock. Use one generator per thread instead.
#[derive(Debug, Default)]
pub struct QRGenerator {
    qr: Option<QR>,
    // Set only once a symbol is complete
    version: Option<&'static VersionInfo>,
}

impl QRGenerator {
    pub fn new() -> Self {
        Self { qr: None, version: None }
    }

    /// Version of the last symbol successfully generated, if any. Failed calls
    /// leave it unchanged.
    pub fn version(&self) -> Option<&'static VersionInfo> {
        self.version
    }

    pub fn select_version(data_len: usize) -> &'static VersionInfo {
        if data_len <= VERSION_THRESHOLD {
            version_info(SMALL_VERSION)
        } else {
            version_info(LARGE_VERSION)
        }
    }
}

impl QRGenerator {
    /// Encodes `data` into a finished symbol.
    ///
    /// Returns [`QRError::DataTooLong`](crate::QRError::DataTooLong) if the
    /// payload exceeds the capacity of the largest supported version.
    pub fn generate(&mut self, data: &[u8]) -> QRResult<GeneratedCode> {
        let span = debug_span!("qr generate", payload_len = data.len());
        let _enter = span.enter();

        let info = Self::select_version(data.len());
        debug!(version = info.version, size = info.size, ec_level = "M", "Version selected");

        let qr = self.qr.get_or_insert_with(|| QR::new(info));
        if qr.width() != info.size {
            debug!(from = qr.width(), to = info.size, "Reallocating grid");
        }
        qr.reset(info);

        qr.draw_all_function_patterns();
        debug!("Function patterns drawn");

        let encoded = encode(data, info)?;
        debug!(len = encoded.len(), "Data framed");

        let blocks = Self::compute_ecc(&encoded, info);
        let interleaved = Self::interleave(&blocks);
        debug_assert_eq!(
            interleaved.len(),
            info.total_bytes,
            "Interleaved length doesn't match total codewords"
        );
        debug!(len = interleaved.len(), segments = blocks.len(), "Codewords interleaved");

        qr.draw_payload(BitStream::from(&interleaved), MASK_PATTERN);
        debug!(dark_modules = qr.count_dark_modules(), "Payload drawn");

        self.version = Some(info);
        Ok(GeneratedCode { data: qr.to_bits(), qr_size: qr.width() })
    }

    // Splits the framed data into segments, each followed by its ecc
    fn compute_ecc(data: &[u8], info: &VersionInfo) -> Vec<Vec<u8>> {
        assert!(
            info.num_segments_1 == 0,
            "Second error correction group is unsupported: Version {}",
            info.version
        );
        debug_assert!(
            data.len() == info.num_segments * info.segment_data_bytes,
            "Data len doesn't match total size of segments: Data len {}, Total segment size {}",
            data.len(),
            info.num_segments * info.segment_data_bytes
        );

        let ec_len = info.segment_ec_bytes();
        data.chunks_exact(info.segment_data_bytes)
            .map(|c| {
                let mut seg = Vec::with_capacity(info.segment_bytes());
                seg.extend_from_slice(c);
                seg.extend(ecc(c, ec_len));
                seg
            })
            .collect()
    }

    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}


// Generated code
//------------------------------------------------------------------------------

/// A finished symbol: one byte per module in row-major order, 1 for dark.
#[derive(Debug, PartialEq, Eq)]
pub struct GeneratedCode {
    data: Vec<u8>,
    qr_size: usize,
}

impl GeneratedCode {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn qr_size(&self) -> usize {
        self.qr_size
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        assert!(r < self.qr_size && c < self.qr_size, "Module ({r}, {c}) out of bounds");
        self.data[r * self.qr_size + c] != 0
    }

    /// Text rendering with a 4 module quiet zone, dark modules as `█`.
    pub fn to_str(&self, module_size: usize) -> String {
        let qz_size = 4 * module_size;
        let qr_size = self.qr_size * module_size;
        let total_size = qz_size + qr_size + qz_size;

        let mut canvas = String::with_capacity(total_size * (total_size + 1));
        for i in 0..total_size {
            for j in 0..total_size {
                if i < qz_size || i >= qz_size + qr_size || j < qz_size || j >= qz_size + qr_size {
                    canvas.push(' ');
                    continue;
                }
                let r = (i - qz_size) / module_size;
                let c = (j - qz_size) / module_size;
                canvas.push(if self.is_dark(r, c) { '█' } else { ' ' });
            }
            canvas.push('\n');
        }

        canvas
    }
}
