// Version catalog
//------------------------------------------------------------------------------

/// Layout of one supported QR version at error correction level M.
///
/// Codewords are split into at most two groups. Every segment within a group
/// carries the same number of data codewords followed by its error
/// correction codewords.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VersionInfo {
    pub version: u8,
    /// Edge length of the module grid
    pub size: usize,
    /// Data plus error correction codewords across both groups
    pub total_bytes: usize,

    pub group_bytes: usize,
    pub num_segments: usize,
    pub segment_data_bytes: usize,

    pub group_bytes_1: usize,
    pub num_segments_1: usize,
    pub segment_data_bytes_1: usize,
}

impl VersionInfo {
    /// Codewords per segment of the first group, including error correction.
    pub const fn segment_bytes(&self) -> usize {
        self.group_bytes / self.num_segments
    }

    pub const fn segment_ec_bytes(&self) -> usize {
        self.segment_bytes() - self.segment_data_bytes
    }

    /// Data codewords across both groups.
    pub const fn data_bytes(&self) -> usize {
        self.num_segments * self.segment_data_bytes
            + self.num_segments_1 * self.segment_data_bytes_1
    }

    /// Bit length of the byte mode character count field.
    pub fn char_cnt_bits(&self) -> usize {
        match self.version {
            1..=9 => 8,
            10..=26 => 16,
            v => panic!("Unsupported version for byte mode length field: {v}"),
        }
    }

    /// Bytes taken by the mode indicator and character count field.
    pub fn framing_bytes(&self) -> usize {
        (MODE_BITS + self.char_cnt_bits()).div_ceil(8)
    }

    /// Maximum raw payload length.
    pub fn input_bytes(&self) -> usize {
        self.data_bytes() - self.framing_bytes()
    }

    /// Centre coordinates of alignment patterns along either axis.
    pub fn alignment_pattern(&self) -> &'static [i16] {
        match self.version {
            5 => &[6, 30],
            7 => &[6, 22, 38],
            13 => &[6, 34, 62],
            v => panic!("Unsupported version for alignment patterns: {v}"),
        }
    }
}

/// Looks up the catalog entry for `version`.
///
/// # Panics
///
/// Panics if the version is not in the catalog. Callers only ever ask for
/// versions they selected from the catalog itself.
pub fn version_info(version: u8) -> &'static VersionInfo {
    match version {
        5 => &VERSION_INFOS[0],
        7 => &VERSION_INFOS[1],
        13 => &VERSION_INFOS[2],
        v => panic!("Unsupported version: {v}"),
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const MODE_BITS: usize = 4;

// Byte mode indicator
pub const MODE_BYTE: u8 = 0b0100;

// Version 13 carries a second group which the interleaver does not handle
static VERSION_INFOS: [VersionInfo; 3] = [
    VersionInfo {
        version: 5,
        size: 37,
        total_bytes: 134,
        group_bytes: 134,
        num_segments: 2,
        segment_data_bytes: 43,
        group_bytes_1: 0,
        num_segments_1: 0,
        segment_data_bytes_1: 0,
    },
    VersionInfo {
        version: 7,
        size: 45,
        total_bytes: 196,
        group_bytes: 196,
        num_segments: 4,
        segment_data_bytes: 31,
        group_bytes_1: 0,
        num_segments_1: 0,
        segment_data_bytes_1: 0,
    },
    VersionInfo {
        version: 13,
        size: 69,
        total_bytes: 532,
        group_bytes: 472,
        num_segments: 8,
        segment_data_bytes: 37,
        group_bytes_1: 60,
        num_segments_1: 1,
        segment_data_bytes_1: 38,
    },
];
