use std::ops::Deref;

use crate::common::{
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::*,
    version_db::VersionInfo,
    BitStream,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    info: &'static VersionInfo,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(info: &'static VersionInfo) -> Self {
        let w = info.size;
        Self { grid: vec![Module::Empty; w * w], w, info }
    }

    // Clears every module, reallocating only if the grid size changes
    pub fn reset(&mut self, info: &'static VersionInfo) {
        let w = info.size;
        if w != self.w {
            self.grid = vec![Module::Empty; w * w];
            self.w = w;
        } else {
            self.grid.fill(Module::Empty);
        }
        self.info = info;
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn is_fully_painted(&self) -> bool {
        !self.grid.contains(&Module::Empty)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    // One byte per module, 1 for dark
    pub fn to_bits(&self) -> Vec<u8> {
        self.grid.iter().map(|m| m.select(0, 1)).collect()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        assert!(-w <= r && r < w, "Row {r} out of bounds for width {w}");
        assert!(-w <= c && c < w, "Column {c} out of bounds for width {w}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Includes the light separator, clipped at the grid edges
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let last = self.w as i16 - 1;
        self.draw_line(6, 0, 6, last);
        self.draw_line(0, 6, last, 6);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                let m =
                    if j & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(r1, j, m);
            }
        } else {
            for i in r1..=r2 {
                let m =
                    if i & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(i, c1, m);
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.info.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        // Overlaps a finder pattern
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn draw_format_info(&mut self) {
        self.draw_number(
            FORMAT_INFO,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_QR_MAIN,
        );
        self.draw_number(
            FORMAT_INFO,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_QR_SIDE,
        );
        let (r, c) = DARK_MODULE_COORD;
        self.set(r, c, Module::Format(Color::Dark));
    }

    fn draw_version_info(&mut self) {
        match self.info.version {
            1..=6 => {}
            v => {
                let ver_info = version_info_bits(v);
                self.draw_number(
                    ver_info,
                    VERSION_INFO_BIT_LEN,
                    Module::Version(Color::Light),
                    Module::Version(Color::Dark),
                    &VERSION_INFO_COORDS_BL,
                );
                self.draw_number(
                    ver_info,
                    VERSION_INFO_BIT_LEN,
                    Module::Version(Color::Light),
                    Module::Version(Color::Dark),
                    &VERSION_INFO_COORDS_TR,
                );
            }
        }
    }

    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for (r, c) in coords {
            if number & mask == 0 {
                self.set(*r, *c, off_clr);
            } else {
                self.set(*r, *c, on_clr);
            }
            mask >>= 1;
        }
    }

    // Reads back a number drawn over `coords`, most significant bit first
    #[cfg(test)]
    pub fn get_number(&self, coords: &[(i16, i16)]) -> u32 {
        coords.iter().fold(0, |acc, &(r, c)| (acc << 1) | self.get(r, c).select(0, 1))
    }
}

#[cfg(test)]
mod qr_information_tests {
    use test_case::test_case;

    use crate::builder::{Module, QRGenerator, QR};
    use crate::common::metadata::*;
    use crate::common::version_db::version_info;

    #[test]
    fn test_version_info_5() {
        let mut qr = QR::new(version_info(5));
        qr.draw_version_info();
        assert!(!qr.to_debug_str().contains(['v', 'V']));
    }

    #[test]
    fn test_version_info_7() {
        let mut qr = QR::new(version_info(7));
        qr.draw_version_info();
        let debug = qr.to_debug_str();
        let rows = debug.lines().skip(1).collect::<Vec<_>>();
        let tr = rows[..6].iter().map(|r| &r[34..37]).collect::<Vec<_>>();
        assert_eq!(tr, vec!["VVv", "VvV", "VvV", "Vvv", "vvv", "VVV"]);
        let bl = rows[34..37].iter().map(|r| &r[..6]).collect::<Vec<_>>();
        assert_eq!(bl, vec!["VVVVvV", "VvvvvV", "vVVvvV"]);
        assert_eq!(qr.get_number(&VERSION_INFO_COORDS_BL), version_info_bits(7));
        assert_eq!(qr.get_number(&VERSION_INFO_COORDS_TR), version_info_bits(7));
    }

    #[test]
    fn test_draw_format_info() {
        let mut qr = QR::new(version_info(5));
        qr.draw_format_info();
        assert_eq!(qr.get_number(&FORMAT_INFO_COORDS_QR_MAIN), 0x5B4B);
        assert_eq!(qr.get_number(&FORMAT_INFO_COORDS_QR_SIDE), 0x5B4B);
        let (r, c) = DARK_MODULE_COORD;
        assert_eq!(qr.get(r, c), Module::Format(Color::Dark));
        assert_eq!(qr.get(29, 8), Module::Format(Color::Dark));
    }

    // Format bits read back from finished symbols of either version
    #[test_case(5)]
    #[test_case(7)]
    fn test_format_info(version: u8) {
        let len = if version == 5 { 0 } else { 100 };
        let code = QRGenerator::new().generate(&vec![0x5A; len]).unwrap();
        let w = version_info(version).size as i16;
        assert_eq!(code.qr_size(), w as usize);

        let read = |coords: &[(i16, i16)]| {
            coords.iter().fold(0u32, |acc, &(r, c)| {
                let (r, c) = ((r + w) % w, (c + w) % w);
                (acc << 1) | code.is_dark(r as usize, c as usize) as u32
            })
        };
        assert_eq!(read(&FORMAT_INFO_COORDS_QR_MAIN), FORMAT_INFO);
        assert_eq!(read(&FORMAT_INFO_COORDS_QR_SIDE), FORMAT_INFO);
        let (r, c) = DARK_MODULE_COORD;
        assert!(code.is_dark((r + w) as usize, c as usize));
    }
}

// ALl function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_timing_pattern();
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_format_info();
        self.draw_version_info();
    }
}

#[cfg(test)]
mod all_function_patterns_test {
    use test_case::test_case;

    use crate::builder::{Module, QR};
    use crate::common::version_db::version_info;

    #[test]
    fn test_all_function_patterns_5() {
        let mut qr = QR::new(version_info(5));
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFm....................Ffffffff\n\
             fFFFFFfFm....................FfFFFFFf\n\
             fFfffFfFM....................FfFfffFf\n\
             fFfffFfFm....................FfFfffFf\n\
             fFfffFfFM....................FfFfffFf\n\
             fFFFFFfFM....................FfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFm....................FFFFFFFF\n\
             mMmmMmfmM....................MmMMmMmm\n\
             ......F..............................\n\
             ......f..............................\n\
             ......F..............................\n\
             ......f..............................\n\
             ......F..............................\n\
             ......f..............................\n\
             ......F..............................\n\
             ......f..............................\n\
             ......F..............................\n\
             ......f..............................\n\
             ......F..............................\n\
             ......f..............................\n\
             ......F..............................\n\
             ......f..............................\n\
             ......F..............................\n\
             ......f..............................\n\
             ......F..............................\n\
             ......f..............................\n\
             ......F..............................\n\
             ......f.....................fffff....\n\
             FFFFFFFFm...................fFFFf....\n\
             fffffffFm...................fFfFf....\n\
             fFFFFFfFm...................fFFFf....\n\
             fFfffFfFM...................fffff....\n\
             fFfffFfFm............................\n\
             fFfffFfFm............................\n\
             fFFFFFfFM............................\n\
             fffffffFm............................\n"
        );
    }

    #[test]
    fn test_all_function_patterns_7() {
        let mut qr = QR::new(version_info(7));
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFm.........................VVvFfffffff\n\
             fFFFFFfFm.........................VvVFfFFFFFf\n\
             fFfffFfFM.........................VvVFfFfffFf\n\
             fFfffFfFm.........................VvvFfFfffFf\n\
             fFfffFfFM...........fffff.........vvvFfFfffFf\n\
             fFFFFFfFM...........fFFFf.........VVVFfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFm...........fFFFf............FFFFFFFF\n\
             mMmmMmfmM...........fffff............MmMMmMmm\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             VVVVvVf......................................\n\
             VvvvvVF......................................\n\
             vVVvvVf.............fffff...........fffff....\n\
             FFFFFFFFm...........fFFFf...........fFFFf....\n\
             fffffffFm...........fFfFf...........fFfFf....\n\
             fFFFFFfFm...........fFFFf...........fFFFf....\n\
             fFfffFfFM...........fffff...........fffff....\n\
             fFfffFfFm....................................\n\
             fFfffFfFm....................................\n\
             fFFFFFfFM....................................\n\
             fffffffFm....................................\n"
        );
    }

    // Modules left for data: every codeword bit plus the remainder bits
    #[test_case(5, 1079)]
    #[test_case(7, 1568)]
    fn test_encoding_region_size(version: u8, exp: usize) {
        let info = version_info(version);
        let mut qr = QR::new(info);
        qr.draw_all_function_patterns();
        let empty = qr.grid.iter().filter(|m| matches!(m, Module::Empty)).count();
        assert_eq!(empty, exp);
        assert!(empty >= info.total_bytes * 8);
        assert!(empty < info.total_bytes * 8 + 8);
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    // Fills every unpainted module in placement order with the next payload
    // bit under the mask. Bits past the end of the payload are zero.
    pub fn draw_payload(&mut self, mut payload: BitStream, mask: MaskPattern) {
        let mask_fn = mask.mask_function();
        for (r, c) in EncRegionIter::new(self.w) {
            if matches!(self.get(r, c), Module::Empty) {
                let bit = payload.next().unwrap_or(false) ^ mask_fn(r, c);
                self.set(r, c, Module::Data(Color::from(bit)));
            }
        }

        debug_assert!(self.is_fully_painted(), "Empty module found after drawing payload");
    }
}
