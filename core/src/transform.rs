use embedded_bmp::{BmpError, Rows, SourceImage};

use crate::{EmissionConfig, OutputMode};

/// Reverses the bit order of a byte.
pub fn reflect(mut byte: u8) -> u8 {
    let mut reflected = 0u8;
    for _ in 0..8 {
        reflected <<= 1;
        reflected |= byte & 0x01;
        byte >>= 1;
    }
    reflected
}

/// XOR mask applied to every pixel byte.
///
/// 1-bit bitmaps store set bits as the palette's second entry, usually white,
/// so their polarity is flipped relative to the `invert` flag.
pub fn invert_mask(invert: bool, bit_depth: u16) -> u8 {
    if invert ^ (bit_depth == 1) { 0xFF } else { 0x00 }
}

pub fn transform(byte: u8, mask: u8, mode: OutputMode) -> u8 {
    let value = byte ^ mask;
    if mode.reflects_bits() { reflect(value) } else { value }
}

/// Transformed pixel bytes, top row first, left to right.
///
/// Rows are pulled from the file buffer on demand. The stream ends after
/// yielding the first error.
pub struct ByteStream<'d> {
    rows: Rows<'d>,
    current: &'d [u8],
    mask: u8,
    mode: OutputMode,
}

impl<'d> ByteStream<'d> {
    pub fn new(image: &SourceImage, data: &'d [u8], config: &EmissionConfig) -> Self {
        ByteStream {
            rows: image.rows(data),
            current: &[],
            mask: invert_mask(config.invert(), image.bit_depth()),
            mode: config.mode(),
        }
    }
}

impl Iterator for ByteStream<'_> {
    type Item = Result<u8, BmpError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((&byte, rest)) = self.current.split_first() {
                self.current = rest;
                return Some(Ok(transform(byte, self.mask, self.mode)));
            }
            match self.rows.next()? {
                Ok(row) => self.current = row,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl core::iter::FusedIterator for ByteStream<'_> {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::fixtures::bmp;

    #[test]
    fn reflect_reverses_bits() {
        assert_eq!(reflect(0b1000_0000), 0b0000_0001);
        assert_eq!(reflect(0b1100_1010), 0b0101_0011);
        assert_eq!(reflect(0x00), 0x00);
        assert_eq!(reflect(0xFF), 0xFF);
    }

    #[test]
    fn reflect_twice_is_identity() {
        for byte in 0..=u8::MAX {
            assert_eq!(reflect(reflect(byte)), byte);
        }
    }

    #[test]
    fn one_bit_polarity_is_flipped() {
        assert_eq!(invert_mask(false, 1), 0xFF);
        assert_eq!(invert_mask(true, 1), 0x00);
        assert_eq!(invert_mask(false, 4), 0x00);
        assert_eq!(invert_mask(true, 8), 0xFF);
    }

    #[test]
    fn transform_applies_mask_then_reflection() {
        assert_eq!(transform(0x0F, 0xFF, OutputMode::Raw), 0xF0);
        assert_eq!(transform(0x0F, 0x00, OutputMode::Xbm), 0xF0);
        assert_eq!(transform(0x01, 0xFF, OutputMode::Xbm), 0x7F);
        assert_eq!(transform(0x01, 0x00, OutputMode::Named), 0x01);
    }

    #[test]
    fn stream_runs_top_to_bottom() {
        // bottom row stored first
        let data = bmp(16, 2, 8, &[&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16],
                                    &[17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32]]);
        let image = SourceImage::parse(&data).unwrap();
        let config = EmissionConfig::new(OutputMode::Raw);
        let bytes: Vec<u8> = ByteStream::new(&image, &data, &config).map(|b| b.unwrap()).collect();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[..16], [17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32]);
        assert_eq!(bytes[16..], [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
    }

    #[test]
    fn stream_stops_at_truncation() {
        let data = bmp(8, 2, 1, &[&[0x00], &[0x00]]);
        // top row missing
        let data = &data[..data.len() - 4];
        let image = SourceImage::parse(data).unwrap();
        let config = EmissionConfig::default();
        let mut stream = ByteStream::new(&image, data, &config);
        assert!(matches!(stream.next(), Some(Err(BmpError::OutOfBounds { row: 0, .. }))));
        assert!(stream.next().is_none());
    }
}
