use alloc::vec;
use alloc::vec::Vec;

use embedded_bmp::{HEADER_LEN, encode_header};

/// Byte used for row padding so leaked padding shows up in assertions.
pub const PAD: u8 = 0xAA;

/// Builds a bottom-up BMP. `rows` are in stored order, bottom row first.
pub fn bmp(width: u32, height: u32, bit_depth: u16, rows: &[&[u8]]) -> Vec<u8> {
    let stride = (width as usize * bit_depth as usize).div_ceil(8).div_ceil(4) * 4;
    let pixel_len = stride * rows.len();

    let mut data = Vec::with_capacity(HEADER_LEN + pixel_len);
    data.extend_from_slice(&encode_header(width as i32, height as i32, bit_depth, pixel_len as u32));

    for row in rows {
        let mut padded = vec![PAD; stride];
        padded[..row.len()].copy_from_slice(row);
        data.extend_from_slice(&padded);
    }
    data
}

/// `height` identical rows of `row`.
pub fn uniform(width: u32, height: u32, bit_depth: u16, row: &[u8]) -> Vec<u8> {
    let rows = vec![row; height as usize];
    bmp(width, height, bit_depth, &rows)
}
