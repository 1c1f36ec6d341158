/*!
A no_std reader for uncompressed Windows bitmaps held in memory.

The whole file is borrowed as a `&[u8]`. [`SourceImage::parse`] decodes the
54 byte header, after which rows can be pulled out top-to-bottom with the
4 byte row padding removed.

## Usage
```
# use embedded_bmp::{BmpError, SourceImage};
# fn main() -> Result<(), BmpError> {
# let data = [
#     b'B', b'M', 58, 0, 0, 0, 0, 0, 0, 0, 54, 0, 0, 0,
#     40, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 0,
#     0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
#     0, 0, 0, 0, 0, 0, 0, 0, 0x80, 0, 0, 0,
# ];
let image = SourceImage::parse(&data)?;
for row in image.rows(&data) {
    let row = row?;
    assert_eq!(row.len(), image.unpadded_row_bytes());
}
# Ok(())
# }
```

## Limitations & non-goals
- BITMAPINFOHEADER layout only
- no compression, palettes are not interpreted
- at most 16 bits per pixel
- bottom-up row order only (negative heights are rejected)
*/

#![no_std]

#[cfg(test)]
extern crate std;

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
    };
}

macro_rules! warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::warn!($($arg)*);
        #[cfg(test)]
        std::eprintln!($($arg)*);
    };
}

mod error;
mod header;
mod rows;

pub use error::{BmpError, FormatError};
pub use header::{
    FILE_HEADER_LEN, FileHeader, HEADER_LEN, INFO_HEADER_LEN, InfoHeader, MAX_BIT_DEPTH,
    SIGNATURE, SourceImage, encode_header,
};
pub use rows::Rows;

pub type Result<T> = core::result::Result<T, BmpError>;
