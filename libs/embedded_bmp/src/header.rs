use zerocopy::{FromBytes, IntoBytes};
use zerocopy::byteorder::little_endian::{I32, U16, U32};

use crate::{FormatError, Result};

pub const SIGNATURE: [u8; 2] = *b"BM";
pub const MAX_BIT_DEPTH: u16 = 16;

pub const FILE_HEADER_LEN: usize = core::mem::size_of::<FileHeader>();
pub const INFO_HEADER_LEN: usize = core::mem::size_of::<InfoHeader>();
pub const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// BITMAPFILEHEADER, always little endian.
#[repr(C)]
#[derive(
    zerocopy::FromBytes,
    zerocopy::IntoBytes,
    zerocopy::Immutable,
    zerocopy::KnownLayout,
    zerocopy::Unaligned,
)]
pub struct FileHeader {
    pub signature: [u8; 2],
    pub file_size: U32,
    pub reserved: [u8; 4],
    pub data_offset: U32,
}

/// BITMAPINFOHEADER, directly following the file header.
#[repr(C)]
#[derive(
    zerocopy::FromBytes,
    zerocopy::IntoBytes,
    zerocopy::Immutable,
    zerocopy::KnownLayout,
    zerocopy::Unaligned,
)]
pub struct InfoHeader {
    pub header_size: U32,
    pub width: I32,
    pub height: I32,
    pub planes: U16,
    pub bit_depth: U16,
    pub compression: U32,
    pub image_size: U32,
    pub x_pixels_per_meter: I32,
    pub y_pixels_per_meter: I32,
    pub colors_used: U32,
    pub colors_important: U32,
}

/// Header of an uncompressed bitmap whose pixel data directly follows it.
pub fn encode_header(width: i32, height: i32, bit_depth: u16, pixel_len: u32) -> [u8; HEADER_LEN] {
    let file = FileHeader {
        signature: SIGNATURE,
        file_size: U32::new((HEADER_LEN as u32).saturating_add(pixel_len)),
        reserved: [0; 4],
        data_offset: U32::new(HEADER_LEN as u32),
    };
    let info = InfoHeader {
        header_size: U32::new(INFO_HEADER_LEN as u32),
        width: I32::new(width),
        height: I32::new(height),
        planes: U16::new(1),
        bit_depth: U16::new(bit_depth),
        compression: U32::new(0),
        image_size: U32::new(pixel_len),
        x_pixels_per_meter: I32::new(0),
        y_pixels_per_meter: I32::new(0),
        colors_used: U32::new(0),
        colors_important: U32::new(0),
    };
    let mut header = [0u8; HEADER_LEN];
    header[..FILE_HEADER_LEN].copy_from_slice(file.as_bytes());
    header[FILE_HEADER_LEN..].copy_from_slice(info.as_bytes());
    header
}

/// Geometry of a decoded bitmap.
///
/// Holds no reference to the file buffer; rows are looked up by passing the
/// same buffer back to [`SourceImage::row`] or [`SourceImage::rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    bit_depth: u16,
    planes: u16,
    data_offset: u32,
    header_size: u32,
    compression: u32,
    image_size: u32,
    unpadded_row_bytes: usize,
    row_stride: usize,
}

impl SourceImage {
    /// Decodes the header at the start of `data`.
    ///
    /// The signature is checked first; nothing else is read from a buffer
    /// that does not start with `BM`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.get(..SIGNATURE.len()) != Some(&SIGNATURE[..]) {
            return Err(FormatError::InvalidSignature.into());
        }
        if data.len() < HEADER_LEN {
            return Err(FormatError::TruncatedHeader { len: data.len() }.into());
        }

        let truncated = FormatError::TruncatedHeader { len: data.len() };
        let file = FileHeader::read_from_bytes(&data[..FILE_HEADER_LEN]).map_err(|_| truncated)?;
        let info = InfoHeader::read_from_bytes(&data[FILE_HEADER_LEN..HEADER_LEN])
            .map_err(|_| truncated)?;

        let bit_depth = info.bit_depth.get();
        let width = info.width.get();
        let height = info.height.get();
        if bit_depth > MAX_BIT_DEPTH {
            return Err(FormatError::UnsupportedBitDepth(bit_depth).into());
        }
        if width < 0 {
            return Err(FormatError::NegativeWidth(width).into());
        }
        if height < 0 {
            return Err(FormatError::NegativeHeight(height).into());
        }
        let (width, height) = (width as u32, height as u32);

        let too_large = FormatError::DimensionsTooLarge { width, height, bit_depth };
        let row_bits = u64::from(width) * u64::from(bit_depth);
        let unpadded_row_bytes = usize::try_from(row_bits.div_ceil(8)).map_err(|_| too_large)?;
        let row_stride = unpadded_row_bytes
            .div_ceil(4)
            .checked_mul(4)
            .ok_or(too_large)?;

        let image = SourceImage {
            width,
            height,
            bit_depth,
            planes: info.planes.get(),
            data_offset: file.data_offset.get(),
            header_size: info.header_size.get(),
            compression: info.compression.get(),
            image_size: info.image_size.get(),
            unpadded_row_bytes,
            row_stride,
        };

        debug!(
            "Parsed BMP header: {}x{} {}bpp, data offset {}, stride {}",
            image.width, image.height, image.bit_depth, image.data_offset, image.row_stride
        );
        if image.compression != 0 {
            warn!("BMP compression {} is not decoded, reading raw bytes", image.compression);
        }
        if image.planes != 1 {
            warn!("BMP declares {} color planes", image.planes);
        }

        Ok(image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
    }

    pub fn planes(&self) -> u16 {
        self.planes
    }

    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    pub fn header_size(&self) -> u32 {
        self.header_size
    }

    pub fn compression(&self) -> u32 {
        self.compression
    }

    /// Image data size as declared in the header. Often zero.
    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    /// Pixel bytes per row, without padding.
    pub fn unpadded_row_bytes(&self) -> usize {
        self.unpadded_row_bytes
    }

    /// Bytes per row as stored, padded to a multiple of 4.
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Number of unpadded pixel bytes over all rows.
    pub fn pixel_bytes(&self) -> usize {
        self.unpadded_row_bytes.saturating_mul(self.height as usize)
    }
}
