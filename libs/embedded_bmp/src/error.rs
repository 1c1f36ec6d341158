/// Reasons a buffer is rejected before any pixel data is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("not a BMP file")]
    InvalidSignature,

    #[error("truncated header: {len} bytes, need {need}", need = crate::HEADER_LEN)]
    TruncatedHeader { len: usize },

    #[error("unsupported bit depth (max {max}): {0}", max = crate::MAX_BIT_DEPTH)]
    UnsupportedBitDepth(u16),

    #[error("unsupported negative pixel width: {0}")]
    NegativeWidth(i32),

    #[error("unsupported negative pixel height: {0}")]
    NegativeHeight(i32),

    #[error("dimensions too large: {width}x{height} at {bit_depth} bpp")]
    DimensionsTooLarge { width: u32, height: u32, bit_depth: u16 },
}

/// Error type for header decoding and row access
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BmpError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("truncated pixel data: row {row} needs {needed} bytes, file has {available}")]
    OutOfBounds {
        row: u32,
        needed: usize,
        available: usize,
    },

    #[error("row {row} out of range for height {height}")]
    RowOutOfRange { row: u32, height: u32 },
}

impl BmpError {
    pub fn is_format_error(&self) -> bool {
        matches!(self, BmpError::Format(_))
    }
}
