use alloc::vec::Vec;

/// Characters taken by one `0x00, ` table entry.
pub const TOKEN_CHARS: usize = 6;
pub const DEFAULT_TABLE_WIDTH: usize = 16;

/// Declaration style of the emitted table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::EnumIter, strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum OutputMode {
    /// Plain `unsigned char` array with a size prefix.
    Raw,
    /// Pixel array plus a `GFXMeta` instance pointing at it.
    Named,
    /// `#define` dimensions and a bit-reversed array.
    Xbm,
    #[default]
    AnonymousStruct,
}

impl OutputMode {
    /// Raw wins over named, named over XBM.
    pub fn from_flags(raw: bool, named: bool, xbm: bool) -> Self {
        if raw {
            OutputMode::Raw
        } else if named {
            OutputMode::Named
        } else if xbm {
            OutputMode::Xbm
        } else {
            OutputMode::AnonymousStruct
        }
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }

    pub fn reflects_bits(&self) -> bool {
        matches!(self, OutputMode::Xbm)
    }

    pub fn has_size_prefix(&self) -> bool {
        matches!(self, OutputMode::Raw)
    }

    /// Raw tables are always `unsigned char`.
    pub fn uses_word_size(&self) -> bool {
        !matches!(self, OutputMode::Raw)
    }
}

/// Width of the dimension fields written in front of a raw table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeBytes {
    #[default]
    Auto,
    One,
    Two,
}

impl SizeBytes {
    /// `0` is auto, `1` one byte, `2` two bytes; other values wrap modulo 3.
    pub fn from_flag(value: u32) -> Self {
        match value % 3 {
            0 => SizeBytes::Auto,
            1 => SizeBytes::One,
            _ => SizeBytes::Two,
        }
    }

    /// Picks two bytes as soon as either dimension no longer fits in one.
    pub fn resolve(self, width: u32, height: u32) -> SizeBytes {
        match self {
            SizeBytes::Auto if width > 255 || height > 255 => SizeBytes::Two,
            SizeBytes::Auto => SizeBytes::One,
            other => other,
        }
    }

    /// Size prefix bytes: `w, h` or `w_hi, w_lo, h_hi, h_lo`.
    pub fn prefix(self, width: u32, height: u32) -> Vec<u8> {
        match self.resolve(width, height) {
            SizeBytes::Two => alloc::vec![
                (width >> 8) as u8,
                width as u8,
                (height >> 8) as u8,
                height as u8,
            ],
            _ => alloc::vec![width as u8, height as u8],
        }
    }
}

/// Element type of the pixel array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordSize {
    #[default]
    Byte,
    Word,
}

impl WordSize {
    /// C type as spliced into declarations, pointer star included.
    pub fn c_type(&self) -> &'static str {
        match self {
            WordSize::Byte => "uint8_t *",
            WordSize::Word => "uint16_t *",
        }
    }

    pub fn byte_len(&self) -> usize {
        match self {
            WordSize::Byte => 1,
            WordSize::Word => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexCase {
    /// `0x0f`
    #[default]
    Lower,
    /// `0x0F`, the prefix stays lower case
    Upper,
}

/// Fixed names baked into the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defaults {
    pub struct_name: &'static str,
    pub version: &'static str,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            struct_name: "GFXMeta",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Everything that shapes the text output. Built once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmissionConfig {
    table_width: usize,
    size_bytes: SizeBytes,
    invert: bool,
    mode: OutputMode,
    word_size: WordSize,
    hex_case: HexCase,
    defaults: Defaults,
}

impl Default for EmissionConfig {
    fn default() -> Self {
        Self::new(OutputMode::default())
    }
}

impl EmissionConfig {
    pub fn new(mode: OutputMode) -> Self {
        EmissionConfig {
            table_width: DEFAULT_TABLE_WIDTH,
            size_bytes: SizeBytes::Auto,
            invert: false,
            mode,
            word_size: WordSize::Byte,
            hex_case: HexCase::Lower,
            defaults: Defaults::default(),
        }
    }

    /// Table width in hex bytes per line.
    pub fn with_table_width(mut self, table_width: usize) -> Self {
        self.table_width = table_width;
        self
    }

    pub fn with_size_bytes(mut self, size_bytes: SizeBytes) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_word_size(mut self, word_size: WordSize) -> Self {
        if word_size != WordSize::Byte && !self.mode.uses_word_size() {
            log::warn!("Word size is ignored in {} mode", self.mode.label());
        }
        self.word_size = word_size;
        self
    }

    pub fn with_hex_case(mut self, hex_case: HexCase) -> Self {
        self.hex_case = hex_case;
        self
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn table_width(&self) -> usize {
        self.table_width
    }

    pub fn table_width_chars(&self) -> usize {
        self.table_width.saturating_mul(TOKEN_CHARS)
    }

    pub fn size_bytes(&self) -> SizeBytes {
        self.size_bytes
    }

    pub fn invert(&self) -> bool {
        self.invert
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Word size actually applied, `Byte` for raw tables.
    pub fn word_size(&self) -> WordSize {
        if self.mode.uses_word_size() {
            self.word_size
        } else {
            WordSize::Byte
        }
    }

    pub fn hex_case(&self) -> HexCase {
        self.hex_case
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }
}
