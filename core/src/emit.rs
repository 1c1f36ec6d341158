use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use embedded_bmp::{BmpError, SourceImage};
use log::{debug, info};

use crate::{ByteStream, ConvertError, EmissionConfig, HexCase, OutputMode, WordSize};

/// C identifier a table is declared under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    /// Upper-cases `name` and replaces anything that can't appear in an
    /// identifier with `_`.
    pub fn new(name: &str) -> Self {
        let mut ident = String::with_capacity(name.len() + 1);
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            ident.push('_');
        }
        for c in name.chars() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c.to_ascii_uppercase());
            } else {
                ident.push('_');
            }
        }
        if ident.is_empty() {
            ident.push_str("BITMAP");
        }
        TableName(ident)
    }

    /// Derives the name from the file stem of `path`.
    pub fn from_path(path: &str) -> Self {
        let file_name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
        let stem = match file_name.rfind('.') {
            None | Some(0) => file_name,
            Some(dot) => &file_name[..dot],
        };
        Self::new(stem)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn hex(value: u16, digits: usize, case: HexCase) -> String {
    match case {
        HexCase::Lower => format!("0x{value:0digits$x}"),
        HexCase::Upper => format!("0x{value:0digits$X}"),
    }
}

/// Table entries for `bytes`. Words pair bytes big endian, an odd tail byte
/// gets a zero low byte.
fn hex_tokens(bytes: &[u8], word_size: WordSize, case: HexCase) -> Vec<String> {
    match word_size {
        WordSize::Byte => bytes.iter().map(|&b| hex(u16::from(b), 2, case)).collect(),
        WordSize::Word => bytes
            .chunks(2)
            .map(|pair| {
                let low = pair.get(1).copied().unwrap_or(0);
                hex(u16::from_be_bytes([pair[0], low]), 4, case)
            })
            .collect(),
    }
}

/// Greedily fills lines of at most `width` characters with comma separated
/// tokens. The last token carries no comma. A line always holds at least one
/// token.
pub fn wrap<S: AsRef<str>>(tokens: &[S], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let last = tokens.len().saturating_sub(1);
    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let piece = token.len() + usize::from(i != last);
        if !line.is_empty() && line.len() + 1 + piece > width {
            lines.push(core::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(token);
        if i != last {
            line.push(',');
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn write_lines<W: Write + ?Sized>(out: &mut W, lines: &[String]) -> fmt::Result {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn write_version<W: Write + ?Sized>(out: &mut W, config: &EmissionConfig) -> fmt::Result {
    writeln!(out, "// bmp2hex version {}", config.defaults().version)
}

/// Struct type shared by every table in named mode. Written once, ahead of
/// the first table.
pub fn write_struct_definition<W: Write + ?Sized>(
    out: &mut W,
    config: &EmissionConfig,
) -> fmt::Result {
    writeln!(out, "struct {} {{", config.defaults().struct_name)?;
    writeln!(out, "  unsigned   int width;")?;
    writeln!(out, "  unsigned   int height;")?;
    writeln!(out, "  unsigned   int bitDepth;")?;
    writeln!(out, "             int baseline;")?;
    writeln!(out, "  {}pixel_data;", config.word_size().c_type())?;
    writeln!(out, "}};")?;
    writeln!(out)
}

/// Writes the declaration block for one bitmap, followed by a blank line.
///
/// All pixel bytes are read before anything is written, so a truncated file
/// leaves `out` untouched. Returns the number of table entries written,
/// size prefix included.
pub fn render<W: Write + ?Sized>(
    out: &mut W,
    image: &SourceImage,
    data: &[u8],
    name: &TableName,
    config: &EmissionConfig,
) -> Result<usize, ConvertError> {
    let pixels = ByteStream::new(image, data, config).collect::<Result<Vec<u8>, BmpError>>()?;

    let (width, height, depth) = (image.width(), image.height(), image.bit_depth());
    let word_size = config.word_size();
    let ty = word_size.c_type();
    let tokens = hex_tokens(&pixels, word_size, config.hex_case());
    let table = wrap(&tokens, config.table_width_chars());
    let mut entries = tokens.len();
    debug!("{name}: {} pixel bytes in {} lines", pixels.len(), table.len());

    match config.mode() {
        OutputMode::Raw => {
            let prefix = config.size_bytes().prefix(width, height);
            let prefix = hex_tokens(&prefix, WordSize::Byte, config.hex_case());
            entries += prefix.len();
            writeln!(out, "PROGMEM unsigned char const {name} [] = {{")?;
            writeln!(out, "{},", prefix.join(", "))?;
            write_lines(out, &table)?;
            writeln!(out, "}};")?;
        }
        OutputMode::Named => {
            writeln!(out, "PROGMEM {ty} const {name}_PIXELS[] = {{")?;
            write_lines(out, &table)?;
            writeln!(out, "}};")?;
            writeln!(
                out,
                "{} const {name} = {{{width}, {height}, {depth}, 0, {ty}{name}_PIXELS}};",
                config.defaults().struct_name
            )?;
        }
        OutputMode::Xbm => {
            writeln!(out, "#define {name}_width {width}")?;
            writeln!(out, "#define {name}_height {height}")?;
            writeln!(out, "PROGMEM {ty} const {name}_bits[] = {{")?;
            write_lines(out, &table)?;
            writeln!(out, "}};")?;
        }
        OutputMode::AnonymousStruct => {
            writeln!(out, "PROGMEM const struct {{")?;
            writeln!(out, "  unsigned int   width;")?;
            writeln!(out, "  unsigned int   height;")?;
            writeln!(out, "  unsigned int   bitDepth;")?;
            writeln!(out, "  {ty}pixel_data[{}];", tokens.len())?;
            writeln!(out, "}} {name} = {{")?;
            writeln!(out, "{width}, {height}, {depth}, {{")?;
            write_lines(out, &table)?;
            writeln!(out, "}}")?;
            writeln!(out, "}};")?;
        }
    }
    writeln!(out)?;

    info!(
        "Converted {name}: {width}x{height} {depth}bpp as {}, {entries} entries",
        config.mode().label()
    );
    Ok(entries)
}

/// Parses `data` and renders it into a fresh string.
pub fn convert(
    data: &[u8],
    name: &TableName,
    config: &EmissionConfig,
) -> Result<String, ConvertError> {
    let image = SourceImage::parse(data)?;
    let mut out = String::new();
    render(&mut out, &image, data, name, config)?;
    Ok(out)
}
