// Packing codec: one palette symbol for on-table bytes, a contiguous
// escape pair (2-bit selector, low six bits) for everything else.
use crate::core::error::{Error, ErrorKind};
use crate::core::palette::{self, ESCAPE_BASE, LOW_MASK};
use crate::core::table::Table;

/// Encode `input` against `table`. Every byte is representable, so the
/// encoder cannot fail; output symbols follow input order.
pub fn encode(input: &[u8], table: &Table) -> String {
    let mut out = String::with_capacity(input.len());
    for &byte in input {
        match table.position(byte) {
            Some(position) => out.push(palette::symbol(position) as char),
            None => {
                out.push(palette::symbol(ESCAPE_BASE + (byte >> 6) as usize) as char);
                out.push(palette::symbol((byte & LOW_MASK) as usize) as char);
            }
        }
    }
    out
}

/// Decode `text` against `table`, inverting [`encode`].
///
/// Any palette symbol is a valid low-bits carrier after an escape prefix;
/// a symbol outside the palette or a trailing escape prefix is malformed.
pub fn decode(text: &str, table: &Table) -> Result<Vec<u8>, Error> {
    let symbols = text.as_bytes();
    let mut out = Vec::with_capacity(symbols.len());
    let mut offset = 0;

    while offset < symbols.len() {
        let index = palette_index(symbols, offset)?;
        if index < ESCAPE_BASE {
            out.push(table.byte_at(index));
            offset += 1;
            continue;
        }

        if offset + 1 >= symbols.len() {
            return Err(Error::new(ErrorKind::MalformedInput)
                .with_message("escape prefix at end of input")
                .with_offset(offset as u64));
        }
        let low = palette_index(symbols, offset + 1)?;
        out.push((((index - ESCAPE_BASE) << 6) | low) as u8);
        offset += 2;
    }

    Ok(out)
}

fn palette_index(symbols: &[u8], offset: usize) -> Result<usize, Error> {
    palette::index_of(symbols[offset]).ok_or_else(|| {
        Error::new(ErrorKind::MalformedInput)
            .with_message(format!(
                "symbol {:?} outside palette",
                symbols[offset] as char
            ))
            .with_offset(offset as u64)
    })
}
