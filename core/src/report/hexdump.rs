// Uppercase hex rows

use core::fmt;

/// Bytes per rendered row.
pub const BYTES_PER_ROW: usize = 16;

/// Write `bytes` as two uppercase hex digits each, followed by `separator`.
///
/// `row_break` runs before the first byte of every row, so a buffer of
/// `n` bytes gets `ceil(n / 16)` breaks and the caller terminates the last
/// row itself.
pub fn write_hex_rows<W, F>(out: &mut W, bytes: &[u8], separator: &str, mut row_break: F) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    F: FnMut(&mut W) -> fmt::Result,
{
    for (i, byte) in bytes.iter().enumerate() {
        if i % BYTES_PER_ROW == 0 {
            row_break(out)?;
        }
        write!(out, "{:02X}{}", byte, separator)?;
    }
    Ok(())
}
