// On-screen hex dump

use core::fmt;

use super::hexdump::write_hex_rows;
use super::Section;
use crate::console::Console;

/// Render `section` to the console.
///
/// Each byte is shown as `XX ` and every row of 16 bytes starts on a fresh
/// line. An absent section prints its notice instead.
pub fn render_to_display<C: Console>(console: &mut C, section: &Section<'_>) -> fmt::Result {
    match section.data {
        Some(data) => {
            console.write_str(section.label)?;
            write_hex_rows(console, data, " ", |c| {
                c.clear_line();
                Ok(())
            })?;
            console.clear_line();
        }
        None => {
            console.write_str(section.missing)?;
            console.clear_line();
        }
    }
    Ok(())
}
