//! Hexdump command implementation.
//!
//! ```text
//! 0xDBFD38: 48 65 6C 6C 6F 20 57 6F  72 6C 64 00 00 00 00 00  |Hello World.....|
//! ```

use anyhow::Result;
use i7_core::MemoryAccessor;

use crate::App;

/// Run the hexdump command
pub fn run(app: &App, address: u64, size: usize, ascii: bool) -> Result<()> {
    let bytes = app.memory.read_bytes(app.process(), address, size)?;

    println!("Hexdump at 0x{:X} ({} bytes):", address, size);
    println!();
    for (i, chunk) in bytes.chunks(16).enumerate() {
        println!("{}", format_line(address + (i * 16) as u64, chunk, ascii));
    }
    Ok(())
}

/// One 16-byte row with absolute address, hex bytes and optional ASCII
pub fn format_line(address: u64, chunk: &[u8], ascii: bool) -> String {
    let mut line = format!("0x{:06X}: ", address);

    for j in 0..16 {
        if j == 8 {
            line.push(' ');
        }
        match chunk.get(j) {
            Some(byte) => line.push_str(&format!("{:02X} ", byte)),
            None => line.push_str("   "),
        }
    }

    if ascii {
        line.push_str(" |");
        for j in 0..16 {
            line.push(match chunk.get(j) {
                Some(&b) if (0x20..0x7F).contains(&b) => b as char,
                Some(_) => '.',
                None => ' ',
            });
        }
        line.push('|');
    }
    line
}
