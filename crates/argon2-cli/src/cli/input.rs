use std::io::Read;

use anyhow::Context;

/// Read the password from stdin, without one trailing line break.
pub fn read_password() -> anyhow::Result<String> {
    let mut raw = Vec::new();
    std::io::stdin()
        .read_to_end(&mut raw)
        .context("failed to read password from stdin")?;
    Ok(argon2_ffi::password_from_utf8(strip_line_break(&raw))?.to_string())
}

fn strip_line_break(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}
