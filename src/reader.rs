use crate::error::ShellError;
use std::io::BufRead;

/// Read one line, terminator included, blocking until it is complete.
///
/// Returns `Ok(None)` at end of input. A last line without a trailing newline is still
/// returned as a line. The bytes are returned as read; they need not be UTF-8.
pub fn read_line(input: &mut impl BufRead) -> Result<Option<Vec<u8>>, ShellError> {
    let mut line = Vec::new();
    let n = input.read_until(b'\n', &mut line).map_err(ShellError::Read)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
