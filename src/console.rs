//! Line-oriented terminal input and output.
//!
//! The interpreter and its nested prompts read whole lines and print plain
//! text. Both ends are generic so tests can drive a session from a string.

use std::fmt::Display;
use std::io::{self, BufRead, Stdout, Write};

use crate::error::{Error, Result};

/// A line reader paired with an output sink.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, Stdout> {
    /// Console over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Read one line without its terminator. `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut raw = Vec::new();
        let n = self.input.read_until(b'\n', &mut raw).map_err(Error::Console)?;
        if n == 0 {
            return Ok(None);
        }
        let mut buf = String::from_utf8_lossy(&raw).into_owned();
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    /// Print `label` without a newline, then read the answer.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}").map_err(Error::Console)?;
        self.output.flush().map_err(Error::Console)?;
        self.read_line()
    }

    /// Print one line.
    pub fn say(&mut self, msg: impl Display) -> Result<()> {
        writeln!(self.output, "{msg}").map_err(Error::Console)
    }

    /// Consume the console and return the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines_and_eof() {
        let mut console = Console::new(Cursor::new("first\r\nsecond\n\nlast"), Vec::new());
        assert_eq!(console.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut console = Console::new(Cursor::new(b"caf\xE9\nnext\n".to_vec()), Vec::new());
        assert_eq!(console.read_line().unwrap().as_deref(), Some("caf\u{FFFD}"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("next"));
    }

    #[test]
    fn test_prompt_writes_label() {
        let mut console = Console::new(Cursor::new("yes\n"), Vec::new());
        assert_eq!(console.prompt("Continue? ").unwrap().as_deref(), Some("yes"));
        console.say("done").unwrap();
        assert_eq!(String::from_utf8(console.into_output()).unwrap(), "Continue? done\n");
    }
}
