//! Output rendering: secrets as four-space indented JSON, plain values as-is.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::CliError;

const JSON_INDENT: &[u8] = b"    ";

/// Pretty-printed JSON indented with four spaces.
pub fn render_json<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    data.serialize(&mut Serializer::with_formatter(&mut buf, formatter))?;
    String::from_utf8(buf)
        .map_err(|e| CliError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Print the rendered output to stdout.
///
/// A failed write is an error: after `create` or `refresh` the printed secret
/// is the only copy of the new key.
pub fn print_output(output: &str) -> Result<(), CliError> {
    write_output(&mut io::stdout().lock(), output)
}

pub(crate) fn write_output<W: Write>(out: &mut W, output: &str) -> Result<(), CliError> {
    if output.is_empty() {
        return Ok(());
    }
    writeln!(out, "{output}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Writer whose every write fails like a closed pipe.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn indents_with_four_spaces() {
        let rendered = render_json(&json!({ "metadata": { "name": "x" } })).unwrap();
        assert_eq!(
            rendered,
            "{\n    \"metadata\": {\n        \"name\": \"x\"\n    }\n}"
        );
    }

    #[test]
    fn writes_line_terminated_output() {
        let mut out = Vec::new();
        write_output(&mut out, "key-1").unwrap();
        assert_eq!(out, b"key-1\n");
    }

    #[test]
    fn write_failure_is_reported() {
        let err = write_output(&mut ClosedPipe, "{\"kind\": \"Secret\"}").unwrap_err();
        assert!(
            matches!(err, CliError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe),
            "{err:?}"
        );
        assert_eq!(err.exit_code(), crate::error::exit_code::UNKNOWN);
    }
}
