use crate::domain::{MscgenError, OutputType};
use std::io::{self, ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Runs `mscgen` on `code` and returns whatever it wrote to stdout.
///
/// The invocation is `<program> <args...> -T <svg|png> -o -` with the chart
/// fed through stdin as ISO-8859-1. A non-zero exit status is an error that
/// carries the chart source and the renderer's stderr.
pub fn render_native(
    program: &str,
    args: &[String],
    code: &str,
    output: OutputType,
) -> Result<Vec<u8>, MscgenError> {
    let input = encode_latin1(code)?;

    let program_path = which::which(program).map_err(|source| MscgenError::RendererNotFound {
        program: program.to_string(),
        source,
    })?;

    let mut command = Command::new(&program_path);
    command.args(args);

    // Input from stdin, output to stdout
    command.args(["-T", output.as_arg(), "-o", "-"]);

    log::debug!("running {:?}", command);

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| MscgenError::Spawn {
            program: program.to_string(),
            source,
        })?;

    // stdin is fed from its own thread while stdout and stderr drain below.
    let writer = child.stdin.take().map(|mut stdin| {
        thread::spawn(move || match stdin.write_all(&input) {
            // The exit status tells the real story.
            Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
            other => other,
        }) // stdin dropped here, mscgen sees EOF
    });

    let finished = child.wait_with_output()?;
    if let Some(writer) = writer {
        writer
            .join()
            .map_err(|_| io::Error::other("mscgen stdin writer panicked"))??;
    }

    if finished.status.success() {
        Ok(finished.stdout)
    } else {
        Err(MscgenError::Renderer {
            code: code.to_string(),
            stderr: String::from_utf8_lossy(&finished.stderr).trim().to_string(),
        })
    }
}

/// mscgen only reads single-byte input.
pub fn encode_latin1(text: &str) -> Result<Vec<u8>, MscgenError> {
    text.char_indices()
        .map(|(offset, ch)| u8::try_from(u32::from(ch)).map_err(|_| MscgenError::Encoding { ch, offset }))
        .collect()
}
