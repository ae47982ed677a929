//! Output files: JSON lines and table dumps

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// File or stdout (`-`)
#[must_use = "call .close() to propagate IO errors"]
pub enum Writer {
    Plain(BufWriter<File>),
    Stdout(io::Stdout),
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Writer::Plain(f) => f.write(buf),
            Writer::Stdout(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Writer::Plain(f) => f.flush(),
            Writer::Stdout(s) => s.flush(),
        }
    }
}

impl Writer {
    /// Flush everything down to the file
    pub fn close(self) -> io::Result<()> {
        match self {
            Writer::Plain(f) => {
                let mut file = f.into_inner().map_err(|e| e.into_error())?;
                file.flush()
            }
            Writer::Stdout(mut s) => s.flush(),
        }
    }

    /// Serialize `value` as one line of JSON
    pub fn json_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut *self, value).context("failed to serialize JSON line")?;
        self.write_all(b"\n")?;
        Ok(())
    }
}

/// Open `path` for writing, creating parent directories; `-` is stdout
pub fn open_writer<P: AsRef<Path>>(path: P) -> Result<Writer> {
    let p = path.as_ref();
    if p.to_string_lossy() == "-" {
        return Ok(Writer::Stdout(io::stdout()));
    }
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let f = File::create(p).with_context(|| format!("failed to create {}", p.display()))?;
    Ok(Writer::Plain(BufWriter::new(f)))
}

/// Write `value` as pretty JSON to `path`
pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let p = path.as_ref();
    let mut w = open_writer(p)?;
    serde_json::to_writer_pretty(&mut w, value)
        .with_context(|| format!("failed to write {}", p.display()))?;
    w.write_all(b"\n")?;
    w.close().with_context(|| format!("failed to close {}", p.display()))?;
    Ok(())
}
