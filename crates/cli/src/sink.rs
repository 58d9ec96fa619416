//! Result sinks.
//!
//! Output is written to a temporary file next to the destination and renamed
//! into place only once every row has been written, so an interrupted or
//! failed run never leaves a truncated result file behind.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A buffered file that only appears at its destination after `commit`.
pub struct AtomicSink {
    writer: BufWriter<NamedTempFile>,
    dest: PathBuf,
}

impl AtomicSink {
    pub fn create(dest: impl AsRef<Path>) -> Result<Self> {
        let dest = dest.as_ref().to_path_buf();
        let parent = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .with_context(|| format!("Could not create directory '{}'", parent.display()))?;
        let tmp = NamedTempFile::new_in(&parent).with_context(|| {
            format!("Could not create temporary file in '{}'", parent.display())
        })?;

        Ok(Self {
            writer: BufWriter::new(tmp),
            dest,
        })
    }

    /// Flush and atomically move the file to its destination.
    pub fn commit(self) -> Result<()> {
        let dest = self.dest;
        let tmp = self
            .writer
            .into_inner()
            .map_err(|e| e.into_error())
            .with_context(|| format!("Could not flush output for '{}'", dest.display()))?;
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("Could not sync output for '{}'", dest.display()))?;
        tmp.persist(&dest)
            .map_err(|e| e.error)
            .with_context(|| format!("Could not write '{}'", dest.display()))?;
        Ok(())
    }
}

impl Write for AtomicSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Write a dosage matrix: one line per locus, space-separated dosages.
pub fn write_dosage_rows<W: Write>(out: &mut W, rows: &[Vec<u32>]) -> io::Result<()> {
    for row in rows {
        let mut first = true;
        for dosage in row {
            if first {
                write!(out, "{dosage}")?;
                first = false;
            } else {
                write!(out, " {dosage}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write one `replicate,linkage_group,frequency` line per linkage group.
pub fn write_group_frequencies<W: Write>(
    out: &mut W,
    replicate: usize,
    frequencies: &[f64],
) -> io::Result<()> {
    for (group, freq) in frequencies.iter().enumerate() {
        writeln!(out, "{replicate},{group},{freq}")?;
    }
    Ok(())
}

/// Write a per-trial statistics table with a header row.
pub fn write_trial_rows<W: Write>(
    out: &mut W,
    header: &[String],
    rows: &[Vec<f64>],
) -> io::Result<()> {
    writeln!(out, "trial,{}", header.join(","))?;
    for (trial, row) in rows.iter().enumerate() {
        write!(out, "{trial}")?;
        for value in row {
            write!(out, ",{value}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write a per-trial statistics table to `path`.
pub fn save_trial_rows(path: &Path, header: &[String], rows: &[Vec<f64>]) -> Result<()> {
    let mut sink = AtomicSink::create(path)?;
    write_trial_rows(&mut sink, header, rows)
        .with_context(|| format!("Could not write '{}'", path.display()))?;
    sink.commit()
}
