//! functions for reading and writing count-prefixed f32 matrices
//!
//! layout: a little-endian u32 row count followed by that many rows of
//! `dim` little-endian f32 values, without padding or type tags.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, warn};

use crate::data_handling::dataset::VectorDataset;
use crate::error::{Error, Result};

const HEADER_BYTES: usize = 4;

/// read a matrix of `dim`-wide rows
///
/// reading stops when the declared count is exhausted or the file ends;
/// a trailing partial row is dropped.
pub fn read_bin(path: &Path, dim: usize) -> Result<VectorDataset<f32>> {
    if dim == 0 {
        return Err(Error::InvalidConfig(
            "rows must have at least one dimension".to_string(),
        ));
    }

    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let len = file.metadata().map_err(|e| Error::io(path, e))?.len() as usize;
    if len < HEADER_BYTES {
        return Err(Error::Truncated {
            path: path.to_path_buf(),
            len,
        });
    }

    // the file is only read while the map is alive and nothing in this crate writes to it
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::io(path, e))?;

    let mut header = [0u8; HEADER_BYTES];
    header.copy_from_slice(&mmap[..HEADER_BYTES]);
    let declared = u32::from_le_bytes(header) as usize;

    let row_bytes = dim * std::mem::size_of::<f32>();
    let body = &mmap[HEADER_BYTES..];
    let available = body.len() / row_bytes;
    let n = declared.min(available);

    if declared != available || body.len() % row_bytes != 0 {
        warn!(
            path = %path.display(),
            declared,
            available,
            trailing_bytes = body.len() % row_bytes,
            "row count does not match file size, keeping {n} rows"
        );
    }

    let data: Vec<f32> = body[..n * row_bytes]
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    debug!(path = %path.display(), n, dim, "read matrix");
    Ok(VectorDataset::new(data.into_boxed_slice(), n, dim))
}

/// write a dataset in the layout `read_bin` expects
pub fn write_bin(path: &Path, dataset: &VectorDataset<f32>) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let n = u32::try_from(dataset.n).map_err(|_| {
        Error::InvalidConfig(format!("{} rows do not fit a u32 header", dataset.n))
    })?;

    let write = |writer: &mut BufWriter<File>| -> std::io::Result<()> {
        writer.write_all(&n.to_le_bytes())?;
        for &value in dataset.as_slice() {
            writer.write_all(&value.to_le_bytes())?;
        }
        writer.flush()
    };
    write(&mut writer).map_err(|e| Error::io(path, e))
}
