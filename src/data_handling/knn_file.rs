//! knn result files: `k` little-endian u32 ids per query, no header

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// fixed-width knn results, one row of `k` ids per query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnnResults {
    ids: Box<[u32]>,
    pub n: usize,
    pub k: usize,
}

impl KnnResults {
    pub fn new(n: usize, k: usize, ids: Vec<u32>) -> KnnResults {
        assert_eq!(ids.len(), n * k, "Result array size mismatch");
        KnnResults {
            ids: ids.into_boxed_slice(),
            n,
            k,
        }
    }

    /// returns the ids found for a query
    pub fn get_neighbors(&self, i: usize) -> &[u32] {
        let start = i * self.k;
        &self.ids[start..start + self.k]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.ids.chunks_exact(self.k)
    }

    /// writes the rows back to back in the same layout as `write_knn`
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let write = |writer: &mut BufWriter<File>| -> std::io::Result<()> {
            for &id in self.ids.iter() {
                writer.write_all(&id.to_le_bytes())?;
            }
            writer.flush()
        };
        write(&mut writer).map_err(|e| Error::io(path, e))
    }
}

/// writes result rows back to back
///
/// only the first row's width is checked against `k`; the remaining rows are
/// written as they are.
pub fn write_knn(path: &Path, rows: &[Vec<u32>], k: usize) -> Result<()> {
    if let Some(first) = rows.first() {
        if first.len() != k {
            return Err(Error::ResultWidth {
                expected: k,
                found: first.len(),
            });
        }
    }

    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let write = |writer: &mut BufWriter<File>| -> std::io::Result<()> {
        for &id in rows.iter().flatten() {
            writer.write_all(&id.to_le_bytes())?;
        }
        writer.flush()
    };
    write(&mut writer).map_err(|e| Error::io(path, e))
}

/// reads a result file written with `k` ids per row, dropping a trailing partial row
pub fn read_knn(path: &Path, k: usize) -> Result<KnnResults> {
    if k == 0 {
        return Err(Error::InvalidConfig("k must be positive".to_string()));
    }

    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(|e| Error::io(path, e))?;

    let n = bytes.len() / (k * 4);
    let ids: Vec<u32> = bytes[..n * k * 4]
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(KnnResults::new(n, k, ids))
}

