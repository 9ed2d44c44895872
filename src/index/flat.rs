use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::{debug, info};

use super::error::IndexError;
use super::{IndexHit, VectorIndex};

/// File magic for the flat inner-product index.
pub const INDEX_MAGIC: &[u8; 8] = b"EMSALIDX";

/// Current on-disk format version.
pub const INDEX_VERSION: u32 = 1;

/// Header: magic (8) + version (u32) + dim (u32) + count (u64).
pub const INDEX_HEADER_LEN: usize = 24;

const F32_SIZE: usize = std::mem::size_of::<f32>();

/// Exact inner-product index over a memory-mapped row-major `f32` matrix.
///
/// Layout is the 24-byte header followed by `count * dim` little-endian `f32`s.
/// The map is read-only; the file is produced offline by [`FlatIpIndex::write`].
pub struct FlatIpIndex {
    mmap: Mmap,
    dim: usize,
    count: usize,
    path: PathBuf,
}

impl std::fmt::Debug for FlatIpIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatIpIndex")
            .field("path", &self.path)
            .field("dim", &self.dim)
            .field("count", &self.count)
            .finish()
    }
}

impl FlatIpIndex {
    /// Maps and validates the index at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, IndexError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IndexError::io(path, e))?;
        let file_len = file.metadata().map_err(|e| IndexError::io(path, e))?.len() as usize;

        if file_len < INDEX_HEADER_LEN {
            return Err(IndexError::Truncated {
                path: path.to_path_buf(),
                expected: INDEX_HEADER_LEN,
                actual: file_len,
            });
        }

        // SAFETY: the map is read-only and the index file is not modified while served.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| IndexError::io(path, e))?;

        let header = parse_header(&mmap, path)?;
        let expected = header
            .count
            .checked_mul(header.dim)
            .and_then(|values| values.checked_mul(F32_SIZE))
            .and_then(|body| body.checked_add(INDEX_HEADER_LEN))
            .ok_or_else(|| IndexError::CorruptHeader {
                path: path.to_path_buf(),
                reason: format!(
                    "{} rows of dimension {} exceed the addressable size",
                    header.count, header.dim
                ),
            })?;
        if mmap.len() != expected {
            return Err(IndexError::Truncated {
                path: path.to_path_buf(),
                expected,
                actual: mmap.len(),
            });
        }

        let index = Self {
            mmap,
            dim: header.dim,
            count: header.count,
            path: path.to_path_buf(),
        };
        // Fail at open rather than on the first query.
        index.rows()?;

        info!(
            path = %path.display(),
            dim = index.dim,
            vectors = index.count,
            "Opened chunk index"
        );
        Ok(index)
    }

    /// Writes `rows` as a new index file at `path`, replacing any existing file.
    pub fn write<P: AsRef<Path>>(path: P, dim: usize, rows: &[Vec<f32>]) -> Result<(), IndexError> {
        let path = path.as_ref();
        if let Some(bad) = rows.iter().find(|row| row.len() != dim) {
            return Err(IndexError::InvalidDimension {
                expected: dim,
                actual: bad.len(),
            });
        }

        let file = File::create(path).map_err(|e| IndexError::io(path, e))?;
        let mut out = BufWriter::new(file);

        let mut header = [0u8; INDEX_HEADER_LEN];
        header[..8].copy_from_slice(INDEX_MAGIC);
        header[8..12].copy_from_slice(&INDEX_VERSION.to_le_bytes());
        header[12..16].copy_from_slice(&(dim as u32).to_le_bytes());
        header[16..24].copy_from_slice(&(rows.len() as u64).to_le_bytes());
        out.write_all(&header).map_err(|e| IndexError::io(path, e))?;

        for value in rows.iter().flatten() {
            out.write_all(&value.to_le_bytes())
                .map_err(|e| IndexError::io(path, e))?;
        }
        out.flush().map_err(|e| IndexError::io(path, e))?;

        debug!(path = %path.display(), dim, vectors = rows.len(), "Wrote chunk index");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the vector at `position`, if any.
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        if position >= self.count {
            return None;
        }
        let rows = self.rows().ok()?;
        rows.get(position * self.dim..(position + 1) * self.dim)
    }

    fn rows(&self) -> Result<&[f32], IndexError> {
        let bytes = &self.mmap[INDEX_HEADER_LEN..];
        if bytes.is_empty() {
            return Ok(&[]);
        }
        bytemuck::try_cast_slice(bytes).map_err(|_| IndexError::Misaligned)
    }
}

impl VectorIndex for FlatIpIndex {
    fn dim(&self) -> usize {
        self.dim
    }

    fn len(&self) -> usize {
        self.count
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<IndexHit>, IndexError> {
        if query.len() != self.dim {
            return Err(IndexError::InvalidDimension {
                expected: self.dim,
                actual: query.len(),
            });
        }
        if k == 0 || self.count == 0 || self.dim == 0 {
            return Ok(Vec::new());
        }

        let rows = self.rows()?;
        let mut hits: Vec<IndexHit> = rows
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(position, row)| IndexHit {
                position,
                score: inner_product(query, row),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }
}

#[inline]
pub(crate) fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

struct Header {
    dim: usize,
    count: usize,
}

fn parse_header(bytes: &[u8], path: &Path) -> Result<Header, IndexError> {
    if &bytes[..8] != INDEX_MAGIC {
        return Err(IndexError::BadMagic {
            path: path.to_path_buf(),
        });
    }

    let version = u32::from_le_bytes(read_array(&bytes[8..12]));
    if version != INDEX_VERSION {
        return Err(IndexError::UnsupportedVersion {
            found: version,
            expected: INDEX_VERSION,
        });
    }

    let dim = u32::from_le_bytes(read_array(&bytes[12..16])) as usize;
    let raw_count = u64::from_le_bytes(read_array(&bytes[16..24]));
    let count = usize::try_from(raw_count).map_err(|_| IndexError::CorruptHeader {
        path: path.to_path_buf(),
        reason: format!("row count {raw_count} does not fit in memory"),
    })?;
    Ok(Header { dim, count })
}

fn read_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}
