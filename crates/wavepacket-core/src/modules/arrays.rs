use crate::common::constants::SIZE_OF_REAL;
use crate::domain::{ArrayField, ArrayRef, ByteOrder, WavepacketError, WavepacketResult};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Turns [`ArrayField`]s into concrete real sequences.
///
/// Binary references are resolved relative to the directory holding the
/// archive. Every call opens the referenced file afresh; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayResolver {
    split_dir: PathBuf,
    byte_order: ByteOrder,
}

impl ArrayResolver {
    pub fn new(split_dir: impl Into<PathBuf>, byte_order: ByteOrder) -> Self {
        Self {
            split_dir: split_dir.into(),
            byte_order,
        }
    }

    pub fn resolve(&self, field: &ArrayField) -> WavepacketResult<Vec<f64>> {
        match field {
            ArrayField::Inline(values) => Ok(values.clone()),
            ArrayField::BinaryRef(reference) => self.read_reference(reference),
        }
    }

    fn read_reference(&self, reference: &ArrayRef) -> WavepacketResult<Vec<f64>> {
        let count = reference.element_count()?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let path = self.split_dir.join(&reference.filename);
        let bytes = read_byte_range(
            &path,
            SIZE_OF_REAL.saturating_mul(reference.first - 1),
            SIZE_OF_REAL.saturating_mul(count),
        )
        .map_err(|source| {
            WavepacketError::io_system(
                "IO.BINARY_ARRAY_READ",
                format!(
                    "failed to read elements {}..={} from '{}': {}",
                    reference.first,
                    reference.last,
                    path.display(),
                    source
                ),
            )
        })?;

        Ok(decode_reals(&bytes, self.byte_order))
    }
}

fn read_byte_range(path: &Path, offset: u64, length: u64) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let available = file.metadata()?.len();
    if offset.checked_add(length).is_none_or(|end| end > available) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!(
                "range needs {} bytes at offset {}, file holds {}",
                length, offset, available
            ),
        ));
    }
    file.seek(SeekFrom::Start(offset))?;
    let mut buffer = vec![0_u8; length as usize];
    file.read_exact(&mut buffer)?;
    Ok(buffer)
}

fn decode_reals(bytes: &[u8], byte_order: ByteOrder) -> Vec<f64> {
    bytes
        .chunks_exact(SIZE_OF_REAL as usize)
        .map(|chunk| {
            let mut raw = [0_u8; 8];
            raw.copy_from_slice(chunk);
            byte_order.decode_f64(raw)
        })
        .collect()
}
