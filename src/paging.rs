//! Splitting of a byte range into page-confined write transactions.

/// Default size of the stack buffer that fill patterns are served from.
pub const DEFAULT_FILL_BUFFER_LEN: usize = 256;

/// One page-confined piece of a larger write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Chunk {
    /// Device address the chunk starts at.
    pub address: u32,
    /// Offset of the chunk within the caller's request.
    pub offset: u32,
    /// Number of bytes in the chunk.
    pub len: u32,
}

/// Iterator over the page-confined chunks covering `len` bytes at `address`.
#[derive(Debug, Clone)]
pub struct PageChunks {
    address: u32,
    offset: u32,
    remaining: u32,
    page_size: u32,
    max_len: u32,
}

impl PageChunks {
    /// `page_size` must be nonzero.
    pub fn new(address: u32, len: u32, page_size: u32) -> Self {
        Self {
            address,
            offset: 0,
            remaining: len,
            page_size,
            max_len: u32::MAX,
        }
    }

    /// Additionally caps every chunk at `max_len` bytes. Chunks stay page
    /// confined; a page larger than `max_len` takes several chunks.
    pub fn with_max_len(mut self, max_len: u32) -> Self {
        self.max_len = max_len.max(1);
        self
    }
}

impl Iterator for PageChunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.remaining == 0 {
            return None;
        }
        let to_boundary = self.page_size - self.address % self.page_size;
        let len = self.remaining.min(to_boundary).min(self.max_len);
        let chunk = Chunk {
            address: self.address,
            offset: self.offset,
            len,
        };
        self.address = self.address.wrapping_add(len);
        self.offset += len;
        self.remaining -= len;
        Some(chunk)
    }
}

/// Number of page writes needed for `len` bytes at `address`.
pub fn transaction_count(address: u32, len: u32, page_size: u32) -> u32 {
    if len == 0 {
        return 0;
    }
    let page_size = u64::from(page_size);
    let first = u64::from(address);
    let last = first + u64::from(len) - 1;
    (last / page_size - first / page_size + 1) as u32
}

/// Where the bytes of a write come from. `N` is the fill buffer length.
pub(crate) enum Source<'a, const N: usize> {
    Data(&'a [u8]),
    Fill([u8; N]),
}

impl<'a, const N: usize> Source<'a, N> {
    pub(crate) fn fill(byte: u8) -> Self {
        Source::Fill([byte; N])
    }

    pub(crate) fn max_chunk_len(&self) -> u32 {
        match self {
            Source::Data(_) => u32::MAX,
            Source::Fill(_) => u32::try_from(N).unwrap_or(u32::MAX),
        }
    }

    /// Data chunks lie inside the caller's slice and fill chunks inside the
    /// buffer, so both index ranges fit in `usize`.
    pub(crate) fn bytes(&self, chunk: &Chunk) -> &[u8] {
        let len = chunk.len as usize;
        match self {
            Source::Data(data) => {
                let offset = chunk.offset as usize;
                &data[offset..offset + len]
            }
            Source::Fill(pattern) => &pattern[..len],
        }
    }
}
