//! Output-chunk events emitted by the streaming execution path.

use std::borrow::Cow;

/// Default buffer size for chunk channels.
pub const DEFAULT_CHANNEL_BUFFER: usize = 64;

/// Which subprocess stream produced a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    /// The subprocess standard output.
    Stdout,
    /// The subprocess standard error.
    Stderr,
}

/// One chunk of subprocess output, delivered as it arrives.
///
/// Chunks are raw bytes; boundaries are platform-dependent and carry no
/// meaning. No ordering is guaranteed between stdout and stderr chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    /// Stream the chunk was read from.
    pub source: OutputSource,
    /// Raw bytes of the chunk.
    pub data: Vec<u8>,
}

impl OutputChunk {
    /// The chunk bytes as text, lossily converted.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_text_is_lossy() {
        let chunk = OutputChunk {
            source: OutputSource::Stdout,
            data: vec![b'h', b'i', 0xff],
        };
        assert_eq!(chunk.as_text(), "hi\u{fffd}");
    }
}
