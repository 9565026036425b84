// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for ADF decoding.

use thiserror::Error;

/// Fatal container-level decode failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdfError {
    /// The buffer does not start with an ADF magic value
    #[error("not an ADF file (magic 0x{0:08X})")]
    BadMagic(u32),

    /// Header version outside the supported set {2, 3, 4}
    #[error("unsupported ADF version {0}")]
    UnsupportedVersion(u32),

    /// A declared offset or length falls outside the buffer
    #[error("truncated file: {what} needs {len} bytes at offset 0x{offset:X}")]
    Truncated {
        /// What was being read
        what: &'static str,
        /// Absolute byte offset of the read
        offset: usize,
        /// Bytes required
        len: usize,
    },

    /// The container declares zero instances
    #[error("container holds no instances")]
    NoInstance,
}

/// Result type for ADF decoding operations.
pub type Result<T> = std::result::Result<T, AdfError>;
