//! Errors raised while encoding headers or assembling the final image.

use thiserror::Error;

/// Failures the object encoder or image assembler can raise.
#[derive(Debug, Error)]
pub enum ImageError {
    /// A path's encoded length (including its NUL terminator) does not fit
    /// in the header's 16-bit `path_len` field.
    #[error("path {path:?} is too long to encode ({len} bytes, max 65535)")]
    PathTooLong {
        /// The offending path.
        path: String,
        /// Its encoded length, including the NUL terminator.
        len: usize,
    },
    /// A directory has more children than fit in the header's 16-bit
    /// `child_count` field.
    #[error("directory {path:?} has too many children ({count}, max 65535)")]
    TooManyChildren {
        /// The offending directory's path.
        path: String,
        /// The number of children collected.
        count: usize,
    },
    /// The image has more entries than fit in the header's 16-bit
    /// `num_objs` field.
    #[error("image has too many entries ({count}, max 65535)")]
    TooManyEntries {
        /// The number of entries collected.
        count: usize,
    },
}
