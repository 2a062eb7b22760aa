//! Process exit codes, mirroring the error taxonomy in spec §7.

/// The process exit code a [`crate::error::BuildError`] maps to.
///
/// Each variant corresponds to one row of the error taxonomy; `main.rs` is
/// the only place that converts one of these into an actual process exit
/// status.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful completion.
    Ok = 0,
    /// Command-line usage error; clap already prints its own diagnostic.
    Usage = 2,
    /// Malformed YAML, an unknown rule verb, or an unknown compressor name.
    Config = 3,
    /// A transform's required interpreter was not found.
    ToolDiscovery = 4,
    /// A transform or compressor subprocess exited non-zero.
    Subprocess = 5,
    /// A filesystem I/O failure reading the source tree, the cache, or the
    /// output image.
    Io = 6,
}

impl ExitCode {
    /// The raw process exit status.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::ExitCode;

    #[test]
    fn ok_is_zero() {
        assert_eq!(ExitCode::Ok.as_i32(), 0);
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            ExitCode::Ok,
            ExitCode::Usage,
            ExitCode::Config,
            ExitCode::ToolDiscovery,
            ExitCode::Subprocess,
            ExitCode::Io,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a.as_i32(), b.as_i32());
            }
        }
    }
}
