//! Subprocess invocation for a discovered [`ExternalTransform`] (spec
//! §4.6): bytes in on stdin, bytes out on stdout, a non-zero exit is fatal.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use image::ArgMap;

use crate::discover::ExternalTransform;
use crate::error::TransformError;

/// Environment passed through to every transform subprocess, mirroring the
/// variables the original ESPFS tool chain exposes to its scripts.
#[derive(Clone, Debug, Default)]
pub struct TransformEnv {
    /// The tool directory, exported as `FROGFS_DIR`.
    pub frogfs_dir: Option<PathBuf>,
    /// Exported as `NODE_PREFIX`, for transforms that shell out to `npm`.
    pub node_prefix: Option<PathBuf>,
    /// Exported as `NODE_PATH`, so a vendored `node_modules` is found.
    pub node_path: Option<PathBuf>,
}

/// Builds the subprocess argument vector for `args` as `--<key> <value>`,
/// or a bare `--<key>` flag when the value is absent.
fn build_argv(args: &ArgMap) -> Vec<String> {
    let mut argv = Vec::with_capacity(args.len() * 2);
    for (key, value) in args {
        let flag = if key.chars().count() == 1 {
            format!("-{key}")
        } else {
            format!("--{key}")
        };
        match value {
            Some(v) => {
                argv.push(flag);
                argv.push(v.clone());
            }
            None => argv.push(flag),
        }
    }
    argv
}

fn io_err(script: &std::path::Path, source: io::Error) -> TransformError {
    TransformError::Io {
        script: script.to_path_buf(),
        source,
    }
}

impl ExternalTransform {
    /// Runs the script on `input`, returning its stdout bytes.
    ///
    /// Stdin is written on a dedicated thread while stdout is drained on
    /// the caller's thread, so a transform that writes more to stdout than
    /// its pipe buffer holds can never deadlock against an unread stdin.
    pub fn run(
        &self,
        args: &ArgMap,
        env: &TransformEnv,
        input: &[u8],
    ) -> Result<Vec<u8>, TransformError> {
        let mut cmd = Command::new(&self.interpreter[0]);
        for leading in &self.interpreter[1..] {
            cmd.arg(leading);
        }
        cmd.arg(&self.script);
        cmd.args(build_argv(args));

        if let Some(dir) = &env.frogfs_dir {
            cmd.env("FROGFS_DIR", dir);
        }
        if let Some(prefix) = &env.node_prefix {
            cmd.env("NODE_PREFIX", prefix);
        }
        if let Some(path) = &env.node_path {
            cmd.env("NODE_PATH", path);
        }

        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::inherit());

        let mut child = cmd.spawn().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                TransformError::InterpreterMissing {
                    interpreter: self.interpreter[0].clone(),
                    script: self.script.clone(),
                }
            } else {
                io_err(&self.script, source)
            }
        })?;

        let mut stdin = child.stdin.take().expect("stdin was piped");
        let input = input.to_vec();
        let script_for_writer = self.script.clone();
        let writer = std::thread::spawn(move || -> Result<(), TransformError> {
            stdin
                .write_all(&input)
                .map_err(|source| io_err(&script_for_writer, source))
        });

        let mut stdout = child.stdout.take().expect("stdout was piped");
        let mut output = Vec::new();
        stdout
            .read_to_end(&mut output)
            .map_err(|source| io_err(&self.script, source))?;

        writer.join().expect("stdin writer thread panicked")?;

        let status = child.wait().map_err(|source| io_err(&self.script, source))?;
        if !status.success() {
            return Err(TransformError::NonZeroExit {
                script: self.script.clone(),
                code: status.code(),
            });
        }

        Ok(output)
    }
}

/// Runs `transforms` on `input` in order, piping each one's output into the
/// next (spec §4.6: multiple transform verbs on one rule chain in
/// declaration order).
pub fn run_chain(
    transforms: &[(ExternalTransform, ArgMap)],
    env: &TransformEnv,
    input: &[u8],
) -> Result<Vec<u8>, TransformError> {
    let mut bytes = input.to_vec();
    for (transform, args) in transforms {
        bytes = transform.run(args, env, &bytes)?;
    }
    Ok(bytes)
}
