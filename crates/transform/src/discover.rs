//! Transform discovery (spec §4.6): a file named `transform-<name>.<ext>`
//! under the tool directory and the current working directory's tool
//! directory, where `ext` is `.py` (routed through `$PYTHON` or `python3`)
//! or `.js` (routed through `node`).

use std::path::{Path, PathBuf};

use crate::error::TransformError;

/// A discovered external transform script and the interpreter command that
/// runs it.
#[derive(Clone, Debug)]
pub struct ExternalTransform {
    /// The transform name, as named in a filter rule.
    pub name: String,
    /// The script file that was found.
    pub script: PathBuf,
    /// The interpreter command and any leading arguments (e.g. `["node"]`).
    pub interpreter: Vec<String>,
}

fn python_interpreter() -> String {
    std::env::var("PYTHON").unwrap_or_else(|_| "python3".to_owned())
}

/// Searches `search_dirs`, in order, for `transform-<name>.py` then
/// `transform-<name>.js`.
pub fn discover(search_dirs: &[PathBuf], name: &str) -> Result<ExternalTransform, TransformError> {
    let mut searched = Vec::new();

    for dir in search_dirs {
        let py_script = dir.join(format!("transform-{name}.py"));
        searched.push(py_script.clone());
        if py_script.is_file() {
            return Ok(ExternalTransform {
                name: name.to_owned(),
                script: py_script,
                interpreter: vec![python_interpreter()],
            });
        }

        let js_script = dir.join(format!("transform-{name}.js"));
        searched.push(js_script.clone());
        if js_script.is_file() {
            return Ok(ExternalTransform {
                name: name.to_owned(),
                script: js_script,
                interpreter: vec!["node".to_owned()],
            });
        }
    }

    Err(TransformError::NotFound {
        name: name.to_owned(),
        searched,
    })
}

/// The default search order: the tool directory (typically `$FROGFS_DIR`
/// or the builder's install location) followed by `./tools` under the
/// current working directory.
#[must_use]
pub fn default_search_dirs(tool_dir: &Path) -> Vec<PathBuf> {
    vec![tool_dir.to_path_buf(), PathBuf::from("tools")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_python_script_before_js() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("transform-minify.py"), b"").unwrap();
        fs::write(dir.path().join("transform-minify.js"), b"").unwrap();
        let found = discover(&[dir.path().to_path_buf()], "minify").unwrap();
        assert!(found.script.ends_with("transform-minify.py"));
        assert_eq!(found.interpreter, vec![python_interpreter()]);
    }

    #[test]
    fn finds_js_script_when_no_python_script_present() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("transform-minify.js"), b"").unwrap();
        let found = discover(&[dir.path().to_path_buf()], "minify").unwrap();
        assert!(found.script.ends_with("transform-minify.js"));
        assert_eq!(found.interpreter, vec!["node".to_owned()]);
    }

    #[test]
    fn reports_not_found_across_all_search_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(&[dir.path().to_path_buf()], "missing").unwrap_err();
        assert!(matches!(err, TransformError::NotFound { .. }));
    }
}
