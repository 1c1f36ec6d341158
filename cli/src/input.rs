use std::{
    io,
    path::{Path, PathBuf},
};

use log::debug;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("file not found")]
    FileNotFound(PathBuf),

    #[error("failed to read file: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves a leading `~/` against `$HOME`.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => Path::new(&home).join(rest),
        _ => PathBuf::from(path),
    }
}

/// Reads the whole file into memory.
pub fn load(path: &str) -> Result<Vec<u8>, InputError> {
    let path = expand_home(path);
    match std::fs::read(&path) {
        Ok(data) => {
            debug!("Read {} bytes from {:?}", data.len(), path);
            Ok(data)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(InputError::FileNotFound(path)),
        Err(source) => Err(InputError::Io { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("bmp2hex-input-does-not-exist.bmp");
        let err = load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, InputError::FileNotFound(p) if p == path));
    }

    #[test]
    fn reads_whole_file() {
        let path = std::env::temp_dir().join(format!("bmp2hex-input-{}.bin", std::process::id()));
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        let data = load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(data, [1, 2, 3]);
    }

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_home("images/logo.bmp"), PathBuf::from("images/logo.bmp"));
        assert_eq!(expand_home("/tmp/~/x.bmp"), PathBuf::from("/tmp/~/x.bmp"));
    }
}
