use std::fs::File;
use std::io::{Error as IoError, ErrorKind, Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

pub const DEFAULT_CONTENT: &str = r#"
# This configuration file is generated automatically. Feel free to do some
# modification.

# The `timer` section controls how often a running countdown is refreshed, in
# milliseconds. It only affects how smooth the display is.
[timer]
tick_interval_ms = 250

# The `cue` section selects how the end of a phase is announced: "desktop"
# shows a desktop notification, "bell" rings the terminal bell and "silent"
# does nothing.
[cue]
backend = "desktop"

# The `notification.<mode>` section specifies the message shown when a phase
# of that mode ends. `body` is optional.
[notification.work]
summary = "Focus session complete"
body = "Nice work. Time for a break."

[notification.short_break]
summary = "Break is over"
body = "Back to it."

[notification.long_break]
summary = "Long break is over"
body = "Ready for another round?"

# The `storage` section specifies where settings, tasks, notes and history are
# kept. Leave it empty to use the XDG data directory.
[storage]
# directory = "/path/to/state"
"#;

/// A reader which reads the configuration content and creates a default
/// configuration file if it is missing.
pub struct ContentReader {
    path: PathBuf,
    create_new: bool,
}

impl ContentReader {
    /// Creates a new [`ContentReader`].
    pub fn new<P: AsRef<Path>>(path: P, create_new: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            create_new,
        }
    }

    /// Read content from the file.
    ///
    /// # Errors
    ///
    /// This function will return an error if file doesn't exist or it fails to
    /// create a configuration file.
    pub fn read(self) -> Result<String, ReadContentError> {
        let Self { path, create_new } = self;
        let mut file = Self::open_configuration(path, create_new)?;
        let mut content = String::new();
        file.read_to_string(&mut content).context(FileSystemSnafu {
            when: "Reading configuration",
        })?;
        Ok(content)
    }

    /// Open the configuration file. Create one if specified when it doesn't
    /// exists before.
    fn open_configuration(path: PathBuf, create_new: bool) -> Result<File, ReadContentError> {
        match File::open(path.as_path()) {
            Ok(file) => Ok(file),
            Err(err) if err.kind() == ErrorKind::NotFound && create_new => {
                tracing::info!(path = %path.display(), "creating default configuration");
                Self::create_configuration(path.as_path())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => NotFoundSnafu { path }.fail(),
            Err(err) => Err(err).context(FileSystemSnafu {
                when: "Opening configuration file",
            }),
        }
    }

    /// Create a default configuration file.
    fn create_configuration<P: AsRef<Path>>(path: P) -> Result<File, ReadContentError> {
        let mut file = File::options()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
            .context(FileSystemSnafu {
                when: "Creating configuration file",
            })?;

        file.write_all(DEFAULT_CONTENT.as_bytes())
            .context(FileSystemSnafu {
                when: "Writing default configuration content",
            })?;

        file.seek(std::io::SeekFrom::Start(0))
            .context(FileSystemSnafu {
                when: "Reseting file cursor position to start",
            })?;

        Ok(file)
    }
}

/// An error type for reading content from the configuration file.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ReadContentError {
    #[snafu(display("Could not open inexistent file {}", path.display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Could not access configuration: {when}"))]
    FileSystem {
        when: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use predicates::path as path_pred;

    #[test]
    fn read_configuration() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");
        let content = "[cue]\nbackend = \"bell\"\n";
        file.write_str(content).unwrap();

        let reader = ContentReader::new(file.to_path_buf(), false);
        assert_eq!(reader.read().unwrap(), content);
    }

    #[test]
    fn open_configuration_not_found() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");
        file.assert(path_pred::missing());
        assert!(matches!(
            ContentReader::open_configuration(file.to_path_buf(), false),
            Err(ReadContentError::NotFound { .. })
        ));
        file.assert(path_pred::missing());
    }

    #[test]
    fn create_configuration() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");
        file.assert(path_pred::missing());

        let content = ContentReader::new(file.to_path_buf(), true).read().unwrap();
        assert_eq!(content, DEFAULT_CONTENT);
        file.assert(DEFAULT_CONTENT);
    }
}
