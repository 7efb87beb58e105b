use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ParamMapperError, ParamMapperResult};

/// Prefix marking a column value as a filesystem path.
pub const FILE_PATH_VALUE_PREFIX: &str = "file:";

/// Character reader over a file value, yielding UTF-8.
pub type FileValueReader = BufReader<DecodeReaderBytes<File, Vec<u8>>>;

/// Resolves `file:`-prefixed parameter values to files and their content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePathValueResolver {
    /// Charset label of text file values (`GBK`, `ISO-8859-1`, ...); UTF-8
    /// when unset.
    #[serde(default)]
    pub file_value_charset: Option<String>,
}

impl FilePathValueResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file_value_charset(mut self, charset: impl Into<String>) -> Self {
        self.file_value_charset = Some(charset.into());
        self
    }

    #[must_use]
    pub fn has_file_value_charset(&self) -> bool {
        self.file_value_charset
            .as_deref()
            .is_some_and(|charset| !charset.is_empty())
    }

    #[must_use]
    pub fn is_file_path_value(&self, value: &str) -> bool {
        value.starts_with(FILE_PATH_VALUE_PREFIX)
    }

    /// The path part of a file path value, or `None` for other values.
    #[must_use]
    pub fn file_path_content<'a>(&self, value: &'a str) -> Option<&'a str> {
        value.strip_prefix(FILE_PATH_VALUE_PREFIX)
    }

    /// The file named by `value` if it is a file path value naming an
    /// existing file, else `None`.
    #[must_use]
    pub fn file_value(&self, value: &str) -> Option<PathBuf> {
        let path = Path::new(self.file_path_content(value)?);
        if path.exists() {
            Some(path.to_path_buf())
        } else {
            trace!(path = %path.display(), "file path value does not exist");
            None
        }
    }

    /// Opens the file for byte reads.
    pub fn input_stream(&self, file: &Path) -> ParamMapperResult<BufReader<File>> {
        open(file).map(BufReader::new)
    }

    /// Opens the file for character reads, decoding the configured charset.
    ///
    /// Malformed byte sequences decode to U+FFFD.
    pub fn reader(&self, file: &Path) -> ParamMapperResult<FileValueReader> {
        let encoding = self.file_value_encoding()?;
        let decoder = DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .build(open(file)?);
        Ok(BufReader::new(decoder))
    }

    /// Reads the whole file as text in the configured charset.
    pub fn read_text(&self, file: &Path) -> ParamMapperResult<String> {
        let mut text = String::new();
        self.reader(file)?.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Encoding named by the configured charset label.
    pub fn file_value_encoding(&self) -> ParamMapperResult<&'static Encoding> {
        match self.file_value_charset.as_deref() {
            None | Some("") => Ok(UTF_8),
            Some(charset) => Encoding::for_label(charset.as_bytes())
                .ok_or_else(|| ParamMapperError::UnsupportedCharset(charset.to_owned())),
        }
    }
}

fn open(file: &Path) -> ParamMapperResult<File> {
    File::open(file).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ParamMapperError::FileNotFound {
            path: file.to_path_buf(),
            source,
        },
        _ => ParamMapperError::Io(source),
    })
}
