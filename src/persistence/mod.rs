//! Parameter-value helpers used when mapping values into SQL statements.

mod file_path_value_resolver;

pub use file_path_value_resolver::{
    FILE_PATH_VALUE_PREFIX, FilePathValueResolver, FileValueReader,
};
