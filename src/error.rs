use std::fmt::Display;

pub use zip::result::ZipError;
pub use std::io::Error as IOError;

pub type XPIFileResult<T> = Result<T, XPIFileError>;

#[derive(Debug)]
pub enum XPIFileError {
    FileAlreadyExists,
    NoOutputPath,
    InvalidSignatureName,
    ZipError(ZipError),
    IOError(IOError),
}

impl Display for XPIFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            XPIFileError::FileAlreadyExists => "FileAlreadyExists".to_owned(),
            XPIFileError::NoOutputPath => "NoOutputPath".to_owned(),
            XPIFileError::InvalidSignatureName => "InvalidSignatureName".to_owned(),
            XPIFileError::ZipError(err) => err.to_string(),
            XPIFileError::IOError(err) => err.to_string(),
        })
    }
}

impl std::error::Error for XPIFileError { }

impl From<ZipError> for XPIFileError {
    fn from(value: ZipError) -> Self {
        Self::ZipError(value)
    }
}

impl From<IOError> for XPIFileError {
    fn from(value: IOError) -> Self {
        Self::IOError(value)
    }
}
