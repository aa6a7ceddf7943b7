#![warn(missing_docs)]
//! Beamprop specific error structures
use std::{error::Error, fmt::Display};

/// Beamprop specific Result type
pub type BeamResult<T> = std::result::Result<T, BeamError>;

/// Errors that can be returned by various beamprop functions.
#[derive(Debug, PartialEq, Eq)]
pub enum BeamError {
    /// a physical parameter is out of its valid range (e.g. non-positive wavelength, divergence or focal length)
    InvalidParameter(String),
    /// a numeric input text could not be parsed
    Parse(String),
    /// lists which must be paired element by element (e.g. lens distances and focal lengths) differ in length
    LengthMismatch(String),
    /// errors console io
    Console(String),
    /// errors while creating a plot
    Plot(String),
    /// errors while reading or writing files
    Io(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for BeamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter(m) => {
                write!(f, "InvalidParameter:{m}")
            }
            Self::Parse(m) => {
                write!(f, "Parse:{m}")
            }
            Self::LengthMismatch(m) => {
                write!(f, "LengthMismatch:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Plot(m) => {
                write!(f, "Plot:{m}")
            }
            Self::Io(m) => {
                write!(f, "Io:{m}")
            }
            Self::Other(m) => write!(f, "Beamprop Error:Other:{m}"),
        }
    }
}
impl Error for BeamError {}

impl std::convert::From<String> for BeamError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
impl std::convert::From<std::io::Error> for BeamError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn from() {
        let error = BeamError::from("test".to_string());
        assert_eq!(error, BeamError::Other("test".to_string()));
    }
    #[test]
    fn from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert_eq!(
            BeamError::from(io_error),
            BeamError::Io("no such file".to_string())
        );
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", BeamError::InvalidParameter("test".to_string())),
            "InvalidParameter:test"
        );
        assert_eq!(
            format!("{}", BeamError::Parse("test".to_string())),
            "Parse:test"
        );
        assert_eq!(
            format!("{}", BeamError::LengthMismatch("test".to_string())),
            "LengthMismatch:test"
        );
        assert_eq!(
            format!("{}", BeamError::Console("test".to_string())),
            "Console:test"
        );
        assert_eq!(
            format!("{}", BeamError::Plot("test".to_string())),
            "Plot:test"
        );
        assert_eq!(format!("{}", BeamError::Io("test".to_string())), "Io:test");
        assert_eq!(
            format!("{}", BeamError::Other("test".to_string())),
            "Beamprop Error:Other:test"
        );
    }
    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", BeamError::InvalidParameter("test".to_string())),
            "InvalidParameter(\"test\")"
        );
    }
}
