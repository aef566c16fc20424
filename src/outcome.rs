use crate::errors::{Error, ErrorKind, Result};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;

#[repr(i32)]
#[derive(FromPrimitive, PartialEq, Eq, Debug, Copy, Clone)]
/// Result of one pump invocation
/// Numbered after the libbzip2 status codes, which is also what the CLI exits with
pub enum Outcome {
    Ok = 0,
    Param = -2,
    Memory = -3,
    Data = -4,
    DataMagic = -5,
    Io = -6,
}

impl Outcome {
    pub fn of<T>(result: &Result<T>) -> Outcome {
        match result {
            Ok(_) => Outcome::Ok,
            Err(e) => Outcome::from(e),
        }
    }

    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn from_code(code: i32) -> Option<Outcome> {
        Outcome::from_i32(code)
    }

    pub fn is_ok(&self) -> bool {
        *self == Outcome::Ok
    }

    /// One-line description shown to users.
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Param => "invalid parameters",
            Outcome::Memory => "out of memory",
            Outcome::Data | Outcome::DataMagic => "invalid or incomplete data",
            Outcome::Io => "i/o error",
        }
    }
}

impl From<&Error> for Outcome {
    fn from(e: &Error) -> Outcome {
        match e.kind() {
            ErrorKind::SourceRead | ErrorKind::SinkWrite => Outcome::Io,
            ErrorKind::Data(_) => Outcome::Data,
            ErrorKind::DataMagic => Outcome::DataMagic,
            ErrorKind::Memory => Outcome::Memory,
            ErrorKind::Param(_) | ErrorKind::Contract(_) => Outcome::Param,
            // Msg is only produced by string chains around I/O
            _ => Outcome::Io,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Fault;
    use crate::errors::{Error, ErrorKind, Result};
    use crate::outcome::Outcome;

    #[test]
    fn codes_follow_libbzip2() {
        assert_eq!(Outcome::Ok.code(), 0);
        assert_eq!(Outcome::Param.code(), -2);
        assert_eq!(Outcome::Memory.code(), -3);
        assert_eq!(Outcome::Data.code(), -4);
        assert_eq!(Outcome::DataMagic.code(), -5);
        assert_eq!(Outcome::Io.code(), -6);
    }

    #[test]
    fn from_code() {
        assert_eq!(Outcome::from_code(-4), Some(Outcome::Data));
        assert_eq!(Outcome::from_code(0), Some(Outcome::Ok));
        assert_eq!(Outcome::from_code(-1), None);
        assert_eq!(Outcome::from_code(7), None);
    }

    #[test]
    fn error_kinds_map_to_outcomes() {
        let cases: Vec<(Error, Outcome)> = vec![
            (ErrorKind::SourceRead.into(), Outcome::Io),
            (ErrorKind::SinkWrite.into(), Outcome::Io),
            (ErrorKind::Data("truncated".into()).into(), Outcome::Data),
            (ErrorKind::DataMagic.into(), Outcome::DataMagic),
            (ErrorKind::Memory.into(), Outcome::Memory),
            (ErrorKind::Param("level".into()).into(), Outcome::Param),
            (ErrorKind::Contract(Fault::Sequence).into(), Outcome::Param),
        ];

        for (err, expected) in cases.iter() {
            assert_eq!(Outcome::from(err), *expected, "{}", err);
        }
    }

    #[test]
    fn of_result() {
        let ok: Result<()> = Ok(());
        assert!(Outcome::of(&ok).is_ok());

        let failed: Result<()> = Err(ErrorKind::Memory.into());
        assert_eq!(Outcome::of(&failed), Outcome::Memory);
        assert_eq!(Outcome::of(&failed).to_string(), "out of memory");
    }
}
