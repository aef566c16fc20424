use crate::errors::{Error, ErrorKind};
use std::fmt;
use tracing::error;

/// Engine contract violations observed while driving a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The engine was called in a state where the call is not allowed.
    Sequence,
    /// The engine rejected the arguments of a call.
    Param(String),
    /// A drain finished with input the engine never consumed.
    InputLeftOver { pending: usize },
    /// Finishing the stream did not reach its logical end.
    MissingStreamEnd,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Sequence => write!(f, "call out of sequence"),
            Fault::Param(detail) => write!(f, "rejected call arguments: {}", detail),
            Fault::InputLeftOver { pending } => {
                write!(f, "{} bytes of input left unconsumed", pending)
            }
            Fault::MissingStreamEnd => write!(f, "finish did not end the stream"),
        }
    }
}

/// Receives engine faults. Injected at session creation.
pub trait Report: Send + Sync {
    fn fault(&self, fault: &Fault);
}

/// Logs faults through `tracing`.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogReport;

impl Report for LogReport {
    fn fault(&self, fault: &Fault) {
        error!(%fault, "codec engine hit an internal error");
    }
}

/// Hands `fault` to `report` and turns it into an error. Fatal in debug builds.
pub fn contract(report: &dyn Report, fault: Fault) -> Error {
    report.fault(&fault);
    if cfg!(debug_assertions) {
        panic!("codec engine contract violated: {}", fault);
    }
    ErrorKind::Contract(fault).into()
}
