//! Narrow streaming interface to a block compression engine.
//!
//! A [`Codec`] opens sessions, an [`Engine`] is one live session. The pumps only ever talk to
//! an engine through [`Engine::step`], and release it by dropping it.

use crate::errors::*;
use std::sync::Arc;

mod bzip;
mod params;
mod report;

pub use bzip::{Bzip2, Decoder, Encoder};
pub use params::{Params, CHUNK};
pub use report::{contract, Fault, LogReport, Report};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Compress,
    Decompress,
}

/// Request passed with every step. Decoders ignore it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Consume all of the supplied input and emit everything it produces so far.
    Flush,
    /// No more input will ever be supplied, close the stream.
    Finish,
}

/// What a single step did to the input and output windows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Step {
    /// Bytes taken from the front of the input slice, at most its length.
    pub consumed: usize,
    /// Bytes written to the front of the output slice, at most its length.
    pub produced: usize,
    /// The engine reached the logical end of the stream.
    pub stream_end: bool,
}

/// One live engine session. Dropping it releases the engine state.
pub trait Engine {
    fn direction(&self) -> Direction;

    /// Runs the engine once over `input`, writing into `output`.
    ///
    /// The engine returns when it has consumed all of `input`, filled all of `output` or reached
    /// the end of the stream, whichever comes first.
    fn step(&mut self, input: &[u8], output: &mut [u8], action: Action) -> Result<Step>;
}

/// Opens engine sessions.
pub trait Codec {
    type Encoder: Engine;
    type Decoder: Engine;

    fn encoder(&self, params: &Params, report: Arc<dyn Report>) -> Result<Self::Encoder>;

    fn decoder(&self, params: &Params, report: Arc<dyn Report>) -> Result<Self::Decoder>;
}
