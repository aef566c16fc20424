use crate::engine::{contract, Action, Codec, Direction, Engine, Fault, Params, Report, Step};
use crate::errors::*;
use bzip2::{Compress, Compression, Decompress, Status};
use error_chain::bail;
use std::sync::Arc;
use tracing::{debug, trace};

/// The bzip2 block-sorting codec, backed by the `bzip2` crate.
#[derive(Debug, Default, Copy, Clone)]
pub struct Bzip2;

impl Codec for Bzip2 {
    type Encoder = Encoder;
    type Decoder = Decoder;

    fn encoder(&self, params: &Params, report: Arc<dyn Report>) -> Result<Encoder> {
        params.validate()?;
        if params.verbosity >= 1 {
            debug!(
                level = params.level,
                work_factor = params.work_factor,
                "opening bzip2 encoder"
            );
        }

        Ok(Encoder {
            raw: Compress::new(Compression::new(params.level), params.work_factor),
            verbosity: params.verbosity,
            report,
        })
    }

    fn decoder(&self, params: &Params, report: Arc<dyn Report>) -> Result<Decoder> {
        params.validate()?;
        if params.verbosity >= 1 {
            debug!(small = params.small, "opening bzip2 decoder");
        }

        Ok(Decoder {
            raw: Decompress::new(params.small),
            verbosity: params.verbosity,
            report,
        })
    }
}

pub struct Encoder {
    raw: Compress,
    verbosity: u32,
    report: Arc<dyn Report>,
}

impl Engine for Encoder {
    fn direction(&self) -> Direction {
        Direction::Compress
    }

    fn step(&mut self, input: &[u8], output: &mut [u8], action: Action) -> Result<Step> {
        let (before_in, before_out) = (self.raw.total_in(), self.raw.total_out());
        let action = match action {
            Action::Flush => bzip2::Action::Flush,
            Action::Finish => bzip2::Action::Finish,
        };

        let status = self
            .raw
            .compress(input, output, action)
            .map_err(|e| engine_error(e, &*self.report))?;

        let step = Step {
            consumed: (self.raw.total_in() - before_in) as usize,
            produced: (self.raw.total_out() - before_out) as usize,
            stream_end: matches!(status, Status::StreamEnd),
        };
        if self.verbosity >= 2 {
            trace!(?status, consumed = step.consumed, produced = step.produced, "compress step");
        }
        Ok(step)
    }
}

impl Drop for Encoder {
    fn drop(&mut self) {
        if self.verbosity >= 1 {
            debug!(
                total_in = self.raw.total_in(),
                total_out = self.raw.total_out(),
                "releasing bzip2 encoder"
            );
        }
    }
}

pub struct Decoder {
    raw: Decompress,
    verbosity: u32,
    report: Arc<dyn Report>,
}

impl Engine for Decoder {
    fn direction(&self) -> Direction {
        Direction::Decompress
    }

    fn step(&mut self, input: &[u8], output: &mut [u8], _action: Action) -> Result<Step> {
        let (before_in, before_out) = (self.raw.total_in(), self.raw.total_out());

        let status = self
            .raw
            .decompress(input, output)
            .map_err(|e| engine_error(e, &*self.report))?;
        if let Status::MemNeeded = status {
            bail!(ErrorKind::Memory);
        }

        let step = Step {
            consumed: (self.raw.total_in() - before_in) as usize,
            produced: (self.raw.total_out() - before_out) as usize,
            stream_end: matches!(status, Status::StreamEnd),
        };
        if self.verbosity >= 2 {
            trace!(?status, consumed = step.consumed, produced = step.produced, "decompress step");
        }
        Ok(step)
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        if self.verbosity >= 1 {
            debug!(
                total_in = self.raw.total_in(),
                total_out = self.raw.total_out(),
                "releasing bzip2 decoder"
            );
        }
    }
}

fn engine_error(err: bzip2::Error, report: &dyn Report) -> Error {
    match err {
        bzip2::Error::Data => ErrorKind::Data("corrupt block data".into()).into(),
        bzip2::Error::DataMagic => ErrorKind::DataMagic.into(),
        bzip2::Error::Sequence => contract(report, Fault::Sequence),
        other => contract(report, Fault::Param(other.to_string())),
    }
}
