//! Chunked streaming pumps between a byte source, a codec engine and a byte sink.
//!
//! Both directions share one loop: refill the input buffer, step the engine, write what it
//! produced, and keep stepping while the output buffer comes back full. Memory use is bounded
//! by the two fixed buffers no matter how long the stream is.

use crate::engine::{Action, Bzip2, Codec, Direction, Engine, Fault, LogReport, Params, Report};
use crate::errors::*;
use error_chain::bail;
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::debug;

mod buffer;
mod session;

pub use buffer::{Fill, InputBuffer, OutputBuffer};
pub use session::{Polled, Session};

const PREMATURE_END: &str = "stream ended before its end-of-stream marker";

/// Counters for a completed pump invocation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub steps: u64,
}

/// Compresses `source` into `sink` with the default bzip2 settings.
pub fn compress<R: Read, W: Write>(source: R, sink: W) -> Result<Transfer> {
    Pump::default().compress(source, sink)
}

/// Decompresses one bzip2 stream from `source` into `sink`.
pub fn decompress<R: Read, W: Write>(source: R, sink: W) -> Result<Transfer> {
    Pump::default().decompress(source, sink)
}

pub struct Pump<C = Bzip2> {
    codec: C,
    params: Params,
    report: Arc<dyn Report>,
}

impl Default for Pump<Bzip2> {
    fn default() -> Self {
        Pump::new(Bzip2)
    }
}

impl<C: Codec> Pump<C> {
    pub fn new(codec: C) -> Pump<C> {
        Pump {
            codec,
            params: Params::default(),
            report: Arc::new(LogReport),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_report(mut self, report: Arc<dyn Report>) -> Self {
        self.report = report;
        self
    }

    pub fn compress<R: Read, W: Write>(&self, mut source: R, mut sink: W) -> Result<Transfer> {
        let engine = self
            .codec
            .encoder(&self.params, Arc::clone(&self.report))?;
        let session = Session::open(engine, self.params.chunk_size, Arc::clone(&self.report));
        run(session, &mut source, &mut sink)
    }

    pub fn decompress<R: Read, W: Write>(&self, mut source: R, mut sink: W) -> Result<Transfer> {
        let engine = self
            .codec
            .decoder(&self.params, Arc::clone(&self.report))?;
        let session = Session::open(engine, self.params.chunk_size, Arc::clone(&self.report));
        run(session, &mut source, &mut sink)
    }
}

fn run<E, R, W>(mut session: Session<E>, source: &mut R, sink: &mut W) -> Result<Transfer>
where
    E: Engine,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let direction = session.direction();

    loop {
        let fill = session.feed(source)?;

        match direction {
            Direction::Compress => {
                drain(&mut session, sink, Action::Flush)?;
                session.check_drained()?;

                if fill.exhausted {
                    if !drain(&mut session, sink, Action::Finish)? {
                        return Err(session.fault(Fault::MissingStreamEnd));
                    }
                    break;
                }
            }
            Direction::Decompress => {
                if fill.len == 0 {
                    bail!(ErrorKind::Data(PREMATURE_END.into()));
                }
                if drain(&mut session, sink, Action::Flush)? {
                    break;
                }
                session.check_drained()?;

                if fill.exhausted {
                    bail!(ErrorKind::Data(PREMATURE_END.into()));
                }
            }
        }
    }

    sink.flush().chain_err(|| ErrorKind::SinkWrite)?;

    let capacity = session.capacity();
    let transfer = session.finish();
    debug!(
        ?direction,
        capacity,
        read = transfer.bytes_read,
        written = transfer.bytes_written,
        steps = transfer.steps,
        "stream complete"
    );
    Ok(transfer)
}

/// Steps the engine until it leaves room in the output buffer, writing everything it produces
/// to `sink`. Returns whether the logical end of the stream was reached.
fn drain<E, W>(session: &mut Session<E>, sink: &mut W, action: Action) -> Result<bool>
where
    E: Engine,
    W: Write + ?Sized,
{
    loop {
        let polled = session.poll(action)?;
        sink.write_all(polled.bytes).chain_err(|| ErrorKind::SinkWrite)?;

        if polled.stream_end {
            return Ok(true);
        }
        if !polled.full {
            return Ok(false);
        }
    }
}
