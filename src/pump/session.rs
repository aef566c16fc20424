use crate::engine::{contract, Action, Direction, Engine, Fault, Report};
use crate::errors::*;
use crate::pump::buffer::{Fill, InputBuffer, OutputBuffer};
use crate::pump::Transfer;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

/// Bytes produced by one engine step, borrowed from the output buffer.
pub struct Polled<'a> {
    pub bytes: &'a [u8],
    /// The step filled the output buffer, so the engine may have more to emit.
    pub full: bool,
    pub stream_end: bool,
}

/// An engine session together with the fixed buffers that feed it.
///
/// Dropping a session releases the engine, so every early return from a pump releases it too.
pub struct Session<E: Engine> {
    engine: E,
    input: InputBuffer,
    output: OutputBuffer,
    report: Arc<dyn Report>,
    stats: Transfer,
    finished: bool,
}

impl<E: Engine> Session<E> {
    pub fn open(engine: E, capacity: usize, report: Arc<dyn Report>) -> Session<E> {
        Session {
            engine,
            input: InputBuffer::with_capacity(capacity),
            output: OutputBuffer::with_capacity(capacity),
            report,
            stats: Transfer::default(),
            finished: false,
        }
    }

    pub fn direction(&self) -> Direction {
        self.engine.direction()
    }

    pub fn capacity(&self) -> usize {
        self.input.capacity()
    }

    /// Refills the input buffer from `source`.
    pub fn feed<R: Read + ?Sized>(&mut self, source: &mut R) -> Result<Fill> {
        let fill = self
            .input
            .refill(source)
            .chain_err(|| ErrorKind::SourceRead)?;
        self.stats.bytes_read += fill.len as u64;
        Ok(fill)
    }

    /// Runs one engine step over the pending input and an empty output buffer.
    pub fn poll(&mut self, action: Action) -> Result<Polled<'_>> {
        let step = self
            .engine
            .step(self.input.pending(), self.output.space(), action)?;
        self.input.consume(step.consumed);

        self.stats.steps += 1;
        self.stats.bytes_written += step.produced as u64;

        Ok(Polled {
            bytes: self.output.filled(step.produced),
            full: step.produced == self.output.capacity(),
            stream_end: step.stream_end,
        })
    }

    /// Fails unless the engine consumed everything it was given.
    pub fn check_drained(&self) -> Result<()> {
        if self.input.is_drained() {
            return Ok(());
        }
        Err(self.fault(Fault::InputLeftOver {
            pending: self.input.pending().len(),
        }))
    }

    /// Reports an engine contract violation. Fatal in debug builds.
    pub fn fault(&self, fault: Fault) -> Error {
        contract(&*self.report, fault)
    }

    pub fn finish(mut self) -> Transfer {
        self.finished = true;
        self.stats
    }
}

impl<E: Engine> Drop for Session<E> {
    fn drop(&mut self) {
        if !self.finished {
            debug!(
                direction = ?self.engine.direction(),
                steps = self.stats.steps,
                "releasing session before stream end"
            );
        }
    }
}
