use crate::errors::*;
use error_chain::bail;

/// Default capacity of the pump's input and output buffers.
pub const CHUNK: usize = 256;

/// Engine configuration for one pump invocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Params {
    /// Block size in units of 100k, 1 through 9.
    pub level: u32,
    /// Threshold for switching to the fallback sort on repetitive input, 0 through 250.
    /// 0 selects the engine default.
    pub work_factor: u32,
    /// 0 through 4. Higher values log more about each session.
    pub verbosity: u32,
    /// Decode with the slower, lower memory algorithm.
    pub small: bool,
    /// Capacity of each of the two pump buffers.
    pub chunk_size: usize,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            level: 9,
            work_factor: 0,
            verbosity: 0,
            small: false,
            chunk_size: CHUNK,
        }
    }
}

impl Params {
    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn work_factor(mut self, work_factor: u32) -> Self {
        self.work_factor = work_factor;
        self
    }

    pub fn verbosity(mut self, verbosity: u32) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn small(mut self, small: bool) -> Self {
        self.small = small;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.level) {
            bail!(ErrorKind::Param(format!(
                "block size level {} is outside 1..=9",
                self.level
            )));
        }
        if self.work_factor > 250 {
            bail!(ErrorKind::Param(format!(
                "work factor {} is outside 0..=250",
                self.work_factor
            )));
        }
        if self.verbosity > 4 {
            bail!(ErrorKind::Param(format!(
                "verbosity {} is outside 0..=4",
                self.verbosity
            )));
        }
        if self.chunk_size == 0 {
            bail!(ErrorKind::Param("buffer capacity must be non-zero".into()));
        }
        Ok(())
    }
}
