use std::io::{self, Read};

/// Result of refilling an [`InputBuffer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fill {
    pub len: usize,
    /// The source reported end of input during this refill.
    pub exhausted: bool,
}

/// Fixed capacity input window. The engine consumes it from the front.
pub struct InputBuffer {
    buf: Box<[u8]>,
    pos: usize,
    len: usize,
}

impl InputBuffer {
    pub fn with_capacity(capacity: usize) -> InputBuffer {
        InputBuffer {
            buf: vec![0; capacity].into_boxed_slice(),
            pos: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes supplied but not yet consumed by the engine.
    pub fn pending(&self) -> &[u8] {
        &self.buf[self.pos..self.len]
    }

    pub fn consume(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.len);
    }

    pub fn is_drained(&self) -> bool {
        self.pos == self.len
    }

    /// Replaces the window with fresh bytes from `source`, reading until the buffer is full or
    /// the source reports end of input.
    pub fn refill<R: Read + ?Sized>(&mut self, source: &mut R) -> io::Result<Fill> {
        self.pos = 0;
        self.len = 0;

        let mut exhausted = false;
        while self.len < self.buf.len() {
            match source.read(&mut self.buf[self.len..]) {
                Ok(0) => {
                    exhausted = true;
                    break;
                }
                Ok(n) => self.len += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        Ok(Fill {
            len: self.len,
            exhausted,
        })
    }
}

/// Fixed capacity output window, emptied into the sink after every step.
pub struct OutputBuffer {
    buf: Box<[u8]>,
}

impl OutputBuffer {
    pub fn with_capacity(capacity: usize) -> OutputBuffer {
        OutputBuffer {
            buf: vec![0; capacity].into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn space(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn filled(&self, produced: usize) -> &[u8] {
        &self.buf[..produced]
    }
}

#[cfg(test)]
mod tests {
    use crate::pump::buffer::{Fill, InputBuffer};
    use std::io::{self, Read};

    /// Hands out at most `step` bytes per read and interrupts every other call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        interrupt: bool,
    }

    impl<'a> Read for Trickle<'a> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "try again"));
            }
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn refill_reads_until_full() {
        let data: Vec<u8> = (0..20).collect();
        let mut source = Trickle {
            data: &data,
            step: 3,
            interrupt: false,
        };
        let mut input = InputBuffer::with_capacity(8);

        let fill = input.refill(&mut source).unwrap();
        assert_eq!(
            fill,
            Fill {
                len: 8,
                exhausted: false
            }
        );
        assert_eq!(input.pending(), &data[..8]);
    }

    #[test]
    fn refill_reports_exhaustion() {
        let mut source: &[u8] = b"abc";
        let mut input = InputBuffer::with_capacity(8);

        let fill = input.refill(&mut source).unwrap();
        assert_eq!(
            fill,
            Fill {
                len: 3,
                exhausted: true
            }
        );

        let fill = input.refill(&mut source).unwrap();
        assert_eq!(
            fill,
            Fill {
                len: 0,
                exhausted: true
            }
        );
        assert!(input.is_drained());
    }

    #[test]
    fn exact_capacity_is_not_exhaustion() {
        let mut source: &[u8] = b"abcd";
        let mut input = InputBuffer::with_capacity(4);

        let fill = input.refill(&mut source).unwrap();
        assert!(!fill.exhausted);
        assert_eq!(input.capacity(), 4);
    }

    #[test]
    fn consume_never_passes_the_end() {
        let mut source: &[u8] = b"abcdef";
        let mut input = InputBuffer::with_capacity(8);
        input.refill(&mut source).unwrap();

        input.consume(4);
        assert_eq!(input.pending(), b"ef");
        input.consume(10);
        assert!(input.is_drained());
        assert!(input.pending().is_empty());
    }
}
