pub mod engine;
pub mod outcome;
pub mod pump;

pub use engine::{Bzip2, Codec, Params, CHUNK};
pub use outcome::Outcome;
pub use pump::{compress, decompress, Pump, Transfer};

pub mod errors {
    use crate::engine::Fault;

    error_chain::error_chain! {
        errors {
            SourceRead {
                description("error reading source")
                display("error reading source")
            }
            SinkWrite {
                description("error writing sink")
                display("error writing sink")
            }
            Data(reason: String) {
                description("invalid or incomplete data")
                display("invalid or incomplete data: {}", reason)
            }
            DataMagic {
                description("missing bzip2 stream signature")
                display("missing bzip2 stream signature")
            }
            Memory {
                description("out of memory")
                display("out of memory")
            }
            Param(reason: String) {
                description("invalid parameters")
                display("invalid parameters: {}", reason)
            }
            Contract(fault: Fault) {
                description("codec engine contract violated")
                display("codec engine contract violated: {}", fault)
            }
        }
    }
}
