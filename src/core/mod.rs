//! Record assembly and the sampling loop

mod assembler;
mod host;
mod sampler;

pub use assembler::RecordAssembler;
pub use host::{StaticHost, SystemHost};
pub use sampler::{LoopState, SamplingLoop};
