pub mod decoder;
pub mod resampler;

pub use decoder::{TARGET_SAMPLE_RATE, decode_to_mono_16k};
pub use resampler::Resampler;
