//! Audio file I/O and the processing session

pub mod codec;
pub mod ffmpeg;
pub mod format;
pub mod processor;
pub mod resample;
pub mod wav;

pub use codec::{AudioCodec, DecodedAudio};
pub use ffmpeg::FfmpegCodec;
pub use format::AudioFormat;
pub use processor::{SessionSpectra, SignalProcessor};
pub use resample::resample;
pub use wav::{WavCodec, WavEncoding};
