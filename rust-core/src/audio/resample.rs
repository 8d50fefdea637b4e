//! Whole-buffer sample-rate conversion with rubato
//!
//! Loaded audio is brought to the analysis rate once, up front, so every later
//! stage sees a single fixed sample rate.

use crate::error::{ProcessingError, Result};
use log::debug;
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

/// Input frames handed to the resampler per call
const CHUNK_SIZE: usize = 1024;

fn sinc_parameters() -> SincInterpolationParameters {
    SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    }
}

/// Resample mono `samples` from `from_rate` to `to_rate`
///
/// The output has `round(len * to_rate / from_rate)` samples and is aligned
/// with the input (the resampler's group delay is removed).
pub fn resample(samples: &[f64], from_rate: u32, to_rate: u32) -> Result<Vec<f64>> {
    if from_rate == 0 || to_rate == 0 {
        return Err(ProcessingError::invalid(
            "sample_rate",
            "resampling rates must be greater than zero",
        ));
    }
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let expected = (samples.len() as f64 * ratio).round() as usize;

    let mut resampler = SincFixedIn::<f64>::new(ratio, 1.0, sinc_parameters(), CHUNK_SIZE, 1)
        .map_err(|e| ProcessingError::Resample(e.to_string()))?;
    let delay = resampler.output_delay();

    let mut output = Vec::with_capacity(expected + delay + CHUNK_SIZE);
    let mut position = 0;

    while samples.len() - position >= resampler.input_frames_next() {
        let needed = resampler.input_frames_next();
        let chunk: &[&[f64]] = &[&samples[position..position + needed]];
        let block = resampler
            .process(chunk, None)
            .map_err(|e| ProcessingError::Resample(e.to_string()))?;
        output.extend_from_slice(&block[0]);
        position += needed;
    }

    if position < samples.len() {
        let tail: &[&[f64]] = &[&samples[position..]];
        let block = resampler
            .process_partial(Some(tail), None)
            .map_err(|e| ProcessingError::Resample(e.to_string()))?;
        output.extend_from_slice(&block[0]);
    }

    // Flush the frames still held back by the filter delay
    while output.len() < expected + delay {
        let block = resampler
            .process_partial(None::<&[Vec<f64>]>, None)
            .map_err(|e| ProcessingError::Resample(e.to_string()))?;
        if block[0].is_empty() {
            break;
        }
        output.extend_from_slice(&block[0]);
    }

    output.drain(..delay.min(output.len()));
    output.resize(expected, 0.0);

    debug!(
        "resampled {} samples at {} Hz to {} samples at {} Hz",
        samples.len(),
        from_rate,
        output.len(),
        to_rate
    );

    Ok(output)
}
