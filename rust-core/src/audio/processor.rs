//! Session object tying load, filter, transform and export together
//!
//! The processor owns the current [`Signal`] and the most recent
//! [`FilteredSignal`]. Replacing the signal drops the cached filter result so
//! nothing derived from stale samples survives. Every call runs to completion
//! on the caller's thread.

use super::codec::AudioCodec;
use super::ffmpeg::FfmpegCodec;
use super::format::AudioFormat;
use super::resample::resample;
use super::wav::WavCodec;
use crate::config::ProcessorConfig;
use crate::error::{ProcessingError, Result};
use crate::filters::{filter_signal, FilterSpec};
use crate::signal::{FilteredSignal, Signal, SpectralView};
use crate::spectrum::SpectrumAnalyzer;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Spectra of the loaded signal and of its filtered version
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSpectra {
    pub original: SpectralView,
    pub filtered: SpectralView,
}

pub struct SignalProcessor {
    config: ProcessorConfig,

    /// Decode/encode collaborators, one per format
    codecs: HashMap<AudioFormat, Box<dyn AudioCodec>>,

    analyzer: SpectrumAnalyzer,

    /// Current signal (None until something is loaded)
    signal: Option<Signal>,

    /// Result of the last filter run
    filtered: Option<FilteredSignal>,

    /// Whether `filtered` was computed from `signal`
    filtered_from_loaded: bool,
}

impl SignalProcessor {
    /// Create a processor with the built-in codecs for every [`AudioFormat`]
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        config.validate()?;

        let mut codecs: HashMap<AudioFormat, Box<dyn AudioCodec>> = HashMap::new();
        codecs.insert(AudioFormat::Wav, Box::new(WavCodec::new(config.wav_encoding)));
        for format in [AudioFormat::Mp3, AudioFormat::Aac] {
            codecs.insert(
                format,
                Box::new(FfmpegCodec::new(
                    config.ffmpeg_binary.clone(),
                    format,
                    config.ffmpeg_bitrate_kbps,
                )),
            );
        }

        Ok(Self {
            analyzer: SpectrumAnalyzer::new(config.analyzer.clone()),
            config,
            codecs,
            signal: None,
            filtered: None,
            filtered_from_loaded: false,
        })
    }

    /// Replace the codec used for `format`
    pub fn with_codec(mut self, format: AudioFormat, codec: Box<dyn AudioCodec>) -> Self {
        self.codecs.insert(format, codec);
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Currently loaded signal
    pub fn signal(&self) -> Option<&Signal> {
        self.signal.as_ref()
    }

    /// Cached result of the last filter run
    pub fn filtered(&self) -> Option<&FilteredSignal> {
        self.filtered.as_ref()
    }

    fn codec(&self, format: AudioFormat) -> Result<&dyn AudioCodec> {
        self.codecs
            .get(&format)
            .map(|codec| codec.as_ref())
            .ok_or_else(|| {
                ProcessingError::UnsupportedFormat(format!("no codec registered for {format}"))
            })
    }

    /// Decode `path` into a mono signal without touching the session
    fn decode_signal(&self, path: &Path) -> Result<Signal> {
        let format = AudioFormat::from_path(path)?;
        let decoded = self.codec(format)?.decode(path)?;

        let native_rate = decoded.sample_rate;
        let channels = decoded.channels;
        let mono = decoded.into_mono();
        if mono.is_empty() {
            return Err(ProcessingError::EmptySignal);
        }

        let signal = match self.config.target_sample_rate {
            Some(target) if target != native_rate => {
                Signal::new(resample(&mono, native_rate, target)?, target)?
            }
            _ => Signal::new(mono, native_rate)?,
        };

        info!(
            "decoded {} ({} channel(s) at {} Hz) into {} samples at {} Hz",
            path.display(),
            channels,
            native_rate,
            signal.len(),
            signal.sample_rate()
        );

        Ok(signal)
    }

    /// Decode `path`, downmix to mono and bring it to the configured rate
    ///
    /// The file's own sample rate is kept unless the config sets a target.
    /// On success the decoded signal becomes the current one and any cached
    /// filter result is dropped. On failure the previous state is untouched.
    pub fn load_signal(&mut self, path: impl AsRef<Path>) -> Result<&Signal> {
        let signal = self.decode_signal(path.as_ref())?;
        Ok(self.set_signal(signal))
    }

    /// Make an in-memory signal the current one
    pub fn set_signal(&mut self, signal: Signal) -> &Signal {
        if self.filtered.take().is_some() {
            debug!("dropped cached filter result");
        }
        self.signal.insert(signal)
    }

    /// Filter `signal` with `spec` and cache the result
    ///
    /// A result computed from anything other than the loaded signal is not
    /// paired with it by [`spectra`](Self::spectra).
    pub fn apply_filter(&mut self, signal: &Signal, spec: &FilterSpec) -> Result<&FilteredSignal> {
        let filtered = filter_signal(signal, spec)?;
        self.filtered_from_loaded = self.signal.as_ref() == Some(signal);
        info!(
            "applied {:?} order {} ({}) to {} samples",
            spec.kind,
            spec.order,
            if spec.zero_phase { "zero-phase" } else { "causal" },
            signal.len()
        );
        Ok(self.filtered.insert(filtered))
    }

    /// Filter the loaded signal
    pub fn filter_loaded(&mut self, spec: &FilterSpec) -> Result<&FilteredSignal> {
        let signal = self
            .signal
            .as_ref()
            .ok_or(ProcessingError::PreconditionNotMet("no signal loaded"))?;
        let filtered = filter_signal(signal, spec)?;
        info!("filtered loaded signal with {:?} order {}", spec.kind, spec.order);
        self.filtered_from_loaded = true;
        Ok(self.filtered.insert(filtered))
    }

    /// Load `path` and filter it straight away
    ///
    /// The session changes only if both steps succeed.
    pub fn load_and_filter(
        &mut self,
        path: impl AsRef<Path>,
        spec: &FilterSpec,
    ) -> Result<&FilteredSignal> {
        // A known target rate lets a bad spec fail before the file is read
        if let Some(rate) = self.config.target_sample_rate {
            spec.validate(rate)?;
        }

        let signal = self.decode_signal(path.as_ref())?;
        let filtered = filter_signal(&signal, spec)?;
        info!("filtered loaded signal with {:?} order {}", spec.kind, spec.order);

        self.set_signal(signal);
        self.filtered_from_loaded = true;
        Ok(self.filtered.insert(filtered))
    }

    /// Magnitude spectrum of any signal
    pub fn transform(&mut self, signal: &Signal) -> Result<SpectralView> {
        self.analyzer.analyze(signal)
    }

    /// Spectrum of the loaded signal
    pub fn transform_loaded(&mut self) -> Result<SpectralView> {
        let signal = self
            .signal
            .as_ref()
            .ok_or(ProcessingError::PreconditionNotMet("no signal loaded"))?;
        self.analyzer.analyze(signal)
    }

    /// Spectrum of the cached filter result
    pub fn transform_filtered(&mut self) -> Result<SpectralView> {
        let filtered = self
            .filtered
            .as_ref()
            .ok_or(ProcessingError::PreconditionNotMet("no filtered signal"))?;
        self.analyzer.analyze(filtered.signal())
    }

    /// Spectra of the loaded and the filtered signal, side by side
    ///
    /// Fails unless the cached filter result was computed from the loaded
    /// signal.
    pub fn spectra(&mut self) -> Result<SessionSpectra> {
        let original = self.transform_loaded()?;
        if self.filtered.is_some() && !self.filtered_from_loaded {
            return Err(ProcessingError::PreconditionNotMet(
                "filtered signal was not derived from the loaded signal",
            ));
        }
        let filtered = self.transform_filtered()?;
        Ok(SessionSpectra { original, filtered })
    }

    /// Encode `signal` next to `base` with the extension of `format`
    ///
    /// Returns the path actually written.
    pub fn export_signal(
        &self,
        signal: &Signal,
        base: impl AsRef<Path>,
        format: AudioFormat,
    ) -> Result<PathBuf> {
        let path = format.export_path(base.as_ref());
        self.codec(format)?.encode(signal, &path)?;
        info!(
            "exported {} samples at {} Hz to {}",
            signal.len(),
            signal.sample_rate(),
            path.display()
        );
        Ok(path)
    }

    /// Encode `signal` to `path`, taking the format from its extension
    pub fn export_to_path(&self, signal: &Signal, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let format = AudioFormat::from_path(path)?;
        self.export_signal(signal, path, format)
    }

    /// Export the cached filter result
    pub fn export_filtered(&self, base: impl AsRef<Path>, format: AudioFormat) -> Result<PathBuf> {
        let filtered = self
            .filtered
            .as_ref()
            .ok_or(ProcessingError::PreconditionNotMet("no filtered signal"))?;
        self.export_signal(filtered.signal(), base, format)
    }
}
