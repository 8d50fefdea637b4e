//! End-to-end pipeline behaviour through the public API

use filter_workbench::{
    AudioFormat, FilterSpec, ProcessingError, ProcessorConfig, Signal, SignalProcessor,
};

fn processor() -> SignalProcessor {
    let _ = env_logger::builder().is_test(true).try_init();
    SignalProcessor::new(ProcessorConfig::default()).unwrap()
}

#[test]
fn lowpass_removes_tone_above_cutoff() {
    let mut processor = processor();
    let tone = Signal::tone(1000.0, 1.0, 22050, 22050).unwrap();

    let unfiltered = processor.transform(&tone).unwrap();
    let filtered = processor
        .apply_filter(&tone, &FilterSpec::lowpass(200.0, 4))
        .unwrap()
        .clone();
    assert_eq!(filtered.len(), tone.len());

    let after = processor.transform(filtered.signal()).unwrap();
    let before_peak = unfiltered.magnitude_at(1000.0);
    let after_peak = after.magnitude_at(1000.0);
    assert!(
        after_peak * 10.0 <= before_peak,
        "1 kHz magnitude only dropped from {before_peak} to {after_peak}"
    );
}

#[test]
fn zero_phase_lowpass_removes_tone_above_cutoff() {
    let mut processor = processor();
    processor.set_signal(Signal::tone(1000.0, 1.0, 22050, 22050).unwrap());
    processor
        .filter_loaded(&FilterSpec::lowpass(200.0, 4).with_zero_phase(true))
        .unwrap();

    let spectra = processor.spectra().unwrap();
    assert!(spectra.filtered.magnitude_at(1000.0) * 10.0 <= spectra.original.magnitude_at(1000.0));
}

#[test]
fn wav_round_trip_through_processor() {
    let dir = tempfile::tempdir().unwrap();
    let mut processor = processor();
    let tone = Signal::tone(440.0, 0.7, 22050, 11025).unwrap();

    let written = processor
        .export_signal(&tone, dir.path().join("tone"), AudioFormat::Wav)
        .unwrap();
    assert_eq!(written, dir.path().join("tone.wav"));

    let loaded = processor.load_signal(&written).unwrap();
    assert_eq!(loaded.sample_rate(), 22050);
    assert_eq!(loaded.len(), tone.len());
    for (a, b) in loaded.samples().iter().zip(tone.samples()) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn wav_round_trip_keeps_native_rate() {
    let dir = tempfile::tempdir().unwrap();
    let mut processor = processor();
    let tone = Signal::tone(440.0, 0.7, 44100, 44100).unwrap();

    let written = processor
        .export_signal(&tone, dir.path().join("cd"), AudioFormat::Wav)
        .unwrap();
    let loaded = processor.load_signal(&written).unwrap();

    assert_eq!(loaded.sample_rate(), 44100);
    assert_eq!(loaded.len(), tone.len());
    for (a, b) in loaded.samples().iter().zip(tone.samples()) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn analysis_rate_preset_resamples_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let tone = Signal::tone(1000.0, 0.5, 44100, 44100).unwrap();
    let written = processor()
        .export_signal(&tone, dir.path().join("cd"), AudioFormat::Wav)
        .unwrap();

    let mut resampling = SignalProcessor::new(ProcessorConfig::analysis_rate()).unwrap();
    let loaded = resampling.load_signal(&written).unwrap();
    assert_eq!(loaded.sample_rate(), 22050);
    assert_eq!(loaded.len(), 22050);
}

#[test]
fn filtered_export_then_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut processor = processor();
    processor.set_signal(Signal::tone(3000.0, 0.5, 22050, 4410).unwrap());
    processor
        .filter_loaded(&FilterSpec::bandpass(2000.0, 4000.0, 3))
        .unwrap();

    let path = processor
        .export_filtered(dir.path().join("band.wav"), AudioFormat::Wav)
        .unwrap();
    assert_eq!(path, dir.path().join("band.wav"));

    let expected = processor.filtered().unwrap().samples().to_vec();
    let reloaded = processor.load_signal(&path).unwrap().samples().to_vec();
    assert_eq!(reloaded.len(), expected.len());
    for (a, b) in reloaded.iter().zip(expected.iter()) {
        assert!((a - b).abs() < 1e-6);
    }
    assert!(processor.filtered().is_none());
}

#[test]
fn boundary_specs_rejected() {
    let mut processor = processor();
    let tone = Signal::tone(1000.0, 1.0, 22050, 2205).unwrap();

    for spec in [
        FilterSpec::lowpass(0.0, 4),
        FilterSpec::lowpass(11025.0, 4),
        FilterSpec::highpass(20_000.0, 2),
        FilterSpec::lowpass(200.0, 0),
        FilterSpec::bandpass(4000.0, 1000.0, 2),
        FilterSpec::bandpass(1000.0, 1000.0, 2),
    ] {
        assert!(
            matches!(
                processor.apply_filter(&tone, &spec),
                Err(ProcessingError::InvalidParameter { .. })
            ),
            "{spec:?} should be rejected"
        );
    }
    assert!(processor.filtered().is_none());
}

#[test]
fn empty_signal_rejected() {
    let mut processor = processor();
    let empty = Signal::new(Vec::new(), 22050).unwrap();

    assert!(matches!(processor.transform(&empty), Err(ProcessingError::EmptySignal)));
    assert!(matches!(
        processor.apply_filter(&empty, &FilterSpec::lowpass(200.0, 4)),
        Err(ProcessingError::EmptySignal)
    ));
}

#[test]
fn transform_before_load_fails() {
    let mut processor = processor();
    assert!(matches!(
        processor.transform_loaded(),
        Err(ProcessingError::PreconditionNotMet(_))
    ));
}

#[test]
fn unsupported_formats() {
    let dir = tempfile::tempdir().unwrap();
    let mut processor = processor();
    let tone = Signal::tone(440.0, 0.5, 22050, 100).unwrap();

    assert!(matches!(
        "flac".parse::<AudioFormat>(),
        Err(ProcessingError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        processor.export_to_path(&tone, dir.path().join("out.flac")),
        Err(ProcessingError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        processor.load_signal(dir.path().join("song.ogg")),
        Err(ProcessingError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut processor = processor();
    assert!(matches!(
        processor.load_signal(dir.path().join("absent.wav")),
        Err(ProcessingError::Io { .. })
    ));
}
