//! Butterworth IIR design and offline filtering

pub mod spec;
pub mod design;
pub mod sos;
pub mod filtfilt;
pub mod iir;

pub use spec::{Cutoff, FilterKind, FilterSpec};
pub use design::{design_butterworth, frequency_response, magnitude_response_db};
pub use sos::{Biquad, SosFilter};
pub use filtfilt::filtfilt;
pub use iir::{filter_signal, IirFilter};
