//! Cascaded second-order sections with state management
//!
//! Each section runs in Direct Form II Transposed, so the delay line is two
//! values per section regardless of filter order.

use num_complex::Complex64;

/// One second-order section, `a[0]` normalized to 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    /// Feedforward coefficients b0, b1, b2
    pub b: [f64; 3],

    /// Feedback coefficients 1, a1, a2
    pub a: [f64; 3],
}

impl Biquad {
    pub fn new(b: [f64; 3], a: [f64; 3]) -> Self {
        let a0 = a[0];
        Self {
            b: [b[0] / a0, b[1] / a0, b[2] / a0],
            a: [1.0, a[1] / a0, a[2] / a0],
        }
    }

    /// A section with no z^-2 terms
    pub fn is_first_order(&self) -> bool {
        self.b[2] == 0.0 && self.a[2] == 0.0
    }

    /// Complex response H(e^jω) at `omega` rad/sample
    pub fn response(&self, omega: f64) -> Complex64 {
        let z1 = Complex64::from_polar(1.0, -omega);
        let z2 = z1 * z1;
        let num = self.b[0] + self.b[1] * z1 + self.b[2] * z2;
        let den = self.a[0] + self.a[1] * z1 + self.a[2] * z2;
        num / den
    }

    /// Gain at DC, H(1)
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    /// Rescale the numerator so |H(e^jω)| = 1 at `omega`
    pub(crate) fn normalize_at(&mut self, omega: f64) {
        let gain = self.response(omega).norm();
        if gain > 0.0 && gain.is_finite() {
            for b in self.b.iter_mut() {
                *b /= gain;
            }
        }
    }
}

/// Stateful cascade of [`Biquad`] sections
pub struct SosFilter {
    sections: Vec<Biquad>,

    /// Delay line, two values per section
    state: Vec<[f64; 2]>,
}

impl SosFilter {
    pub fn new(sections: Vec<Biquad>) -> Self {
        let state = vec![[0.0; 2]; sections.len()];
        Self { sections, state }
    }

    /// Process single sample
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let mut x = input;
        for (section, z) in self.sections.iter().zip(self.state.iter_mut()) {
            let y = section.b[0] * x + z[0];
            z[0] = section.b[1] * x - section.a[1] * y + z[1];
            z[1] = section.b[2] * x - section.a[2] * y;
            x = y;
        }
        x
    }

    /// Process a block of samples (output has the input's length)
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Process a block in-place
    pub fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Clear the delay line
    pub fn reset(&mut self) {
        self.state.iter_mut().for_each(|z| *z = [0.0; 2]);
    }

    /// Load the steady-state delay line for a constant input of `level`
    ///
    /// Starting from this state, feeding `level` forever produces no transient.
    pub fn prime(&mut self, level: f64) {
        let zi = steady_state(&self.sections);
        for (z, unit) in self.state.iter_mut().zip(zi.iter()) {
            *z = [unit[0] * level, unit[1] * level];
        }
    }

    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Effective order (number of poles)
    pub fn order(&self) -> usize {
        self.sections
            .iter()
            .map(|s| if s.is_first_order() { 1 } else { 2 })
            .sum()
    }
}

/// Delay line of every section in steady state under a unit step input
///
/// Section `i` sees the step scaled by the DC gain of the sections before it.
pub fn steady_state(sections: &[Biquad]) -> Vec<[f64; 2]> {
    let mut level = 1.0;
    sections
        .iter()
        .map(|s| {
            let y = s.dc_gain() * level;
            let z0 = y - s.b[0] * level;
            let z1 = s.b[2] * level - s.a[2] * y;
            level = y;
            [z0, z1]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_pole(pole: f64) -> Biquad {
        // y[n] = (1 - p) x[n] + p y[n-1]
        Biquad::new([1.0 - pole, 0.0, 0.0], [1.0, -pole, 0.0])
    }

    #[test]
    fn test_normalizes_a0() {
        let section = Biquad::new([2.0, 4.0, 2.0], [2.0, 1.0, 0.5]);
        assert_eq!(section.a, [1.0, 0.5, 0.25]);
        assert_eq!(section.b, [1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_identity_section() {
        let mut filter = SosFilter::new(vec![Biquad::new([1.0, 0.0, 0.0], [1.0, 0.0, 0.0])]);
        let input = vec![0.25, -1.0, 3.0, 0.5];
        assert_eq!(filter.process_block(&input), input);
    }

    #[test]
    fn test_one_pole_impulse_response() {
        let mut filter = SosFilter::new(vec![one_pole(0.5)]);
        let output = filter.process_block(&[1.0, 0.0, 0.0, 0.0]);

        // Expected: 0.5 * 0.5^n
        let expected = [0.5, 0.25, 0.125, 0.0625];
        for (y, e) in output.iter().zip(expected.iter()) {
            assert!((y - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cascade_matches_sequential_sections() {
        let a = one_pole(0.3);
        let b = Biquad::new([0.2, 0.4, 0.2], [1.0, -0.5, 0.2]);
        let input: Vec<f64> = (0..32).map(|n| ((n * 7) % 5) as f64 - 2.0).collect();

        let mut cascade = SosFilter::new(vec![a, b]);
        let combined = cascade.process_block(&input);

        let mut first = SosFilter::new(vec![a]);
        let mut second = SosFilter::new(vec![b]);
        let sequential = second.process_block(&first.process_block(&input));

        for (c, s) in combined.iter().zip(sequential.iter()) {
            assert!((c - s).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = SosFilter::new(vec![one_pole(0.9)]);
        filter.process_block(&[1.0; 16]);
        filter.reset();

        let output = filter.process_sample(1.0);
        assert!((output - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_primed_filter_has_no_transient() {
        let sections = vec![
            Biquad::new([0.2, 0.4, 0.2], [1.0, -0.5, 0.2]),
            Biquad::new([0.1, 0.2, 0.1], [1.0, -1.1, 0.4]),
        ];
        let gain: f64 = sections.iter().map(Biquad::dc_gain).product();

        let mut filter = SosFilter::new(sections);
        filter.prime(3.0);
        for y in filter.process_block(&[3.0; 64]) {
            assert!((y - 3.0 * gain).abs() < 1e-10);
        }
    }

    #[test]
    fn test_order_counts_first_order_sections() {
        let filter = SosFilter::new(vec![one_pole(0.5), Biquad::new([1.0, 2.0, 1.0], [1.0, 0.1, 0.2])]);
        assert_eq!(filter.order(), 3);
    }

    #[test]
    fn test_normalize_at_dc() {
        let mut section = Biquad::new([1.0, 2.0, 1.0], [1.0, -0.5, 0.2]);
        section.normalize_at(0.0);
        assert!((section.dc_gain() - 1.0).abs() < 1e-12);
    }
}
