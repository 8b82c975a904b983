use rubato::{
    Resampler as RubatoResampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
    WindowFunction,
};

/// Resamples mono audio from an arbitrary rate to 16kHz using sinc interpolation.
pub struct Resampler {
    inner: SincFixedIn<f32>,
    /// Accumulator for input samples that don't fill a complete chunk.
    pending: Vec<f32>,
    /// Number of input frames the resampler expects per process() call.
    chunk_size: usize,
}

impl Resampler {
    /// Creates a new `from_rate` -> `to_rate` mono resampler.
    ///
    /// `chunk_size` is the number of input frames per resampling call.
    pub fn new(from_rate: u32, to_rate: u32, chunk_size: usize) -> anyhow::Result<Self> {
        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        let inner = SincFixedIn::<f32>::new(
            f64::from(to_rate) / f64::from(from_rate),
            2.0, // max relative ratio
            params,
            chunk_size,
            1, // mono channel
        )
        .map_err(|e| anyhow::anyhow!("Failed to create resampler: {}", e))?;

        Ok(Self {
            inner,
            pending: Vec::with_capacity(chunk_size * 2),
            chunk_size,
        })
    }

    /// Feeds mono samples and returns resampled output.
    ///
    /// Buffers internally if input doesn't fill a complete resampler chunk.
    pub fn process(&mut self, input: &[f32]) -> anyhow::Result<Vec<f32>> {
        self.pending.extend_from_slice(input);

        let mut output = Vec::new();

        while self.pending.len() >= self.chunk_size {
            let chunk: Vec<f32> = self.pending.drain(..self.chunk_size).collect();
            let mut resampled = self
                .inner
                .process(&[chunk], None)
                .map_err(|e| anyhow::anyhow!("Resample error: {}", e))?;
            output.append(&mut resampled[0]);
        }

        Ok(output)
    }

    /// Flushes any remaining buffered samples (with zero-padding).
    pub fn flush(&mut self) -> anyhow::Result<Vec<f32>> {
        if self.pending.is_empty() {
            return Ok(Vec::new());
        }

        self.pending.resize(self.chunk_size, 0.0);
        self.process(&[])
    }
}
