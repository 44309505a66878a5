/// Decoded mono audio ready for analysis.
///
/// Callers hand the pipeline one channel of samples in the [-1.0, 1.0]
/// range; multi-channel sources pick a channel (or mix down) before
/// constructing a clip.
#[derive(Clone, Debug)]
pub struct AudioClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Drops samples past `max_secs`. Analysis inputs are bounded by the
    /// caller, not by the DSP routines, so this is the truncation point.
    pub fn truncated(mut self, max_secs: f64) -> Self {
        if self.sample_rate > 0 && max_secs >= 0.0 {
            let max_samples = (max_secs * self.sample_rate as f64) as usize;
            if self.samples.len() > max_samples {
                self.samples.truncate(max_samples);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let clip = AudioClip::new(vec![0.0; 22050], 44100);
        assert!((clip.duration_secs() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_duration_zero_rate() {
        let clip = AudioClip::new(vec![0.0; 100], 0);
        assert_eq!(clip.duration_secs(), 0.0);
    }

    #[test]
    fn test_truncated_shortens_long_clip() {
        let clip = AudioClip::new(vec![0.1; 44100], 44100).truncated(0.25);
        assert_eq!(clip.len(), 11025);
        assert!((clip.duration_secs() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_truncated_leaves_short_clip_alone() {
        let clip = AudioClip::new(vec![0.1; 1000], 44100).truncated(2.0);
        assert_eq!(clip.len(), 1000);
    }
}
