use super::SmoothingFilter;
use std::collections::VecDeque;

/// Median of the last `window_size` samples; drops single-frame spikes
pub struct MedianFilter {
    window_size: usize,
    pitch_buffer: VecDeque<f64>,
    yaw_buffer: VecDeque<f64>,
}

impl MedianFilter {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        assert!(window_size % 2 == 1, "Median filter window size must be odd");
        Self {
            window_size,
            pitch_buffer: VecDeque::with_capacity(window_size),
            yaw_buffer: VecDeque::with_capacity(window_size),
        }
    }

    fn calculate_median(values: &VecDeque<f64>) -> f64 {
        let mut sorted: Vec<f64> = values.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);

        let len = sorted.len();
        if len == 0 {
            0.0
        } else if len % 2 == 0 {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
        } else {
            sorted[len / 2]
        }
    }
}

impl SmoothingFilter for MedianFilter {
    fn apply(&mut self, pitch: f64, yaw: f64) -> (f64, f64) {
        if self.pitch_buffer.len() >= self.window_size {
            self.pitch_buffer.pop_front();
        }
        if self.yaw_buffer.len() >= self.window_size {
            self.yaw_buffer.pop_front();
        }

        self.pitch_buffer.push_back(pitch);
        self.yaw_buffer.push_back(yaw);

        (
            Self::calculate_median(&self.pitch_buffer),
            Self::calculate_median(&self.yaw_buffer),
        )
    }

    fn reset(&mut self) {
        self.pitch_buffer.clear();
        self.yaw_buffer.clear();
    }

    fn name(&self) -> &str {
        "MedianFilter"
    }
}
