use super::SmoothingFilter;
use std::collections::VecDeque;

/// Mean of the last `window_size` samples
pub struct MovingAverageFilter {
    window_size: usize,
    pitch_buffer: VecDeque<f64>,
    yaw_buffer: VecDeque<f64>,
}

impl MovingAverageFilter {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            window_size,
            pitch_buffer: VecDeque::with_capacity(window_size),
            yaw_buffer: VecDeque::with_capacity(window_size),
        }
    }

    fn push(buffer: &mut VecDeque<f64>, window_size: usize, value: f64) -> f64 {
        if buffer.len() >= window_size {
            buffer.pop_front();
        }
        buffer.push_back(value);
        buffer.iter().sum::<f64>() / buffer.len() as f64
    }
}

impl SmoothingFilter for MovingAverageFilter {
    fn apply(&mut self, pitch: f64, yaw: f64) -> (f64, f64) {
        let pitch_avg = Self::push(&mut self.pitch_buffer, self.window_size, pitch);
        let yaw_avg = Self::push(&mut self.yaw_buffer, self.window_size, yaw);
        (pitch_avg, yaw_avg)
    }

    fn reset(&mut self) {
        self.pitch_buffer.clear();
        self.yaw_buffer.clear();
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}
