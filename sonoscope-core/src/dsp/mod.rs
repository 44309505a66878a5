pub mod fft;
pub mod spectrogram;
pub mod spectrum;
pub mod window;
