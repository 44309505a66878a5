pub mod colormap;
pub mod waveform;
