// Feedback handling: segmenting mixed AI feedback and preparing it for display.
// Pure functions only; no I/O happens here.

pub mod presentation;
pub mod segmenter;
