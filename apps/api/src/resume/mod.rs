// Resume intake: form decoding, bullet segmentation, record building, preview.
// Records are rebuilt from the submitted form on every request and never stored.

pub mod builder;
pub mod form;
pub mod handlers;
pub mod preview;
pub mod segment;
