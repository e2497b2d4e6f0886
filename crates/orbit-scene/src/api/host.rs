//! Contracts the embedding environment must fulfil.
//!
//! The browser bridge implements these against the DOM; tests implement them
//! with plain structs.

/// The surface the scene is mounted into (a DOM element in the browser).
pub trait Container {
    /// Current layout width in CSS pixels.
    fn client_width(&self) -> u32;

    /// Current layout height in CSS pixels.
    fn client_height(&self) -> u32;

    /// Physical pixels per CSS pixel.
    fn device_pixel_ratio(&self) -> f32 {
        1.0
    }
}

/// Source of uniform random numbers in [0, 1).
///
/// Injected into scene initialization so that seeded runs are reproducible.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}
