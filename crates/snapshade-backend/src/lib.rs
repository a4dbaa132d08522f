//! snapshade filter backend
//!
//! Decodes photos into RGBA8 buffers, runs the snapshade filters on them and
//! encodes the results. All filters are pure functions of their input and
//! parameters; the vintage grain draws from a seeded PCG32 stream, so output is
//! byte-identical for the same recipe.
//!
//! # Example
//!
//! ```
//! use snapshade_backend::{apply_filter, PixelBuffer};
//! use snapshade_spec::{FilterParams, SepiaParams};
//!
//! let photo = PixelBuffer::filled(4, 4, [120, 80, 40, 255]).unwrap();
//! let output = apply_filter(&photo, &FilterParams::Sepia(SepiaParams { intensity: 1.0 })).unwrap();
//! assert_eq!(output.as_image().unwrap().width(), 4);
//! ```
//!
//! The [`Session`] type keeps an original image around and re-filters it on
//! every change, the way an interactive editor does.

pub mod buffer;
pub mod color;
pub mod decode;
pub mod filters;
pub mod png;
pub mod resample;
pub mod rng;
pub mod session;

pub use buffer::{BufferError, PixelBuffer};
pub use color::{Color, ColorParseError};
pub use decode::{decode_file, decode_image, DecodeError};
pub use filters::{apply_filter, AsciiArt, FilterError, FilterOutput};
pub use png::{PngConfig, PngError};
pub use rng::DeterministicRng;
pub use session::{Export, Preview, Session, SessionError};
