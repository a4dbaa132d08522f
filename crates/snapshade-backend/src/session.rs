//! Editing session.
//!
//! A session holds the loaded original and at most one filtered result.
//! Filters are always applied to the original, so changing a parameter and
//! re-applying never stacks effects.

use snapshade_spec::{BackendError, FilterKind, FilterParams};
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::decode::{decode_image, DecodeError};
use crate::filters::{apply_filter, AsciiArt, FilterError, FilterOutput};
use crate::png::{encode_png, PngConfig, PngError};

/// File name for exported images.
pub const IMAGE_EXPORT_NAME: &str = "filtered-image.png";
/// File name for exported ASCII art.
pub const TEXT_EXPORT_NAME: &str = "ascii-art.txt";

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no image loaded")]
    NoImageLoaded,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Png(#[from] PngError),
}

impl BackendError for SessionError {
    fn code(&self) -> &'static str {
        match self {
            SessionError::NoImageLoaded => "SESSION_001",
            SessionError::Decode(_) => "SESSION_002",
            SessionError::Filter(e) => e.code(),
            SessionError::Png(_) => "SESSION_003",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            SessionError::Filter(e) => e.category(),
            _ => "session",
        }
    }
}

/// What the session currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preview<'a> {
    Image(&'a PixelBuffer),
    Text(&'a AsciiArt),
}

/// A downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
struct Applied {
    params: FilterParams,
    output: FilterOutput,
}

/// Holds one original image and the latest filter result.
#[derive(Debug, Default)]
pub struct Session {
    original: Option<PixelBuffer>,
    applied: Option<Applied>,
    png_config: PngConfig,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` when exporting images.
    pub fn with_png_config(mut self, config: PngConfig) -> Self {
        self.png_config = config;
        self
    }

    /// Replace the original and drop any result.
    pub fn load(&mut self, image: PixelBuffer) {
        log::debug!("session loaded {}x{} image", image.width(), image.height());
        self.original = Some(image);
        self.applied = None;
    }

    /// Decode PNG or JPEG bytes and load them.
    ///
    /// On a decode error the session keeps its previous state.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let image = decode_image(bytes)?;
        self.load(image);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.original.is_some()
    }

    pub fn original(&self) -> Result<&PixelBuffer, SessionError> {
        self.original.as_ref().ok_or(SessionError::NoImageLoaded)
    }

    /// Filter the original with `params`, replacing the previous result.
    ///
    /// If the filter fails the previous result is kept.
    pub fn apply(&mut self, params: &FilterParams) -> Result<&FilterOutput, SessionError> {
        let original = self.original()?;
        let output = apply_filter(original, params)?;
        let applied = self.applied.insert(Applied {
            params: params.clone(),
            output,
        });
        Ok(&applied.output)
    }

    /// The filter behind the current result, if any.
    pub fn active_filter(&self) -> Option<FilterKind> {
        self.applied.as_ref().map(|a| a.params.kind())
    }

    /// Parameters of the current result, if any.
    pub fn active_params(&self) -> Option<&FilterParams> {
        self.applied.as_ref().map(|a| &a.params)
    }

    /// Go back to showing the original.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.original()?;
        self.applied = None;
        Ok(())
    }

    /// The filtered result, or the original when no filter is active.
    pub fn current(&self) -> Result<Preview<'_>, SessionError> {
        let original = self.original()?;
        Ok(match self.applied.as_ref().map(|a| &a.output) {
            Some(FilterOutput::Image(image)) => Preview::Image(image),
            Some(FilterOutput::Text(art)) => Preview::Text(art),
            None => Preview::Image(original),
        })
    }

    /// Package what [`Session::current`] shows as a file.
    pub fn export(&self) -> Result<Export, SessionError> {
        match self.current()? {
            Preview::Image(image) => Ok(Export {
                file_name: IMAGE_EXPORT_NAME,
                mime: "image/png",
                bytes: encode_png(image, &self.png_config)?,
            }),
            Preview::Text(art) => Ok(Export {
                file_name: TEXT_EXPORT_NAME,
                mime: "text/plain",
                bytes: art.text.clone().into_bytes(),
            }),
        }
    }
}
