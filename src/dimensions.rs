use thiserror::Error;

use crate::loader::LoadedImage;
use crate::presets;

/// Validated output dimensions. Both axes are positive whenever a value is
/// produced through [`resolve_from_preset`] or [`resolve_from_manual_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("width and height must be whole numbers")]
    NotANumber,
    #[error("width and height must be greater than zero")]
    NonPositive,
}

/// Resolve a target size from a preset selection.
///
/// A known id yields that preset's dimensions. An empty or unknown id
/// reverts to the active image's intrinsic size; with no active image
/// there is nothing to resolve and the caller leaves its fields untouched.
pub fn resolve_from_preset(id: &str, active: Option<&LoadedImage>) -> Option<TargetSize> {
    if let Some(entry) = presets::lookup(id) {
        return Some(TargetSize {
            width: entry.width,
            height: entry.height,
        });
    }
    active.map(|image| TargetSize {
        width: image.width(),
        height: image.height(),
    })
}

/// Parse and validate manually entered dimensions.
pub fn resolve_from_manual_input(
    width_text: &str,
    height_text: &str,
) -> Result<TargetSize, ValidationError> {
    let width = parse_dimension(width_text)?;
    let height = parse_dimension(height_text)?;
    Ok(TargetSize { width, height })
}

/// Values too large for a `u32` cannot address a raster surface and are
/// rejected at parse time.
fn parse_dimension(text: &str) -> Result<u32, ValidationError> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber)?;
    if value <= 0 {
        return Err(ValidationError::NonPositive);
    }
    u32::try_from(value).map_err(|_| ValidationError::NotANumber)
}
