use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use image::DynamicImage;
use thiserror::Error;

/// Extensions with decoders compiled into the `image` crate's default
/// feature set.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico", "tga",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0} does not look like an image file")]
    InvalidInputKind(String),
    #[error("could not read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

/// Where the image bytes come from: a picked file on disk, or bytes handed
/// over directly (e.g. a drag-and-drop without a backing path).
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Memory { name: String, bytes: Arc<[u8]> },
}

impl ImageSource {
    pub fn display_name(&self) -> String {
        match self {
            ImageSource::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            ImageSource::Memory { name, .. } => name.clone(),
        }
    }
}

/// A successfully decoded image plus the name it was loaded under.
pub struct LoadedImage {
    pub image: DynamicImage,
    pub name: String,
}

impl LoadedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

pub type LoadOutcome = Result<LoadedImage, LoadError>;

/// Validate, read, and decode an image from `source`.
///
/// Path inputs are rejected before any read when the extension does not
/// claim an image; byte inputs are rejected before decode when the magic
/// bytes do not sniff as an image. Corrupt data that passes those checks
/// fails at decode.
pub fn load(source: &ImageSource) -> LoadOutcome {
    let name = source.display_name();
    let bytes = match source {
        ImageSource::Path(path) => {
            if !has_image_extension(path) {
                return Err(LoadError::InvalidInputKind(name));
            }
            std::fs::read(path).map_err(|err| LoadError::Read {
                name: name.clone(),
                source: err,
            })?
        }
        ImageSource::Memory { bytes, .. } => {
            if !sniffs_as_image(bytes) {
                return Err(LoadError::InvalidInputKind(name));
            }
            bytes.to_vec()
        }
    };

    let image = image::load_from_memory(&bytes).map_err(|err| LoadError::Decode {
        name: name.clone(),
        source: err,
    })?;

    log::info!(
        "decoded {} ({}x{}, {} bytes)",
        name,
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(LoadedImage { image, name })
}

/// Run [`load`] on a worker thread and deliver the outcome on `done`.
///
/// The send is allowed to fail silently: the receiver only disappears when
/// the whole session is gone.
pub fn spawn_load(source: ImageSource, done: Sender<LoadOutcome>) {
    thread::spawn(move || {
        let _ = done.send(load(&source));
    });
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn sniffs_as_image(bytes: &[u8]) -> bool {
    infer::get(bytes).is_some_and(|kind| kind.matcher_type() == infer::MatcherType::Image)
}
