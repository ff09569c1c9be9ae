pub mod selection;
pub mod source;

pub use selection::Selection;
pub use source::{load_image, LoadedImage, SourceError};
