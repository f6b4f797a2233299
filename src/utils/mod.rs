pub mod attachment;

pub use attachment::{decode_base64, has_extension, require_extension};
