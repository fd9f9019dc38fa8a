// Media normalization for image tool arguments
//
// Turns base64 (optionally data-URL wrapped) payloads into bounded JPEG
// attachments before they are handed to the completion backend.

mod normalizer;

pub use normalizer::{MediaError, MediaNormalizer, MediaPolicy, NormalizedImage};
