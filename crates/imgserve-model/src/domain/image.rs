use std::fmt;

/// Opaque payload returned by a server.
///
/// The serving layer never looks inside: `format` is a free-form tag
/// (e.g. `"png"`) and `data` the raw bytes, both supplied by whatever leaf produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Image {
    format: String,
    data: Vec<u8>,
}

impl Image {
    /// Create an image from a format tag and raw bytes.
    pub fn new<F, D>(format: F, data: D) -> Self
    where
        F: Into<String>,
        D: Into<Vec<u8>>,
    {
        Self {
            format: format.into(),
            data: data.into(),
        }
    }

    /// Format tag.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the payload has no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the image and return its raw bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Image(format='{}', len={})", self.format, self.data.len())
    }
}
