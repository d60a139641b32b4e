mod constants;
pub use constants::SOURCE_PARAM;

mod image;
pub use image::Image;
