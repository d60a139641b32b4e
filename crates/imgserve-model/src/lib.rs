mod domain;
pub use domain::{Image, SOURCE_PARAM};

mod error;
pub use error::{ParamError, ParamResult};

mod params;
pub use params::{ParamValue, Params};
