pub mod api_model;
pub mod dates;
pub mod grouping;
pub mod i18n;
pub mod numbers;
pub mod view_model;

pub use api_model::*;
pub use i18n::*;
pub use view_model::*;
