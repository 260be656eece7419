pub mod api_error;
pub mod collect;
pub mod configuration;
pub mod esi_client;
pub mod fetching;
pub mod mm_client;
pub mod reqwest_helpers;
pub mod static_data;

pub use api_error::ApiError;
pub use configuration::AppConfiguration;
pub use esi_client::EsiClient;
pub use mm_client::MmClient;
pub use static_data::InMemorySunTypes;
