mod api;
mod client;
pub mod error;
pub mod wire;

pub use api::ContentApi;
pub use client::base::ApiUrl;
pub use client::base::BaseClient;
pub use client::base::Config;
pub use client::content::ContentClient;
pub use error::Error;
pub use error::HttpError;
pub use error::InternalError;
pub use wire::ContentSnapshot;
pub use wire::ModuleCreated;
pub use wire::ModuleWithTopics;
