pub mod app;

pub use app::error::RetrieverError;
pub use app::models::Config;
