//! Network layer: origin detection, request decoration and the shared
//! request pipeline.

pub mod api;
pub mod interceptor;
pub mod resolver;

pub use api::ApiClient;
pub use interceptor::AuthInterceptor;
pub use resolver::{ApiResolver, ApiStatus};
