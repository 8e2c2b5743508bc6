pub mod auth_service;
pub mod lifecycle_service;
pub mod package_service;
pub mod pending_card_service;
pub mod records;
pub mod subscriber_service;

pub use auth_service::*;
pub use lifecycle_service::*;
pub use package_service::*;
pub use pending_card_service::*;
pub use subscriber_service::*;
