pub mod common;
pub mod lifecycle;
pub mod package;
pub mod pagination;
pub mod pending_card;
pub mod staff;
pub mod subscriber;

pub use common::*;
pub use lifecycle::*;
pub use package::*;
pub use pagination::*;
pub use pending_card::*;
pub use staff::*;
pub use subscriber::*;
