pub mod auth_table;
pub mod inactive_prepaid;
pub mod nullspeed_regular_users;
pub mod nullspeed_unused_cafe_cards;
pub mod packages;
pub mod staff_users;

pub use auth_table as subscriber_entity;
pub use auth_table::{AccountType, SubscriberStatus};
pub use inactive_prepaid as prepaid_card_entity;
pub use nullspeed_regular_users as nullspeed_regular_entity;
pub use nullspeed_unused_cafe_cards as nullspeed_cafe_entity;
pub use packages as package_entity;
pub use staff_users as staff_user_entity;

pub type Subscriber = auth_table::Model;
pub type PrepaidCard = inactive_prepaid::Model;
pub type NullSpeedRegularUser = nullspeed_regular_users::Model;
pub type NullSpeedCafeCard = nullspeed_unused_cafe_cards::Model;
pub type Package = packages::Model;
