pub use super::chat_message::Entity as ChatMessage;
pub use super::ride::Entity as Ride;
pub use super::ride_status_history::Entity as RideStatusHistory;
