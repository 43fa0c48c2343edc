//! Models for making requests.

mod notification;
mod player;

pub use notification::{Button, NotificationExtras, Targeting};
pub use player::{GetPlayersOptions, PlayerWrite};

pub(crate) use notification::{
    broadcast_notification,
    custom_notification,
    segment_notification,
    user_notification,
};
pub(crate) use player::{player_id, player_parameters, validate_new_player};

/// Path for sending notifications.
pub const ENDPOINT_NOTIFICATIONS: &str = "notifications";
/// Path for creating and listing players.
pub const ENDPOINT_PLAYERS: &str = "players";
