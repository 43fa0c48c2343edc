//! Typed views of decoded response bodies. Use with [`crate::DispatchResult::resolve_as`].

use crate::enums::DeviceType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response to sending a notification.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct NotificationResponse {
    /// The notification ID. Empty when no player was targeted.
    #[serde(default)]
    pub id: String,
    /// Number of players the notification was sent to.
    #[serde(default)]
    pub recipients: u64,
    /// The external ID, if one was given.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Errors reported for the request. Either a list of messages or an object keyed by
    /// error kind, e.g. `invalid_player_ids`.
    #[serde(default)]
    pub errors: Option<Value>,
}

/// Response to creating or editing a player.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PlayerResponse {
    /// Whether the write succeeded.
    #[serde(default)]
    pub success: bool,
    /// The player ID. Only returned on creation.
    #[serde(default)]
    pub id: Option<String>,
}

/// A registered player.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Player {
    /// The player ID.
    pub id: String,
    /// The device type. `None` for codes this crate does not know.
    #[serde(default, deserialize_with = "deserialize_device_type")]
    pub device_type: Option<DeviceType>,
    /// The push token, email address or phone number.
    #[serde(default)]
    pub identifier: Option<String>,
    /// The player's language.
    #[serde(default)]
    pub language: Option<String>,
    /// Tags set on the player.
    #[serde(default)]
    pub tags: Option<Value>,
    /// Number of sessions.
    #[serde(default)]
    pub session_count: u64,
    /// Whether the player is unsubscribed or has invalid credentials.
    #[serde(default)]
    pub invalid_identifier: bool,
}

/// A page of players.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PlayersPage {
    /// Total number of players in the app.
    #[serde(default)]
    pub total_count: u64,
    /// Offset of this page.
    #[serde(default)]
    pub offset: u64,
    /// Requested page size.
    #[serde(default)]
    pub limit: u64,
    /// The players in this page.
    #[serde(default)]
    pub players: Vec<Player>,
}

fn deserialize_device_type<'de, D>(deserializer: D) -> Result<Option<DeviceType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let code = Option::<u8>::deserialize(deserializer)?;

    Ok(code.and_then(|code| DeviceType::try_from(code).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_notification_response() {
        let json = r#"{"id":"b98881cc-1e94-4366-bbd9-db8f3429292b","recipients":1,"external_id":null}"#;
        let response: NotificationResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.recipients, 1);
        assert!(response.errors.is_none());
    }

    #[test]
    fn deserializes_notification_errors() {
        let json = r#"{"id":"","recipients":0,"errors":["All included players are not subscribed"]}"#;
        let response: NotificationResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.recipients, 0);
        assert!(response.errors.unwrap().is_array());
    }

    #[test]
    fn deserializes_players_page() {
        let json = r#"{
            "total_count": 2,
            "offset": 0,
            "limit": 300,
            "players": [
                {"id":"a","device_type":1,"identifier":"token","session_count":3,"invalid_identifier":false},
                {"id":"b","device_type":99}
            ]
        }"#;
        let page: PlayersPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.players.len(), 2);
        assert_eq!(page.players[0].device_type, Some(DeviceType::Android));
        assert_eq!(page.players[1].device_type, None);
    }
}
