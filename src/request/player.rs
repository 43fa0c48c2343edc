use super::ENDPOINT_PLAYERS;
use crate::error::ParameterError;
use crate::helpers::is_numeric_param;
use crate::types::{Parameters, PlayerId};
use reqwest::Method;
use serde_json::Value;

/// Default page size when listing players.
const DEFAULT_PLAYERS_LIMIT: u32 = 300;

/// A write to a player. Decides the verb and path of the request.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PlayerWrite {
    /// Register a new player.
    Create,
    /// Update an existing player.
    Edit(PlayerId),
}

impl PlayerWrite {
    /// The HTTP verb for this write.
    pub fn method(&self) -> Method {
        match self {
            Self::Create => Method::POST,
            Self::Edit(_) => Method::PUT,
        }
    }

    /// The path segments of the endpoint for this write.
    pub fn path_segments(&self) -> Vec<&str> {
        match self {
            Self::Create => vec![ENDPOINT_PLAYERS],
            Self::Edit(id) => vec![ENDPOINT_PLAYERS, id.as_str()],
        }
    }
}

/// Options for listing players.
#[derive(Debug, Clone)]
pub struct GetPlayersOptions {
    /// The app to list players of. Falls back to the client's app ID when `None` or empty.
    pub app_id: Option<String>,
    /// How many players to return. Omitted from the query when `0`.
    pub limit: u32,
    /// How many players to skip. Omitted from the query when `0`.
    pub offset: u32,
}

impl Default for GetPlayersOptions {
    fn default() -> Self {
        Self {
            app_id: None,
            limit: DEFAULT_PLAYERS_LIMIT,
            offset: 0,
        }
    }
}

impl GetPlayersOptions {
    /// Creates options for the first page with the default page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// The app to list players of.
    pub fn app_id<T: Into<String>>(mut self, app_id: T) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// How many players to return.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// How many players to skip.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// The query for the request.
    pub(crate) fn query(&self, default_app_id: &str) -> Vec<(String, String)> {
        let app_id = self.app_id.as_deref()
            .filter(|app_id| !app_id.is_empty())
            .unwrap_or(default_app_id);
        let mut query = vec![("app_id".to_string(), app_id.to_string())];

        if self.limit != 0 {
            query.push(("limit".into(), self.limit.to_string()));
        }

        if self.offset != 0 {
            query.push(("offset".into(), self.offset.to_string()));
        }

        query
    }
}

/// Checks that `device_type` is present and numeric.
pub fn validate_new_player(params: &Parameters) -> Result<(), ParameterError> {
    match params.get("device_type") {
        None | Some(Value::Null) => Err(ParameterError::MissingDeviceType),
        Some(device_type) if !is_numeric_param(device_type) => {
            Err(ParameterError::NonNumericDeviceType(device_type.clone()))
        },
        Some(_) => Ok(()),
    }
}

/// Reads the player ID from `id`. Numbers are accepted and converted to strings.
pub fn player_id(params: &Parameters) -> Result<PlayerId, ParameterError> {
    match params.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(ParameterError::MissingPlayerId),
    }
}

/// Forces `app_id` on player parameters.
pub fn player_parameters(app_id: &str, mut params: Parameters) -> Parameters {
    params.insert("app_id".into(), Value::from(app_id));
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn create_posts_to_players() {
        assert_eq!(PlayerWrite::Create.method(), Method::POST);
        assert_eq!(PlayerWrite::Create.path_segments(), vec!["players"]);
    }

    #[test]
    fn edit_puts_to_player() {
        let write = PlayerWrite::Edit("42".into());

        assert_eq!(write.method(), Method::PUT);
        assert_eq!(write.path_segments(), vec!["players", "42"]);
    }

    #[test]
    fn validates_device_type() {
        assert!(validate_new_player(&params(json!({ "device_type": 1 }))).is_ok());
        assert!(validate_new_player(&params(json!({ "device_type": "5" }))).is_ok());
        assert!(matches!(
            validate_new_player(&params(json!({ "identifier": "abc" }))),
            Err(ParameterError::MissingDeviceType),
        ));
        assert!(matches!(
            validate_new_player(&params(json!({ "device_type": "abc" }))),
            Err(ParameterError::NonNumericDeviceType(_)),
        ));
    }

    #[test]
    fn reads_player_id() {
        assert_eq!(player_id(&params(json!({ "id": "abc" }))).unwrap(), "abc");
        assert_eq!(player_id(&params(json!({ "id": 42 }))).unwrap(), "42");
        assert!(player_id(&params(json!({ "id": "" }))).is_err());
        assert!(player_id(&params(json!({}))).is_err());
    }

    #[test]
    fn default_query_has_limit() {
        let query = GetPlayersOptions::default().query("app");

        assert_eq!(query, vec![
            ("app_id".to_string(), "app".to_string()),
            ("limit".to_string(), "300".to_string()),
        ]);
    }

    #[test]
    fn zero_limit_and_offset_are_omitted() {
        let query = GetPlayersOptions::new()
            .limit(0)
            .offset(0)
            .query("app");

        assert_eq!(query, vec![("app_id".to_string(), "app".to_string())]);
    }

    #[test]
    fn query_uses_given_app_id() {
        let query = GetPlayersOptions::new()
            .app_id("other")
            .offset(600)
            .query("app");

        assert_eq!(query[0].1, "other");
        assert_eq!(query[2], ("offset".to_string(), "600".to_string()));
        assert_eq!(GetPlayersOptions::new().app_id("").query("app")[0].1, "app");
    }
}
