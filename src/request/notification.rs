use crate::helpers::{is_empty_param, merge_defaults};
use crate::types::Parameters;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Heading sent by broadcasts without a title. A single space, never empty.
const EMPTY_HEADING: &str = " ";
/// Segment targeted by broadcasts.
const BROADCAST_SEGMENT: &str = "All";
/// Segment targeted by custom notifications that name no audience.
const FALLBACK_SEGMENT: &str = "all";
/// Locale used for message contents and headings.
const DEFAULT_LOCALE: &str = "en";

/// An action button shown on a notification.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Button {
    /// Identifier sent back when the button is pressed.
    pub id: String,
    /// The button label.
    pub text: String,
    /// The button icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Button {
    /// Creates a new [`Button`] without an icon.
    pub fn new<I, T>(id: I, text: T) -> Self
    where
        I: Into<String>,
        T: Into<String>,
    {
        Self {
            id: id.into(),
            text: text.into(),
            icon: None,
        }
    }

    /// The button icon.
    pub fn icon<T: Into<String>>(mut self, icon: T) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Optional fields for the notification helpers.
#[derive(Debug, Default, Clone)]
pub struct NotificationExtras {
    /// URL opened when the notification is clicked.
    pub url: Option<String>,
    /// Free-form data delivered with the notification.
    pub data: Option<Value>,
    /// Action buttons.
    pub buttons: Option<Vec<Button>>,
}

impl NotificationExtras {
    /// Creates empty [`NotificationExtras`].
    pub fn new() -> Self {
        Self::default()
    }

    /// URL opened when the notification is clicked.
    pub fn url<T: Into<String>>(mut self, url: T) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Free-form data delivered with the notification.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Action buttons.
    pub fn buttons<T>(mut self, buttons: T) -> Self
    where
        T: IntoIterator<Item = Button>,
    {
        self.buttons = Some(buttons.into_iter().collect());
        self
    }

    fn apply(self, params: &mut Parameters) {
        if let Some(url) = self.url {
            params.insert("url".into(), Value::String(url));
        }

        if let Some(data) = self.data {
            params.insert("data".into(), data);
        }

        if let Some(buttons) = self.buttons {
            params.insert("buttons".into(), json!(buttons));
        }
    }
}

/// The audience of a notification. Exactly one of these is sent with every notification.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Targeting {
    /// Named segments, sent as `included_segments`.
    Segments(Vec<String>),
    /// Player IDs, sent as `include_player_ids`.
    PlayerIds(Vec<String>),
}

impl Targeting {
    /// The parameter key for this targeting.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Segments(_) => "included_segments",
            Self::PlayerIds(_) => "include_player_ids",
        }
    }

    /// Reads the targeting from a parameter mapping. Reports `Segments` when both are
    /// present; the mapping itself is not changed. Returns `None` when neither is present
    /// and non-empty.
    pub fn from_parameters(params: &Parameters) -> Option<Self> {
        fn strings(value: &Value) -> Vec<String> {
            value.as_array()
                .map(|values| values.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect())
                .unwrap_or_default()
        }

        if !is_empty_param(params.get("included_segments")) {
            Some(Self::Segments(strings(&params["included_segments"])))
        } else if !is_empty_param(params.get("include_player_ids")) {
            Some(Self::PlayerIds(strings(&params["include_player_ids"])))
        } else {
            None
        }
    }

    fn insert_into(self, params: &mut Parameters) {
        let key = self.key();
        let values = match self {
            Self::Segments(values) |
            Self::PlayerIds(values) => values,
        };

        params.insert(key.into(), json!(values));
    }
}

/// A mapping with the text under the default locale.
fn localized(text: &str) -> Value {
    let mut map = Parameters::new();

    map.insert(DEFAULT_LOCALE.into(), Value::from(text));
    Value::Object(map)
}

fn base_notification(
    app_id: &str,
    message: &str,
    targeting: Targeting,
) -> Parameters {
    let mut params = Parameters::new();

    params.insert("app_id".into(), Value::from(app_id));
    params.insert("contents".into(), localized(message));
    targeting.insert_into(&mut params);
    params
}

/// Parameters for a notification to a single player.
pub fn user_notification(
    app_id: &str,
    message: &str,
    user_id: &str,
    extras: NotificationExtras,
) -> Parameters {
    let mut params = base_notification(
        app_id,
        message,
        Targeting::PlayerIds(vec![user_id.to_owned()]),
    );

    extras.apply(&mut params);
    params
}

/// Parameters for a notification to every subscribed player.
pub fn broadcast_notification(
    app_id: &str,
    message: &str,
    title: Option<&str>,
    extras: NotificationExtras,
) -> Parameters {
    let mut params = base_notification(
        app_id,
        message,
        Targeting::Segments(vec![BROADCAST_SEGMENT.to_owned()]),
    );
    let heading = title.unwrap_or(EMPTY_HEADING);

    params.insert("headings".into(), localized(heading));
    params.insert("subtitle".into(), localized(heading));
    extras.apply(&mut params);
    params
}

/// Parameters for a notification to a single segment.
pub fn segment_notification(
    app_id: &str,
    message: &str,
    segment: &str,
    extras: NotificationExtras,
) -> Parameters {
    let mut params = base_notification(
        app_id,
        message,
        Targeting::Segments(vec![segment.to_owned()]),
    );

    extras.apply(&mut params);
    params
}

/// Finalizes caller-assembled parameters: forces `app_id`, targets the `all` segment when
/// no audience is given, then merges `defaults` over the result. Segments and player IDs
/// given together are both forwarded unchanged.
pub fn custom_notification(
    app_id: &str,
    mut params: Parameters,
    defaults: &Parameters,
) -> Parameters {
    params.insert("app_id".into(), Value::from(app_id));

    if Targeting::from_parameters(&params).is_none() {
        Targeting::Segments(vec![FALLBACK_SEGMENT.to_owned()]).insert_into(&mut params);
    }

    merge_defaults(params, defaults)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_notification_targets_player() {
        let params = user_notification("app", "Hello", "player-1", NotificationExtras::new());

        assert_eq!(params["include_player_ids"], json!(["player-1"]));
        assert_eq!(params["contents"], json!({ "en": "Hello" }));
        assert!(!params.contains_key("included_segments"));
        assert!(!params.contains_key("url"));
    }

    #[test]
    fn broadcast_without_title_uses_space_placeholder() {
        let params = broadcast_notification("app", "Hello", None, NotificationExtras::new());

        assert_eq!(params["headings"]["en"], " ");
        assert_eq!(params["subtitle"]["en"], " ");
        assert_eq!(params["included_segments"], json!(["All"]));
    }

    #[test]
    fn broadcast_with_title() {
        let params = broadcast_notification("app", "Hello", Some("News"), NotificationExtras::new());

        assert_eq!(params["headings"]["en"], "News");
        assert_eq!(params["subtitle"]["en"], "News");
    }

    #[test]
    fn extras_are_applied() {
        let extras = NotificationExtras::new()
            .url("https://example.com")
            .data(json!({ "order": 5 }))
            .buttons([Button::new("yes", "Yes").icon("ic_yes"), Button::new("no", "No")]);
        let params = segment_notification("app", "Hello", "Active Users", extras);

        assert_eq!(params["included_segments"], json!(["Active Users"]));
        assert_eq!(params["url"], "https://example.com");
        assert_eq!(params["data"]["order"], 5);
        assert_eq!(params["buttons"], json!([
            { "id": "yes", "text": "Yes", "icon": "ic_yes" },
            { "id": "no", "text": "No" },
        ]));
    }

    #[test]
    fn message_is_not_validated() {
        let params = user_notification("app", "", "player-1", NotificationExtras::new());

        assert_eq!(params["contents"]["en"], "");
    }

    #[test]
    fn custom_notification_injects_lowercase_all() {
        let params = json!({ "contents": { "en": "Hi" }, "included_segments": [] });
        let params = custom_notification("app", params.as_object().unwrap().clone(), &Parameters::new());

        assert_eq!(params["included_segments"], json!(["all"]));
        assert_eq!(params["app_id"], "app");
    }

    #[test]
    fn custom_notification_keeps_player_targeting() {
        let params = json!({ "app_id": "other", "include_player_ids": ["p"] });
        let params = custom_notification("app", params.as_object().unwrap().clone(), &Parameters::new());

        assert_eq!(params["app_id"], "app");
        assert_eq!(params["include_player_ids"], json!(["p"]));
        assert!(!params.contains_key("included_segments"));
    }

    #[test]
    fn custom_notification_forwards_both_targetings() {
        let params = json!({ "included_segments": ["VIP"], "include_player_ids": ["p"] });
        let params = custom_notification("app", params.as_object().unwrap().clone(), &Parameters::new());

        assert_eq!(params["included_segments"], json!(["VIP"]));
        assert_eq!(params["include_player_ids"], json!(["p"]));
    }

    #[test]
    fn custom_notification_defaults_win() {
        let params = json!({ "contents": { "en": "Hi" }, "priority": 1 });
        let defaults = json!({ "priority": 10, "ios_sound": "nil" });
        let params = custom_notification(
            "app",
            params.as_object().unwrap().clone(),
            defaults.as_object().unwrap(),
        );

        assert_eq!(params["priority"], 10);
        assert_eq!(params["ios_sound"], "nil");
    }

    #[test]
    fn reads_targeting() {
        let params = json!({ "included_segments": ["A", "B"], "include_player_ids": ["p"] });

        assert_eq!(
            Targeting::from_parameters(params.as_object().unwrap()),
            Some(Targeting::Segments(vec!["A".into(), "B".into()])),
        );
        assert_eq!(Targeting::from_parameters(&Parameters::new()), None);
    }
}
