use onesignal_client::{Button, NotificationExtras, OneSignalClientBuilder};
use onesignal_client::response::NotificationResponse;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let client = OneSignalClientBuilder::from_env()?
        // Every notification from this client expires after an hour.
        .default_parameter("ttl", 3600)
        .build()?;
    let segment = std::env::var("SEGMENT").unwrap_or_else(|_| "Subscribed Users".into());
    let extras = NotificationExtras::new()
        .url("https://example.com/sale")
        .data(json!({ "campaign": "spring" }))
        .buttons([Button::new("open", "Open"), Button::new("later", "Later")]);
    let response: NotificationResponse = client
        .send_notification_to_segment("Spring sale starts now", &segment, extras)
        .await?
        .resolve_as()
        .await?;

    println!("Sent {} to {} recipients", response.id, response.recipients);

    // Async mode returns right away; the callback runs when the response arrives.
    client.set_async(true);

    let pending = client
        .send_notification_to_all("Thanks for being here", None, NotificationExtras::new())
        .await?
        .pending()
        .ok_or("expected a pending result")?
        .then(|body| println!("Broadcast finished: {body}"));

    pending.await?;

    Ok(())
}
