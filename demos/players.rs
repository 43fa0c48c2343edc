use onesignal_client::{DeviceType, GetPlayersOptions, OneSignalClientBuilder, Parameters};
use onesignal_client::response::{PlayerResponse, PlayersPage};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let client = OneSignalClientBuilder::from_env()?.build()?;
    let identifier = std::env::var("PUSH_TOKEN").expect("PUSH_TOKEN missing");
    let mut params = Parameters::new();

    params.insert("device_type".into(), DeviceType::Android.into());
    params.insert("identifier".into(), Value::from(identifier));
    params.insert("language".into(), Value::from("en"));

    let created: PlayerResponse = client.create_player(params)
        .await?
        .resolve_as()
        .await?;
    let id = created.id.ok_or("no player ID returned")?;
    let mut params = Parameters::new();

    params.insert("id".into(), Value::from(id.clone()));
    params.insert("language".into(), Value::from("fr"));
    client.edit_player(params).await?;

    let page: PlayersPage = client.get_players(GetPlayersOptions::new().limit(50))
        .await?
        .resolve_as()
        .await?;

    println!("Created {id}; app has {} players", page.total_count);

    for player in page.players {
        println!("{} {:?}", player.id, player.device_type);
    }

    Ok(())
}
