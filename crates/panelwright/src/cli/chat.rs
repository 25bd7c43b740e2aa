//! `chat` command handler.

use super::ChatArgs;
use futures::StreamExt;
use panelwright::{
    AgentClient, AudioSource, MediaPersister, Panel, PanelwrightConfig, PanelwrightResult,
    fallback_message, final_response, generate_comic_id, generate_session_id, generate_user_id,
    reconcile_events,
};
use serde_json::{Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Converse with a running backend until end of input or `exit`.
pub async fn run_chat(config: &PanelwrightConfig, args: ChatArgs) -> PanelwrightResult<()> {
    let client = AgentClient::new(&config.client, &config.agent.app_name)?;
    let user_id = args.user.clone().unwrap_or_else(generate_user_id);
    let session_id = generate_session_id();
    let persister = match args.user {
        Some(_) => Some(panelwright::media_persister(config)?),
        None => None,
    };

    if let Err(e) = client.create_session(&user_id, &session_id, Map::new()).await {
        tracing::error!(error = %e, "Could not create session");
        println!("{}", fallback_message(client.base_url()));
        return Ok(());
    }
    println!("Hi! Tell me what lesson you'd like your comic to teach. Type `exit` to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await.ok();
        stdout.flush().await.ok();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                break;
            }
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("exit") {
            break;
        }

        let events = match turn(&client, &user_id, &session_id, message, args.stream).await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!(error = %e, "Turn failed");
                println!("{}", fallback_message(client.base_url()));
                continue;
            }
        };

        show_reply(&events, persister.as_ref(), &user_id).await;
    }

    Ok(())
}

async fn turn(
    client: &AgentClient,
    user_id: &str,
    session_id: &str,
    message: &str,
    stream: bool,
) -> PanelwrightResult<Vec<Value>> {
    if !stream {
        return client.run(user_id, session_id, message).await;
    }

    let mut events = Vec::new();
    let mut incoming = client.run_sse(user_id, session_id, message).await?;
    while let Some(event) = incoming.next().await {
        let event = event?;
        if let Some(error) = event.get("error").and_then(Value::as_str) {
            tracing::warn!(error, "Backend reported a failed turn");
        }
        events.push(event);
    }
    Ok(events)
}

async fn show_reply(events: &[Value], persister: Option<&MediaPersister>, user_id: &str) {
    if let Some(text) = final_response(events) {
        println!("{}", text);
    }

    let comic = reconcile_events(events);
    if comic.panels.is_empty() {
        return;
    }

    let panels = match persister {
        Some(persister) => {
            let comic_id = generate_comic_id();
            persister
                .persist_panels(Some(user_id), &comic_id, comic.panels)
                .await
        }
        None => comic.panels,
    };

    if let Some(title) = &comic.title {
        println!("\n=== {} ===", title);
    }
    for panel in &panels {
        print_panel(panel);
    }
}

fn print_panel(panel: &Panel) {
    println!("\nPanel {}", panel.panel_id);
    if !panel.narration.is_empty() {
        println!("  {}", panel.narration);
    }
    if !panel.dialogue.is_empty() {
        println!("  \"{}\"", panel.dialogue);
    }
    if let Some(url) = &panel.image_url {
        println!("  Image: {}", url);
    }
    match &panel.audio {
        Some(AudioSource::Url(url)) => println!("  Audio: {}", url),
        Some(AudioSource::Base64(_)) => println!("  Audio: embedded"),
        None => {}
    }
}
