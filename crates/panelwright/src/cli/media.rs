//! `media` command handlers.

use super::MediaCommands;
use panelwright::{ObjectStore, PanelwrightConfig, PanelwrightResult};
use std::collections::BTreeSet;

/// Dispatch a media subcommand.
pub async fn handle_media_command(
    config: &PanelwrightConfig,
    command: MediaCommands,
) -> PanelwrightResult<()> {
    let store = panelwright::object_store(config)?;
    let buckets = [&config.storage.images_bucket, &config.storage.audio_bucket];

    match command {
        MediaCommands::List {
            user,
            comic: Some(comic),
        } => {
            let folder = format!("{}/{}", user, comic);
            let mut total = 0;
            for bucket in buckets {
                for path in store.list(bucket, &folder).await? {
                    println!("{}", store.public_url(bucket, &path));
                    total += 1;
                }
            }
            if total == 0 {
                println!("No media stored for comic {}", comic);
            }
        }

        MediaCommands::List { user, comic: None } => {
            let mut comics = BTreeSet::new();
            for bucket in buckets {
                for path in store.list(bucket, &user).await? {
                    if let Some((_, comic)) = path.rsplit_once('/') {
                        comics.insert(comic.to_string());
                    }
                }
            }
            if comics.is_empty() {
                println!("No comics stored for {}", user);
            }
            for comic in comics {
                println!("{}", comic);
            }
        }

        MediaCommands::Delete { user, comic } => {
            let folder = format!("{}/{}", user, comic);
            let mut removed = 0;
            for bucket in buckets {
                let paths = store.list(bucket, &folder).await?;
                removed += store.remove(bucket, &paths).await?.len();
            }
            tracing::info!(comic = %comic, removed, "Deleted comic media");
            println!("Removed {} file(s) for comic {}", removed, comic);
        }
    }

    Ok(())
}
