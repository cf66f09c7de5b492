use anyhow::{bail, Context};

use cinelog::db::Store;
use cinelog::models::{
    parse_id, ActivityKind, ListItemStatus, MediaKind, NewList, NewListItem, NewMediaItem,
    NewUser, Rating,
};
use cinelog::{open_store, Config};

const USAGE: &str = "Usage: cinelog [--seed | --stats <user> | --activity <user> [limit] | --lists <user> | --list <id> [viewer]]";

const DEMO_USER: &str = "demo-user";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let config = Config::load().context("loading configuration")?;
    let store = open_store(&config)
        .await
        .with_context(|| format!("opening {:?} store", config.backend))?;

    match args.get(1).map(String::as_str) {
        Some("--seed") => {
            seed(store.as_ref()).await?;
            println!("Seeded sample catalog for {}", DEMO_USER);
        }
        Some("--stats") => {
            let user = required(&args, 2, "user id")?;
            let stats = store
                .user_stats_with(user, &config.watchtime_estimate())
                .await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Some("--activity") => {
            let user = required(&args, 2, "user id")?;
            let limit = match args.get(3) {
                Some(raw) => raw.parse().context("limit must be a number")?,
                None => config.recent_activity_limit,
            };
            let events = store.recent_activity(user, limit).await?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        Some("--lists") => {
            let user = required(&args, 2, "user id")?;
            let lists = store.lists_by_user(user).await?;
            println!("{}", serde_json::to_string_pretty(&lists)?);
        }
        Some("--list") => {
            let list_id = parse_id(required(&args, 2, "list id")?)?;
            let viewer = args.get(3).map(String::as_str);
            match store.get_list_with_items(list_id, viewer).await? {
                Some(list) => println!("{}", serde_json::to_string_pretty(&list)?),
                None => bail!("list {} not found", list_id),
            }
        }
        Some("--check") | None => {
            store.health_check().await?;
            println!("{} store at {} is healthy", store.backend_name(), config.db_path);
            if args.len() < 2 {
                println!("{}", USAGE);
            }
        }
        Some(other) => bail!("unknown option {}\n{}", other, USAGE),
    }

    Ok(())
}

fn required<'a>(args: &'a [String], index: usize, what: &str) -> anyhow::Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .with_context(|| format!("missing {}\n{}", what, USAGE))
}

async fn seed(store: &dyn Store) -> anyhow::Result<()> {
    store
        .sync_user(NewUser {
            id: DEMO_USER.to_string(),
            email: "test@example.com".to_string(),
            display_name: Some("Test User".to_string()),
            photo_url: None,
        })
        .await?;

    let mut dune = NewMediaItem::new(693134, MediaKind::Movie, "Dune: Part Two");
    dune.poster_path = Some("/1pdfLvkbY9ohJlCjQH2CZjjYVvJ.jpg".to_string());
    dune.release_date = Some("2024-02-27".to_string());
    dune.runtime = Some(167);

    let mut fallout = NewMediaItem::new(106379, MediaKind::Tv, "Fallout");
    fallout.poster_path = Some("/AnsSKR9LuK0T9bAOcPVA3PUvyWj.jpg".to_string());
    fallout.release_date = Some("2024-04-10".to_string());
    fallout.episode_count = Some(8);

    let mut challengers = NewMediaItem::new(937287, MediaKind::Movie, "Challengers");
    challengers.poster_path = Some("/H6vke7zGiuLsz4v4RPeReb9rsv.jpg".to_string());
    challengers.release_date = Some("2024-04-18".to_string());
    challengers.runtime = Some(131);

    let dune = store.resolve_media(dune).await?;
    let fallout = store.resolve_media(fallout).await?;
    let challengers = store.resolve_media(challengers).await?;

    store
        .rate_watched(DEMO_USER, dune.id, Some(Rating::new(9)?))
        .await?;
    if !store
        .has_activity(ActivityKind::Favorites, DEMO_USER, challengers.id)
        .await?
    {
        store
            .add_activity(ActivityKind::Favorites, DEMO_USER, challengers.id, None)
            .await?;
    }

    if store.lists_by_user(DEMO_USER).await?.is_empty() {
        let list = store.create_list(NewList::new(DEMO_USER, "2024 Favorites")).await?;
        store
            .add_item_to_list(NewListItem::new(list.id, dune.id))
            .await?;
        store
            .add_item_to_list(
                NewListItem::new(list.id, fallout.id)
                    .with_status(ListItemStatus::Watching)
                    .with_seasons_watched(1),
            )
            .await?;
    }

    Ok(())
}
