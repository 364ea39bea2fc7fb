/// Rave - command-line music client
mod config;
mod transport;

use crate::config::RaveConfig;
use crate::transport::LogTransport;
use clap::{Parser, Subcommand};
use rave_client::{ClientConfig, RaveClient};
use rave_playback::{tracks_with_placeholders, Coordinator, CoordinatorHandle};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rave")]
#[command(about = "Rave music client", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "RAVE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Search {
        /// Search terms
        query: String,
    },
    /// Queue songs and play the first one
    Play {
        /// Song ids, in queue order
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show a playlist with song details
    Playlist {
        /// Playlist id
        id: String,
    },
    /// Log in and print the token
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rave_cli=info,rave_playback=info,rave_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = RaveConfig::load(cli.config.as_deref())?;
    config.validate()?;
    debug!(base_url = %config.api.base_url, "Configuration loaded");

    let client = RaveClient::new(ClientConfig {
        base_url: config.api.base_url.clone(),
        token: config.api.token.clone(),
    })?;

    match cli.command {
        Commands::Search { query } => search(&client, &query).await?,
        Commands::Play { ids } => play(client, &config, ids).await?,
        Commands::Playlist { id } => show_playlist(&client, &id).await?,
        Commands::Login { email, password } => login(&client, &email, &password).await?,
    }

    Ok(())
}

async fn search(client: &RaveClient, query: &str) -> anyhow::Result<()> {
    let songs = client.search(query).await?;
    if songs.is_empty() {
        println!("No results for {query:?}");
    }
    for song in songs {
        let id = song.track_id().unwrap_or("-");
        println!("{id}\t{} - {}", song.name, song.artist);
    }
    Ok(())
}

async fn play(client: RaveClient, config: &RaveConfig, ids: Vec<String>) -> anyhow::Result<()> {
    let tracks = tracks_with_placeholders(&client, &ids).await;

    let coordinator = Coordinator::new(config.playback.clone(), Box::new(LogTransport::default()));
    let handle = CoordinatorHandle::new(coordinator, Arc::new(client));

    handle
        .with(|coordinator| {
            for track in tracks {
                coordinator.enqueue(track);
            }
        })
        .await;

    match handle.load_current().await {
        Some(outcome) => info!(?outcome, "Resolution finished"),
        None => warn!("Nothing to play"),
    }

    for event in handle.drain_events().await {
        debug!(?event, "Coordinator event");
    }

    let view = handle.view().await;
    if let Some(error) = &view.last_error {
        warn!(error = %error, "Playback did not start");
    }
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

async fn show_playlist(client: &RaveClient, id: &str) -> anyhow::Result<()> {
    let playlist = client.playlist(id).await?;
    let tracks = tracks_with_placeholders(client, &playlist.songs).await;

    println!("{} ({} songs)", playlist.name, tracks.len());
    for (index, track) in tracks.iter().enumerate() {
        println!("{:>3}. {} - {} [{}]", index + 1, track.name, track.artist, track.id);
    }
    Ok(())
}

async fn login(client: &RaveClient, email: &str, password: &str) -> anyhow::Result<()> {
    let response = client.login(email, password).await?;
    info!(user = %response.user.name, "Logged in");
    println!("{}", response.token);
    Ok(())
}
