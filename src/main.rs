mod cli;

use video_storage_query::{
    bridge::{ChannelHost, VideoStorageQueryPlugin},
    config, permissions,
    query::{MediaQuery, VideoQuery},
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn serve(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let query: Arc<dyn MediaQuery> = Arc::new(VideoQuery::from_config(&config)?);

    let mut host = ChannelHost::new();
    VideoStorageQueryPlugin::attach(&mut host, &config.bridge.channel, query);
    host.set_method_call_handler(
        config.bridge.permissions_channel.as_str(),
        Some(Box::new(permissions::PermissionHandler::new(
            config.store.expanded_roots(),
        ))),
    );

    tracing::info!(
        "Serving channels '{}' and '{}' on stdin/stdout",
        config.bridge.channel,
        config.bridge.permissions_channel
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    host.serve(stdin.lock(), stdout.lock())
        .context("Bridge transport failed")?;

    VideoStorageQueryPlugin::detach(&mut host, &config.bridge.channel);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag.
    // Logs go to stderr; stdout carries the bridge.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "video_storage_query=debug,vsq_av=debug".to_string()
        } else {
            "video_storage_query=info,vsq_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve => serve(cli.config.as_deref()),
        Commands::List { json } => list_videos(cli.config.as_deref(), json),
        Commands::Thumbnail { file, output } => {
            thumbnail(&file, output, cli.config.as_deref())
        }
        Commands::CheckAccess { json } => check_access(cli.config.as_deref(), json),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("video-storage-query {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn list_videos(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let query = VideoQuery::from_config(&config)?;
    let videos = query.list_videos();

    if json {
        let json_str = serde_json::to_string_pretty(&videos)?;
        println!("{}", json_str);
        return Ok(());
    }

    for video in &videos {
        print!("{}", video.path);
        if let Ok(ms) = video.duration.parse::<u64>() {
            let secs = ms / 1000;
            let mins = secs / 60;
            let hours = mins / 60;
            print!("  {:02}:{:02}:{:02}", hours, mins % 60, secs % 60);
        }
        if !video.size.is_empty() {
            print!("  {} bytes", video.size);
        }
        println!();
    }
    println!("\n{} videos", videos.len());

    Ok(())
}

fn thumbnail(file: &Path, output: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let query = VideoQuery::from_config(&config)?;

    let png = query.extract_thumbnail(file)?;

    let output = output
        .unwrap_or_else(|| PathBuf::from(format!("{}.png", vsq_common::paths::title_of(file))));
    std::fs::write(&output, &png)
        .with_context(|| format!("Failed to write thumbnail: {:?}", output))?;

    println!("Wrote {} bytes to {}", png.len(), output.display());
    Ok(())
}

fn check_access(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let grants = permissions::check_storage_access(&config.store.expanded_roots());

    if json {
        let json_str = serde_json::to_string_pretty(&grants)?;
        println!("{}", json_str);
        return Ok(());
    }

    for grant in &grants {
        let status = if grant.granted { "✓" } else { "✗" };
        println!("{} {}", status, grant.root.display());
    }

    if grants.iter().all(|g| g.granted) {
        println!("\nAll storage roots are readable");
    } else {
        println!("\nSome storage roots cannot be read; their videos will not be listed.");
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    println!("Checking external tools...\n");

    let tools = vsq_av::check_tools(&config.tools.paths());
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    println!("Backend: {:?}", config.tools.backend.resolve());
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Thumbnails and durations need ffmpeg and ffprobe.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Storage roots: {}", config.store.roots.len());
            println!("  Probe durations: {}", config.store.probe_durations);
            match config.thumbnail.max_width {
                Some(width) => println!("  Thumbnail max width: {}", width),
                None => println!("  Thumbnail max width: full resolution"),
            }
            println!("  Backend: {:?}", config.tools.backend);
            println!("  Channels: {}, {}", config.bridge.channel, config.bridge.permissions_channel);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Storage roots: {}", config.store.roots.join(", "));
            println!("  Channel: {}", config.bridge.channel);
        }
    }

    Ok(())
}
