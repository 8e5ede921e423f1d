//! Avatar - pick an avatar image from a gallery directory or a URL.

use std::path::Path;
use std::process;
use std::sync::Arc;

use avatar_picker::cli::Cli;
use avatar_picker::config::{self, Config};
use avatar_picker::context::ServiceContext;
use avatar_picker::error::AppError;
use avatar_picker::logging;
use avatar_picker::output::{numbered_path, resolve_output_path, save_avatar, validate_format};
use avatar_picker::ports::Image;
use avatar_picker::view_model::AvatarViewModel;
use clap::Parser;
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// What a single press resolved to.
enum Outcome {
    Picked(Image),
    Message(String),
}

async fn run(cli: Cli) -> Result<(), AppError> {
    logging::init(cli.verbose);

    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(AppError::Config)?;
    debug!(path = %config_path.display(), "config loaded");

    // Validate output parameters
    let format = cli.format.clone().unwrap_or_else(|| config.avatar.format.clone());
    validate_format(&format).map_err(AppError::InvalidArgument)?;
    let size = cli.size.unwrap_or(config.avatar.size);

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("AVATAR_REPLAY").ok();
    let is_recording = std::env::var("AVATAR_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        info!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else {
        let source = config.resolve_source(cli.url.as_deref(), cli.gallery.as_deref());
        info!(?source, recording = is_recording, "image source");
        if is_recording {
            let (ctx, session) = ServiceContext::recording(&source, &config)?;
            (ctx, Some(session))
        } else {
            (ServiceContext::live(&source, &config)?, None)
        }
    };

    // Press the button, then collect outcomes until every press is answered
    let vm = AvatarViewModel::with_messages(Arc::clone(&ctx.provider), config.error_messages());
    let outcomes = stream::select(
        vm.images().map(Outcome::Picked),
        vm.error_messages().map(Outcome::Message),
    );
    for _ in 0..cli.presses {
        vm.choose_image_pressed()?;
    }
    // Both outputs complete once shutdown has answered the queued presses.
    // Images and messages are each in press order; their interleaving is not.
    let (outcomes, ()) = tokio::join!(outcomes.collect::<Vec<Outcome>>(), vm.shutdown());

    // Save avatars
    let base_path = resolve_output_path(cli.output.as_deref(), &format);
    let total = outcomes.iter().filter(|o| matches!(o, Outcome::Picked(_))).count();
    let mut saved = 0;
    let mut last_message = None;
    for outcome in outcomes {
        match outcome {
            Outcome::Picked(image) => {
                saved += 1;
                let output_path = numbered_path(&base_path, saved, total);
                save_avatar(&image, size, &format, &output_path)?;
                eprintln!("Saved: {}", output_path.display());
            }
            Outcome::Message(message) => {
                eprintln!("{message}");
                last_message = Some(message);
            }
        }
    }

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    if saved == 0 {
        return Err(AppError::NoAvatar(last_message.unwrap_or_default()));
    }
    Ok(())
}
