use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::warn;
use veo_client::{
    DEFAULT_VIDEO_FILE_NAME, RelayClient, ShareMessage, Workflow, download_video,
};
use veo_preprocess::SourceImage;
use veo_types::AspectRatio;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Text description of the video
    #[arg(short, long)]
    pub prompt: String,

    /// Reference image (repeat up to three times)
    #[arg(short, long = "image")]
    pub images: Vec<PathBuf>,

    /// Output shape: 16:9 or 9:16
    #[arg(short, long, default_value = "16:9", value_parser = parse_aspect_ratio)]
    pub aspect_ratio: AspectRatio,

    /// Relay base URL
    #[arg(long, env = "VEO_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    pub server: String,

    /// Shared secret expected by the relay
    #[arg(long, env = "VEO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Where to save the video
    #[arg(short, long, default_value = DEFAULT_VIDEO_FILE_NAME)]
    pub output: PathBuf,

    /// Print the locator without downloading
    #[arg(long)]
    pub no_download: bool,
}

fn parse_aspect_ratio(value: &str) -> Result<AspectRatio, String> {
    AspectRatio::parse(value).map_err(|e| e.to_string())
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let mut files = Vec::with_capacity(args.images.len());
    for path in &args.images {
        files.push(SourceImage::from_path(path).await?);
    }

    let mut relay = RelayClient::new(&args.server)?;
    if let Some(password) = args.password {
        relay = relay.with_password(password);
    }

    let mut workflow = Workflow::new();
    workflow.prompt = args.prompt;
    workflow.aspect_ratio = args.aspect_ratio;

    eprintln!("Generating ({}, {} image(s))...", args.aspect_ratio, files.len());
    let result = workflow
        .generate(&relay, files)
        .await
        .context("generation failed")?;

    for name in &result.skipped {
        eprintln!("Skipped {name}: not an image");
    }
    for reason in &result.failed {
        eprintln!("Left out of the request: {reason}");
    }

    let share = ShareMessage::for_video(&result.video_url);
    if result.video_url.starts_with("data:") {
        println!("Video returned inline ({} bytes encoded)", result.video_url.len());
    } else {
        println!("Video: {}", result.video_url);
        println!("{} {}", share.text, share.url);
    }

    if args.no_download {
        return Ok(());
    }
    if result.video_url.starts_with("gs://") {
        warn!(locator = %result.video_url, "Cloud Storage locator; download it with gsutil or a signed URL");
        return Ok(());
    }

    let bytes = download_video(relay.http(), &result.video_url, &args.output).await?;
    println!("Saved {} ({bytes} bytes)", args.output.display());
    Ok(())
}
