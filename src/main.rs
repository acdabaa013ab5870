use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use lensai::config::ApiConfig;
use lensai::pipeline::{self, AnalysisOptions};
use lensai::prompt::{AnalysisStyle, Substyle};
use lensai::sampler::SamplingPolicy;
use lensai::{capture, transcript};

#[derive(Parser)]
#[command(name = "lensai")]
#[command(about = "Describe images and videos with OpenAI's multimodal models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a single image
    Image {
        input_file: PathBuf,
        #[arg(short, long, value_enum)]
        style: AnalysisStyle,
        #[arg(long, value_enum)]
        substyle: Option<Substyle>,
    },
    /// Sample frames from a video and analyze them
    Video {
        input_file: PathBuf,
        #[arg(short, long, value_enum)]
        style: AnalysisStyle,
        #[arg(long, value_enum)]
        substyle: Option<Substyle>,
        #[arg(short, long, default_value_t = pipeline::DEFAULT_MAX_FRAMES)]
        max_frames: usize,
        /// Take the first frames instead of evenly spaced ones
        #[arg(long)]
        head: bool,
        /// Transcribe the audio track and write WebVTT captions
        #[arg(short, long)]
        transcribe: bool,
        #[arg(long, default_value_t = transcript::DEFAULT_SEGMENTS)]
        caption_segments: usize,
        #[arg(long, default_value = "captions.vtt")]
        vtt_out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lensai=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::from_env()?;
    capture::init();

    match cli.command {
        Command::Image {
            input_file,
            style,
            substyle,
        } => {
            let analysis = pipeline::analyze_image(&config, &input_file, style, substyle).await?;
            println!("{analysis}");
        }
        Command::Video {
            input_file,
            style,
            substyle,
            max_frames,
            head,
            transcribe,
            caption_segments,
            vtt_out,
        } => {
            let mut options = AnalysisOptions::new(style);
            options.substyle = substyle;
            options.max_frames = max_frames;
            options.transcribe = transcribe;
            options.caption_segments = caption_segments;
            if head {
                options.policy = SamplingPolicy::Head;
            }

            let result = pipeline::analyze_video(&config, &input_file, &options).await?;
            println!("{}", result.analysis);

            if let Some(text) = result.transcript {
                println!("\n--- transcript ---\n{text}");
            }
            if let Some(captions) = result.captions {
                fs::write(&vtt_out, captions)
                    .with_context(|| format!("writing {}", vtt_out.display()))?;
                println!("captions written to {}", vtt_out.display());
            }
        }
    }

    Ok(())
}
