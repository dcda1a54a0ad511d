use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;

use truecapture::payload::is_supported_image;
use truecapture::simulated_detection::is_flagged;
use truecapture::status::{advance_steps, processing_steps, ProcessingStep};
use truecapture::{
    build_prompt, default_output_path, logging, CameraProfile, Config, GeminiClient,
    HumanizeSession, ImagePayload, Preset, ProcessingOptions, RealismLevel,
};

#[derive(Parser)]
#[command(
    name = "truecapture",
    about = "Re-render AI-generated images as natural-looking photographs via Gemini",
    version,
    after_help = "Simple usage: truecapture <image>  (writes truecapture_<millis>.jpg)\n\n\
                  Requires GEMINI_API_KEY (or API_KEY) in the environment.\n\
                  NOTE: The AI-detection figures printed are SIMULATED random numbers.\n\
                  No detector is run."
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input image file
    input: PathBuf,

    /// Output file (default: truecapture_{millis}.jpg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Starting preset; explicit options below override it
    #[arg(short, long, value_enum, default_value = "balanced")]
    preset: Preset,

    /// Realism level
    #[arg(short, long, value_enum)]
    realism: Option<RealismLevel>,

    /// Camera profile
    #[arg(short, long, value_enum)]
    camera: Option<CameraProfile>,

    /// Film grain amount (0-100)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=100))]
    grain: Option<u32>,

    /// Model name (overrides TRUECAPTURE_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// API base URL (overrides TRUECAPTURE_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Pause before sending the request, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print the prompt for the chosen options and exit
    #[arg(long)]
    print_prompt: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> truecapture::Result<ProcessingOptions> {
        self.preset.with_overrides(self.realism, self.camera, self.grain)
    }

    fn config(&self) -> truecapture::Result<Config> {
        let mut config = Config::from_env()?;
        if let Some(model) = &self.model {
            config.model.clone_from(model);
        }
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(ms) = self.delay_ms {
            config.analysis_delay = Duration::from_millis(ms);
        }
        Ok(config)
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose && cli.quiet {
        fail("Cannot specify both --verbose and --quiet");
    }

    logging::init(cli.verbose, cli.quiet);

    let options = cli.options().unwrap_or_else(|e| fail(e));

    if cli.print_prompt {
        println!("{}", build_prompt(&options));
        return;
    }

    if !cli.input.exists() {
        fail(format!("Input path does not exist: {}", cli.input.display()));
    }

    let output = cli.output.clone().unwrap_or_else(default_output_path);
    if !is_supported_image(&output) {
        fail(format!(
            "Unsupported output extension: {} (use .jpg, .png or .webp)",
            output.display()
        ));
    }

    let image = ImagePayload::from_file(&cli.input).unwrap_or_else(|e| fail(e));
    let config = cli.config().unwrap_or_else(|e| fail(e));

    if !cli.quiet {
        match Preset::matching(&options) {
            Some(preset) => eprintln!("Preset: {preset}"),
            None => eprintln!("Preset: custom"),
        }
        eprintln!(
            "Realism: {}, Camera: {}, Grain: {}%",
            options.realism_level, options.camera_profile, options.grain_amount
        );
        eprintln!();
    }

    let mut session = HumanizeSession::new(GeminiClient::new(config));
    session.set_options(options);
    session.load(image);

    if !cli.quiet {
        print_score("Before", session.scores().before);
    }

    let outcome = {
        let started = Instant::now();
        let mut steps = processing_steps();
        let mut ticker = tokio::time::interval(Duration::from_millis(250));
        let run = session.run();
        tokio::pin!(run);

        loop {
            tokio::select! {
                res = &mut run => break res.cloned(),
                _ = ticker.tick() => {
                    if !cli.quiet {
                        report_steps(&mut steps, started.elapsed());
                    }
                }
            }
        }
    };

    let filename = cli.input.file_name().map_or_else(
        || cli.input.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            eprintln!("[FAIL] {filename}: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = result.save(&output) {
        eprintln!("[FAIL] {filename}: Failed to save: {e}");
        process::exit(1);
    }

    if !cli.quiet {
        eprintln!("[OK] {filename}");
        print_score("After", session.scores().after);
    }
    println!("{}", output.display());
}

fn report_steps(steps: &mut [ProcessingStep], elapsed: Duration) {
    let before: Vec<bool> = steps.iter().map(|s| s.completed).collect();
    advance_steps(steps, elapsed);
    for (step, was_done) in steps.iter().zip(before) {
        if step.completed && !was_done {
            eprintln!("  [{}/5] {}", step.id, step.label);
        }
    }
}

fn print_score(label: &str, score: f64) {
    let verdict = if is_flagged(score) {
        "Detection Alert"
    } else {
        "Verification Pass"
    };
    eprintln!("{label}: {score:.1}% AI likelihood, {verdict} (simulated)");
}
