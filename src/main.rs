use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use web_vision::driver::{ChromeConfig, ChromePage};
use web_vision::harness::{RunConfig, RunPlan, run_plan};
use web_vision::report::ConsoleReporter;

/// Web Vision - visual regression testing for web UIs
#[derive(Parser, Debug)]
#[command(
    name = "web-vision",
    about = "Drive a headless browser through scripted actions and verify captures against reference images",
    after_help = "ENVIRONMENT VARIABLES:\n\
        WEB_VISION_SHOT_DIR     Scratch directory for screenshots\n\
        WEB_VISION_WAIT_MS      Single-shot wait before capture (ms)\n\
        WEB_VISION_VIEWPORT     Browser viewport (hd, fhd, qhd, or WxH)\n\
        WEB_VISION_SESSION_ID   Session id appended to the target URI"
)]
struct Args {
    /// Target URI to navigate to
    #[arg(long)]
    uri: String,

    /// Reference image for single-shot comparison (mutually exclusive with --script)
    #[arg(long)]
    reference: Option<PathBuf>,

    /// JSON step script for scripted mode (mutually exclusive with --reference)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Enable or disable PSNR comparison of captures
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    psnr: bool,

    /// Directory for screenshot artifacts (default: configured scratch dir)
    #[arg(short, long, env = "WEB_VISION_SHOT_DIR")]
    output: Option<PathBuf>,

    /// Print the run result as JSON
    #[arg(long)]
    json: bool,

    /// Run with a visible browser window instead of headless
    #[arg(long)]
    headed: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = RunConfig::new(args.uri).calc_psnr(args.psnr);
    if let Some(reference) = args.reference {
        config = config.reference(reference);
    }
    if let Some(script) = args.script {
        config = config.script(script);
    }
    if let Some(output) = args.output {
        config = config.shot_dir(output);
    }

    // Configuration errors terminate before any browser is launched.
    let plan = match RunPlan::resolve(&config) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    };

    let chrome_config = ChromeConfig {
        headless: !args.headed,
        ..ChromeConfig::default()
    };
    let mut driver = match ChromePage::launch(chrome_config) {
        Ok(driver) => driver,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    };

    let mut reporter = ConsoleReporter;
    let result = run_plan(&plan, &mut driver, &mut reporter);

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(err) => eprintln!("error: could not serialize result: {}", err),
        }
    } else {
        if let Some(error) = &result.error {
            eprintln!("failed: {}", error);
        }
        println!(
            "run {}: {} capture(s)",
            if result.passed { "passed" } else { "failed" },
            result.captures.len()
        );
        for capture in &result.captures {
            let detail = capture
                .verdict
                .detail
                .as_deref()
                .unwrap_or(if capture.verdict.passed { "ok" } else { "failed" });
            println!(
                "  {} -> {} [{}]",
                if capture.label.is_empty() { "(no ref)" } else { capture.label.as_str() },
                capture.screenshot_path.display(),
                detail
            );
        }
    }

    process::exit(if result.passed { 0 } else { 1 });
}
