//! Mathcap - arithmetic captcha CLI.

mod cli;
mod context;
mod logging;
mod output;
mod params;

use std::process;

use clap::Parser;
use mathcap::config::{self, Config};
use mathcap::CaptchaError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::cli::Cli;
use crate::context::{ServiceContext, TraceSession};
use crate::output::{numbered_path, resolve_output_path, CaptchaRecord};
use crate::params::{validate_count, validate_dimensions};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CaptchaError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;
    debug!(path = %config_path.display(), "loaded config");

    // Merge flags over file values
    let mut options = config.captcha;
    cli.apply_to(&mut options)?;
    validate_dimensions(options.width, options.height).map_err(CaptchaError::InvalidArgument)?;
    validate_count(cli.count).map_err(CaptchaError::InvalidArgument)?;

    let font_dir = cli.font_dir.as_deref().or(config.fonts.dir.as_deref());
    let ctx = ServiceContext::new(options, font_dir)?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let trace = cli.trace.as_deref().map(TraceSession::new);

    for i in 0..cli.count {
        let challenge = ctx.driver.generate_id_question_answer(&mut rng);
        let image = ctx.render(&challenge.question, trace.as_ref(), &mut rng)?;
        let mut record = CaptchaRecord::new(challenge);

        if cli.data_uri {
            record.data_uri = Some(image.to_data_uri()?);
        } else {
            let base_path = resolve_output_path(cli.output.as_deref(), &record.id);
            let output_path = numbered_path(&base_path, i, cli.count);
            image.save(&output_path)?;
            eprintln!("Saved: {}", output_path.display());
            record.path = Some(output_path);
        }

        if cli.json {
            let json = serde_json::to_string(&record)
                .map_err(|e| CaptchaError::Encode(format!("Failed to serialize record: {e}")))?;
            println!("{json}");
        } else {
            println!("{}", record.tsv());
            if let Some(ref uri) = record.data_uri {
                println!("{uri}");
            }
        }
    }

    // Finish trace if active
    if let Some(session) = trace {
        match session.finish() {
            Ok(path) => eprintln!("Trace saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save trace: {e}"),
        }
    }

    Ok(())
}
