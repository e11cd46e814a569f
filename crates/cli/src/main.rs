use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fluidplan_core::domain::contract::PlanRequest;
use fluidplan_core::error::{ComputationError, PlanError};

/// Compute an IHPS fluid plan from lab values and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "fluidplan")]
struct Args {
    /// Sodium, mmol/L (120-155).
    #[arg(long)]
    sodium: Option<f64>,

    /// Potassium, mmol/L (2.0-8.0).
    #[arg(long)]
    potassium: Option<f64>,

    /// Chloride, mmol/L (60-120).
    #[arg(long)]
    chloride: Option<f64>,

    /// Blood pH (7.0-7.7).
    #[arg(long)]
    ph: Option<f64>,

    /// Weight, kg (1.0-10.0).
    #[arg(long)]
    weight: Option<f64>,

    /// Glucose, mmol/L.
    #[arg(long)]
    glucose: Option<f64>,

    #[arg(long)]
    creatinine: Option<f64>,

    #[arg(long)]
    bun: Option<f64>,

    /// Haematocrit, %.
    #[arg(long)]
    hematocrit: Option<f64>,

    /// Lactate, mmol/L.
    #[arg(long)]
    lactate: Option<f64>,

    #[arg(long)]
    pco2: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    base_excess: Option<f64>,

    #[arg(long)]
    hco3: Option<f64>,

    #[arg(long)]
    urine_output: Option<f64>,

    /// Print single-line JSON instead of pretty output.
    #[arg(long)]
    compact: bool,
}

impl From<&Args> for PlanRequest {
    fn from(args: &Args) -> Self {
        PlanRequest {
            sodium: args.sodium,
            potassium: args.potassium,
            chloride: args.chloride,
            ph: args.ph,
            weight: args.weight,
            glucose: args.glucose,
            creatinine: args.creatinine,
            bun: args.bun,
            hematocrit: args.hematocrit,
            lactate: args.lactate,
            pco2: args.pco2,
            base_excess: args.base_excess,
            hco3: args.hco3,
            urine_output: args.urine_output,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = fluidplan_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    // Logs go to stderr; stdout carries only the plan.
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let output = run(&args);
    match output {
        Ok(json) => {
            println!("{json}");
            Ok(())
        }
        Err(PlanError::Validation(e)) => {
            tracing::warn!(field = e.field, "validation failed");
            anyhow::bail!("{}", e.message)
        }
        Err(e @ PlanError::Computation(_)) => {
            let err = anyhow::Error::new(e.clone());
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "fluid plan calculation failed");
            anyhow::bail!("{}", e.public_message())
        }
    }
}

fn run(args: &Args) -> Result<String, PlanError> {
    let snapshot = PlanRequest::from(args).validate_and_into_snapshot()?;
    let plan = fluidplan_core::compute_plan(&snapshot)?;

    let rendered = if args.compact {
        serde_json::to_string(&plan)
    } else {
        serde_json::to_string_pretty(&plan)
    };

    rendered.map_err(|e| {
        PlanError::Computation(ComputationError {
            stage: "serialize",
            detail: e.to_string(),
        })
    })
}

fn init_sentry(settings: &fluidplan_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
