use clap::{Parser, Subcommand};
use harness::{HarnessConfig, HarnessError, ReportFormat, Runner};
use my_math::{OperandPair, Operation};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit code for usage, configuration and load errors
const ERROR_EXIT: u8 = 2;

#[derive(Parser)]
#[command(name = "harness")]
#[command(about = "Run equality checks against the my-math operations")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run test cases and report pass/fail per case
    Run {
        /// gtest-style filter, e.g. `math_tests.*-*diff*`
        #[arg(short, long)]
        filter: Option<String>,
        /// TOML file with additional cases
        #[arg(short, long)]
        cases: Option<PathBuf>,
        /// Skip the built-in math_tests suite
        #[arg(long)]
        no_builtin: bool,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
        /// Stop at the first failure
        #[arg(long)]
        fail_fast: bool,
        /// TOML config file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the cases a run would evaluate
    List {
        #[arg(short, long)]
        filter: Option<String>,
        #[arg(short, long)]
        cases: Option<PathBuf>,
        #[arg(long)]
        no_builtin: bool,
    },
    /// Evaluate a single operation
    Eval {
        /// The operation: sum or diff
        #[arg(short, long)]
        op: Operation,
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
        /// Fail on overflow instead of wrapping
        #[arg(long)]
        checked: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match execute(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(ERROR_EXIT)
        }
    }
}

fn execute(command: Commands) -> Result<u8, HarnessError> {
    match command {
        Commands::Run {
            filter,
            cases,
            no_builtin,
            format,
            fail_fast,
            config,
        } => {
            let mut harness_config = match config {
                Some(path) => HarnessConfig::load(&path)?,
                None => HarnessConfig::default(),
            };
            if let Some(filter) = filter {
                harness_config.filter = filter;
            }
            if let Some(cases) = cases {
                harness_config.cases_file = Some(cases);
            }
            if no_builtin {
                harness_config.include_builtin = false;
            }
            if let Some(format) = format {
                harness_config.format = format;
            }
            if fail_fast {
                harness_config.fail_fast = true;
            }
            run_cases(&harness_config)
        }
        Commands::List {
            filter,
            cases,
            no_builtin,
        } => {
            let mut harness_config = HarnessConfig::default().with_builtin(!no_builtin);
            if let Some(filter) = filter {
                harness_config.filter = filter;
            }
            harness_config.cases_file = cases;
            list_cases(&harness_config)?;
            Ok(0)
        }
        Commands::Eval { op, a, b, checked } => {
            eval_operation(op, OperandPair::new(a, b), checked)?;
            Ok(0)
        }
    }
}

fn run_cases(config: &HarnessConfig) -> Result<u8, HarnessError> {
    let runner = Runner::new(config)?;
    let cases = Runner::collect(config)?;
    let report = runner.run(&cases);

    print!("{}", report.render(config.format)?);
    if config.format == ReportFormat::Json {
        println!();
    }

    info!("Exit code {}", report.exit_code());
    Ok(report.exit_code())
}

fn list_cases(config: &HarnessConfig) -> Result<(), HarnessError> {
    let runner = Runner::new(config)?;
    let cases = Runner::collect(config)?;
    let selected = runner.select(&cases);

    if selected.is_empty() {
        println!("No cases match filter '{}'.", config.filter);
        return Ok(());
    }

    let mut current_suite: Option<&str> = None;
    for case in selected {
        if current_suite != Some(case.suite.as_str()) {
            println!("{}.", case.suite);
            current_suite = Some(case.suite.as_str());
        }
        println!("  {}  # {} == {}", case.name, case.call_expr(), case.expected);
    }
    Ok(())
}

fn eval_operation(op: Operation, operands: OperandPair, checked: bool) -> Result<(), HarnessError> {
    let result = if checked {
        op.checked_apply(operands)?
    } else {
        op.apply(operands)
    };
    println!("{}({}, {}) = {}", op, operands.a, operands.b, result);
    Ok(())
}
