//! Command-line argument handling for the `aadp` binary.
//!
//! ```text
//! aadp [n_antennae steering_angle [iterations]] [--timeout-ms MS] [--seed S] [--json]
//! ```
//!
//! Without positional arguments the defaults apply: 3 antennae steered to
//! 90° for 100 iterations.

use std::time::Duration;

use crate::RunConfig;

/// Output format requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub config: RunConfig,
    pub format: OutputFormat,
}

pub const USAGE: &str =
    "Usage: aadp [n_antennae steering_angle [iterations]] [--timeout-ms MS] [--seed S] [--json]";

/// Parse arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut builder = RunConfig::builder();
    let mut format = OutputFormat::Text;
    let mut timeout: Option<Duration> = None;
    let mut positional = Vec::new();

    let mut args = args.into_iter().map(Into::into);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => format = OutputFormat::Json,
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                builder = builder.seed(parse(&value, "seed")?);
            }
            "--timeout-ms" => {
                let value = args.next().ok_or("--timeout-ms needs a value")?;
                let millis: f64 = parse(&value, "timeout")?;
                if millis.is_nan() || millis < 0.0 {
                    return Err(format!("timeout must be non-negative, got {value}"));
                }
                let limit = Duration::try_from_secs_f64(millis / 1000.0)
                    .map_err(|e| format!("timeout {value}: {e}"))?;
                timeout = Some(limit);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option: {flag}")),
            _ => positional.push(arg),
        }
    }

    match positional.as_slice() {
        [] => {}
        [antennae, angle, rest @ ..] if rest.len() <= 1 => {
            builder = builder
                .antennae(parse(antennae, "antenna count")?)
                .steering_angle(parse(angle, "steering angle")?);
            if let Some(iterations) = rest.first() {
                builder = builder.iterations(parse(iterations, "iteration count")?);
            }
        }
        _ => return Err(format!("unexpected arguments: {}", positional.join(" "))),
    }

    if let Some(limit) = timeout {
        builder = builder.time_limit(limit);
    }

    Ok(CliOptions {
        config: builder.build(),
        format,
    })
}

fn parse<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid {what}: {value}"))
}
