use aadp::cli::{self, OutputFormat};
use aadp::report;

fn usage(message: &str) -> ! {
    eprintln!("error: {message}");
    eprintln!("{}", cli::USAGE);
    eprintln!();
    eprintln!("Example:");
    eprintln!("  aadp 5 60 200 --seed 42");
    std::process::exit(2);
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => usage(&e),
    };

    let record = match aadp::run(&options.config) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    match options.format {
        OutputFormat::Text => println!("{}", report::render_text(&record.report)),
        OutputFormat::Json => match report::render_json(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
    }
}
