use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visort_core::SortArgs;

#[derive(Parser)]
#[command(author, version, about, long_about = None, styles=get_styles())] // Read from `Cargo.toml`
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    #[command(flatten)]
    sort: SortArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr and stay quiet by default so they do not tear the animation.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "visort starting");
    cli.sort.run().await
}

fn get_styles() -> clap::builder::Styles {
    let colour = |ansi| Some(anstyle::Color::Ansi(ansi));

    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(colour(anstyle::AnsiColor::Blue)),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .fg_color(colour(anstyle::AnsiColor::Blue)),
        )
        .literal(anstyle::Style::new().fg_color(colour(anstyle::AnsiColor::Green)))
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(colour(anstyle::AnsiColor::Red)),
        )
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(colour(anstyle::AnsiColor::Red)),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(colour(anstyle::AnsiColor::Cyan)),
        )
        .placeholder(anstyle::Style::new().fg_color(colour(anstyle::AnsiColor::Yellow)))
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert()
}

#[test]
fn parses_a_run() {
    let cli = Cli::try_parse_from([
        "visort",
        "run",
        "--algorithm",
        "quick",
        "--speed",
        "very-fast",
        "--pattern",
        "few-unique",
    ]);
    assert!(cli.is_ok());

    let cli = Cli::try_parse_from(["visort", "run", "--algorithm", "bogo"]);
    assert!(cli.is_err());
}
