use clap::{Parser, Subcommand};
#[cfg(not(test))]
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for ditfft")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    /// Build the library without `std`
    NoStd,
    Clippy,
    Fmt,
    /// fmt followed by clippy
    Analyze,
    /// Criterion benchmarks against rustfft
    Bench,
    /// Run the basic_usage demo
    Demo,
}

#[cfg(not(test))]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    match cli.command {
        Commands::Build => run(build_command(&cfg)),
        Commands::Test => run(test_command(&cfg)),
        Commands::NoStd => run(no_std_command()),
        Commands::Clippy => run(clippy_command()),
        Commands::Fmt => run(fmt_command()),
        Commands::Analyze => {
            run(fmt_command())?;
            run(clippy_command())
        }
        Commands::Bench => run(bench_command(&cfg)),
        Commands::Demo => run(demo_command(&cfg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_std_command() {
        let cli = Cli::parse_from(["xtask", "no-std"]);
        match cli.command {
            Commands::NoStd => {}
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn parse_bench_command() {
        let cli = Cli::parse_from(["xtask", "bench"]);
        assert!(matches!(cli.command, Commands::Bench));
    }
}
