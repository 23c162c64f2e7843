use clap::Parser;
use console::style;
use indicatif::HumanBytes;
use mirra::config::{Cli, Command, RunArgs};
use mirra::events::{EventSink, LogFileSink, SyncEvent};
use mirra::ui::ProgressSink;
use mirra::RunSummary;

/// Forwards every event to the live display and durable ones to the log file
struct CliSink {
    progress: ProgressSink,
    log: Option<LogFileSink>,
}

impl CliSink {
    fn build(args: &RunArgs) -> anyhow::Result<Self> {
        let log = match &args.log_file {
            Some(path) => Some(LogFileSink::open(path)?),
            None => None,
        };
        Ok(Self {
            progress: ProgressSink::new(),
            log,
        })
    }
}

impl EventSink for CliSink {
    fn emit(&mut self, event: &SyncEvent) {
        self.progress.emit(event);
        if let Some(log) = &mut self.log {
            log.emit(event);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Sync(args) => {
            let config = args.resolve()?;
            let sink = CliSink::build(&args)?;

            let summary = mirra::driver::spawn(config, args.snapshot.clone(), sink).await??;
            print_sync_summary(&summary);
        }
        Command::Baseline(args) => {
            let config = args.resolve()?;
            let mut sink = CliSink::build(&args)?;
            let snapshot_path = args.snapshot.clone();

            let summary = tokio::task::spawn_blocking(move || {
                mirra::driver::baseline(&config, &snapshot_path, &mut sink)
            })
            .await??;
            print_baseline_summary(&summary);
        }
    }

    Ok(())
}

fn print_sync_summary(summary: &RunSummary) {
    let headline = if summary.has_failures() {
        style("Sync finished with errors:").yellow().bold()
    } else {
        style("Sync complete:").green().bold()
    };

    println!(
        "{} {} copied ({}), {} renamed, {} skipped, {} failed",
        headline,
        summary.files_copied,
        HumanBytes(summary.bytes_copied),
        summary.files_renamed,
        summary.files_skipped,
        summary.files_failed,
    );

    if summary.roots_skipped > 0 {
        println!(
            "{} {} source folder(s) were missing and skipped",
            style("Warning:").yellow(),
            summary.roots_skipped
        );
    }
}

fn print_baseline_summary(summary: &RunSummary) {
    println!(
        "{} {} file(s) recorded",
        style("Baseline complete:").green().bold(),
        summary.files_recorded
    );

    if summary.roots_skipped > 0 {
        println!(
            "{} {} source folder(s) were missing and skipped",
            style("Warning:").yellow(),
            summary.roots_skipped
        );
    }
}
