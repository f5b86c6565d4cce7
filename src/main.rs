use anyhow::Result;
use clap::Parser;

use textcompare::{
    cli::{Cli, OutputFormat},
    export::{ExportFormat, ResultExporter},
    DiffFormatter, TextComparer, TextComparisonResult,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = cli.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    cli.setup_logging();

    let config = cli.engine_config()?;
    let (original, modified) = cli.read_inputs()?;
    let options = cli.comparison_options();

    tracing::debug!(
        original = %cli.original.display(),
        modified = %cli.modified.display(),
        mode = %options.mode,
        "comparing"
    );

    let result = TextComparer::new(config).compare(&original, &modified, &options);

    match cli.output {
        OutputFormat::Text => print_text(&result, &cli),
        OutputFormat::Json => ResultExporter::with_format(ExportFormat::Json)
            .export_to_writer(&result, &mut std::io::stdout())?,
        OutputFormat::Html => ResultExporter::with_format(ExportFormat::Html)
            .export_to_writer(&result, &mut std::io::stdout())?,
        OutputFormat::Stats => println!("{}", DiffFormatter::format_stats(&result.statistics)),
    }

    if !result.success {
        if let Some(err) = &result.error {
            eprintln!("Error: {}", err);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn print_text(result: &TextComparisonResult, cli: &Cli) {
    if !result.success {
        return;
    }

    let rendered = DiffFormatter::format(result, result.options.view_mode, cli.width);
    if !rendered.is_empty() {
        println!("{}", rendered);
        println!();
    }
    println!(
        "{} ({:.2} ms)",
        DiffFormatter::format_stats(&result.statistics),
        result.processing_time_ms
    );
}
