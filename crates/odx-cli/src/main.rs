use std::process::ExitCode;

use chrono::Local;
use odx_io::{ExportConfig, ExportReport, ResultExporter};

fn usage() {
    eprintln!("usage: odx-cli export <config.json>");
}

fn run_export(config_path: &str) -> odx_io::Result<ExportReport> {
    let config = ExportConfig::from_file(config_path)?;
    ResultExporter::new(config).run()
}

fn print_report(report: &ExportReport) {
    println!(
        "Tecplot file created at: {}",
        report.displacement_path.display()
    );
    println!("Tecplot file created at: {}", report.stress_path.display());
    println!("node_rows: {}", report.node_rows);
    println!("element_rows: {}", report.element_rows);
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 || args[1] != "export" {
        usage();
        return ExitCode::from(2);
    }

    println!(
        "export started: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    match run_export(&args[2]) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("export error: {err}");
            ExitCode::from(1)
        }
    }
}
