use anyhow::{bail, Context, Result};

use smart_roster::config::ServerConfig;
use smart_roster::display::{print_month_schedule, write_schedule_to_file};
use smart_roster::form::{build_daily_roster, export_daily_roster, roster_file_name};
use smart_roster::parser::{load_employees, load_holidays, load_schedules};
use smart_roster::schedule::{generate_schedule, OverrideTable};
use smart_roster::web;

const USAGE: &str = "Usage:
  smart-roster web [port]
  smart-roster generate --employees FILE --schedule FILE [--holidays FILE] --month M --year Y [--out FILE] [--summary FILE]";

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn required_arg<'a>(args: &'a [String], flag: &str) -> Result<&'a str> {
    arg_value(args, flag).with_context(|| format!("missing {}\n{}", flag, USAGE))
}

fn run_generate(args: &[String]) -> Result<()> {
    let month: u32 = required_arg(args, "--month")?
        .parse()
        .context("--month must be a number")?;
    let year: i32 = required_arg(args, "--year")?
        .parse()
        .context("--year must be a number")?;

    let employees_path = required_arg(args, "--employees")?;
    let schedule_path = required_arg(args, "--schedule")?;

    let mut employees = load_employees(employees_path)
        .with_context(|| format!("reading employees from {}", employees_path))?;
    let plan = load_schedules(schedule_path)
        .with_context(|| format!("reading schedule from {}", schedule_path))?;
    let overrides = match arg_value(args, "--holidays") {
        Some(path) => load_holidays(path).with_context(|| format!("reading holidays from {}", path))?,
        None => OverrideTable::new(),
    };

    println!(
        "Loaded {} employees and {} holiday overrides",
        employees.len(),
        overrides.len()
    );

    let schedule = generate_schedule(&mut employees, &plan, &overrides, year, month)?;
    print_month_schedule(&schedule, &employees)?;

    let out_path = arg_value(args, "--out")
        .map(str::to_string)
        .unwrap_or_else(|| roster_file_name(year, month));
    let roster = build_daily_roster(&schedule, &employees)?;
    export_daily_roster(&roster, &out_path)?;
    println!("\nRoster saved to {}", out_path);

    if let Some(summary_path) = arg_value(args, "--summary") {
        write_schedule_to_file(&schedule, &employees, summary_path)?;
        println!("Schedule summary saved to {}", summary_path);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("web") => {
            let config = ServerConfig::from_env(args.get(2).map(String::as_str));
            log::info!("Starting SmartRoster server on {}:{}...", config.bind_address, config.port);
            web::start_server(config).await?;
            Ok(())
        }
        Some("generate") => run_generate(&args[2..]),
        _ => bail!("{}", USAGE),
    }
}
