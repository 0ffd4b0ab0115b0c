//! dashboard-runner: headless renderer for the KUR monitoring dashboard.
//!
//! Usage:
//!   dashboard-runner --seed 42 --start 2024-01 --end 2025-11
//!   dashboard-runner --config dashboard.json --json
//!   dashboard-runner --ipc-mode

use anyhow::Result;
use kur_monitor_core::{
    calendar,
    command::DashboardCommand,
    config::DashboardConfig,
    dashboard::Dashboard,
    snapshot::{Chart, DashboardSnapshot, TableView},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Command { command: DashboardCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct IpcResponse<'a> {
    session: &'a str,
    events: Vec<kur_monitor_core::event::DashboardEvent>,
    snapshot: DashboardSnapshot,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json = args.iter().any(|a| a == "--json");
    let config = build_config(&args)?;

    if !ipc_mode && !json {
        println!("Dashboard Monitoring Pembiayaan Petani Tebu KUR: dashboard-runner");
        println!("  seed:    {}", config.seed);
        println!("  start:   {}", calendar::month_label(config.start_month));
        println!("  end:     {}", calendar::month_label(config.end_month));
        println!("  regions: {}", config.regions.len());
        println!();
    }

    let mut dashboard = Dashboard::new(config)?;
    let session = dashboard.open_session();
    log::info!("session={session} ready (ipc_mode={ipc_mode})");

    if ipc_mode {
        run_ipc_loop(&mut dashboard, &session)?;
    } else {
        let snapshot = dashboard.render(&session)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            print_report(&snapshot);
        }
    }

    Ok(())
}

/// Defaults, then the optional config file, then individual flags.
fn build_config(args: &[String]) -> Result<DashboardConfig> {
    let mut config = match arg_value(args, "--config") {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    config.seed = parse_arg(args, "--seed", config.seed);
    if let Some(start) = arg_value(args, "--start") {
        config.start_month = calendar::parse_month(start)?;
    }
    if let Some(end) = arg_value(args, "--end") {
        config.end_month = calendar::parse_month(end)?;
    }
    config.validate()?;
    Ok(config)
}

fn run_ipc_loop(dashboard: &mut Dashboard, session: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let events = match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => Vec::new(),
            IpcRequest::Command { command } => dashboard.submit_command(session, command)?,
        };
        let response = IpcResponse {
            session,
            events,
            snapshot: dashboard.render(session)?,
        };
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_report(snapshot: &DashboardSnapshot) {
    println!("=== INDIKATOR KINERJA UTAMA ===");
    for card in &snapshot.metric_cards {
        match &card.delta {
            Some(delta) => println!("  {:<24} {:>18}  ({delta})", card.label, card.value),
            None => println!("  {:<24} {:>18}", card.label, card.value),
        }
    }

    println!();
    println!("=== PENYALURAN PER KUARTAL ===");
    print_chart(&snapshot.quarterly_disbursement);

    println!();
    println!("=== TOP REGION ===");
    for card in &snapshot.top_regions {
        println!(
            "  {:<18} {} | {} | NPL {} ({:?}) | {}",
            card.region, card.total_credit, card.borrowers, card.npl_rate, card.risk_class, card.land_area
        );
    }

    println!();
    println!("=== DETAIL REGION ===");
    print_table(&snapshot.regional_table);

    println!();
    println!("=== AGING ===");
    print_chart(&snapshot.aging);

    println!();
    println!("=== SEGMENTASI DEBITUR ===");
    print_table(&snapshot.segment_table);

    println!();
    println!("=== PRODUKTIVITAS ===");
    print_chart(&snapshot.productivity_chart);
    print_table(&snapshot.productivity);

    if !snapshot.filter.is_default() {
        println!();
        println!("  filter (not applied): {}", snapshot.filter.describe());
    }
}

fn print_chart(chart: &Chart) {
    println!("  {}", chart.title);
    for series in &chart.series {
        let points: Vec<String> = series
            .points
            .iter()
            .map(|p| format!("{}={:.2}", p.x, p.y))
            .collect();
        println!("    {}: {}", series.name, points.join(", "));
    }
    for line in &chart.reference_lines {
        println!("    [{}]", line.label);
    }
}

fn print_table(table: &TableView) {
    println!("  {}", table.columns.join(" | "));
    for row in &table.rows {
        println!("  {}", row.join(" | "));
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    arg_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
