use clap::{Parser, Subcommand};
use irrigation_layout::{
    config::LayoutConfig,
    engine::{LayoutEngine, LayoutResult},
    io::{
        geojson::write_layout_geojson,
        project::{read_request_json, read_result_json, write_result_json},
        read_coordinates_csv,
    },
    polygon::polygon_area,
    polyline::pipe_length,
    stats::{network_statistics, NetworkStatistics, StationMethod},
};
use log::info;
use std::fs::File;
use std::process::ExitCode;

/// Command line front end for the irrigation layout engine.
#[derive(Parser)]
#[command(name = "irrigation_cli", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate branches and plants for a JSON layout request.
    Layout {
        request: String,
        /// JSON layout configuration; defaults apply when omitted.
        #[arg(long)]
        config: Option<String>,
        /// Branch angle in degrees relative to the sub-main.
        #[arg(long)]
        angle: Option<f64>,
        /// Measure statistics stations by projection instead of nearest vertex.
        #[arg(long)]
        projected_stations: bool,
        /// Write the full result as JSON.
        #[arg(long)]
        output: Option<String>,
        /// Write the layout as a GeoJSON feature collection.
        #[arg(long)]
        geojson: Option<String>,
    },
    /// Compute the area in square metres of a polygon given as lat,lng CSV.
    Area { path: String },
    /// Compute the length in metres of a pipe given as lat,lng CSV.
    PipeLength { path: String },
    /// Recompute network statistics for a saved layout result.
    Stats {
        path: String,
        #[arg(long)]
        projected_stations: bool,
    },
}

fn station_method(projected: bool) -> StationMethod {
    if projected {
        StationMethod::Projected
    } else {
        StationMethod::NearestVertex
    }
}

fn print_statistics(stats: &NetworkStatistics) {
    println!("Branches: {}", stats.total_branches);
    println!("Plants: {}", stats.total_plants);
    println!("Average row spacing: {:.3}", stats.average_row_spacing);
    println!("Average plant spacing: {:.3}", stats.average_plant_spacing);
    println!("Spacing accuracy: {:.1}", stats.spacing_accuracy);
}

fn init_logging() {
    if let Ok(path) = std::env::var("IRRIGATION_LOG") {
        match File::create(&path) {
            Ok(file) => {
                env_logger::Builder::from_default_env()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Failed to create log file {}: {}", path, e);
                env_logger::Builder::from_default_env().init();
            }
        }
    } else {
        env_logger::Builder::from_default_env().init();
    }
}

fn run_layout(
    request: &str,
    config: Option<&str>,
    angle: Option<f64>,
    projected_stations: bool,
    output: Option<&str>,
    geojson: Option<&str>,
) -> Result<LayoutResult, String> {
    let mut config = match config {
        Some(path) => {
            LayoutConfig::load(path).map_err(|e| format!("Error reading {}: {}", path, e))?
        }
        None => LayoutConfig::default(),
    };
    if projected_stations {
        config.station_method = StationMethod::Projected;
    }
    let mut request =
        read_request_json(request).map_err(|e| format!("Error reading {}: {}", request, e))?;
    if angle.is_some() {
        request.branch_angle = angle;
    }

    let result = LayoutEngine::new(config).run(&request);
    if let Some(path) = output {
        write_result_json(path, &result).map_err(|e| format!("Error writing {}: {}", path, e))?;
        info!("wrote layout result to {}", path);
    }
    if let Some(path) = geojson {
        write_layout_geojson(path, &result)
            .map_err(|e| format!("Error writing {}: {}", path, e))?;
        info!("wrote layout geojson to {}", path);
    }
    Ok(result)
}

fn execute(command: Commands) -> Result<(), String> {
    match command {
        Commands::Layout {
            request,
            config,
            angle,
            projected_stations,
            output,
            geojson,
        } => {
            let result = run_layout(
                &request,
                config.as_deref(),
                angle,
                projected_stations,
                output.as_deref(),
                geojson.as_deref(),
            )?;
            for d in &result.diagnostics {
                match &d.sub_main_id {
                    Some(id) => eprintln!("Skipped {}: {}", id, d.message),
                    None => eprintln!("Rejected: {}", d.message),
                }
            }
            print_statistics(&result.statistics);
        }
        Commands::Area { path } => {
            let polygon =
                read_coordinates_csv(&path).map_err(|e| format!("Error reading {}: {}", path, e))?;
            println!("Area: {:.3}", polygon_area(&polygon));
        }
        Commands::PipeLength { path } => {
            let pipe =
                read_coordinates_csv(&path).map_err(|e| format!("Error reading {}: {}", path, e))?;
            println!("Length: {:.3}", pipe_length(&pipe));
        }
        Commands::Stats {
            path,
            projected_stations,
        } => {
            let result =
                read_result_json(&path).map_err(|e| format!("Error reading {}: {}", path, e))?;
            let stats = network_statistics(&result.sub_mains, station_method(projected_stations));
            print_statistics(&stats);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{}", msg);
            ExitCode::FAILURE
        }
    }
}
