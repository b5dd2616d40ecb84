//! Guided walk demo using the NavigationSession API.
//!
//! Loads a floor plan, calibrates at a starting vertex, routes to a
//! destination and walks the route with the built-in simulator,
//! printing one guidance line per tick. The clock is synthetic, so the
//! walk completes immediately regardless of the configured speed.
//!
//! Usage:
//!   cargo run --example guided_walk -- --from n1 --to n4
//!   cargo run --example guided_walk -- --plan plans/office.json --speed 2.0

use std::path::Path;

use clap::Parser;

use marga_nav::{
    FloorPlanDoc, HeadingSample, NavConfig, NavigationGraph, NavigationSession,
    ScriptedOrientationSource, WorldPoint,
};

/// Built-in office plan used when no --plan file is given.
const DEMO_PLAN: &str = r#"{
    "vertices": [
        {"id": "n1", "objectName": "Main Entrance", "cx": 0, "cy": 0},
        {"id": "n2", "objectName": "Reception", "cx": 8, "cy": 0},
        {"id": "n3", "objectName": "Cafeteria", "cx": 8, "cy": 6},
        {"id": "n4", "objectName": "Conference Room", "cx": 16, "cy": 6},
        {"id": "n5", "objectName": "Server Room", "cx": 16, "cy": 12}
    ],
    "edges": [
        {"id": "e1", "from": "n1", "to": "n2"},
        {"id": "e2", "from": "n2", "to": "n3"},
        {"id": "e3", "from": "n3", "to": "n4"},
        {"id": "e4", "from": "n4", "to": "n5"}
    ]
}"#;

/// Guided walk demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Floor plan JSON file (uses a built-in office plan when omitted)
    #[arg(short, long)]
    plan: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "configs/config.yaml")]
    config: String,

    /// Starting vertex id
    #[arg(long, default_value = "n1")]
    from: String,

    /// Destination vertex id
    #[arg(long, default_value = "n5")]
    to: String,

    /// Walking speed in meters per second
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Tick interval in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Compass heading in degrees, fed through rotation calibration
    #[arg(long)]
    heading: Option<f32>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // Load configuration
    let config_path = Path::new(&args.config);
    let config = if config_path.exists() {
        NavConfig::load(config_path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}, using defaults", e);
            NavConfig::default()
        })
    } else {
        NavConfig::default()
    };
    let config = config.with_simulation_speed(args.speed);

    // Load floor plan
    let doc = match &args.plan {
        Some(path) => FloorPlanDoc::load(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Failed to load plan {}: {}", path, e);
            std::process::exit(1);
        }),
        None => FloorPlanDoc::from_json(DEMO_PLAN).expect("built-in plan is valid"),
    };
    let graph = match NavigationGraph::from_document(doc) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Floor plan rejected: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== Floor Plan ===");
    for vertex in graph.vertices() {
        println!(
            "  {:8} {} at ({}, {})",
            vertex.id, vertex.name, vertex.grid.x, vertex.grid.y
        );
    }

    // Calibrate at the starting vertex
    let mut session = NavigationSession::new(graph, config);
    if let Err(e) = session.calibrate(&args.from, WorldPoint::ZERO) {
        eprintln!("Calibration failed: {}", e);
        std::process::exit(1);
    }
    if let Some(degrees) = args.heading {
        let mut compass = ScriptedOrientationSource::new(vec![HeadingSample::new(degrees)]);
        match session.calibrate_rotation(&mut compass) {
            Ok(fixed) => println!("Heading calibrated to {:.1}°", fixed),
            Err(e) => eprintln!("Warning: heading calibration failed: {}", e),
        }
    }

    // Route and walk
    if let Err(e) = session.set_destination(&args.to) {
        eprintln!("Destination rejected: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = session.start() {
        eprintln!("Could not start navigation: {}", e);
        std::process::exit(1);
    }

    let route = session.route().expect("route exists after start");
    println!("\n=== Route ===");
    println!("  {}", route.ids().join(" -> "));
    println!(
        "  {} hops, {:.1} m at {:.1} m/s",
        route.hop_count(),
        session.simulator().path_length(),
        args.speed
    );

    println!("\n=== Walk ===");
    let tick_secs = args.tick_ms as f64 / 1000.0;
    for tick in 0..100_000u64 {
        let now = tick as f64 * tick_secs;
        let Some(update) = session.update(now, None) else {
            break;
        };
        println!(
            "  t={:6.1}s  pos=({:6.2}, {:6.2})  {:5.1} m to go  bearing {:5.1}°  [{}]",
            now,
            update.position.x,
            update.position.z,
            update.distance_m,
            update.bearing_deg,
            update.proximity.name()
        );
        if update.arrived {
            println!("\nArrived at '{}'.", args.to);
            break;
        }
    }
}
