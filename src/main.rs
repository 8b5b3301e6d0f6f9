// Algotty: algorithm animation in the terminal

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use algotty::engine::constants::{
    MAX_ARRAY_SIZE, MAX_MATRIX_DIM, MAX_NODE_COUNT, MAX_SPEED, MIN_ARRAY_SIZE, MIN_NODE_COUNT,
    MIN_SPEED,
};
use algotty::ui::{App, AppConfig, Mode};

fn usage(program_name: &str) {
    eprintln!("Usage: {} <mode> [options]", program_name);
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  sort      Animate a comparison sort");
    eprintln!("  heap      Build a max-heap and heap sort");
    eprintln!("  matrix    Step through a matrix multiplication");
    eprintln!("  mst       Grow a minimum spanning tree");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --size <n>        Array length for sort/heap modes");
    eprintln!("  --speed <n>       Playback speed (higher is faster)");
    eprintln!("  --nodes <n>       Node count for mst mode");
    eprintln!("  --dim <n>         Matrix side length for matrix mode");
    eprintln!("  --algorithm <a>   bubble|selection|insertion|quick|merge, or prim|kruskal");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} sort --algorithm quick --size 40", program_name);
    eprintln!("  {} mst --algorithm kruskal --nodes 12", program_name);
}

fn parse_args(args: &[String]) -> Result<AppConfig, String> {
    let mut config = AppConfig::default();

    config.mode = match args.first().map(|s| s.as_str()) {
        Some("sort") => Mode::Sort,
        Some("heap") => Mode::Heap,
        Some("matrix") => Mode::Matrix,
        Some("mst") => Mode::Mst,
        Some(other) => return Err(format!("Unknown mode '{}'", other)),
        None => return Err(String::from("No mode provided")),
    };

    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        let value = rest
            .next()
            .ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag.as_str() {
            "--size" => {
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid --size '{}'", value))?;
                // Out-of-range settings are clamped, not rejected.
                config.array_size = n.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE);
            }
            "--speed" => {
                let n: u32 = value
                    .parse()
                    .map_err(|_| format!("Invalid --speed '{}'", value))?;
                config.speed = n.clamp(MIN_SPEED, MAX_SPEED);
            }
            "--nodes" => {
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid --nodes '{}'", value))?;
                config.node_count = n.clamp(MIN_NODE_COUNT, MAX_NODE_COUNT);
            }
            "--dim" => {
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid --dim '{}'", value))?;
                config.matrix_dim = n.clamp(1, MAX_MATRIX_DIM);
            }
            "--algorithm" => match config.mode {
                Mode::Sort | Mode::Heap => {
                    config.sort_algorithm = value.parse()?;
                }
                Mode::Mst => {
                    config.mst_algorithm = value.parse()?;
                }
                Mode::Matrix => {
                    return Err(String::from("matrix mode takes no --algorithm"));
                }
            },
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("algotty");

    let config = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            usage(program_name);
            std::process::exit(1);
        }
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
