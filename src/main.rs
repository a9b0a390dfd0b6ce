//! Widget Board CLI
//!
//! Usage:
//!   widget-board [OPTIONS] <MANIFEST>
//!
//! Options:
//!   --width <PX>              Container width (default 1280)
//!   --height <PX>             Container height (default 800)
//!   -r, --record <FILE>       Persisted layout to start from
//!   -s, --store <DIR>         Load from and save to a layout store directory
//!   -o, --output <FILE>       Write the resulting record here instead of stdout
//!   --drag <ID>@<X>,<Y>       Drag an item's top-left corner to (X, Y)
//!   --resize <ID>@<H>@<DX>,<DY>  Resize an item from handle H by (DX, DY)
//!   --seed <N>                Seed for placement jitter
//!   --lint                    Report layout invariant violations
//!   -d, --debug               Print the item table and enable debug logging

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use widget_board::layout::lint;
use widget_board::record::now_millis;
use widget_board::store::load_record;
use widget_board::{
    Board, BoardConfig, Bounds, DebouncedWriter, FileStore, LayoutRecord, Manifest, Point,
    ResizeHandle,
};

#[derive(Parser)]
#[command(name = "widget-board")]
#[command(about = "Lay out, drag and resize dashboard widgets without overlaps")]
struct Cli {
    /// Widget manifest (TOML)
    manifest: PathBuf,

    /// Container width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Container height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Persisted layout record (JSON) to start from
    #[arg(short, long)]
    record: Option<PathBuf>,

    /// Layout store directory; read when no --record is given, written on exit
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Output file for the resulting record (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Drag an item: <ID>@<X>,<Y>
    #[arg(long, value_name = "ID@X,Y")]
    drag: Vec<DragArg>,

    /// Resize an item: <ID>@<HANDLE>@<DX>,<DY>
    #[arg(long, value_name = "ID@HANDLE@DX,DY")]
    resize: Vec<ResizeArg>,

    /// Seed for placement jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Report layout invariant violations on stderr
    #[arg(long)]
    lint: bool,

    /// Print the item table on stderr and enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Clone)]
struct DragArg {
    id: String,
    to: Point,
}

#[derive(Debug, Clone)]
struct ResizeArg {
    id: String,
    handle: ResizeHandle,
    delta: Point,
}

fn parse_pair(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected <X>,<Y>, got '{}'", s))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok(Point::new(x, y))
}

impl FromStr for DragArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, to) = s
            .split_once('@')
            .ok_or_else(|| format!("expected <ID>@<X>,<Y>, got '{}'", s))?;
        Ok(Self {
            id: id.to_string(),
            to: parse_pair(to)?,
        })
    }
}

impl FromStr for ResizeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '@');
        let (Some(id), Some(handle), Some(delta)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected <ID>@<HANDLE>@<DX>,<DY>, got '{}'", s));
        };
        Ok(Self {
            id: id.to_string(),
            handle: handle.parse()?,
            delta: parse_pair(delta)?,
        })
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let manifest = match Manifest::from_file(&cli.manifest) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error loading manifest '{}': {}", cli.manifest.display(), e);
            std::process::exit(1);
        }
    };

    let mut config = BoardConfig::new().with_layout(manifest.layout.clone());
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let store = cli.store.as_ref().map(FileStore::new);

    let record = match (&cli.record, &store) {
        (Some(path), _) => match fs::read_to_string(path) {
            Ok(text) => LayoutRecord::load(&text),
            Err(e) => {
                eprintln!("Error reading record '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        (None, Some(store)) => load_record(store, &config.storage_key),
        (None, None) => None,
    };
    if record.is_none() {
        info!("no usable saved layout, seeding the default grid");
    }

    let bounds = Bounds::new(cli.width, cli.height);
    let mut board = Board::new(config, manifest.widgets, bounds, record);

    for drag in &cli.drag {
        let Some(item) = board.item(&drag.id) else {
            eprintln!("Warning: no widget '{}' to drag", drag.id);
            continue;
        };
        let grab = Point::new(item.x, item.y);
        if board.begin_drag(&drag.id, grab) {
            board.pointer_move(drag.to);
            board.pointer_up();
        }
    }

    for resize in &cli.resize {
        let Some(item) = board.item(&resize.id) else {
            eprintln!("Warning: no widget '{}' to resize", resize.id);
            continue;
        };
        let grab = item.rect().center();
        let release = Point::new(grab.x + resize.delta.x, grab.y + resize.delta.y);
        if board.begin_resize(&resize.id, resize.handle, grab) {
            board.pointer_move(release);
            board.pointer_up();
        }
    }

    if cli.debug {
        print_table(&board);
    }

    if cli.lint {
        let warnings = lint::check(board.items(), board.bounds(), &board.config().layout);
        for warning in &warnings {
            eprintln!("warning[{}]: {}", warning.category, warning.message);
        }
        if !warnings.is_empty() {
            eprintln!("{} lint warning(s)", warnings.len());
        }
    }

    let record = board.record(now_millis());
    let text = match record.to_json_pretty() {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error encoding record: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(store) = store {
        let key = board.config().storage_key.clone();
        let mut writer = DebouncedWriter::new(store, key, Duration::ZERO);
        writer.submit(text.clone(), Instant::now());
        writer.flush();
    }

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &text) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => println!("{}", text),
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_table(board: &Board) {
    eprintln!("=== Layout Debug ===");
    for id in board.render_order() {
        if let Some(item) = board.item(id) {
            eprintln!(
                "[{}] x={:.1} y={:.1} w={:.1} h={:.1} mw={:.3} mh={:.3} rx={:.3} ry={:.3} z={}",
                item.id, item.x, item.y, item.w, item.h, item.mw, item.mh, item.rx, item.ry, item.z
            );
        }
    }
    eprintln!("====================");
}
