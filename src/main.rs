//! Blast Arena headless runner
//!
//! Loads a level, spawns rolling players, drops bombs on a timer and runs a
//! fixed-timestep loop, batching every frame into a vertex list.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use blast_arena::consts::{PLAYER_NAME_FONT, TIME_STEP};
use blast_arena::demo::{FuseBomb, RollingPlayer};
use blast_arena::renderer::{BlockFont, DrawList, FontBook, Rect};
use blast_arena::sim::{TileMap, Tileset};
use blast_arena::{Level, LevelError, Settings};

const DEFAULT_MAP: &str = include_str!("../assets/arena.map.json");
const DEFAULT_TILESET: &str = include_str!("../assets/tileset.json");

#[derive(Parser)]
#[command(name = "blast-arena", about = "Run a bomb arena level headless")]
struct Cli {
    /// Map JSON file (built-in arena if omitted)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Tileset JSON file (built-in tileset if omitted)
    #[arg(long)]
    tileset: Option<PathBuf>,

    /// Settings JSON file
    #[arg(long, default_value = "blast-arena.json")]
    settings: PathBuf,

    /// Override the number of frames to run
    #[arg(long)]
    frames: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    log::info!("Blast Arena (headless) starting...");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_level(cli: &Cli) -> Result<Level, LevelError> {
    let map = match &cli.map {
        Some(path) => TileMap::load(path)?,
        None => TileMap::from_json(DEFAULT_MAP)?,
    };
    let tileset = match &cli.tileset {
        Some(path) => Tileset::load(path)?,
        None => Tileset::from_json(DEFAULT_TILESET)?,
    };
    Level::init(&map, tileset)
}

fn run(cli: &Cli) -> Result<(), LevelError> {
    let mut settings = Settings::load(&cli.settings);
    if let Some(frames) = cli.frames {
        settings.frames = frames;
    }

    let mut level = load_level(cli)?;
    let mut rng = Pcg32::seed_from_u64(settings.seed);

    let mut players: Vec<RollingPlayer> = (0..settings.players)
        .map(|i| {
            let spawn = level.spawn_point();
            let velocity = Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0));
            RollingPlayer::spawn(format!("P{}", i + 1), level.physics_mut(), spawn, velocity)
        })
        .collect();

    let mut fonts = FontBook::new();
    if settings.player_names {
        fonts.insert(PLAYER_NAME_FONT, BlockFont::default());
    }

    let target = Rect::new(0.0, 0.0, settings.window_width, settings.window_height);
    let mut draw_list = DrawList::new();
    let mut accumulator = 0.0;
    let mut steps = 0u64;
    let mut bombs_dropped = 0u32;

    for frame in 0..settings.frames {
        // Run fixed timestep simulation
        accumulator += settings.frame_dt.min(0.1);
        let mut substeps = 0;
        while accumulator >= TIME_STEP && substeps < settings.max_substeps {
            level.update();
            accumulator -= TIME_STEP;
            substeps += 1;
            steps += 1;
        }

        for player in &mut players {
            player.sync(level.physics());
            if player.active && player.is_stalled() {
                let kick = Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0));
                player.kick(level.physics_mut(), kick);
            }
        }

        if settings.bomb_interval > 0 && frame % settings.bomb_interval == 0 && !players.is_empty() {
            let dropper = &players[rng.random_range(0..players.len())];
            // Bombs snap to the center of the cell under the player
            if let Some((row, col)) = level.grid().cell_at(dropper.position) {
                let size = level.tile_size_meters();
                let center = Vec2::new(col as f32 + 0.5, row as f32 + 0.5) * size;
                level.add_bomb(Box::new(FuseBomb::new(center, settings.bomb_fuse)));
                bombs_dropped += 1;
            }
        }

        draw_list.clear();
        let viewport = level.render_into(&mut draw_list, target);
        level.render_players(&mut draw_list, &viewport, &players, &fonts);

        if frame % 60 == 0 {
            log::debug!(
                "frame {}: {} bombs, {} explosions, {} vertices ({} bytes)",
                frame,
                level.bombs().len(),
                level.explosions().len(),
                draw_list.vertices().len(),
                draw_list.as_bytes().len()
            );
        }
    }

    log::info!(
        "Ran '{}' for {} frames ({} physics steps), dropped {} bombs; {} explosions live, {} bodies",
        level.name(),
        settings.frames,
        steps,
        bombs_dropped,
        level.explosions().len(),
        level.physics().body_count()
    );
    Ok(())
}
