#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots a windowed Gridlock session.

mod game_loop;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::Vec2;
use gridlock_core::{Command, Event, GridConfig, PixelPosition};
use gridlock_rendering::{
    BlockPresentation, BoardPresentation, Color, DebugOptions, Presentation, RenderingBackend,
    Scene,
};
use gridlock_rendering_macroquad::MacroquadBackend;
use gridlock_system_input::{InputDispatch, PointerInput};
use gridlock_system_turns::TurnFlow;
use gridlock_world::{apply, levels, query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::game_loop::FixedTimestep;

/// Command-line options controlling the Gridlock session.
#[derive(Debug, Parser)]
#[command(name = "gridlock", about = "Two-player sliding block puzzle")]
struct Args {
    /// Name of the level to load instead of picking one at random.
    #[arg(long)]
    level: Option<String>,

    /// Seed used for the random level pick; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of a single grid cell in pixels.
    #[arg(long, default_value_t = 50.0)]
    cell_size: f32,

    /// Number of cells along each board edge.
    #[arg(long, default_value_t = 7)]
    board_cells: u32,

    /// Sliding speed of blocks in pixels per second.
    #[arg(long, default_value_t = 200.0)]
    speed: f32,

    /// Draw block names and grab permissions on top of each block.
    #[arg(long)]
    show_labels: bool,

    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Disable vertical synchronisation.
    #[arg(long)]
    no_vsync: bool,
}

/// Entry point for the Gridlock command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.cell_size <= 0.0 {
        bail!("cell size must be positive (received {})", args.cell_size);
    }

    let grid = GridConfig::new(args.cell_size, args.board_cells, args.speed);
    let catalog = levels::catalog();
    let level = match &args.level {
        Some(name) => catalog
            .iter()
            .find(|level| level.name == name.as_str())
            .with_context(|| format!("unknown level '{name}'"))?,
        None => {
            let seed = args.seed.unwrap_or_else(rand::random);
            log::info!("picking level with seed {seed}");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            levels::pick(&catalog, rng.gen::<u32>() as usize)?
        }
    };
    log::info!("loaded level '{}'", level.name);

    let mut world = World::from_level(level, grid);
    let mut events = Vec::new();
    apply(&mut world, Command::Reset, &mut events);

    // The windowed adapter draws every block as a colored rectangle, so
    // blocks waiting on a visual asset are released immediately.
    for (name, image) in query::pending_assets(&world) {
        log::debug!("no loader for asset '{image}', releasing block '{name}'");
        apply(&mut world, Command::MarkReady { name }, &mut events);
    }
    log_events(&events);

    let [first, second] = query::players(&world);
    let flow = TurnFlow::new(first, second);
    let dispatch = InputDispatch::new();
    let mut timestep = FixedTimestep::default();

    let board = BoardPresentation::new(
        grid.board_cells(),
        grid.cell_size(),
        background_color(&world),
        Color::new(0.0, 0.0, 0.0, 0.25),
    )?;
    let debug = DebugOptions {
        show_labels: args.show_labels,
        show_fps: args.show_fps,
    };
    let mut scene = Scene::new(board, query::level_name(&world).to_string(), debug);
    populate_scene(&world, &mut scene);
    let presentation = Presentation::new(
        "Gridlock",
        Color::from_rgb_u8(0xf5, 0xf5, 0xf5),
        scene,
    );

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |frame_dt, frame_input, scene| {
        let pointer = PointerInput {
            click: frame_input
                .click
                .map(|click| PixelPosition::new(click.x, click.y)),
            end_turn: frame_input.end_turn,
        };

        let mut commands = Vec::new();
        let view = query::entity_view(&world);
        dispatch.handle(pointer, &view, grid, &mut commands);
        for _ in 0..timestep.advance(frame_dt) {
            commands.push(Command::Tick {
                dt: timestep.step(),
            });
        }

        let mut events = Vec::new();
        for command in commands {
            apply(&mut world, command, &mut events);
        }

        let mut follow_ups = Vec::new();
        flow.handle(&events, &mut follow_ups);
        for command in follow_ups {
            apply(&mut world, command, &mut events);
        }

        log_events(&events);
        populate_scene(&world, scene);
    })
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::EntitySelected { name } => log::debug!("selected '{name}'"),
            Event::MovementArmed { name } => log::debug!("armed movement for '{name}'"),
            Event::MovementScheduled { name, target } => {
                log::info!("scheduled '{name}' towards {target}")
            }
            Event::SlideCompleted { name, position } => {
                log::info!(
                    "'{name}' came to rest at ({}, {})",
                    position.x(),
                    position.y()
                )
            }
            Event::TurnChanged { name } => log::info!("turn passed to '{name}'"),
            Event::TurnEndRequested { current } => {
                log::debug!("'{current}' requested to end their turn")
            }
            Event::EntityReady { name } => log::debug!("'{name}' is ready"),
            Event::TimeAdvanced { .. } => {}
        }
    }
}

fn background_color(world: &World) -> Color {
    query::entity(world, &gridlock_core::EntityName::new(gridlock_core::BACKGROUND_NAME))
        .map(|snapshot| Color::from_block(snapshot.color))
        .unwrap_or_else(|_| Color::from_rgb_u8(0xd3, 0xd3, 0xd3))
}

fn populate_scene(world: &World, scene: &mut Scene) {
    let grid = query::grid(world);
    let view = query::entity_view(world);
    let holder = view.turn_holder().map(|snapshot| snapshot.name.clone());

    scene.blocks.clear();
    for snapshot in view.iter() {
        if snapshot.is_background() {
            continue;
        }

        let selectable = holder
            .as_ref()
            .map_or(false, |holder| snapshot.can_select(holder));
        scene.blocks.push(BlockPresentation {
            name: snapshot.name.clone(),
            position: Vec2::new(snapshot.position.x(), snapshot.position.y()),
            size: Vec2::new(
                snapshot.size.extent(gridlock_core::Axis::X, grid.cell_size()),
                snapshot.size.extent(gridlock_core::Axis::Y, grid.cell_size()),
            ),
            axis: snapshot.axis,
            color: Color::from_block(snapshot.color),
            selected: snapshot.selected,
            selectable,
            ready: snapshot.ready,
        });
    }

    scene.selected = query::selected_entity(world);
    scene.turn_holder = query::turn_holder(world);
}
