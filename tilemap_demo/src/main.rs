//! Tilemap shadow demo
//!
//! Builds a small level, keeps its shadow casters in sync while the level is
//! edited frame by frame, and logs what each pass did.
//!
//! Usage: `tilemap_demo [config.toml|config.ron]`

use thiserror::Error;
use tilemap_shadows::foundation::logging;
use tilemap_shadows::prelude::*;

const LEVEL: &str = "\
##########
#........#
#..####..#
#..#..#..#
#..####..#
#........#
##########
..........
###....###";

const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shadows.toml");

#[derive(Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Shadow pass skipped: {0}")]
    Skipped(SyncError),
}

/// One scripted level edit
struct Edit {
    label: &'static str,
    apply: fn(&mut TilemapCollider, &mut ShadowSyncConfig),
}

fn load_config() -> Result<ShadowSyncConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(ShadowSyncConfig::load_from_file(path)?),
        None => match ShadowSyncConfig::load_from_file(DEFAULT_CONFIG) {
            Ok(config) => Ok(config),
            Err(err) => {
                log::warn!("Using default settings ({})", err);
                Ok(ShadowSyncConfig::default())
            }
        },
    }
}

fn edits() -> Vec<Edit> {
    vec![
        Edit {
            label: "dig a doorway into the inner room",
            apply: |collider, _| {
                collider.set_solid(5, 4, false);
                collider.set_solid(5, 5, false);
            },
        },
        Edit {
            label: "fill the gap in the floor",
            apply: |collider, _| collider.fill_rect(3, 0, 4, 1, true),
        },
        Edit {
            label: "enable self shadows",
            apply: |_, config| config.self_shadow = true,
        },
        Edit {
            label: "clear the level",
            apply: |collider, _| {
                let (width, height) = (collider.width(), collider.height());
                collider.fill_rect(0, 0, width, height, false);
            },
        },
    ]
}

fn log_casters(world: &World, sync: &ShadowSynchronizer<TilemapCollider>) {
    for (index, &entity) in sync.registry().iter().enumerate() {
        if let Some(caster) = world.get_component::<ShadowCaster>(entity) {
            log::info!(
                "  caster {}: {} triangle(s), center ({:.1}, {:.1}), radius {:.2}, self shadows {}",
                index,
                caster.mesh.triangle_count(),
                caster.bounding_sphere.center.x,
                caster.bounding_sphere.center.y,
                caster.bounding_sphere.radius,
                caster.self_shadows
            );
        }
    }
}

fn run_pass(world: &mut World, sync: &mut ShadowSynchronizer<TilemapCollider>) -> Result<(), DemoError> {
    let report = sync.try_regenerate(world).map_err(DemoError::Skipped)?;
    let reclaimed = world.flush_destroyed();

    log::info!(
        "{} island(s): {} created, {} destroyed ({} reclaimed), composite {}",
        report.island_count,
        report.created,
        report.destroyed,
        reclaimed,
        world.has_component::<CompositeShadowCaster>(sync.owner())
    );
    log_casters(world, sync);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");

    let config = load_config()?;
    log::info!("Settings: {:?}", config);

    let mut world = World::new();
    let owner = world.spawn("Level");
    let mut sync = ShadowSynchronizer::new(owner, config);

    let collider = TilemapCollider::from_ascii(LEVEL);
    let outcome = sync.reinitialize(&mut world, collider, EdgeMeshBuilder);
    if let PassOutcome::Skipped(err) = outcome {
        return Err(DemoError::Skipped(err).into());
    }
    if let PassOutcome::Skipped(err) = sync.reset(&mut world) {
        return Err(DemoError::Skipped(err).into());
    }
    world.flush_destroyed();
    log_casters(&world, &sync);

    for edit in edits() {
        log::info!("Edit: {}", edit.label);
        let mut config = sync.config.clone();
        if let Some(collider) = sync.source_mut() {
            (edit.apply)(collider, &mut config);
        }
        sync.config = config;
        run_pass(&mut world, &mut sync)?;
    }

    log::info!("Done; {} node(s) left in the world", world.entity_count());
    Ok(())
}
