//! Pack Stack CLI
//!
//! Inspect a stack of resource packs: validity, transparency and block models.

use clap::{Parser, Subcommand};
use pack_stack::{
    BlockModelBuilder, BlockState, FaceMode, Pack, Resolver, ResolverConfig, ResourceKey,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pack-stack")]
#[command(author, version, about = "Resolve resources across a stack of Minecraft resource packs", long_about = None)]
struct Cli {
    /// Resource pack directory; repeat to stack, lowest priority first
    #[arg(long = "pack", global = true)]
    packs: Vec<PathBuf>,

    /// Where to persist the transparency cache
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show pack validity and index counts
    Info,

    /// Print whether a texture has transparent pixels
    Transparent {
        /// Texture key (e.g., "minecraft:block/glass" or "block/glass")
        texture: String,
    },

    /// Build a block model and summarize its quads
    Model {
        /// Block name (e.g., "minecraft:stone" or "stone")
        block: String,

        /// Block properties as key=value pairs (e.g., "facing=north")
        #[arg(short, long, value_parser = parse_property)]
        property: Vec<(String, String)>,

        /// Only faces with a cullface
        #[arg(long, conflicts_with = "interior")]
        culled: bool,

        /// Only faces without a cullface
        #[arg(long)]
        interior: bool,
    },
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("Invalid property format: '{}'. Use key=value", s))
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = ResolverConfig::default();
    if let Some(cache) = &cli.cache {
        config = config.with_cache_path(cache);
    }
    let packs: Vec<Pack> = cli.packs.iter().map(Pack::open).collect();
    let resolver = Resolver::with_config(packs, config, BlockModelBuilder)?;

    match cli.command {
        Commands::Info => show_info(&resolver),
        Commands::Transparent { texture } => {
            let key = ResourceKey::parse(&texture);
            let transparent = resolver.is_transparent(key.namespace(), key.path())?;
            println!("{}: {}", key, if transparent { "transparent" } else { "opaque" });
        }
        Commands::Model {
            block,
            property,
            culled,
            interior,
        } => {
            let face_mode = match (culled, interior) {
                (true, _) => FaceMode::Culled,
                (_, true) => FaceMode::Interior,
                _ => FaceMode::All,
            };
            let state = property
                .into_iter()
                .fold(BlockState::new(block), |state, (k, v)| state.with_property(k, v));
            show_model(&resolver, &state, face_mode)?;
        }
    }

    Ok(())
}

fn show_info(resolver: &Resolver) {
    println!("Pack stack (lowest priority first):");
    for pack in resolver.packs() {
        if pack.is_valid() {
            println!(
                "  {} [format {}] {}",
                pack.root().display(),
                pack.format_version(),
                pack.description()
            );
        } else {
            println!("  {} [invalid]", pack.root().display());
        }
    }

    let index = resolver.index();
    println!("\nMerged index:");
    println!("  Namespaces: {}", index.namespaces().join(", "));
    println!("  Blockstates: {}", index.blockstate_count());
    println!("  Models: {}", index.model_count());
    println!("  Textures: {}", index.texture_count());
}

fn show_model(
    resolver: &Resolver,
    state: &BlockState,
    face_mode: FaceMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = resolver.get_model(state, face_mode)?;

    println!("{} ({:?}): {} quads", state, face_mode, mesh.len());
    for texture in mesh.textures() {
        let transparent = resolver.is_transparent(texture.namespace(), texture.path())?;
        println!(
            "  {}{}",
            texture,
            if transparent { " (transparent)" } else { "" }
        );
    }
    Ok(())
}
