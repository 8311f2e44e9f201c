use clap::{Parser, Subcommand, ValueEnum};
use nds_calllist::{ExportConfig, OutputFormat};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "nds-export")]
#[command(about = "Export OBJ meshes as Nintendo DS geometry FIFO call lists", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// C header with a u32 array (.h)
    Text,
    /// Raw little-endian call list (.bin)
    Binary,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Binary => OutputFormat::Binary,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Export meshes to call lists
    Export {
        /// Input OBJ file path
        input: PathBuf,

        /// Output directory for generated files
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Meshes to export (repeat or comma-separate); all when omitted
        #[arg(short, long, value_delimiter = ',')]
        mesh: Vec<String>,

        /// Do not emit NORMAL commands
        #[arg(long)]
        no_normals: bool,

        /// Do not emit TEXCOORD commands even if the mesh has UVs
        #[arg(long)]
        no_uvs: bool,

        /// Do not emit COLOR commands even if the mesh has vertex colors
        #[arg(long)]
        no_colors: bool,

        /// Also write the bound texture as a 256-color PCX
        #[arg(long)]
        texture: bool,

        /// Scale positions so the largest mesh extent becomes 1.0
        #[arg(long)]
        rescale: bool,
    },
    /// List all meshes in an OBJ file
    List {
        /// Input OBJ file path
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging (suppressed if --quiet)
    if !cli.quiet {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let result = match cli.command {
        Commands::Export {
            input,
            output,
            format,
            mesh,
            no_normals,
            no_uvs,
            no_colors,
            texture,
            rescale,
        } => {
            let config = ExportConfig {
                dir_path: output,
                format: format.into(),
                normals: !no_normals,
                uvs: !no_uvs,
                colors: !no_colors,
                texture,
                rescale,
                meshes: mesh,
            };
            nds_calllist::export_file(&input, &config).map(|exported| {
                if !cli.quiet {
                    for m in &exported {
                        eprintln!("Success: {} -> {}", m.summary, m.mesh_path.display());
                    }
                }
            })
        }
        Commands::List { input } => nds_calllist::list_meshes(&input).map(|meshes| {
            for m in meshes {
                println!(
                    "{}\t{} vertices\t{} faces{}{}",
                    m.name,
                    m.vertex_count,
                    m.face_count,
                    if m.has_uv_layer { "\tuv" } else { "" },
                    if m.has_color_layer { "\tcolors" } else { "" }
                );
            }
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
