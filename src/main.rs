use clap::{Parser, ValueEnum};

use island_maps::{IslandMap, MapConfig, NoiseSpec, OctaveParams};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NoiseKind {
    Spectral,
    Lattice,
    Warped,
    Cosine,
    Fbm,
}

#[derive(Parser, Debug)]
#[command(name = "island_maps")]
#[command(about = "Generate procedural island maps with capitals and cities")]
struct Args {
    /// Kind of noise used for the terrain field
    #[arg(short, long, value_enum, default_value = "spectral")]
    kind: NoiseKind,

    /// Side length of the synthesis grid in cells
    #[arg(short, long, default_value = "500")]
    boxsize: usize,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of consecutive seeds to generate (a gallery)
    #[arg(short = 'n', long, default_value = "1")]
    count: u64,

    /// Sea-level threshold in [0, 1]
    #[arg(short, long, default_value = "0.6")]
    threshold: f64,

    /// Gaussian smoothing sigma
    #[arg(long, default_value = "5.0")]
    sigma: f64,

    /// Force the map edges to be sea
    #[arg(long)]
    island: bool,

    /// Output grid side length (default: 2 * boxsize)
    #[arg(long)]
    output_size: Option<usize>,

    /// Power spectrum amplitude (spectral noise)
    #[arg(long, default_value = "1.0")]
    amplitude: f64,

    /// Power spectrum spectral index (spectral noise)
    #[arg(long, default_value = "-3.0", allow_hyphen_values = true)]
    spectral_index: f64,

    /// Hurst parameter in (0, 1) (fbm noise)
    #[arg(long, default_value = "0.5")]
    hurst: f64,

    /// Coordinate scale (lattice/warped/cosine noise)
    #[arg(long, default_value = "500.0")]
    scale: f64,

    /// Number of octaves (lattice/warped/cosine noise)
    #[arg(long, default_value = "6")]
    octaves: u32,

    /// Amplitude decay per octave (lattice/warped/cosine noise)
    #[arg(long, default_value = "0.5")]
    persistence: f64,

    /// Frequency growth per octave (lattice/warped/cosine noise)
    #[arg(long, default_value = "2.0")]
    lacunarity: f64,

    /// Domain warp amplitude (warped noise; random if not specified)
    #[arg(long)]
    warp_amplitude: Option<f64>,

    /// Directory for the PNG previews
    #[arg(short, long, default_value = "images")]
    out_dir: String,

    /// Print settlement coordinates as JSON
    #[arg(long)]
    json: bool,
}

fn noise_spec(args: &Args) -> NoiseSpec {
    let octave_params = OctaveParams {
        scale: args.scale,
        octaves: args.octaves,
        persistence: args.persistence,
        lacunarity: args.lacunarity,
    };
    match args.kind {
        NoiseKind::Spectral => NoiseSpec::Spectral {
            amplitude: args.amplitude,
            spectral_index: args.spectral_index,
        },
        NoiseKind::Lattice => NoiseSpec::Lattice(octave_params),
        NoiseKind::Warped => NoiseSpec::WarpedLattice {
            lattice: octave_params,
            warp_amplitude: args.warp_amplitude,
        },
        NoiseKind::Cosine => NoiseSpec::CosineSum(octave_params),
        NoiseKind::Fbm => NoiseSpec::FractionalBrownian { hurst: args.hurst },
    }
}

fn main() {
    let args = Args::parse();

    let config = MapConfig {
        noise: noise_spec(&args),
        boxsize: args.boxsize,
        sigma: args.sigma,
        threshold: args.threshold,
        make_island: args.island,
        output_size: args.output_size,
    };
    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {}", err);
        std::process::exit(1);
    }

    let first_seed = args.seed.unwrap_or_else(rand::random);
    let seeds: Vec<u64> = (0..args.count).map(|i| first_seed.wrapping_add(i)).collect();

    println!(
        "Generating {} map(s) with {} noise, boxsize {}, threshold {}",
        seeds.len(),
        config.noise.kind_name(),
        config.boxsize,
        config.threshold
    );

    if let Err(err) = std::fs::create_dir_all(&args.out_dir) {
        eprintln!("Cannot create output directory {}: {}", args.out_dir, err);
        std::process::exit(1);
    }

    let results = IslandMap::generate_batch(&config, &seeds);
    for (seed, result) in results {
        let map = match result {
            Ok(map) => map,
            Err(err) => {
                eprintln!("seed {}: generation failed: {}", seed, err);
                continue;
            }
        };

        println!(
            "seed {}: {}x{} field, {:.1}% land, {} capitals, {} cities",
            seed,
            map.elevation.width(),
            map.elevation.height(),
            100.0 * map.elevation.land_fraction(),
            map.settlements.capitals.len(),
            map.settlements.cities.len()
        );

        if args.json {
            match serde_json::to_string_pretty(&map.settlements) {
                Ok(text) => println!("{}", text),
                Err(err) => eprintln!("seed {}: cannot serialize settlements: {}", seed, err),
            }
        }

        let path = format!(
            "{}/map_{}_seed_{}.png",
            args.out_dir,
            config.noise.kind_name(),
            seed
        );
        match island_maps::export::export_map(&map, &path) {
            Ok(()) => println!("seed {}: wrote {}", seed, path),
            Err(err) => eprintln!("seed {}: cannot write {}: {}", seed, path, err),
        }
    }
}
