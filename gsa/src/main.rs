use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use flowlay::codec::ParamCodec;
use flowlay::cost::LayoutCost;
use flowlay::io::svg::layout_to_svg;
use flowlay::io::{export, import};
use gsa::config::GsaConfig;
use gsa::io;
use gsa::io::cli::Cli;
use gsa::io::output::FlowOutput;
use gsa::opt::optimize_layout;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config: GsaConfig = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            GsaConfig::default()
        }
        Some(config_file) => {
            let file = File::open(&config_file).with_context(|| {
                format!("could not open config file: {}", config_file.display())
            })?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("[MAIN] Successfully parsed GsaConfig: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file should have a valid file name")?
        .to_owned();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let ext_instance = io::read_instance(&args.input_file)?;
    let (initial_layout, layout_config) = import::import(&ext_instance)?;

    let initial_time = initial_layout.flow_time(&layout_config);
    info!("[MAIN] total time before optimization: {initial_time:.2} min");
    info!(
        "[MAIN] initial cost: {}",
        LayoutCost::evaluate(&initial_layout, &layout_config)
    );

    let codec = ParamCodec::new(initial_layout.clone(), layout_config)?;

    let mut rng = match config.prng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let (optimized_layout, minimum) = optimize_layout(&codec, config, &mut rng);

    let optimized_time = optimized_layout.flow_time(&layout_config);
    let optimized_cost = LayoutCost::evaluate(&optimized_layout, &layout_config);
    info!("[MAIN] total time after optimization: {optimized_time:.2} min");
    info!("[MAIN] optimized cost: {optimized_cost}");
    if !optimized_cost.is_feasible() {
        warn!("[MAIN] optimized layout still violates clearance or floor constraints");
    }
    for machine in optimized_layout.machines() {
        info!("[MAIN] {machine}");
    }
    info!(
        "[MAIN] {} objective evaluations over {} iterations",
        minimum.n_evals, minimum.n_iters
    );

    {
        let output = FlowOutput {
            initial: export::export(&initial_layout, &layout_config),
            solution: export::export(&optimized_layout, &layout_config),
            instance: ext_instance,
            config,
        };
        let solution_path = args.solution_folder.join(format!("sol_{input_stem}.json"));
        io::write_json(&output, Path::new(&solution_path))?;
    }

    {
        let floor = &layout_config.floor;
        let initial_svg = layout_to_svg(
            &initial_layout,
            floor,
            config.svg_draw_options,
            "Initial Factory Layout",
            Some(initial_time),
        );
        let optimized_svg = layout_to_svg(
            &optimized_layout,
            floor,
            config.svg_draw_options,
            "Optimized Factory Layout",
            Some(optimized_time),
        );
        io::write_svg(
            &initial_svg,
            &args
                .solution_folder
                .join(format!("layout_{input_stem}_initial.svg")),
        )?;
        io::write_svg(
            &optimized_svg,
            &args
                .solution_folder
                .join(format!("layout_{input_stem}_optimized.svg")),
        )?;
    }

    Ok(())
}
