use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use blf::config::BLFConfig;
use blf::io::cli::Cli;
use blf::io::output::BLFOutput;
use blf::io::svg::layout_to_svg;
use blf::session::Session;
use blf::{EPOCH, io};
use nesty::io::export::export_solution;
use nesty::io::import::import_catalogue;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            BLFConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };
    info!("[MAIN] Successfully parsed BLFConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?
        .to_owned();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let ext_catalogue = io::read_catalogue(args.input_file.as_path())?;

    let catalogue = import_catalogue(&ext_catalogue)
        .with_context(|| format!("could not import {}", ext_catalogue.name))?;
    let mut session = Session::from_catalogue(catalogue, config);
    info!("[MAIN] imported {}", ext_catalogue.name);

    let (spacing, trimming) = (ext_catalogue.spacing, ext_catalogue.trimming);
    let start = EPOCH.elapsed();
    session
        .execute_nesting(spacing, trimming)
        .with_context(|| format!("could not nest {}", ext_catalogue.name))?;
    let run_time = EPOCH.elapsed() - start;
    let solution = session
        .take_solution()
        .context("nesting finished without a solution")?;
    let ext_solution = export_solution(&solution, session.catalogue(), run_time);

    for (i, layout) in ext_solution.layouts.iter().enumerate() {
        let svg_path = args
            .solution_folder
            .join(format!("sol_{input_file_stem}_{i}.svg"));
        let svg = layout_to_svg(
            layout,
            session.catalogue(),
            spacing,
            trimming,
            config.svg_draw_options,
        );
        io::write_svg(&svg, Path::new(&svg_path))?;
    }

    let output = BLFOutput {
        instance: ext_catalogue,
        solution: ext_solution,
        config,
    };
    let solution_path = args
        .solution_folder
        .join(format!("sol_{input_file_stem}.json"));
    io::write_json(&output, Path::new(&solution_path))?;

    Ok(())
}
