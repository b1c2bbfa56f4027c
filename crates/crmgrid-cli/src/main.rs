// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;

use anyhow::{Context, Result, bail};
use config::Config;
use crmgrid_crm::CrmDataset;
use crmgrid_testkit::CrmFaker;
use crmgrid_tui::{AppState, ViewData};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `crmgrid --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let dataset = load_dataset(&options, &config)?;
    if options.check_only {
        println!("ok: {}", dataset.summary());
        return Ok(());
    }

    logging::init(&config.log_path()?, config.log_level())?;
    log::info!("starting with {}", dataset.summary());

    let mut state = AppState::new(config.start_tab());
    let mut view_data = ViewData::new(dataset, config.page_size());
    crmgrid_tui::run_app(&mut state, &mut view_data)
}

fn load_dataset(options: &CliOptions, config: &Config) -> Result<CrmDataset> {
    if let Some(path) = &options.data_path {
        return CrmDataset::load(path);
    }
    if options.demo {
        return Ok(CrmFaker::new(config.demo_seed()).dataset(config.demo_rows()));
    }
    bail!("no data to show; pass --data <file.json> or --demo")
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    data_path: Option<PathBuf>,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        data_path: None,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--data" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--data requires a JSON file path"))?;
                options.data_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.demo && options.data_path.is_some() {
        bail!("--demo and --data cannot be combined; pick one data source");
    }

    Ok(options)
}

fn print_help() {
    println!("crmgrid");
    println!("  --config <path>          Use a specific config path");
    println!("  --data <path>            Load leads, activities, orders and quotes from JSON");
    println!("  --demo                   Launch with seeded demo data");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config + data, then exit");
    println!("  --help                   Show this help");
}
