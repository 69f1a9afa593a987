//! # PSF CLI
//!
//! `psf round`, `psf pgtune` and `psf quote`. Commands write their report to
//! the given writer; logs go to stderr.

pub mod args;

pub use crate::args::{Cli, Command, PgtuneArgs, QuoteArgs};

use anyhow::{Context, Result};
use psf::domain::catalog::BenefitId;
use psf::domain::config::{ApiConfig, PgtuneConfig};
use psf::features::pgtune::{TuningProfile, TuningRequest, round_to_four_significant_bits};
use psf::features::sponsorship::{Catalog, Configurator, Toggle};
use psf::kernel::config::load_config;
use std::io::Write;
use std::sync::Arc;

/// Runs one parsed command.
///
/// # Errors
/// Invalid tuning attributes, unreadable config or catalog files, unknown
/// package ids, ineligible benefits, or a failed write.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Round { bytes } => writeln!(out, "{}", round_to_four_significant_bits(bytes))?,
        Command::Pgtune(args) => pgtune(args, out)?,
        Command::Quote(args) => quote(args, out)?,
    }
    Ok(())
}

fn pgtune(args: PgtuneArgs, out: &mut impl Write) -> Result<()> {
    let defaults = match &args.config {
        Some(path) => load_config::<ApiConfig>(Some(path))?.pgtune.clone(),
        None => PgtuneConfig::default(),
    };

    let request = TuningRequest {
        db_type: args.db_type,
        max_connections: args.max_connections,
        total_memory: args.total_memory,
        machine: args.machine,
        version: args.version,
    }
    .or_defaults(&defaults);

    let inputs = request.validate()?;
    let profile = TuningProfile::calculate(&inputs);
    tracing::debug!(workload = %inputs.workload, memory_mb = inputs.memory_mb, "Tuning profile computed");

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &profile)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "# {} workload, {}MB memory, PostgreSQL {}",
        inputs.workload, inputs.memory_mb, inputs.version
    )?;
    for (name, value) in profile.settings() {
        writeln!(out, "{name} = {value}")?;
    }
    Ok(())
}

fn quote(args: QuoteArgs, out: &mut impl Write) -> Result<()> {
    let catalog = Catalog::load(&args.catalog)?;
    let mut form = Configurator::with_static_costs(Arc::new(catalog));

    if let Some(package) = &args.package {
        form.select_package(&package.as_str().into())?;
    }

    for id in &args.without {
        let id = BenefitId::from(id.as_str());
        if form.is_selected(&id) {
            form.toggle_benefit(&id)?;
        }
    }

    for id in &args.benefits {
        let id = BenefitId::from(id.as_str());
        if form.is_selected(&id) {
            continue;
        }
        match form.toggle_benefit(&id).with_context(|| format!("Cannot check '{id}'"))? {
            Toggle::Checked { evicted } if !evicted.is_empty() => {
                tracing::info!(benefit = %id, evicted = ?evicted, "Conflicting benefits unchecked");
            },
            Toggle::Ignored => anyhow::bail!("Unknown benefit '{id}'"),
            _ => {},
        }
    }

    if args.json {
        let body = serde_json::json!({ "form": form.form(), "cost": form.cost() });
        serde_json::to_writer_pretty(&mut *out, &body)?;
        writeln!(out)?;
        return Ok(());
    }

    if let Some(package) = form.selected_package() {
        let name = if package.name.is_empty() { package.id.as_str() } else { &package.name };
        writeln!(out, "Package: {name}")?;
    }
    for benefit in form.selected_benefits() {
        let name = if benefit.name.is_empty() { benefit.id.as_str() } else { &benefit.name };
        writeln!(out, "  [x] {name}")?;
    }
    writeln!(out, "{}", form.cost_label())?;
    Ok(())
}
