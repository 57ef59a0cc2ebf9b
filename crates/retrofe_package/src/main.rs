//! `retrofe-package` binary.

use anyhow::{Context, Result};
use clap::Parser;
use retrofe_package::{ArgsPackage, init_logging, run_package};
use tracing::error;

fn main() -> Result<()> {
    let args = ArgsPackage::parse();
    init_logging(args.verbose, args.quiet)?;

    let spec_pkg_layout = args.load_layout()?;
    let spec_pkg_options = args.to_options();

    run_package(&spec_pkg_options, &spec_pkg_layout)
        .inspect_err(|e| error!("{e}"))
        .with_context(|| {
            format!(
                "Packaging {} bundle for {} failed",
                spec_pkg_options.build_mode, spec_pkg_options.target_os
            )
        })?;
    Ok(())
}
