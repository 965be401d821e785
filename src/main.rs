//! fleetglass-install - FleetGlass bridge installer
//!
//! Sequential install pipeline: detect the host platform, resolve the
//! newest bridge release, select and download the matching Debian package,
//! then install it via the platform package manager, provisioning the
//! telemetry agent alongside.

use clap::Parser;
use console::style;

mod asset;
mod cli;
mod error;
mod fetch;
mod installer;
mod platform;
mod progress;
mod release;
mod temp;
mod ui;

use cli::Cli;
use error::Result;
use installer::Installer;
use release::{Client, Repo};
use ui::{step, warn};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<()> {
    let host = platform::detect(cli.ros_distro.as_deref(), &cli.sysroot)?;
    step("Detected", &host.describe());

    let repo = Repo::parse(&cli.base_url)?;
    let client = Client::new(repo, cli.github_token.clone());

    let tag = client.resolve_tag(&cli.release_tag)?;
    step("Release", &tag);

    let release = client.release_by_tag(&tag)?;
    let asset = asset::select(&host, &release.assets)?;
    step("Package", &asset.name);

    // Scratch dir lives until the end of run(), so the downloaded package
    // is gone on every exit path once dpkg has consumed it.
    let scratch = temp::scratch_dir()?;
    let deb = fetch::download(&client, asset, scratch.path())?;

    if cli.dry_run {
        println!("Dry run: downloaded {}, skipping installation", asset.name);
        return Ok(());
    }

    let installer = Installer::new(cli.verbose);
    installer.install_prerequisites()?;

    if cli.skip_agent {
        println!("Skipping telemetry agent provisioning (--skip-agent)");
    } else if let Err(e) = installer.provision_agent() {
        warn(&format!(
            "telemetry agent setup failed: {e}; continuing without {}",
            installer::AGENT_PACKAGE
        ));
    }

    installer.install_bridge(&deb)?;
    installer.create_runtime_dir()?;

    println!(
        "{}",
        style("FleetGlass bridge installed.").bold().green()
    );
    Ok(())
}
