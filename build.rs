//! Build script for generating the `vultr-cli` man pages.
//!
//! Pages for the root command and each command group are rendered with
//! clap-mangen into the build output directory for packaging.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli/mod.rs"]
mod cli;

use cli::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "cargo:rerun-if-changed=build.rs")?;
    writeln!(stdout, "cargo:rerun-if-changed=src/cli/mod.rs")?;

    let out_dir =
        PathBuf::from(env::var_os("OUT_DIR").ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR was not set")
        })?);

    let command = Cli::command();
    render_page(command.clone(), &out_dir.join("vultr-cli.1"))?;

    for group in command.get_subcommands() {
        let page = format!("vultr-cli-{}.1", group.get_name());
        render_page(group.clone(), &out_dir.join(page))?;
    }

    Ok(())
}

fn render_page(command: clap::Command, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    Man::new(command).render(&mut buffer)?;

    let mut file = File::create(path)?;
    file.write_all(&buffer)?;
    Ok(())
}
