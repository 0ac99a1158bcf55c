use std::fs;
use std::path::Path;

use clap::CommandFactory;

// cli.rs only depends on clap and clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR not set by Cargo");
    let man_dir = Path::new(&out_dir).join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man output directory");

    write_manpages(&cli::Cli::command(), &man_dir);
}

/// One page per visible command, named `smtp-service-<sub>.1` for subcommands.
fn write_manpages(cmd: &clap::Command, dir: &Path) {
    let name = cmd.get_name().to_owned();
    let path = dir.join(format!("{name}.1"));

    let mut page = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut page)
        .unwrap_or_else(|e| panic!("failed to render man page for `{name}`: {e}"));
    fs::write(&path, page).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        write_manpages(&sub, dir);
    }
}
