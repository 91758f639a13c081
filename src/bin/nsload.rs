//! CLI wrapper for the nsload resolver.
//!
//! Usage:
//!   nsload <manifest> <symbol>...   # Resolve and load each symbol
//!   nsload --list [manifest]        # Print the registered prefixes
//!   nsload --map <symbol> [manifest] # Print the mapped relative path
//!
//! Without a manifest argument, `--list` and `--map` use the nearest
//! `nsload.manifest` above the current directory. `--map` falls back to the
//! default separator and extension when there is none.

use nsload::autoload::{map_to_relative_path, AutoloadOptions, FileLoader, Resolution};
use nsload::manifest::{find_manifest, Manifest, MANIFEST_FILE};
use std::env;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        2 if args[1] == "-h" || args[1] == "--help" => {
            print_usage();
        }
        2 if args[1] == "--list" => {
            let path = match env::current_dir().ok().and_then(|dir| find_manifest(&dir)) {
                Some(path) => path,
                None => {
                    eprintln!("No {} found in this directory or its parents", MANIFEST_FILE);
                    process::exit(1);
                }
            };
            list_registry(&path);
        }
        3 if args[1] == "--list" => {
            list_registry(Path::new(&args[2]));
        }
        3 if args[1] == "--map" => {
            let manifest = env::current_dir()
                .ok()
                .and_then(|dir| find_manifest(&dir))
                .map(|path| load_manifest(&path));
            print_mapping(&args[2], manifest.as_ref());
        }
        4 if args[1] == "--map" => {
            let manifest = load_manifest(Path::new(&args[3]));
            print_mapping(&args[2], Some(&manifest));
        }
        n if n >= 3 && !args[1].starts_with('-') => {
            let ok = resolve_symbols(&PathBuf::from(&args[1]), &args[2..]);
            if !ok {
                process::exit(1);
            }
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("nsload - namespace source-unit resolver");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  nsload <manifest> <symbol>...   Resolve and load each symbol");
    eprintln!("  nsload --list [manifest]        Print the registered prefixes");
    eprintln!("  nsload --map <symbol> [manifest] Print the mapped relative path");
}

fn load_manifest(path: &Path) -> Manifest {
    match Manifest::load(path) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("Error reading manifest '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

/// Print where `symbol` maps to, using the manifest's separator and extension.
fn print_mapping(symbol: &str, manifest: Option<&Manifest>) {
    let defaults = AutoloadOptions::default();
    let options = manifest.map_or(&defaults, |m| m.options());
    println!("{}", map_to_relative_path(symbol, options));
}

fn list_registry(path: &Path) {
    let manifest = load_manifest(path);
    let registry = match manifest.build_registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Invalid manifest '{}': {}", path.display(), e);
            process::exit(1);
        }
    };

    for (prefix, dirs) in registry.prefixes() {
        println!("{}", prefix);
        for dir in dirs {
            println!("  {}", dir);
        }
    }
}

/// Resolve every symbol, reporting each outcome. Returns false if any failed.
fn resolve_symbols(path: &Path, symbols: &[String]) -> bool {
    let manifest = load_manifest(path);
    let mut resolver = match manifest.build_resolver(FileLoader::new()) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("Invalid manifest '{}': {}", path.display(), e);
            process::exit(1);
        }
    };

    let mut all_found = true;
    for symbol in symbols {
        match resolver.resolve(symbol) {
            Ok(Resolution::Loaded(unit)) => println!("{} -> {}", symbol, unit.path().display()),
            Ok(Resolution::NotFound) => {
                println!("{}: not found", symbol);
                all_found = false;
            }
            Err(e) => {
                eprintln!("{}: {}", symbol, e);
                all_found = false;
            }
        }
    }
    all_found
}
