//! End-to-end tests: manifest on disk → registry → resolver → autoload chain.

extern crate nsload;

use nsload::autoload::{map_to_relative_path, AutoloadChain, FileLoader, Resolution};
use nsload::manifest::{find_manifest, Manifest, MANIFEST_FILE};
use nsload::{Error, ManifestError, RegistryError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to write `root/rel` with `contents`, creating parents
fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

const MANIFEST: &str = r#"
extension = ".src"
root = "global"

[namespaces]
"Acme.Widgets" = "widgets"
"Acme" = ["lib", "vendor"]

[prepend]
"Acme" = "patches"
"#;

fn project() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let manifest = write(temp.path(), MANIFEST_FILE, MANIFEST);
    (temp, manifest)
}

#[test]
fn test_relative_directories_anchor_at_manifest() {
    let (temp, path) = project();
    let manifest = Manifest::load(&path).unwrap();
    let registry = manifest.build_registry().unwrap();

    let acme: Vec<_> = registry
        .lookup("Acme")
        .iter()
        .map(|d| PathBuf::from(d.as_str()))
        .collect();
    assert_eq!(
        acme,
        vec![
            temp.path().join("patches"),
            temp.path().join("lib"),
            temp.path().join("vendor"),
        ]
    );
}

#[test]
fn test_resolution_through_manifest() {
    let (temp, path) = project();
    let button = write(temp.path(), "widgets/button.src", "Button");
    let client = write(temp.path(), "vendor/http/client.src", "Client");
    let helper = write(temp.path(), "global/helper.src", "Helper");

    let manifest = Manifest::load(&path).unwrap();
    let mut resolver = manifest.build_resolver(FileLoader::new()).unwrap();

    let unit = resolver.resolve("Acme.Widgets.Button").unwrap().into_unit().unwrap();
    assert_eq!(unit.path(), button.as_path());

    let unit = resolver.resolve("Acme.Http.Client").unwrap().into_unit().unwrap();
    assert_eq!(unit.path(), client.as_path());

    let unit = resolver.resolve("Helper").unwrap().into_unit().unwrap();
    assert_eq!(unit.path(), helper.as_path());

    assert_eq!(resolver.resolve("Acme.Missing").unwrap(), Resolution::NotFound);
    assert_eq!(resolver.loader().source(&client), Some("Client"));
    assert_eq!(resolver.registry().len(), 3);

    let loader = resolver.into_loader();
    let mut loaded: Vec<_> = loader.loaded_paths().map(Path::to_path_buf).collect();
    loaded.sort();
    let mut expected = vec![button, client, helper];
    expected.sort();
    assert_eq!(loaded, expected);
}

#[test]
fn test_empty_directory_rejected_after_anchoring() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), MANIFEST_FILE, "[namespaces]\n\"Acme\" = \"\"\n");

    let manifest = Manifest::load(&path).unwrap();
    assert_eq!(manifest.entries()[0].directories, vec![String::new()]);
    assert!(matches!(
        manifest.build_registry(),
        Err(ManifestError::Registry(RegistryError::EmptyDirectory(_)))
    ));
}

#[test]
fn test_mapping_follows_manifest_options() {
    let temp = TempDir::new().unwrap();
    let path = write(
        temp.path(),
        MANIFEST_FILE,
        "separator = \"\\\\\"\nextension = \".inc\"\n\n[namespaces]\n\"Acme\" = \"src\"\n",
    );
    let unit = write(temp.path(), "src/http/client-pool.inc", "Pool");

    let manifest = Manifest::load(&path).unwrap();
    let relative = map_to_relative_path("Http\\Client_Pool", manifest.options());
    assert_eq!(temp.path().join("src").join(&relative), unit);

    let mut resolver = manifest.build_resolver(FileLoader::new()).unwrap();
    let loaded = resolver.resolve("Acme\\Http\\Client_Pool").unwrap().into_unit().unwrap();
    assert_eq!(loaded.path(), unit.as_path());
}

#[test]
fn test_patches_shadow_library() {
    let (temp, path) = project();
    write(temp.path(), "lib/http/client.src", "original");
    let patched = write(temp.path(), "patches/http/client.src", "patched");

    let mut resolver = Manifest::load(&path)
        .unwrap()
        .build_resolver(FileLoader::new())
        .unwrap();

    let unit = resolver.resolve("Acme.Http.Client").unwrap().into_unit().unwrap();
    assert_eq!(unit.path(), patched.as_path());
    assert_eq!(resolver.loader().source(&patched), Some("patched"));
}

#[test]
fn test_chain_loads_each_symbol_once() {
    let (temp, path) = project();
    let button = write(temp.path(), "widgets/button.src", "Button");

    let resolver = Manifest::load(&path)
        .unwrap()
        .build_resolver(FileLoader::new())
        .unwrap();
    let mut chain = AutoloadChain::new();
    chain.register(Box::new(resolver));

    let first = chain.require("Acme.Widgets.Button").unwrap();
    fs::remove_file(&button).unwrap();
    // Defined symbols never reach the resolver again.
    let second = chain.require("Acme.Widgets.Button").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.path(), button.as_path());

    match chain.require("Acme.Widgets.Slider") {
        Err(Error::UnresolvedSymbol(name)) => assert_eq!(name, "Acme.Widgets.Slider"),
        other => panic!("expected unresolved symbol, got {:?}", other),
    }
}

#[test]
fn test_malformed_unit_is_fatal() {
    let (temp, path) = project();
    fs::create_dir_all(temp.path().join("widgets")).unwrap();
    fs::write(temp.path().join("widgets/button.src"), [0xc3, 0x28]).unwrap();

    let resolver = Manifest::load(&path)
        .unwrap()
        .build_resolver(FileLoader::new())
        .unwrap();
    let mut chain = AutoloadChain::new();
    chain.register(Box::new(resolver));

    assert!(matches!(chain.require("Acme.Widgets.Button"), Err(Error::Load(_))));
    assert!(!chain.is_defined("Acme.Widgets.Button"));
}

#[test]
fn test_missing_manifest_is_io_error() {
    let temp = TempDir::new().unwrap();
    let result = Manifest::load(&temp.path().join("absent.manifest"));
    assert!(matches!(result, Err(ManifestError::Io { .. })));
}

#[test]
fn test_find_manifest_walks_up() {
    let (temp, path) = project();
    let nested = temp.path().join("a/b/c");
    fs::create_dir_all(&nested).unwrap();

    assert_eq!(find_manifest(&nested), Some(path));
    let elsewhere = TempDir::new().unwrap();
    assert_eq!(find_manifest(elsewhere.path()), None);
}
