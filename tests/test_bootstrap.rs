//! End-to-end checks across the public API: client bootstrap and the shipped
//! build descriptor.

use std::path::Path;

use supabase_bootstrap::config;
use supabase_bootstrap::descriptor::{BuildDescriptor, Plugin, Y_SUPABASE_ALIAS};
use supabase_bootstrap::supabase::{ConfigPair, MISSING_CONFIG_MESSAGE, Supabase};

const URL: &str = "https://abc.supabase.co";
const KEY: &str = "public-anon-key";

fn init(url: Option<&str>, key: Option<&str>) -> Supabase {
    Supabase::init(&ConfigPair::new(url.map(String::from), key.map(String::from)))
}

#[test]
fn both_values_present_gives_client() {
    let s = init(Some(URL), Some(KEY));
    assert!(s.client().is_some());
    assert!(s.config_error().is_none());
    assert_eq!(s.client().unwrap().rest_url(), "https://abc.supabase.co/rest/v1");
}

#[test]
fn missing_url_gives_error() {
    let s = init(None, Some(KEY));
    assert!(s.client().is_none());
    assert_eq!(s.config_error().as_deref(), Some(MISSING_CONFIG_MESSAGE));
}

#[test]
fn missing_key_gives_error() {
    let s = init(Some(URL), None);
    assert!(s.client().is_none());
    assert_eq!(s.config_error().as_deref(), Some(MISSING_CONFIG_MESSAGE));
}

#[test]
fn empty_strings_give_error() {
    let s = init(Some(""), Some(""));
    assert!(s.client().is_none());
    assert_eq!(
        s.config_error().as_deref(),
        Some("Supabase URL or Key is missing in environment variables")
    );
}

#[test]
fn shipped_config_builds_stock_descriptor() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
    let cfg = config::load_from(&path, None, Some(env!("CARGO_MANIFEST_DIR"))).unwrap();

    let d = BuildDescriptor::from_settings(&cfg.project_root, &cfg.build).unwrap();
    assert_eq!(d.plugins, vec![Plugin::Vue]);
    assert_eq!(d.server.host, "0.0.0.0");

    let alias = d.alias_for(Y_SUPABASE_ALIAS).unwrap();
    assert!(alias.is_absolute());
    assert!(alias.ends_with(Path::new("node_modules").join("y-supabase").join("dist").join("index.js")));
}
