//! Dev-server build descriptor.
//!
//! A plain record handed to the external build tool: which UI plugins to
//! activate, which host the dev server binds, and which import names resolve
//! to concrete files. Nothing here runs at build time; the descriptor is
//! rendered to JSON and the tool reads it.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::BuildSettings;
use crate::error::AppError;

/// Bind host meaning "every interface".
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Import specifier remapped by the default descriptor.
pub const Y_SUPABASE_ALIAS: &str = "y-supabase";

/// Distributed entry point of the `y-supabase` package, relative to the
/// project root.
pub const Y_SUPABASE_ENTRY: &str = "node_modules/y-supabase/dist/index.js";

/// UI-framework integration hooks the build tool knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plugin {
    Vue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerOptions {
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Import name -> absolute file path.
    pub alias: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    pub plugins: Vec<Plugin>,
    pub server: ServerOptions,
    pub resolve: ResolveOptions,
}

impl BuildDescriptor {
    /// The stock descriptor: Vue, bind on all interfaces, and `y-supabase`
    /// pointed at its dist bundle under `root`.
    pub fn for_project(root: &Path) -> Result<Self, AppError> {
        let mut alias = BTreeMap::new();
        alias.insert(
            Y_SUPABASE_ALIAS.to_string(),
            resolve_alias_path(root, Y_SUPABASE_ENTRY)?,
        );
        Ok(Self {
            plugins: vec![Plugin::Vue],
            server: ServerOptions { host: DEFAULT_SERVER_HOST.to_string() },
            resolve: ResolveOptions { alias },
        })
    }

    /// Stock descriptor with the `[build]` config section layered on top.
    /// Aliases from config are added, or replace a stock alias of the same name.
    pub fn from_settings(root: &Path, settings: &BuildSettings) -> Result<Self, AppError> {
        let mut descriptor = Self::for_project(root)?;
        if let Some(host) = &settings.host {
            descriptor.server.host = host.clone();
        }
        if let Some(plugins) = &settings.plugins {
            descriptor.plugins = plugins.clone();
        }
        for (name, relative) in &settings.alias {
            descriptor
                .resolve
                .alias
                .insert(name.clone(), resolve_alias_path(root, relative)?);
        }
        Ok(descriptor)
    }

    pub fn alias_for(&self, name: &str) -> Option<&Path> {
        self.resolve.alias.get(name).map(PathBuf::as_path)
    }

    pub fn to_json_pretty(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Build(format!("failed to serialize descriptor: {e}")))
    }
}

/// Join `relative` onto `root` and normalise lexically.
///
/// A relative `root` is first made absolute against the working directory,
/// so the result is always absolute. `relative` may use `/` or `\`; the
/// result uses the host separator. `.` segments are dropped and `..` pops one
/// level, stopping at the filesystem root. The target need not exist.
pub fn resolve_alias_path(root: &Path, relative: &str) -> Result<PathBuf, AppError> {
    let base = std::path::absolute(root).map_err(|e| {
        AppError::Build(format!("cannot make '{}' absolute: {e}", root.display()))
    })?;

    let mut out = PathBuf::new();
    for component in base.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    for segment in relative.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            name => out.push(name),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        std::env::temp_dir().join("webapp")
    }

    #[test]
    fn stock_descriptor_fields() {
        let d = BuildDescriptor::for_project(&root()).unwrap();
        assert_eq!(d.plugins, vec![Plugin::Vue]);
        assert_eq!(d.server.host, "0.0.0.0");
        assert_eq!(d.resolve.alias.len(), 1);
    }

    #[test]
    fn y_supabase_alias_is_absolute_dist_path() {
        let d = BuildDescriptor::for_project(&root()).unwrap();
        let path = d.alias_for(Y_SUPABASE_ALIAS).unwrap();
        assert!(path.is_absolute());
        assert!(path.starts_with(root()));
        assert!(path.ends_with(Path::new("node_modules").join("y-supabase").join("dist").join("index.js")));
    }

    #[test]
    fn backslash_segments_normalise() {
        let p = resolve_alias_path(&root(), r"node_modules\y-supabase\dist\index.js").unwrap();
        assert_eq!(p, resolve_alias_path(&root(), Y_SUPABASE_ENTRY).unwrap());
    }

    #[test]
    fn dot_segments_collapse() {
        let p = resolve_alias_path(&root(), "./lib/../node_modules/./y-supabase/dist/index.js").unwrap();
        assert_eq!(p, root().join("node_modules/y-supabase/dist/index.js"));
    }

    #[test]
    fn unknown_alias_is_none() {
        let d = BuildDescriptor::for_project(&root()).unwrap();
        assert!(d.alias_for("lodash").is_none());
    }

    #[test]
    fn settings_override_host_and_add_alias() {
        let mut settings = BuildSettings::default();
        settings.host = Some("127.0.0.1".into());
        settings.alias.insert("@".into(), "src".into());

        let d = BuildDescriptor::from_settings(&root(), &settings).unwrap();
        assert_eq!(d.server.host, "127.0.0.1");
        assert_eq!(d.plugins, vec![Plugin::Vue]);
        assert_eq!(d.alias_for("@"), Some(root().join("src").as_path()));
        assert!(d.alias_for(Y_SUPABASE_ALIAS).is_some());
    }

    #[test]
    fn empty_settings_match_stock() {
        let d = BuildDescriptor::from_settings(&root(), &BuildSettings::default()).unwrap();
        assert_eq!(d, BuildDescriptor::for_project(&root()).unwrap());
    }

    #[test]
    fn json_shape() {
        let d = BuildDescriptor::for_project(&root()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&d.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["plugins"], serde_json::json!(["vue"]));
        assert_eq!(json["server"]["host"], "0.0.0.0");
        let alias = json["resolve"]["alias"]["y-supabase"].as_str().unwrap();
        assert!(alias.ends_with("index.js"));
    }

    fn dist_suffix() -> PathBuf {
        Path::new("node_modules").join("y-supabase").join("dist").join("index.js")
    }

    #[test]
    fn current_dir_root_resolves_absolute() {
        let d = BuildDescriptor::for_project(Path::new(".")).unwrap();
        let path = d.alias_for(Y_SUPABASE_ALIAS).unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert!(path.is_absolute());
        assert_eq!(path, cwd.join(dist_suffix()).as_path());
    }

    #[test]
    fn parent_dir_root_climbs_from_cwd() {
        let p = resolve_alias_path(Path::new("../web"), Y_SUPABASE_ENTRY).unwrap();
        let cwd = std::env::current_dir().unwrap();
        let expected = cwd.parent().unwrap().join("web").join(dist_suffix());
        assert!(p.is_absolute());
        assert_eq!(p, expected);
    }

    #[test]
    fn parent_segments_stop_at_filesystem_root() {
        let base = std::env::temp_dir();
        let fs_root: PathBuf = base
            .components()
            .take_while(|c| !matches!(c, Component::Normal(_)))
            .collect();
        let deep = "../".repeat(base.components().count() + 3);
        let p = resolve_alias_path(&base, &format!("{deep}x.js")).unwrap();
        assert_eq!(p, fs_root.join("x.js"));
    }
}
