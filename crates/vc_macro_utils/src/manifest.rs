use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locates the path under which the calling crate sees one of our crates.
///
/// Derives emit absolute paths such as `::vc_reflect::info::Typed`. A user
/// who depends on the umbrella crate only has `::vc_reconstruct::reflect`,
/// so the path is resolved against the caller's `Cargo.toml`.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_reflect"));
/// ```
///
/// Reading the manifest is not cheap. Call [`Manifest::shared`] once per
/// macro invocation and reuse the path.
///
/// # Resolution rules
///
/// 1. `name` is listed in `dependencies`: `::name`.
/// 2. `name` starts with `vc_` and the umbrella crate `vc_reconstruct` (or
///    its alias `vc`) is listed: `::vc_reconstruct::short_name`, e.g.
///    `vc_reflect` -> `::vc_reconstruct::reflect`.
/// 3. Steps 1-2 again for `dev-dependencies`.
/// 4. Otherwise `::name`.
///
/// A crate that refers to itself from doctests needs
/// `extern crate self as name;` in its root.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const UMBRELLA_NAMES: [&str; 2] = ["vc_reconstruct", "vc"];
const CRATE_PREFIX: &str = "vc_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> std::io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()));
        Document::parse(text.into_boxed_str())
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let text = format!("::{}", segments.join("::"));
        syn::parse_str(&text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    fn find_in(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        UMBRELLA_NAMES
            .iter()
            .find(|umbrella| deps.contains_key(umbrella))
            .map(|umbrella| Self::absolute(&[*umbrella, module]))
    }

    /// Returns the [`syn::Path`] of the crate `name` as seen from the caller.
    ///
    /// See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Runs `func` with the [`Manifest`] of the caller's `Cargo.toml`.
    ///
    /// Parsed manifests are cached per path and re-read when the file's
    /// modified time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time =
            Self::modified_time(&path).expect("The Cargo.toml should have a modified time.");

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;

    use super::*;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::from(text)).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn path_of(manifest: &Manifest, name: &str) -> String {
        manifest
            .get_crate_path(name)
            .to_token_stream()
            .to_string()
            .replace(' ', "")
    }

    #[test]
    fn direct_dependency_wins() {
        let m = manifest("[dependencies]\nvc_reflect = \"0\"\nvc_reconstruct = \"0\"\n");
        assert_eq!(path_of(&m, "vc_reflect"), "::vc_reflect");
    }

    #[test]
    fn umbrella_dependency() {
        let m = manifest("[dependencies]\nvc_reconstruct = \"0\"\n");
        assert_eq!(path_of(&m, "vc_reflect"), "::vc_reconstruct::reflect");

        let m = manifest("[dev-dependencies]\nvc = { package = \"vc_reconstruct\" }\n");
        assert_eq!(path_of(&m, "vc_value"), "::vc::value");
    }

    #[test]
    fn fallback_is_absolute() {
        let m = manifest("[package]\nname = \"x\"\n");
        assert_eq!(path_of(&m, "vc_reflect"), "::vc_reflect");
    }
}
