//! Keeps `tests/unit/` in step with `src/`
//!
//! Every source module has a unit test file at the same relative path, every
//! unit test file has a source module, every test file declares at least one
//! `#[test]`, and every public function is named by its module's unit tests.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SOURCE_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    /// Relative paths of the `.rs` files under `root`, minus module wiring
    fn modules(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                if path.extension().is_none_or(|ext| ext != "rs") || is_wiring(&path, root) {
                    continue;
                }
                let relative = path
                    .strip_prefix(root)
                    .map_err(|_| io::Error::other("path escaped its root"))?;
                found.insert(relative.to_path_buf());
            }
        }

        Ok(found)
    }

    /// `mod.rs`, plus the crate entry points directly under the root
    fn is_wiring(path: &Path, root: &Path) -> bool {
        let name = path.file_name().and_then(|name| name.to_str());
        name == Some("mod.rs")
            || (path.parent() == Some(root) && matches!(name, Some("lib.rs" | "main.rs")))
    }

    fn listing(paths: &[&PathBuf], from: &str, to: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {from}/{0} -> {to}/{0}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Names of `pub fn` and `pub const fn` items, skipping restricted visibility
    fn public_functions(source: &str) -> Vec<&str> {
        source
            .lines()
            .filter_map(|line| {
                let item = line.trim_start();
                item.strip_prefix("pub const fn ")
                    .or_else(|| item.strip_prefix("pub fn "))
            })
            .filter_map(|rest| {
                let end = rest.find(|c: char| !(c.is_alphanumeric() || c == '_'))?;
                rest.get(..end).filter(|name| !name.is_empty())
            })
            .collect()
    }

    /// Whether `name` occurs in `text` as a whole identifier
    fn mentions(text: &str, name: &str) -> bool {
        let is_ident = |c: char| c.is_alphanumeric() || c == '_';
        text.match_indices(name).any(|(start, _)| {
            let before = text.get(..start).and_then(|head| head.chars().next_back());
            let after = text
                .get(start + name.len()..)
                .and_then(|tail| tail.chars().next());
            !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
        })
    }

    // Tests each source module has a unit test file
    // Verified by deleting tests/unit/algorithm/checkpoint.rs
    #[test]
    fn test_every_module_has_unit_tests() {
        let sources = modules(Path::new(SOURCE_ROOT)).expect("readable src tree");
        let units = modules(Path::new(UNIT_ROOT)).expect("readable unit tree");
        assert!(!sources.is_empty());

        let missing: Vec<_> = sources.difference(&units).collect();
        assert!(
            missing.is_empty(),
            "Source modules without unit tests:\n{}",
            listing(&missing, SOURCE_ROOT, UNIT_ROOT)
        );
    }

    // Tests each unit test file still has a source module
    // Verified by renaming src/io/canvas.rs
    #[test]
    fn test_every_unit_file_has_a_module() {
        let sources = modules(Path::new(SOURCE_ROOT)).expect("readable src tree");
        let units = modules(Path::new(UNIT_ROOT)).expect("readable unit tree");

        let orphaned: Vec<_> = units.difference(&sources).collect();
        assert!(
            orphaned.is_empty(),
            "Unit test files without a source module:\n{}",
            listing(&orphaned, UNIT_ROOT, SOURCE_ROOT)
        );
    }

    // Tests every test file declares at least one test
    // Verified by emptying tests/algorithm.rs
    #[test]
    fn test_every_test_file_declares_tests() {
        let root = Path::new("tests");
        let files = modules(root).expect("readable tests tree");

        let empty: Vec<String> = files
            .iter()
            .filter(|path| {
                !fs::read_to_string(root.join(path))
                    .is_ok_and(|content| content.contains("#[test]"))
            })
            .map(|path| format!("  - tests/{}", path.display()))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test]:\n{}",
            empty.join("\n")
        );
    }

    // Tests every public function is named in its module's unit tests
    // Verified by adding an unused public helper to src/algorithm/bitset.rs
    #[test]
    fn test_public_functions_are_exercised() {
        let source_root = Path::new(SOURCE_ROOT);
        let unit_root = Path::new(UNIT_ROOT);
        let sources = modules(source_root).expect("readable src tree");

        let mut unnamed = Vec::new();
        for module in &sources {
            let source = fs::read_to_string(source_root.join(module)).expect("readable module");
            let Ok(tests) = fs::read_to_string(unit_root.join(module)) else {
                // Reported by test_every_module_has_unit_tests
                continue;
            };
            unnamed.extend(
                public_functions(&source)
                    .into_iter()
                    .filter(|name| !mentions(&tests, name))
                    .map(|name| format!("  - {}: {name}", module.display())),
            );
        }

        assert!(
            unnamed.is_empty(),
            "Public functions never named by their unit tests:\n{}",
            unnamed.join("\n")
        );
    }

    // Tests the item scanner sees only crate-visible functions
    // Verified by accepting pub(crate) items
    #[test]
    fn test_public_function_scanner() {
        let source = "pub fn solve(&self)\n    pub const fn len(&self)\npub(crate) fn hidden()\nfn private()";
        assert_eq!(public_functions(source), vec!["solve", "len"]);

        assert!(mentions("engine.solve()", "solve"));
        assert!(!mentions("engine.solve_all()", "solve"));
        assert!(!mentions("resolve()", "solve"));
    }
}
