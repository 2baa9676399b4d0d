//! Layout rules for the crate: unit tests declare the same module tree as `src/`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Names declared by `mod name;` lines, ignoring visibility and inline modules
    fn declared_modules(file: &Path) -> BTreeSet<String> {
        let content = fs::read_to_string(file)
            .unwrap_or_else(|error| panic!("cannot read {}: {error}", file.display()));

        content
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix("pub ").unwrap_or(line).strip_prefix("mod "))
            .filter_map(|rest| rest.strip_suffix(';'))
            .map(str::to_owned)
            .collect()
    }

    /// Source areas, i.e. the modules `lib.rs` declares
    fn source_areas() -> BTreeSet<String> {
        declared_modules(Path::new("src/lib.rs"))
    }

    fn unit_files() -> Vec<PathBuf> {
        let mut files = Vec::new();
        for area in source_areas() {
            for module in declared_modules(&Path::new("tests/unit").join(&area).join("mod.rs")) {
                files.push(Path::new("tests/unit").join(&area).join(format!("{module}.rs")));
            }
        }
        files
    }

    // Tests the unit test root declares exactly the areas of the library
    // Verified by dropping an area from tests/unit/main.rs
    #[test]
    fn test_unit_root_declares_every_area() {
        assert_eq!(
            declared_modules(Path::new("tests/unit/main.rs")),
            source_areas()
        );
    }

    // Tests each area's test module lists the same files as its source module
    // Verified by adding a source module without a test counterpart
    #[test]
    fn test_areas_declare_matching_modules() {
        let mut mismatched = Vec::new();

        for area in source_areas() {
            let source = declared_modules(&Path::new("src").join(&area).join("mod.rs"));
            let tests = declared_modules(&Path::new("tests/unit").join(&area).join("mod.rs"));
            if source != tests {
                mismatched.push(format!("  - {area}: src {source:?}, tests {tests:?}"));
            }
        }

        assert!(
            mismatched.is_empty(),
            "Unit test modules differ from source modules:\n{}",
            mismatched.join("\n")
        );
    }

    // Tests every declared unit test file exists and holds a test
    // Verified by emptying a unit test file
    #[test]
    fn test_unit_files_contain_tests() {
        let empty: Vec<String> = unit_files()
            .into_iter()
            .filter(|file| {
                !fs::read_to_string(file).is_ok_and(|content| content.contains("#[test]"))
            })
            .map(|file| format!("  - {}", file.display()))
            .collect();

        assert!(
            empty.is_empty(),
            "Unit test files without #[test] functions:\n{}",
            empty.join("\n")
        );
    }

    // Tests every leaf source and unit test file opens with a module doc comment
    // Verified by removing the header of a source file
    #[test]
    fn test_files_have_module_docs() {
        let mut files = vec![PathBuf::from("src/lib.rs"), PathBuf::from("src/main.rs")];
        for area in source_areas() {
            for module in declared_modules(&Path::new("src").join(&area).join("mod.rs")) {
                files.push(Path::new("src").join(&area).join(format!("{module}.rs")));
            }
        }
        files.extend(unit_files());

        let undocumented: Vec<String> = files
            .into_iter()
            .filter(|file| {
                !fs::read_to_string(file).is_ok_and(|content| content.starts_with("//!"))
            })
            .map(|file| format!("  - {}", file.display()))
            .collect();

        assert!(
            undocumented.is_empty(),
            "Files without a leading //! comment:\n{}",
            undocumented.join("\n")
        );
    }
}
