use std::collections::HashSet;
use std::fs;

use tempfile::TempDir;

use super::*;
use crate::config::PathRule;

struct Project {
    dir: TempDir,
}

impl Project {
    fn new(files: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
        }
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }
}

fn pairs(plan: &Plan, root: &Path) -> Vec<(String, CheckType)> {
    plan.items
        .iter()
        .map(|item| (relative_path(root, &item.file_path), item.check_type))
        .collect()
}

#[test]
fn only_registered_suffixes_are_planned() {
    let project = Project::new(&["a.py", "b.txt"]);
    let config = Config::default();
    let planner = Planner::new(project.root(), &config)
        .with_suffix_map(SuffixMap::new([(".py", vec![CheckType::SyntaxCheck])]));

    let plan = planner.plan(["a.py", "b.txt"]).unwrap();
    assert_eq!(
        pairs(&plan, project.root()),
        vec![("a.py".to_string(), CheckType::SyntaxCheck)]
    );
}

#[test]
fn test_files_get_union_without_duplicates() {
    let project = Project::new(&["pkg_test.py"]);
    let config = Config::default();
    let plan = Planner::new(project.root(), &config)
        .plan(["pkg_test.py", "./pkg_test.py"])
        .unwrap();

    let unique: HashSet<_> = plan.items.iter().collect();
    assert_eq!(unique.len(), plan.items.len());
    assert_eq!(plan.len(), 6);
    assert_eq!(plan.checks_by_type[&CheckType::UnitTest], 1);
}

#[test]
fn parent_components_name_the_same_file() {
    let project = Project::new(&["a.sh", "pkg/x.sh"]);
    let config = Config::default();
    let plan = Planner::new(project.root(), &config)
        .plan(["a.sh", "pkg/../a.sh", "./pkg/./../a.sh"])
        .unwrap();

    assert_eq!(
        pairs(&plan, project.root()),
        vec![("a.sh".to_string(), CheckType::ShellLint)]
    );
    assert_eq!(plan.checks_by_dir["root"], 1);
    assert_eq!(plan.checks_by_type[&CheckType::ShellLint], 1);
}

#[test]
fn missing_files_are_dropped() {
    let project = Project::new(&["here.py"]);
    let config = Config::default();
    let plan = Planner::new(project.root(), &config)
        .plan(["here.py", "gone.py"])
        .unwrap();
    assert!(plan.items.iter().all(|item| item.file_path.ends_with("here.py")));
}

#[cfg(unix)]
#[test]
fn symlinks_are_dropped() {
    let project = Project::new(&["real.py"]);
    std::os::unix::fs::symlink(project.path("real.py"), project.path("alias.py")).unwrap();
    let config = Config::default();
    let plan = Planner::new(project.root(), &config)
        .plan(["alias.py"])
        .unwrap();
    assert!(plan.is_empty());
}

#[test]
fn disabled_check_type_is_never_planned() {
    let project = Project::new(&["a.py", "b.py", "c_test.py"]);
    let config = Config::default().with_disabled(CheckType::StyleCheck);
    let plan = Planner::new(project.root(), &config)
        .plan(["a.py", "b.py", "c_test.py"])
        .unwrap();

    assert!(plan.items.iter().all(|i| i.check_type != CheckType::StyleCheck));
    assert!(plan.items.iter().any(|i| i.check_type == CheckType::TypeCheck));
    assert!(!plan.checks_by_type.contains_key(&CheckType::StyleCheck));
}

#[test]
fn include_then_exclude_rule_excludes_path() {
    let project = Project::new(&["src/gen/a.py", "src/b.py"]);
    let config = Config::default().with_rules(vec![
        PathRule::parse("^src/").unwrap(),
        PathRule::parse("!^src/gen/").unwrap(),
    ]);
    let plan = Planner::new(project.root(), &config)
        .plan(["src/gen/a.py", "src/b.py"])
        .unwrap();
    assert!(plan.items.iter().all(|i| i.file_path.ends_with("src/b.py")));
    assert!(!plan.is_empty());
}

#[test]
fn exclude_then_include_rule_includes_path() {
    let project = Project::new(&["src/gen/a.py"]);
    let config = Config::default().with_rules(vec![
        PathRule::parse("!^src/gen/").unwrap(),
        PathRule::parse("^src/").unwrap(),
    ]);
    let plan = Planner::new(project.root(), &config)
        .plan(["src/gen/a.py"])
        .unwrap();
    assert!(!plan.is_empty());
}

#[test]
fn doctest_skipped_for_entry_point() {
    let project = Project::new(&["tool/__main__.py"]);
    let config = Config::default();
    let plan = Planner::new(project.root(), &config)
        .plan(["tool/__main__.py"])
        .unwrap();
    assert!(plan.items.iter().all(|i| i.check_type != CheckType::Doctest));
    assert_eq!(plan.len(), 4);
}

#[test]
fn name_filter_keeps_matching_base_names() {
    let project = Project::new(&["parser.py", "lexer.py", "run.sh"]);
    let config = Config::default();
    let plan = Planner::new(project.root(), &config)
        .with_name_filter(Some("pars"))
        .unwrap()
        .plan(["parser.py", "lexer.py", "run.sh"])
        .unwrap();

    assert!(plan.items.iter().all(|i| i.file_path.ends_with("parser.py")));
    assert_eq!(
        plan.name_filter,
        Some(NameFilterStats {
            pattern: "pars".to_string(),
            before: 3,
            after: 1,
        })
    );
}

#[test]
fn planning_is_order_independent() {
    let project = Project::new(&["a.py", "b/c.sh", "d_test.py"]);
    let config = Config::default();
    let planner = Planner::new(project.root(), &config);

    let forward = planner.plan(["a.py", "b/c.sh", "d_test.py"]).unwrap();
    let backward = planner.plan(["d_test.py", "b/c.sh", "a.py"]).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn counters_track_directories_and_types() {
    let project = Project::new(&["top.sh", "scripts/a.sh", "scripts/b.sh"]);
    let config = Config::default();
    let plan = Planner::new(project.root(), &config)
        .plan(["top.sh", "scripts/a.sh", "scripts/b.sh"])
        .unwrap();

    assert_eq!(plan.checks_by_dir["root"], 1);
    assert_eq!(plan.checks_by_dir["scripts"], 2);
    assert_eq!(plan.checks_by_type[&CheckType::ShellLint], 3);
}

#[test]
fn unresolvable_unit_test_aborts_planning() {
    let project = Project::new(&["my-tool_test.py"]);
    let config = Config::default();
    let err = Planner::new(project.root(), &config)
        .plan(["my-tool_test.py"])
        .unwrap_err();
    assert_eq!(err.error_type(), "ModuleResolution");
}

#[test]
fn unresolvable_unit_test_ignored_when_disabled() {
    let project = Project::new(&["my-tool_test.py"]);
    let config = Config::default().with_disabled(CheckType::UnitTest);
    let plan = Planner::new(project.root(), &config)
        .plan(["my-tool_test.py"])
        .unwrap();
    assert!(!plan.is_empty());
}
