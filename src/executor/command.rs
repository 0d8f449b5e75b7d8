use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::check_type::CheckType;
use crate::config::Config;
use crate::error::Result;
use crate::module_name;
use crate::planner::WorkItem;

use super::search_path::{self, MYPYPATH, PYTHONPATH};

pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_SHELLCHECK: &str = "shellcheck";

/// External programs the checks are run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub python: String,
    pub shellcheck: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
            shellcheck: DEFAULT_SHELLCHECK.to_string(),
        }
    }
}

/// Fully specified child process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub args: Vec<String>,
    /// Variables set on top of the inherited environment.
    pub env: Vec<(&'static str, OsString)>,
    pub extra_messages: Vec<String>,
}

/// Builds the command line for each check type.
#[derive(Debug, Clone)]
pub struct CommandBuilder<'a> {
    root: &'a Path,
    config: &'a Config,
    tools: &'a Toolchain,
    inherited_search_path: Vec<PathBuf>,
}

impl<'a> CommandBuilder<'a> {
    #[must_use]
    pub const fn new(
        root: &'a Path,
        config: &'a Config,
        tools: &'a Toolchain,
        inherited_search_path: Vec<PathBuf>,
    ) -> Self {
        Self {
            root,
            config,
            tools,
            inherited_search_path,
        }
    }

    /// Build the invocation for `item`; `cache_dir` isolates the type checker's cache.
    ///
    /// # Errors
    /// Returns an error if the module name of an import or unit-test target cannot be
    /// resolved, or a search path entry cannot be encoded.
    pub fn build(&self, item: &WorkItem, cache_dir: &Path) -> Result<CommandSpec> {
        let file = path_arg(&item.file_path);
        let python = self.tools.python.clone();
        let mut extra_search_path = Vec::new();
        let mut extra_messages = Vec::new();

        let module = if item.check_type.needs_module_name() {
            let module = module_name::resolve(&item.file_path, self.root)?;
            extra_messages.push(format!("Module name: {}", module.dotted));
            extra_messages.push(format!(
                "Added to search path: {}",
                module.search_root.display()
            ));
            extra_search_path.push(module.search_root);
            module.dotted
        } else {
            String::new()
        };

        let args: Vec<String> = match item.check_type {
            CheckType::TypeCheck => vec![
                python,
                "-m".into(),
                "mypy".into(),
                format!(
                    "--config-file={}",
                    self.config.checker_config_path.display()
                ),
                format!("--cache-dir={}", cache_dir.display()),
                file,
            ],
            CheckType::SyntaxCheck => vec![python, "-m".into(), "py_compile".into(), file],
            CheckType::ShellLint => vec![self.tools.shellcheck.clone(), "-x".into(), file],
            CheckType::StyleCheck => {
                let mut args = vec![python, "-m".into(), "pycodestyle".into()];
                if let Some(style_config) = &self.config.style_config_path {
                    args.push(format!("--config={}", style_config.display()));
                }
                args.push(file);
                args
            }
            CheckType::Doctest => vec![python, "-m".into(), "doctest".into(), file],
            CheckType::UnitTest => vec![python, "-m".into(), "unittest".into(), module],
            CheckType::ImportCheck => vec![python, "-c".into(), format!("import {module}")],
        };

        let mut env = vec![(
            PYTHONPATH,
            search_path::join(&extra_search_path, &self.inherited_search_path)?,
        )];
        if item.check_type == CheckType::TypeCheck {
            env.push((
                MYPYPATH,
                search_path::join_for_checker(&extra_search_path, &self.inherited_search_path)?,
            ));
        }

        Ok(CommandSpec {
            args,
            env,
            extra_messages,
        })
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
