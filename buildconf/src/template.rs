//! Starter configuration files.
//!
//! Renders a base record plus conventional development and production
//! overlays into a configuration directory. Host-side chain customisations
//! (`webpackChain`) are kept as opaque descriptor data.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::loader::ConfigLoader;
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.yaml");
const DEV_TEMPLATE: &str = include_str!("../templates/dev.yaml");
const PROD_TEMPLATE: &str = include_str!("../templates/prod.yaml");

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// File name inside the configuration directory.
    pub file_name: &'static str,
    /// File contents.
    pub contents: String,
}

/// Starter configuration for a new project.
///
/// # Examples
///
/// ```
/// use buildconf::Template;
///
/// let files = Template::new("taro-demo", "2024-4-24").render().unwrap();
/// assert_eq!(files.len(), 3);
/// assert!(files[0].contents.contains("appName: \"taroDemo\""));
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    project_name: String,
    date: String,
}

impl Template {
    /// Creates a template for `project_name`, stamped with `date`.
    #[must_use]
    pub fn new(project_name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            date: date.into(),
        }
    }

    /// Render `index.yaml`, `dev.yaml` and `prod.yaml`.
    ///
    /// Every rendered file is parsed back and validated as an overlay.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the project name is not usable.
    pub fn render(&self) -> Result<Vec<RenderedFile>> {
        let index = fill(
            INDEX_TEMPLATE,
            &[
                ("projectName", quote(&self.project_name)),
                ("date", quote(&self.date)),
                ("appName", quote(&app_name(&self.project_name))),
            ],
        );

        let files = vec![
            RenderedFile {
                file_name: "index.yaml",
                contents: index,
            },
            RenderedFile {
                file_name: "dev.yaml",
                contents: DEV_TEMPLATE.to_string(),
            },
            RenderedFile {
                file_name: "prod.yaml",
                contents: PROD_TEMPLATE.to_string(),
            },
        ];

        for file in &files {
            let record = ConfigLoader::parse(Path::new(file.file_name), &file.contents)?;
            ConfigValidator::validate_overlay(&record)?;
        }

        Ok(files)
    }

    /// Render and write the files into `dir`, creating it if needed.
    ///
    /// If any target file already exists and `force` is not set, nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists and `force` is not set, or on I/O
    /// failure.
    pub fn write_to(&self, dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
        let files = self.render()?;

        if !force {
            if let Some(existing) = files
                .iter()
                .map(|f| dir.join(f.file_name))
                .find(|p| p.exists())
            {
                return Err(Error::Configuration {
                    path: existing,
                    message: "File already exists (use --force to overwrite)".into(),
                });
            }
        }

        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let path = dir.join(file.file_name);
            fs::write(&path, file.contents)?;
            log::debug!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}

/// Replaces `{{name}}` placeholders in one pass over `template`.
///
/// Substituted text is never scanned again, so values may themselves
/// contain placeholder syntax. Unknown placeholders are left as written.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// A JSON string literal is a valid double-quoted YAML scalar.
fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// `taro-demo` becomes `taroDemo`.
fn app_name(project_name: &str) -> String {
    let mut out = String::with_capacity(project_name.len());
    let mut upper_next = false;
    for c in project_name.chars() {
        if c == '-' || c == '_' || c == ' ' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
