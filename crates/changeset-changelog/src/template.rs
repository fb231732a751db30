use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use minijinja::Environment;
use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::error::ChangelogError;

/// Location of a project-supplied template, relative to the rendering root or
/// any of its ancestors.
pub const TEMPLATE_OVERRIDE_PATH: &str = ".changeset/changelog.tmpl";

const TEMPLATE_NAME: &str = "changelog";
const BUILTIN_ORIGIN: &str = "<built-in>";

/// Built-in template. Variables: `project`, `version` (absent for previews),
/// `date`, and `sections`, each with a `title` and `items` carrying
/// `headline`, `continuation_lines` and an optional `pull_request`.
pub const DEFAULT_TEMPLATE: &str = r"{% if version %}
## {{ version }} ({{ date }})

{% endif %}
{% for section in sections %}
### {{ section.title }}

{% for item in section.items %}
- {{ item.headline }}{% if item.pull_request %} ([#{{ item.pull_request.number }}]({{ item.pull_request.url }}) by @{{ item.pull_request.author }}){% endif %}

{% for line in item.continuation_lines %}
  {{ line }}
{% endfor %}
{% endfor %}
{% if not loop.last %}

{% endif %}
{% endfor %}
";

/// A parsed changelog template. Block tags swallow their trailing newline and
/// leading indentation, for overrides as well as the built-in template.
#[derive(Debug)]
pub struct ChangelogTemplate {
    env: Environment<'static>,
    origin: String,
}

impl ChangelogTemplate {
    /// # Errors
    ///
    /// Returns `ChangelogError::TemplateParse` if `source` is not a valid template.
    pub fn parse(origin: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let origin = origin.into();
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template_owned(TEMPLATE_NAME, source.into())
            .map_err(|source| ChangelogError::TemplateParse {
                origin: origin.clone(),
                source,
            })?;

        Ok(Self { env, origin })
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::TemplateParse` if the built-in template fails to parse.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_ORIGIN, DEFAULT_TEMPLATE)
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::TemplateRead` if the file cannot be read, or
    /// `ChangelogError::TemplateParse` if it is not a valid template.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| {
            ChangelogError::TemplateRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse(path.display().to_string(), source)
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::TemplateRender` if evaluation fails.
    pub fn render<S: Serialize>(&self, context: S) -> Result<String> {
        let render_error = |source| ChangelogError::TemplateRender {
            origin: self.origin.clone(),
            source,
        };
        self.env
            .get_template(TEMPLATE_NAME)
            .map_err(render_error)?
            .render(context)
            .map_err(render_error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    BuiltIn,
    Override(PathBuf),
}

/// Parsed templates keyed by their resolved path.
///
/// The lock is held across lookup, parse and insert, so concurrent renders of
/// the same template parse it once.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: Mutex<HashMap<TemplateKey, Arc<ChangelogTemplate>>>,
}

impl TemplateCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Propagates the error from `load`; nothing is cached in that case.
    pub fn get_or_load<F>(&self, key: TemplateKey, load: F) -> Result<Arc<ChangelogTemplate>>
    where
        F: FnOnce() -> Result<ChangelogTemplate>,
    {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(template) = entries.get(&key) {
            debug!(?key, "changelog template cache hit");
            return Ok(Arc::clone(template));
        }

        let template = Arc::new(load()?);
        debug!(?key, origin = template.origin(), "cached changelog template");
        entries.insert(key, Arc::clone(&template));
        Ok(template)
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves the template for `root`: the nearest override found walking
    /// up from `root`, else the built-in template.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be made absolute, or if the override
    /// cannot be read or parsed.
    pub fn resolve(&self, root: &Path) -> Result<Arc<ChangelogTemplate>> {
        match find_template_override(root)? {
            Some(path) => {
                let key = dunce::canonicalize(&path).map_err(|source| {
                    ChangelogError::TemplateRead {
                        path: path.clone(),
                        source,
                    }
                })?;
                self.get_or_load(TemplateKey::Override(key.clone()), || {
                    ChangelogTemplate::from_file(&key)
                })
            }
            None => self.get_or_load(TemplateKey::BuiltIn, ChangelogTemplate::builtin),
        }
    }
}

/// Walks from `root` towards the filesystem root looking for
/// [`TEMPLATE_OVERRIDE_PATH`].
///
/// # Errors
///
/// Returns `ChangelogError::ResolveRoot` if `root` cannot be made absolute.
pub fn find_template_override(root: &Path) -> Result<Option<PathBuf>> {
    let absolute = std::path::absolute(root).map_err(|source| ChangelogError::ResolveRoot {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(absolute
        .ancestors()
        .map(|dir| dir.join(TEMPLATE_OVERRIDE_PATH))
        .find(|candidate| candidate.is_file()))
}
