//! HTML templates.
//!
//! Templates are compiled once, at startup, into a minijinja [`Environment`].
//! Names end in `.html`, so minijinja escapes every interpolated value for
//! HTML. The built-in set lives in `tmpl/` and is compiled into the binary; a
//! templates directory given in the config replaces it wholesale.
//!
//! Links to pages are built with minijinja's `urlencode` filter, both inside
//! templates and in redirects (see [`urlencode`]).

use crate::error::{Result, WikiError};
use minijinja::{Environment, Value};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const HOME: &str = "home.html";
pub const VIEW: &str = "view.html";
pub const EDIT: &str = "edit.html";
pub const NEW: &str = "new.html";

const TEMPLATE_NAMES: [&str; 4] = [HOME, VIEW, EDIT, NEW];

const BUILTIN: [(&str, &str); 4] = [
    (HOME, include_str!("../../tmpl/home.html")),
    (VIEW, include_str!("../../tmpl/view.html")),
    (EDIT, include_str!("../../tmpl/edit.html")),
    (NEW, include_str!("../../tmpl/new.html")),
];

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// The templates shipped with plainwiki.
    pub fn builtin() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in BUILTIN {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Load every template from `dir`. A missing or invalid file is an error,
    /// so a broken setup fails at startup rather than on first request.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut env = Environment::new();
        for name in TEMPLATE_NAMES {
            let path = dir.join(name);
            let source = fs::read_to_string(&path).map_err(|e| {
                WikiError::Config(format!("cannot read template {}: {}", path.display(), e))
            })?;
            env.add_template_owned(name.to_string(), source)?;
        }
        Ok(Self { env })
    }

    /// Renders a registered template with the given data.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(data)?)
    }
}

/// Percent-encode a title as one URL path segment, exactly as the
/// `urlencode` filter does in templates.
pub fn urlencode(segment: &str) -> Result<String> {
    Ok(minijinja::filters::urlencode(&Value::from(segment))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_templates_render() {
        let templates = Templates::builtin().unwrap();
        let html = templates
            .render(VIEW, &context! { title => "Home", body => "Hello" })
            .unwrap();
        assert!(html.contains("Home"));
        assert!(html.contains("Hello"));
    }

    #[test]
    fn test_values_are_html_escaped() {
        let templates = Templates::builtin().unwrap();
        let html = templates
            .render(VIEW, &context! { title => "Home", body => "<script>x</script>" })
            .unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>x"));
    }

    #[test]
    fn test_urlencode_matches_template_links() {
        assert_eq!(urlencode("Home").unwrap(), "Home");
        assert_eq!(urlencode("Shopping list").unwrap(), "Shopping%20list");
        assert_eq!(urlencode("a\r\nb").unwrap(), "a%0D%0Ab");

        let templates = Templates::builtin().unwrap();
        let html = templates
            .render(VIEW, &context! { title => "a\tb c", body => "" })
            .unwrap();
        let expected = format!("href=\"/edit/{}\"", urlencode("a\tb c").unwrap());
        assert!(html.contains(&expected));
    }

    #[test]
    fn test_unknown_template_is_render_error() {
        let templates = Templates::builtin().unwrap();
        let err = templates.render("missing.html", &context! {}).unwrap_err();
        assert!(matches!(err, WikiError::Render(_)));
    }

    #[test]
    fn test_from_dir_loads_all_templates() {
        let dir = TempDir::new().unwrap();
        for name in TEMPLATE_NAMES {
            fs::write(dir.path().join(name), format!("[{}] {{{{ title }}}}", name)).unwrap();
        }

        let templates = Templates::from_dir(dir.path()).unwrap();
        let html = templates.render(EDIT, &context! { title => "T" }).unwrap();
        assert_eq!(html, "[edit.html] T");
    }

    #[test]
    fn test_from_dir_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(HOME), "home").unwrap();

        assert!(matches!(
            Templates::from_dir(dir.path()),
            Err(WikiError::Config(_))
        ));
    }

    #[test]
    fn test_from_dir_syntax_error_is_render_error() {
        let dir = TempDir::new().unwrap();
        for name in TEMPLATE_NAMES {
            fs::write(dir.path().join(name), "{% if %}").unwrap();
        }

        assert!(matches!(
            Templates::from_dir(dir.path()),
            Err(WikiError::Render(_))
        ));
    }
}
