use std::sync::Arc;

use minijinja::{Environment, ErrorKind, Value, value::Kwargs};

use crate::routes::RouteTable;

/// Renderer Trait
///
/// Turns a view name and a data bag into HTML. Handlers only ever see this trait.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &str, vars: serde_json::Value) -> Result<String, minijinja::Error>;
}

pub type RendererState = Arc<dyn Renderer>;

/// Templates compiled into the binary, keyed by view name.
const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("main/home.html", include_str!("../templates/main/home.html")),
    ("user/login.html", include_str!("../templates/user/login.html")),
    ("user/list.html", include_str!("../templates/user/list.html")),
    ("user/form.html", include_str!("../templates/user/form.html")),
    ("category/list.html", include_str!("../templates/category/list.html")),
    ("category/form.html", include_str!("../templates/category/form.html")),
    ("category/manage.html", include_str!("../templates/category/manage.html")),
    ("product/list.html", include_str!("../templates/product/list.html")),
    ("product/form.html", include_str!("../templates/product/form.html")),
    ("type/list.html", include_str!("../templates/type/list.html")),
    ("type/form.html", include_str!("../templates/type/form.html")),
    ("brand/list.html", include_str!("../templates/brand/list.html")),
    ("brand/form.html", include_str!("../templates/brand/form.html")),
    ("error/err403.html", include_str!("../templates/error/err403.html")),
    ("error/err404.html", include_str!("../templates/error/err404.html")),
];

/// TemplateRenderer
///
/// minijinja environment with HTML autoescaping (all view names end in `.html`) and a
/// `url_for(name, **params)` global backed by the route table.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new(routes: RouteTable) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        env.add_function(
            "url_for",
            move |name: String, kwargs: Kwargs| -> Result<Value, minijinja::Error> {
                let mut values = Vec::new();
                for key in kwargs.args() {
                    let value: Value = kwargs.get(key)?;
                    values.push((key.to_string(), value.to_string()));
                }
                kwargs.assert_all_used()?;

                let params: Vec<(&str, &str)> = values
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str()))
                    .collect();
                // Generated paths are trusted; escaping would turn `/` into `&#x2f;`.
                routes
                    .generate_url(&name, &params)
                    .map(Value::from_safe_string)
                    .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()))
            },
        );

        Ok(Self { env })
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, view: &str, vars: serde_json::Value) -> Result<String, minijinja::Error> {
        self.env.get_template(view)?.render(vars)
    }
}
