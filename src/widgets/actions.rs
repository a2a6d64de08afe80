//! The action column: a grid column which renders a set of buttons (view,
//! update, delete or custom ones) for every row.

use std::{collections::HashMap, sync::Arc};

use indexmap::IndexMap;

use crate::{
    config::ColumnConfig,
    error::{BoxError, Error, Result},
    html::{self, Attributes, attrs},
    i18n::Translator,
    key::RowKey,
    routing::{RouteParams, Router},
    template::{Segment, Template},
    visibility::VisibilityRule,
    widgets::buttons::{
        Button, DEFAULT_BUTTONS, builtin_extra_options, default_button,
    },
};

/// Overrides how button URLs are built. Receives the action (button name),
/// the row, and the column itself.
pub type UrlBuilder<M> = Arc<
    dyn Fn(
            &str,
            &M,
            &RowKey,
            usize,
            &ActionColumn<M>,
        ) -> Result<String, BoxError>
        + Send
        + Sync,
>;

/// Configures an [`ActionColumn`].
///
/// Every callback handed to the builder may be called from several threads
/// at once if the host renders rows in parallel, so callbacks should not
/// rely on being called in any particular order.
pub struct ActionColumnBuilder<M> {
    controller: Option<String>,
    template: Template,
    buttons: IndexMap<String, Button<M>>,
    visible_buttons: HashMap<String, VisibilityRule<M>>,
    button_options: Attributes,
    url_builder: Option<UrlBuilder<M>>,
    router: Option<Arc<dyn Router>>,
    translator: Option<Arc<dyn Translator>>,
    header: Option<String>,
    header_options: Attributes,
    content_options: Attributes,
}

impl<M: 'static> Default for ActionColumnBuilder<M> {
    fn default() -> Self {
        Self {
            controller: None,
            template: Template::default(),
            buttons: IndexMap::new(),
            visible_buttons: HashMap::new(),
            button_options: Attributes::new(),
            url_builder: None,
            router: None,
            translator: None,
            header: None,
            header_options: attrs([("class", "action-column")]),
            content_options: Attributes::new(),
        }
    }
}

impl<M: 'static> ActionColumnBuilder<M> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Prefixes every action to form the route, e.g. `item` turns the
    /// `view` button's route into `item/view`.
    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        let controller = controller.into();
        self.controller = (!controller.is_empty()).then_some(controller);
        self
    }

    pub fn template(mut self, template: impl Into<Template>) -> Self {
        self.template = template.into();
        self
    }

    /// Registers a button. Registering the same name twice keeps the last
    /// one; a button called `view`, `update` or `delete` replaces the
    /// built-in one.
    pub fn button<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &M, &RowKey) -> Result<String, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.buttons.insert(name.into(), Arc::new(f));
        self
    }

    pub fn visibility(
        mut self,
        name: impl Into<String>,
        rule: VisibilityRule<M>,
    ) -> Self {
        self.visible_buttons.insert(name.into(), rule);
        self
    }

    pub fn visible(self, name: impl Into<String>, visible: bool) -> Self {
        self.visibility(name, VisibilityRule::Static(visible))
    }

    pub fn visible_if<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&M, &RowKey, usize) -> Result<bool, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.visibility(name, VisibilityRule::predicate(f))
    }

    /// An HTML attribute added to every built-in button, overriding the
    /// built-in value if there is one.
    pub fn button_option(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.button_options.insert(name.into(), value.into());
        self
    }

    pub fn url_builder<F>(mut self, f: F) -> Self
    where
        F: Fn(
                &str,
                &M,
                &RowKey,
                usize,
                &ActionColumn<M>,
            ) -> Result<String, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.url_builder = Some(Arc::new(f));
        self
    }

    pub fn router(mut self, router: impl Router + 'static) -> Self {
        self.router = Some(Arc::new(router));
        self
    }

    pub fn shared_router(mut self, router: Arc<dyn Router>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn translator(
        mut self,
        translator: impl Translator + 'static,
    ) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    pub fn shared_translator(
        mut self,
        translator: Arc<dyn Translator>,
    ) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn header_option(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.header_options.insert(name.into(), value.into());
        self
    }

    pub fn content_option(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.content_options.insert(name.into(), value.into());
        self
    }

    /// Applies the declarative part of a column's configuration. Values
    /// which are set in `config` replace those set so far.
    pub fn config(mut self, config: ColumnConfig) -> Self {
        if let Some(controller) = config.controller {
            self = self.controller(controller);
        }
        if let Some(template) = config.template {
            self.template = Template::parse(template);
        }
        if let Some(header) = config.header {
            self.header = Some(header);
        }
        if let Some(header_options) = config.header_options {
            self.header_options = header_options;
        }
        self.button_options.extend(config.button_options);
        self.content_options.extend(config.content_options);
        for (name, visible) in config.visible_buttons {
            self.visible_buttons
                .insert(name, VisibilityRule::Static(visible));
        }
        self
    }

    /// Adds the built-in buttons which the template asks for, and checks
    /// that the collaborators the buttons need have been supplied: a
    /// translator for the built-in buttons, and a router (or URL builder) as
    /// soon as there is any button at all.
    pub fn build(mut self) -> Result<ActionColumn<M>> {
        for (name, icon) in DEFAULT_BUTTONS {
            if self.buttons.contains_key(name)
                || !self.template.contains_token(name)
            {
                continue;
            }

            let translator = self
                .translator
                .clone()
                .ok_or(Error::MissingCollaborator("translator"))?;
            let extra = builtin_extra_options(name, translator.as_ref());
            self.buttons.insert(
                name.to_string(),
                default_button(
                    name,
                    icon,
                    &extra,
                    translator.as_ref(),
                    &self.button_options,
                ),
            );
            tracing::debug!("Added default `{name}` button");
        }

        // any template can be rendered against the buttons, not only the
        // column's own, so every registered button needs a URL
        let has_urls = self.url_builder.is_some() || self.router.is_some();
        tracing::debug!(
            "Checking collaborators: {} buttons, urls available: {has_urls}",
            self.buttons.len()
        );
        if !self.buttons.is_empty() && !has_urls {
            return Err(Error::MissingCollaborator("router"));
        }

        Ok(ActionColumn {
            controller: self.controller,
            template: self.template,
            buttons: self.buttons,
            visible_buttons: self.visible_buttons,
            button_options: self.button_options,
            url_builder: self.url_builder,
            router: self.router,
            header: self.header,
            header_options: self.header_options,
            content_options: self.content_options,
        })
    }
}

/// A column of per-row action buttons.
///
/// Built once through [`ActionColumnBuilder`] and then only read from, so a
/// single column can render many rows concurrently.
pub struct ActionColumn<M> {
    controller: Option<String>,
    template: Template,
    buttons: IndexMap<String, Button<M>>,
    visible_buttons: HashMap<String, VisibilityRule<M>>,
    button_options: Attributes,
    url_builder: Option<UrlBuilder<M>>,
    router: Option<Arc<dyn Router>>,
    header: Option<String>,
    header_options: Attributes,
    content_options: Attributes,
}

impl<M: 'static> ActionColumn<M> {
    pub fn builder() -> ActionColumnBuilder<M> {
        ActionColumnBuilder::new()
    }

    pub fn controller(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn button_options(&self) -> &Attributes {
        &self.button_options
    }

    pub fn has_button(&self, name: &str) -> bool {
        self.buttons.contains_key(name)
    }

    pub fn button_names(&self) -> impl Iterator<Item = &str> {
        self.buttons.keys().map(String::as_str)
    }

    /// The URL a button links to, for the given row.
    pub fn create_url(
        &self,
        action: &str,
        model: &M,
        key: &RowKey,
        index: usize,
    ) -> Result<String> {
        if let Some(url_builder) = &self.url_builder {
            return url_builder(action, model, key, index, self)
                .map_err(|e| Error::callback(action, e));
        }

        let route = match &self.controller {
            Some(controller) => format!("{controller}/{action}"),
            None => action.to_string(),
        };
        let params = RouteParams {
            route,
            params: key.params(),
        };

        self.router
            .as_ref()
            .ok_or(Error::MissingCollaborator("router"))?
            .to_route(&params)
            .map_err(Error::Routing)
    }

    fn is_visible(
        &self,
        name: &str,
        model: &M,
        key: &RowKey,
        index: usize,
    ) -> Result<bool> {
        match self.visible_buttons.get(name) {
            Some(rule) => rule
                .is_visible(model, key, index)
                .map_err(|e| Error::callback(name, e)),
            None => Ok(true),
        }
    }

    fn render_button(
        &self,
        name: &str,
        model: &M,
        key: &RowKey,
        index: usize,
    ) -> Result<String> {
        if !self.is_visible(name, model, key, index)? {
            tracing::trace!("Button `{name}` is hidden for row {index}");
            return Ok(String::new());
        }

        let Some(button) = self.buttons.get(name) else {
            tracing::trace!("No button registered for `{{{name}}}`");
            return Ok(String::new());
        };

        let url = self.create_url(name, model, key, index)?;
        button(&url, model, key).map_err(|e| Error::callback(name, e))
    }

    /// Renders `template` for one row, replacing each `{name}` with the
    /// output of the corresponding button (or nothing, if the button does
    /// not exist or is hidden).
    pub fn render_template(
        &self,
        template: &Template,
        model: &M,
        key: &RowKey,
        index: usize,
    ) -> Result<String> {
        let mut out = String::with_capacity(template.source().len());
        for segment in template.segments() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    out.push_str(&self.render_button(name, model, key, index)?)
                }
            }
        }
        Ok(out)
    }

    /// The content of this column's cell for one row.
    #[tracing::instrument(level = "trace", skip_all, fields(index = index))]
    pub fn render_row(
        &self,
        model: &M,
        key: &RowKey,
        index: usize,
    ) -> Result<String> {
        self.render_template(&self.template, model, key, index)
    }

    pub fn header_cell(&self) -> String {
        let label = match self.header.as_deref().map(str::trim) {
            Some(header) if !header.is_empty() => header,
            _ => "&nbsp;",
        };
        html::tag("th", label, &self.header_options)
    }

    pub fn data_cell(
        &self,
        model: &M,
        key: &RowKey,
        index: usize,
    ) -> Result<String> {
        let content = self.render_row(model, key, index)?;
        Ok(html::tag("td", &content, &self.content_options))
    }
}

impl<M> std::fmt::Debug for ActionColumn<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionColumn")
            .field("controller", &self.controller)
            .field("template", &self.template.source())
            .field("buttons", &self.buttons.keys().collect::<Vec<_>>())
            .field("visible_buttons", &self.visible_buttons)
            .field("has_url_builder", &self.url_builder.is_some())
            .finish_non_exhaustive()
    }
}
