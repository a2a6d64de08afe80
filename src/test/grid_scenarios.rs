//! Renders action columns the way a grid would, row by row.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    ActionColumn, BoxError, Catalog, ColumnConfig, Error, PathRouter,
    RouteParams, RowKey, Template, i18n::CATEGORY,
};

#[derive(Debug)]
struct Item {
    id: u32,
    status: &'static str,
}

fn items() -> Vec<Item> {
    vec![
        Item {
            id: 5,
            status: "editable",
        },
        Item {
            id: 6,
            status: "locked",
        },
    ]
}

/// A router which records every parameter set it is asked to route.
#[derive(Clone, Default)]
struct RecordingRouter {
    seen: Arc<Mutex<Vec<RouteParams>>>,
}

impl crate::Router for RecordingRouter {
    fn to_route(&self, params: &RouteParams) -> Result<String, BoxError> {
        self.seen.lock().unwrap().push(params.clone());
        PathRouter::new().to_route(params)
    }
}

#[test]
fn unknown_token_renders_empty() {
    let column = ActionColumn::<Item>::builder()
        .template("[{foo}]")
        .build()
        .unwrap();

    assert!(!column.has_button("foo"));
    assert_eq!(
        column.render_row(&items()[0], &RowKey::from(5), 0).unwrap(),
        "[]"
    );
}

#[test]
fn defaults_are_only_added_for_tokens_in_the_template() {
    let column = ActionColumn::<Item>::builder()
        .template("{view}")
        .router(PathRouter::new())
        .translator(Catalog::new())
        .build()
        .unwrap();

    assert_eq!(column.button_names().collect::<Vec<_>>(), vec!["view"]);
    assert!(!column.has_button("update"));
    assert!(!column.has_button("delete"));
}

#[test]
fn custom_button_replaces_default() {
    let column = ActionColumn::<Item>::builder()
        .template("{view}")
        .router(PathRouter::new())
        .button("view", |url, item: &Item, _| {
            Ok(format!("<a href=\"{url}\">#{}</a>", item.id))
        })
        .build()
        .unwrap();

    assert_eq!(
        column.render_row(&items()[0], &RowKey::from(5), 0).unwrap(),
        "<a href=\"/view?id=5\">#5</a>"
    );
}

#[test]
fn last_registration_wins() {
    let column = ActionColumn::<Item>::builder()
        .template("{x}")
        .router(PathRouter::new())
        .button("x", |_, _, _| Ok("first".to_string()))
        .button("x", |_, _, _| Ok("second".to_string()))
        .build()
        .unwrap();

    assert_eq!(
        column.render_row(&items()[0], &RowKey::from(5), 0).unwrap(),
        "second"
    );
}

#[test]
fn static_false_hides_registered_button() {
    let column = ActionColumn::<Item>::builder()
        .template("{delete}")
        .router(PathRouter::new())
        .translator(Catalog::new())
        .visible("delete", false)
        .build()
        .unwrap();

    assert!(column.has_button("delete"));
    assert_eq!(
        column.render_row(&items()[0], &RowKey::from(5), 0).unwrap(),
        ""
    );
}

#[test]
fn predicate_decides_per_row() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = calls.clone();

    let column = ActionColumn::<Item>::builder()
        .template("<{update}>")
        .router(PathRouter::new())
        .button("update", |_, item: &Item, _| Ok(format!("u{}", item.id)))
        .visible_if("update", move |item: &Item, key: &RowKey, index| {
            recorded.lock().unwrap().push((item.id, key.clone(), index));
            Ok(item.status == "editable")
        })
        .build()
        .unwrap();

    let rows = items();
    let out = rows
        .iter()
        .enumerate()
        .map(|(index, item)| {
            column.render_row(item, &RowKey::from(item.id), index).unwrap()
        })
        .collect::<Vec<_>>();

    assert_eq!(out, vec!["<u5>", "<>"]);
    assert_eq!(
        *calls.lock().unwrap(),
        vec![(5, RowKey::from(5), 0), (6, RowKey::from(6), 1)]
    );
}

#[test]
fn predicate_without_button_renders_empty() {
    let column = ActionColumn::<Item>::builder()
        .template("{archive}")
        .visible_if("archive", |_: &Item, _: &RowKey, _| Ok(true))
        .build()
        .unwrap();

    assert_eq!(
        column.render_row(&items()[0], &RowKey::from(5), 0).unwrap(),
        ""
    );
}

#[test]
fn url_builder_overrides_everything() {
    let column = ActionColumn::<Item>::builder()
        .controller("item")
        .template("{view}")
        .translator(Catalog::new())
        .url_builder(|action, item: &Item, _, index, column| {
            Ok(format!(
                "custom:{}:{action}:{}:{index}",
                column.controller().unwrap_or_default(),
                item.id
            ))
        })
        .build()
        .unwrap();

    let keys = [
        RowKey::from(5),
        RowKey::composite([("id", "5"), ("lang", "en")]),
    ];
    for key in &keys {
        assert_eq!(
            column.create_url("view", &items()[0], key, 3).unwrap(),
            "custom:item:view:5:3"
        );
    }
}

#[test]
fn composite_key_params() {
    let router = RecordingRouter::default();
    let column = ActionColumn::<Item>::builder()
        .template("{view}")
        .router(router.clone())
        .translator(Catalog::new())
        .build()
        .unwrap();

    let key = RowKey::composite([("id", "7"), ("lang", "en")]);
    let url = column.create_url("view", &items()[0], &key, 0).unwrap();

    assert_eq!(url, "/view?id=7&lang=en");
    assert_eq!(
        router.seen.lock().unwrap()[0],
        RouteParams::new("view").param("id", 7).param("lang", "en")
    );
}

#[test]
fn controller_prefixes_route() {
    let router = RecordingRouter::default();
    let column = ActionColumn::<Item>::builder()
        .controller("item")
        .template("{view}")
        .router(router.clone())
        .translator(Catalog::new())
        .build()
        .unwrap();

    let key = RowKey::composite([("id", "7"), ("lang", "en")]);
    column.create_url("view", &items()[0], &key, 0).unwrap();

    assert_eq!(
        router.seen.lock().unwrap()[0],
        RouteParams::new("item/view").param("id", 7).param("lang", "en")
    );
}

#[test]
fn rendering_is_idempotent() {
    let column = ActionColumn::<Item>::builder()
        .controller("item")
        .router(PathRouter::new())
        .translator(Catalog::new())
        .build()
        .unwrap();

    let rows = items();
    let item = &rows[0];
    let first = column.render_row(item, &RowKey::from(5), 0).unwrap();
    let second = column.render_row(item, &RowKey::from(5), 0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn view_update_delete() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let router = |params: &RouteParams| -> Result<String, BoxError> {
        Ok(format!("/item/{}?id={}", params.route, params.get("id").unwrap()))
    };
    let column = ActionColumn::<Item>::builder()
        .template("{view} {update} {delete}")
        .router(router)
        .translator(Catalog::new())
        .build()
        .unwrap();

    let out = column.render_row(&items()[0], &RowKey::from(5), 0).unwrap();

    assert_eq!(
        out,
        concat!(
            r#"<a href="/item/view?id=5" title="View" aria-label="View" data-pjax="0">"#,
            r#"<span class="glyphicon glyphicon-eye-open"></span></a>"#,
            " ",
            r#"<a href="/item/update?id=5" title="Update" aria-label="Update" data-pjax="0">"#,
            r#"<span class="glyphicon glyphicon-pencil"></span></a>"#,
            " ",
            r#"<a href="/item/delete?id=5" title="Delete" aria-label="Delete" data-pjax="0" "#,
            r#"data-confirm="Are you sure you want to delete this item?" data-method="post">"#,
            r#"<span class="glyphicon glyphicon-trash"></span></a>"#,
        )
    );
}

#[test]
fn labels_are_translated() {
    let catalog = Catalog::new()
        .insert(CATEGORY, "Delete", "Supprimer")
        .insert(
            CATEGORY,
            "Are you sure you want to delete this item?",
            "Vraiment ?",
        );
    let column = ActionColumn::<Item>::builder()
        .template("{delete}")
        .router(PathRouter::new())
        .translator(catalog)
        .button_option("class", "btn btn-danger")
        .build()
        .unwrap();

    let out = column.render_row(&items()[0], &RowKey::from(5), 0).unwrap();
    assert!(out.contains(r#"title="Supprimer" aria-label="Supprimer""#));
    assert!(out.contains(r#"data-confirm="Vraiment ?""#));
    assert!(out.contains(r#"class="btn btn-danger""#));
}

#[test]
fn other_templates_share_the_buttons() {
    let column = ActionColumn::<Item>::builder()
        .template("{update}")
        .router(PathRouter::new())
        .translator(Catalog::new())
        .button("copy", |url, item: &Item, _| {
            Ok(format!("<a href=\"{url}\">copy {}</a>", item.id))
        })
        .build()
        .unwrap();

    assert!(!column.has_button("view"));

    let template = Template::parse("[{view}] | {copy} | {update}");
    let out = column
        .render_template(&template, &items()[0], &RowKey::from(5), 0)
        .unwrap();

    assert!(out.starts_with(
        r#"[] | <a href="/copy?id=5">copy 5</a> | <a href="/update?id=5""#
    ));
    assert!(out.ends_with("</a>"));
    assert_eq!(
        out,
        format!(
            "[] | <a href=\"/copy?id=5\">copy 5</a> | {}",
            column.render_row(&items()[0], &RowKey::from(5), 0).unwrap()
        )
    );
}

#[test]
fn failing_callbacks_abort_the_row() {
    let column = ActionColumn::<Item>::builder()
        .template("{ok} {bad}")
        .router(PathRouter::new())
        .button("ok", |_, _, _| Ok("ok".to_string()))
        .button("bad", |_, _, _| Err("boom".into()))
        .build()
        .unwrap();

    match column.render_row(&items()[0], &RowKey::from(5), 0) {
        Err(Error::Callback { name, source }) => {
            assert_eq!(name, "bad");
            assert_eq!(source.to_string(), "boom");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let column = ActionColumn::<Item>::builder()
        .template("{view}")
        .router(PathRouter::new())
        .translator(Catalog::new())
        .visible_if("view", |_: &Item, _: &RowKey, _| Err("no".into()))
        .build()
        .unwrap();
    assert!(matches!(
        column.render_row(&items()[0], &RowKey::from(5), 0),
        Err(Error::Callback { .. })
    ));
}

#[test]
fn routing_errors_are_reported() {
    let column = ActionColumn::<Item>::builder()
        .template("{view}")
        .router(|_: &RouteParams| -> Result<String, BoxError> {
            Err("no route".into())
        })
        .translator(Catalog::new())
        .build()
        .unwrap();

    assert!(matches!(
        column.render_row(&items()[0], &RowKey::from(5), 0),
        Err(Error::Routing(_))
    ));
}

#[test]
fn missing_collaborators_fail_at_build() {
    let err = ActionColumn::<Item>::builder()
        .router(PathRouter::new())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::MissingCollaborator("translator")));

    let err = ActionColumn::<Item>::builder()
        .translator(Catalog::new())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::MissingCollaborator("router")));

    // the button is not in the column's template, but could be rendered
    // through `render_template`
    let err = ActionColumn::<Item>::builder()
        .template("")
        .button("x", |_, _, _| Ok("x".to_string()))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::MissingCollaborator("router")));

    assert!(
        ActionColumn::<Item>::builder()
            .template("[{foo}]")
            .build()
            .is_ok()
    );

    // every default is overridden, and URLs come from the builder
    assert!(
        ActionColumn::<Item>::builder()
            .template("{view}")
            .button("view", |url, _, _| Ok(url.to_string()))
            .url_builder(|_, _, _, _, _| Ok(String::new()))
            .build()
            .is_ok()
    );
}

#[test]
fn column_from_config() {
    let config = ColumnConfig::from_toml_str(
        r#"
        controller = "post"
        template = "{view} {delete}"
        header = "Actions"

        [button_options]
        class = "btn"

        [content_options]
        class = "text-end"

        [visible_buttons]
        delete = false
        "#,
    )
    .unwrap();

    let column = ActionColumn::<Item>::builder()
        .config(config)
        .router(PathRouter::new())
        .translator(Catalog::new())
        .build()
        .unwrap();

    assert_eq!(column.controller(), Some("post"));
    assert_eq!(
        column.header_cell(),
        r#"<th class="action-column">Actions</th>"#
    );

    let cell = column.data_cell(&items()[0], &RowKey::from(5), 0).unwrap();
    assert!(cell.starts_with(r#"<td class="text-end"><a href="/post/view?id=5""#));
    assert!(cell.contains(r#"class="btn""#));
    assert!(!cell.contains("delete"));
    assert!(cell.ends_with(" </td>"));
}

#[test]
fn empty_header() {
    let column = ActionColumn::<Item>::builder()
        .template("")
        .header("   ")
        .header_option("style", "width: 5em")
        .build()
        .unwrap();

    assert_eq!(
        column.header_cell(),
        r#"<th class="action-column" style="width: 5em">&nbsp;</th>"#
    );
}

#[test]
fn rows_render_concurrently() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ActionColumn<Item>>();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let column = ActionColumn::<Item>::builder()
        .controller("item")
        .router(PathRouter::new())
        .translator(Catalog::new())
        .visible_if("update", move |item: &Item, _: &RowKey, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(item.id % 2 == 0)
        })
        .build()
        .unwrap();

    let rows = (0..64)
        .map(|id| Item {
            id,
            status: "editable",
        })
        .collect::<Vec<_>>();

    let rendered = std::thread::scope(|scope| {
        let handles = rows
            .chunks(16)
            .enumerate()
            .map(|(chunk, rows)| {
                let column = &column;
                scope.spawn(move || {
                    rows.iter()
                        .enumerate()
                        .map(|(i, item)| {
                            column
                                .render_row(
                                    item,
                                    &RowKey::from(item.id),
                                    chunk * 16 + i,
                                )
                                .unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 64);
    for (item, html) in rows.iter().zip(&rendered) {
        assert_eq!(
            html.contains("/item/update?"),
            item.id % 2 == 0,
            "row {}",
            item.id
        );
        assert_eq!(
            html,
            &column.render_row(item, &RowKey::from(item.id), 0).unwrap()
        );
    }
}
