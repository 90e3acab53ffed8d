//! Demo: load a page module with two child widgets into an in-memory DOM

use std::collections::HashMap;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use tracing_subscriber::EnvFilter;

use fos_module::{
    Collaborators, Document, Module, ModuleOptions, ModuleResult, NodeRef, TemplateLoader,
    TimedTransition,
};

/// Template loader backed by a fixed table of `(tag, text)` rows
struct StaticTemplates {
    table: HashMap<&'static str, Vec<(&'static str, &'static str)>>,
}

impl TemplateLoader<NodeRef> for StaticTemplates {
    fn load_template<'a>(
        &'a self,
        identifier: &'a str,
        container: &'a NodeRef,
    ) -> LocalBoxFuture<'a, ModuleResult<()>> {
        Box::pin(async move {
            for (tag, text) in self.table.get(identifier).into_iter().flatten() {
                let node = container.create_element(tag);
                node.append_child(&container.create_text(text))?;
                container.append_child(&node)?;
            }
            Ok::<(), fos_module::ModuleError>(())
        })
    }
}

fn collaborators() -> Collaborators<NodeRef> {
    let table = HashMap::from([
        ("header", vec![("h1", "fOS"), ("nav", "home | about")]),
        ("weather", vec![("p", "Sunny, 21C")]),
    ]);
    Collaborators::new()
        .with_template_loader(StaticTemplates { table })
        .with_transition_waiter(
            TimedTransition::new(Duration::from_millis(150)).with_animated_class("fade"),
        )
}

fn print_tree(node: &NodeRef, depth: usize) {
    let classes = node
        .tree()
        .borrow()
        .class_list(node.id())
        .map(|c| c.value())
        .unwrap_or_default();
    println!("{}{:?} [{}] {}", "  ".repeat(depth), node, classes, node.text_content());
    for child in node.children() {
        print_tree(&child, depth + 1);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let doc = Document::new("about:demo");
    let page = doc.create_element("main");
    page.add_class("fade");
    doc.body().append_child(&page)?;

    let mut module = Module::with_collaborators(
        Some(page.clone()),
        ModuleOptions::new(),
        collaborators(),
    );
    for name in ["header", "weather"] {
        let element = doc.create_element("section");
        page.append_child(&element)?;
        let child = Module::with_collaborators(
            Some(element),
            ModuleOptions::new()
                .with_template_id(name)
                .on_load(move || tracing::info!("{} ready", name)),
            collaborators(),
        );
        module.add_child(name, child);
    }

    smol::block_on(async {
        module.load().await?;
        module.show().await;
        anyhow::Ok(())
    })?;
    print_tree(&doc.body(), 0);

    module.destroy();
    println!("-- after destroy --");
    print_tree(&doc.body(), 0);
    Ok(())
}
