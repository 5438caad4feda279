// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `app/nav` module: the sidebar shell.
//!
//! Search, Home, Create and Settings are fixed. Items contributed by
//! features go into the single scroll wrapper inside the Menu group.

use portico_core::PorticoError;
use portico_plugin::blueprint::{NavContentBlueprint, NavContentParams};
use portico_plugin::contribution::{NavContentComponent, NavContentProps};
use portico_plugin::{
    Blueprint, ExtensionDefinition, Feature, NavItem, ViewNode, compat_wrapper,
    create_frontend_module,
};

pub const HOME_ROUTE: &str = "/?filters%5Bkind%5D=component&filters%5Buser%5D=all&limit=20";
pub const CREATE_ROUTE: &str = "create";
pub const SCROLL_SLOT: &str = "SidebarScrollWrapper";

fn divider() -> ViewNode {
    ViewNode::new("SidebarDivider")
}

fn item(icon: &str, to: &str, text: &str) -> ViewNode {
    ViewNode::new("SidebarItem")
        .prop("icon", icon)
        .prop("to", to)
        .prop("text", text)
}

/// Render the sidebar around `props.items`.
pub fn render_sidebar(props: &NavContentProps) -> ViewNode {
    let search = ViewNode::new("SidebarGroup")
        .prop("label", "Search")
        .prop("icon", "SearchIcon")
        .prop("to", "/search")
        .child(ViewNode::new("SidebarSearchModal"));

    let menu = ViewNode::new("SidebarGroup")
        .prop("label", "Menu")
        .prop("icon", "MenuIcon")
        .child(item("HomeIcon", HOME_ROUTE, "Home"))
        .child(item("CreateComponentIcon", CREATE_ROUTE, "Create..."))
        .child(divider())
        .child(ViewNode::new(SCROLL_SLOT).children(props.items.iter().map(NavItem::to_view)));

    let settings = ViewNode::new("SidebarGroup")
        .prop("label", "Settings")
        .prop("icon", "UserSettingsSignInAvatar")
        .prop("to", "/settings")
        .child(ViewNode::new("SidebarSettings"));

    compat_wrapper(
        ViewNode::new("Sidebar")
            .child(ViewNode::new("SidebarLogo"))
            .child(search)
            .child(divider())
            .child(menu)
            .child(ViewNode::new("SidebarSpace"))
            .child(divider())
            .child(settings),
    )
}

pub fn sidebar_content() -> Result<ExtensionDefinition, PorticoError> {
    NavContentBlueprint::make(
        NavContentParams::default().component(NavContentComponent::new(render_sidebar)),
    )
}

pub fn nav_module() -> Result<Feature, PorticoError> {
    create_frontend_module("app", "nav", vec![sidebar_content()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(titles: &[&str]) -> NavContentProps {
        NavContentProps {
            items: titles
                .iter()
                .map(|t| NavItem {
                    title: t.to_string(),
                    to: format!("/{t}"),
                    icon: None,
                })
                .collect(),
        }
    }

    #[test]
    fn shell_has_fixed_entries_and_one_slot() {
        let view = render_sidebar(&items(&[]));
        assert_eq!(view.element, "CompatWrapper");
        let sidebar = view.find("Sidebar").unwrap();
        let labels: Vec<&str> = sidebar
            .find_all("SidebarGroup")
            .iter()
            .map(|g| g.props["label"].as_str())
            .collect();
        assert_eq!(labels, vec!["Search", "Menu", "Settings"]);

        let texts: Vec<&str> = sidebar
            .find_all("SidebarItem")
            .iter()
            .map(|i| i.props["text"].as_str())
            .collect();
        assert_eq!(texts, vec!["Home", "Create..."]);
        assert_eq!(sidebar.find_all(SCROLL_SLOT).len(), 1);
    }

    #[test]
    fn dynamic_items_land_in_scroll_slot_in_order() {
        let view = render_sidebar(&items(&["catalog", "docs"]));
        let slot = view.find(SCROLL_SLOT).unwrap();
        let targets: Vec<&str> = slot.children.iter().map(|c| c.props["to"].as_str()).collect();
        assert_eq!(targets, vec!["/catalog", "/docs"]);

        let menu = view
            .find_all("SidebarGroup")
            .into_iter()
            .find(|g| g.props["label"] == "Menu")
            .unwrap();
        assert_eq!(menu.children[0].props["to"], HOME_ROUTE);
        assert_eq!(menu.children.last().unwrap().element, SCROLL_SLOT);
    }

    #[test]
    fn module_is_app_nav() {
        let module = nav_module().unwrap();
        assert_eq!(module.id().as_str(), "app/nav");
        assert_eq!(module.extensions()[0].id.as_str(), "nav-content:app");
    }
}
