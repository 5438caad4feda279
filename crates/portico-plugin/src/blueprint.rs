// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blueprints: validated factories for extensions on the standard points.
//!
//! Every `make` checks all required parameters before building anything,
//! so a failed call never yields a partially initialized extension.

use portico_core::{ContributionKind, PorticoError};

use crate::contribution::{
    CardType, Contribution, EntityCard, EntityComponent, EntityContent, NavContentComponent,
    NavItem, Page, SignInRenderer, ViewNode,
};
use crate::extension::{ExtensionDefinition, Filter, Loader};
use crate::point;

/// A factory that validates parameters and produces an extension definition.
pub trait Blueprint {
    type Params;

    /// Blueprint name used in error messages.
    const NAME: &'static str;
    /// Extension kind, the first segment of produced extension ids.
    const KIND: &'static str;
    /// Point the produced extensions attach to.
    const POINT: &'static str;
    const PRODUCES: ContributionKind;

    fn make(params: Self::Params) -> Result<ExtensionDefinition, PorticoError>;
}

fn require<T>(value: Option<T>, blueprint: &str, field: &str) -> Result<T, PorticoError> {
    value.ok_or_else(|| PorticoError::missing(blueprint, field))
}

fn require_text(value: Option<String>, blueprint: &str, field: &str) -> Result<String, PorticoError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(PorticoError::missing(blueprint, field)),
    }
}

fn definition<B: Blueprint>(name: Option<String>, loader: Loader<Contribution>) -> ExtensionDefinition {
    ExtensionDefinition::new(B::KIND, name, B::POINT, B::PRODUCES, loader)
}

// --- Sign-in page ---

#[derive(Debug, Default)]
pub struct SignInPageParams {
    pub loader: Option<Loader<SignInRenderer>>,
}

impl SignInPageParams {
    pub fn loader(mut self, loader: Loader<SignInRenderer>) -> Self {
        self.loader = Some(loader);
        self
    }
}

pub struct SignInPageBlueprint;

impl Blueprint for SignInPageBlueprint {
    type Params = SignInPageParams;
    const NAME: &'static str = "SignInPageBlueprint";
    const KIND: &'static str = "sign-in-page";
    const POINT: &'static str = point::SIGN_IN_PAGE;
    const PRODUCES: ContributionKind = ContributionKind::SignInPage;

    fn make(params: SignInPageParams) -> Result<ExtensionDefinition, PorticoError> {
        let loader = require(params.loader, Self::NAME, "loader")?;
        Ok(definition::<Self>(None, loader.map(Contribution::SignInPage)))
    }
}

// --- Nav content ---

#[derive(Debug, Default)]
pub struct NavContentParams {
    pub component: Option<NavContentComponent>,
}

impl NavContentParams {
    pub fn component(mut self, component: NavContentComponent) -> Self {
        self.component = Some(component);
        self
    }
}

pub struct NavContentBlueprint;

impl Blueprint for NavContentBlueprint {
    type Params = NavContentParams;
    const NAME: &'static str = "NavContentBlueprint";
    const KIND: &'static str = "nav-content";
    const POINT: &'static str = point::NAV_CONTENT;
    const PRODUCES: ContributionKind = ContributionKind::NavContent;

    fn make(params: NavContentParams) -> Result<ExtensionDefinition, PorticoError> {
        let component = require(params.component, Self::NAME, "component")?;
        Ok(definition::<Self>(
            None,
            Loader::ready(Contribution::NavContent(component)),
        ))
    }
}

// --- Nav item ---

#[derive(Debug, Default)]
pub struct NavItemParams {
    pub name: Option<String>,
    pub title: Option<String>,
    pub to: Option<String>,
    pub icon: Option<String>,
}

impl NavItemParams {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

pub struct NavItemBlueprint;

impl Blueprint for NavItemBlueprint {
    type Params = NavItemParams;
    const NAME: &'static str = "NavItemBlueprint";
    const KIND: &'static str = "nav-item";
    const POINT: &'static str = point::NAV_ITEM;
    const PRODUCES: ContributionKind = ContributionKind::NavItem;

    fn make(params: NavItemParams) -> Result<ExtensionDefinition, PorticoError> {
        let title = require_text(params.title, Self::NAME, "title")?;
        let to = require_text(params.to, Self::NAME, "to")?;
        let item = NavItem {
            title,
            to,
            icon: params.icon,
        };
        Ok(definition::<Self>(
            params.name,
            Loader::ready(Contribution::NavItem(item)),
        ))
    }
}

// --- Entity card ---

#[derive(Debug, Default)]
pub struct EntityCardParams {
    pub name: Option<String>,
    pub loader: Option<Loader<EntityComponent>>,
    pub filter: Option<Filter>,
    pub card_type: Option<CardType>,
}

impl EntityCardParams {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn loader(mut self, loader: Loader<EntityComponent>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn card_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }
}

pub struct EntityCardBlueprint;

impl Blueprint for EntityCardBlueprint {
    type Params = EntityCardParams;
    const NAME: &'static str = "EntityCardBlueprint";
    const KIND: &'static str = "entity-card";
    const POINT: &'static str = point::ENTITY_CARD;
    const PRODUCES: ContributionKind = ContributionKind::EntityCard;

    fn make(params: EntityCardParams) -> Result<ExtensionDefinition, PorticoError> {
        let loader = require(params.loader, Self::NAME, "loader")?;
        let card_type = params.card_type;
        let loader = loader.map(move |component| {
            Contribution::EntityCard(EntityCard {
                card_type,
                component,
            })
        });
        let mut def = definition::<Self>(params.name, loader);
        def.filter = params.filter;
        Ok(def)
    }
}

// --- Entity content ---

#[derive(Debug, Default)]
pub struct EntityContentParams {
    pub name: Option<String>,
    pub path: Option<String>,
    pub title: Option<String>,
    pub loader: Option<Loader<EntityComponent>>,
    pub filter: Option<Filter>,
}

impl EntityContentParams {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn loader(mut self, loader: Loader<EntityComponent>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }
}

pub struct EntityContentBlueprint;

impl Blueprint for EntityContentBlueprint {
    type Params = EntityContentParams;
    const NAME: &'static str = "EntityContentBlueprint";
    const KIND: &'static str = "entity-content";
    const POINT: &'static str = point::ENTITY_CONTENT;
    const PRODUCES: ContributionKind = ContributionKind::EntityContent;

    fn make(params: EntityContentParams) -> Result<ExtensionDefinition, PorticoError> {
        let loader = require(params.loader, Self::NAME, "loader")?;
        let path = require_text(params.path, Self::NAME, "path")?;
        let title = require_text(params.title, Self::NAME, "title")?;
        let path = path.trim_start_matches('/').to_string();
        let loader = loader.map(move |component| {
            Contribution::EntityContent(EntityContent {
                path: path.clone(),
                title: title.clone(),
                component,
            })
        });
        let mut def = definition::<Self>(params.name, loader);
        def.filter = params.filter;
        Ok(def)
    }
}

// --- Page ---

#[derive(Debug, Default)]
pub struct PageParams {
    pub name: Option<String>,
    pub path: Option<String>,
    pub loader: Option<Loader<ViewNode>>,
}

impl PageParams {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn loader(mut self, loader: Loader<ViewNode>) -> Self {
        self.loader = Some(loader);
        self
    }
}

pub struct PageBlueprint;

impl Blueprint for PageBlueprint {
    type Params = PageParams;
    const NAME: &'static str = "PageBlueprint";
    const KIND: &'static str = "page";
    const POINT: &'static str = point::PAGE;
    const PRODUCES: ContributionKind = ContributionKind::Page;

    fn make(params: PageParams) -> Result<ExtensionDefinition, PorticoError> {
        let loader = require(params.loader, Self::NAME, "loader")?;
        let path = require_text(params.path, Self::NAME, "path")?;
        if !path.starts_with('/') {
            return Err(PorticoError::Config(format!(
                "{}: path `{path}` must be absolute",
                Self::NAME
            )));
        }
        let loader = loader.map(move |view| {
            Contribution::Page(Page {
                path: path.clone(),
                view,
            })
        });
        Ok(definition::<Self>(params.name, loader))
    }
}
