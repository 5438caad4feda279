// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `portico entity` command implementation.

use portico_app::build_portal;
use portico_config::model::PorticoConfig;
use portico_core::{EntityContext, PorticoError};
use portico_plugin::ActiveApp;
use portico_plugin::contribution::CardType;
use portico_plugin::ViewNode;
use serde::Serialize;

/// Parse a `KEY=VALUE` annotation argument.
pub fn parse_annotation(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

#[derive(Debug, Serialize)]
pub struct CardView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
    pub view: ViewNode,
}

#[derive(Debug, Serialize)]
pub struct ContentView {
    pub id: String,
    pub path: String,
    pub title: String,
    pub view: ViewNode,
}

#[derive(Debug, Serialize)]
pub struct EntityPage {
    pub entity: String,
    pub cards: Vec<CardView>,
    pub contents: Vec<ContentView>,
}

/// Render everything that applies to `entity`.
pub fn entity_page(active: &ActiveApp, entity: &EntityContext) -> EntityPage {
    EntityPage {
        entity: entity.entity_ref(),
        cards: active
            .entity_cards(entity)
            .into_iter()
            .map(|(id, card)| CardView {
                id: id.to_string(),
                card_type: card.card_type,
                view: card.component.render(entity),
            })
            .collect(),
        contents: active
            .entity_contents(entity)
            .into_iter()
            .map(|(id, content)| ContentView {
                id: id.to_string(),
                path: content.path.clone(),
                title: content.title.clone(),
                view: content.component.render(entity),
            })
            .collect(),
    }
}

/// Run the `portico entity` command.
pub async fn run_entity(
    config: PorticoConfig,
    entity: &EntityContext,
    json: bool,
) -> Result<(), PorticoError> {
    let portal = build_portal(config)?;
    let active = portal.app.activate().await?;
    let page = entity_page(&active, entity);

    if json {
        let out = serde_json::to_string_pretty(&page)
            .map_err(|e| PorticoError::Internal(format!("failed to serialize output: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    println!("{}", page.entity);
    println!("cards:");
    for card in &page.cards {
        let card_type = card.card_type.map(|t| format!(" [{t}]")).unwrap_or_default();
        println!("  {}{card_type}", card.id);
    }
    println!("tabs:");
    for content in &page.contents {
        println!("  /{:<24} {} ({})", content.path, content.title, content.id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_plugin::catalog::{ARGOCD_APP_SELECTOR, KUBERNETES_ID};
    use portico_test_utils::entity;

    #[test]
    fn annotation_parsing() {
        assert_eq!(
            parse_annotation("argocd/app-name=svc"),
            Ok(("argocd/app-name".to_string(), "svc".to_string()))
        );
        assert_eq!(
            parse_annotation("selector=app=svc"),
            Ok(("selector".to_string(), "app=svc".to_string()))
        );
        assert!(parse_annotation("=svc").is_err());
        assert!(parse_annotation("novalue").is_err());
    }

    #[tokio::test]
    async fn entity_page_reflects_annotations() {
        let portal = build_portal(PorticoConfig::default()).unwrap();
        let active = portal.app.activate().await.unwrap();

        let bare = entity_page(&active, &entity("Component", "svc", &[]));
        let bare_cards: Vec<&str> = bare.cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(bare_cards, vec!["entity-card:catalog/about"]);

        let rich = entity_page(
            &active,
            &entity(
                "Component",
                "svc",
                &[(ARGOCD_APP_SELECTOR, "app=svc"), (KUBERNETES_ID, "svc")],
            ),
        );
        assert!(rich.cards.iter().any(|c| c.id == "entity-card:argocd/overview"));
        let paths: Vec<&str> = rich.contents.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["kubernetes", "kyverno-policy-reports", "scaffolder", "argocd"]
        );
    }
}
