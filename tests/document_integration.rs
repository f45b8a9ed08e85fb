//! Integration tests for compound-document serialization.
//!
//! These tests drive the full path: a registry of resource types, a
//! resolved include set, and fetched instances as JSON values, down to the
//! exact document a client receives.

use lamina::prelude::*;
use lamina::query::smol_str::SmolStr;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn registry() -> Registry {
    Registry::builder()
        .register(ResourceType::new("user").attribute("name"))
        .register(ResourceType::new("profile").attribute("created_date"))
        .register(
            ResourceType::new("account")
                .relationship(
                    RelationshipSpec::to_one("owner", "user")
                        .attribute("owner_id")
                        .include_attribute("owner")
                        .linkage_required(),
                )
                .relationship(
                    RelationshipSpec::to_one("profile", "profile")
                        .attribute("profile_id")
                        .include_attribute("profile")
                        .linkage_required(),
                )
                .capabilities(
                    Capabilities::new()
                        .with_include(IncludeConfig::whitelist(["owner", "profile"])),
                ),
        )
        .build()
        .unwrap()
}

fn account() -> Value {
    json!({
        "id": 1,
        "owner_id": 99,
        "profile_id": 50,
        "owner": {"id": 99, "name": "test user"},
        "profile": {"id": 50, "created_date": "20170214"},
    })
}

fn include_for(registry: &Registry, raw: &str) -> IncludeRequest {
    let account_type = registry.get("account").unwrap();
    let config = account_type.capabilities.include.as_ref().unwrap();
    IncludeRequest::from_params([("include", raw)], config)
}

#[test]
fn test_compound_document_with_one_inclusion() {
    let registry = registry();
    let include = include_for(&registry, "owner");

    let doc = serialize_one(&registry, "account", &account(), include.resolved()).unwrap();

    let expected = json!({
        "data": {
            "type": "account",
            "id": "1",
            "relationships": {
                "owner": {"data": {"type": "user", "id": "99"}},
                "profile": {"data": {"type": "profile", "id": "50"}},
            },
        },
        "included": [
            {"type": "user", "id": "99", "attributes": {"name": "test user"}},
        ],
    });

    assert_eq!(serde_json::to_value(&doc).unwrap(), expected);
}

#[test]
fn test_no_inclusion_still_emits_required_linkage() {
    let registry = registry();
    let include = include_for(&registry, "");

    let doc = serialize_one(&registry, "account", &account(), include.resolved()).unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["data"]["relationships"]["owner"]["data"]["id"], "99");
    assert!(json.get("included").is_none());
}

#[test]
fn test_unknown_include_names_are_dropped_not_rejected() {
    let registry = registry();
    let include = include_for(&registry, "owner,garbage");

    let doc = serialize_one(&registry, "account", &account(), include.resolved()).unwrap();
    assert_eq!(doc.included.unwrap().len(), 1);
}

#[test]
fn test_shared_resource_reached_twice_included_once() {
    let registry = Registry::builder()
        .register(ResourceType::new("user").attribute("name"))
        .register(
            ResourceType::new("account")
                .relationship(RelationshipSpec::to_one("owner", "user"))
                .relationship(RelationshipSpec::to_one("manager", "user")),
        )
        .build()
        .unwrap();

    let user = json!({"id": 99, "name": "test user"});
    let value = json!({"id": 1, "owner": user.clone(), "manager": user});
    let include: lamina::query::indexmap::IndexSet<SmolStr> =
        ["owner", "manager"].into_iter().map(SmolStr::new).collect();

    let doc = serialize_one(&registry, "account", &value, &include).unwrap();
    assert_eq!(doc.included.unwrap().len(), 1);
}

#[test]
fn test_transitive_inclusion_walks_included_resources() {
    // account -> owner(user) -> posts; including both pulls the posts of
    // every included user into the same flattened side-list
    let registry = Registry::builder()
        .register(ResourceType::new("post").attribute("title"))
        .register(
            ResourceType::new("user")
                .attribute("name")
                .relationship(RelationshipSpec::to_many("posts", "post")),
        )
        .register(
            ResourceType::new("account")
                .relationship(RelationshipSpec::to_one("owner", "user")),
        )
        .build()
        .unwrap();

    let value = json!({
        "id": 1,
        "owner": {
            "id": 99,
            "name": "test user",
            "posts": [{"id": 5, "title": "hello"}],
        },
    });
    let include: lamina::query::indexmap::IndexSet<SmolStr> =
        ["owner", "posts"].into_iter().map(SmolStr::new).collect();

    let doc = serialize_one(&registry, "account", &value, &include).unwrap();
    let included = doc.included.unwrap();

    let types: Vec<&str> = included.iter().map(|r| r.resource_type.as_str()).collect();
    assert_eq!(types, vec!["user", "post"]);
}

#[test]
fn test_self_referential_cycle_terminates_by_dedup() {
    let registry = Registry::builder()
        .register(
            ResourceType::new("comment")
                .attribute("body")
                .relationship(RelationshipSpec::to_many("replies", "self")),
        )
        .build()
        .unwrap();

    let value = json!({
        "id": "1",
        "body": "root",
        "replies": [
            {"id": "2", "body": "reply", "replies": [
                {"id": "1", "body": "root", "replies": []},
            ]},
        ],
    });
    let include: lamina::query::indexmap::IndexSet<SmolStr> =
        ["replies"].into_iter().map(SmolStr::new).collect();

    let doc = serialize_one(&registry, "comment", &value, &include).unwrap();
    let included = doc.included.unwrap();
    assert_eq!(included.len(), 2);

    let ids: Vec<&str> = included.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
}

#[test]
fn test_collection_document_shares_one_side_list() {
    let registry = registry();
    let include = include_for(&registry, "owner");

    let accounts = vec![
        account(),
        json!({
            "id": 2,
            "owner_id": 99,
            "profile_id": 51,
            "owner": {"id": 99, "name": "test user"},
        }),
    ];

    let doc = serialize_many(&registry, "account", &accounts, include.resolved()).unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    // The shared owner appears once across both primary resources
    assert_eq!(json["included"].as_array().unwrap().len(), 1);
}

#[test]
fn test_paginated_document_shape() {
    let registry = registry();
    let include = include_for(&registry, "");

    let pager = PagerState::new(1, 20, 0);
    let links = build_links("http://api.test/accounts", &pager, "page[number]").unwrap();

    let doc = serialize_many(&registry, "account", &[], include.resolved())
        .unwrap()
        .with_links(links)
        .with_meta(build_meta(&pager));

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["meta"], json!({"count": 0}));
    // next/prev are explicit nulls; last points at page 1, never 0
    assert_eq!(json["links"]["next"], Value::Null);
    assert_eq!(json["links"]["prev"], Value::Null);
    assert!(json["links"]["last"].as_str().unwrap().contains("page%5Bnumber%5D=1"));
}

#[test]
fn test_serialization_fails_atomically_on_bad_instance() {
    let registry = registry();
    let include = include_for(&registry, "owner");

    // The included owner value has no id
    let broken = json!({
        "id": 1,
        "owner_id": 99,
        "profile_id": 50,
        "owner": {"name": "test user"},
    });

    let err = serialize_one(&registry, "account", &broken, include.resolved()).unwrap_err();
    assert!(matches!(err, DocumentError::MissingId { .. }));
}
