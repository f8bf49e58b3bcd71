// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Integration tests for the script-tag module loader
//!
//! Drives [`ScriptLoader`] against the [`StaticHost`] reference host. The
//! loader registry is process-global, so assertions about ids and registry
//! state are relative to this test's own loads only.

use gantry_loader::{
    ExportValue, LoaderError, LoaderRegistry, ModuleNamespace, ScriptHost, ScriptLoader,
    StaticHost,
};
use std::sync::Arc;
use std::time::Duration;

const BASE: &str = "https://example.com/app/main.js";

fn value_namespace(value: f64) -> ModuleNamespace {
    let mut namespace = ModuleNamespace::new();
    namespace.set_export("value", ExportValue::Number(value));
    namespace
}

fn loader_with(modules: &[(&str, ModuleNamespace)]) -> (Arc<StaticHost>, ScriptLoader) {
    let host = Arc::new(StaticHost::new(BASE));
    for (url, namespace) in modules {
        host.register(*url, namespace.clone());
    }
    let loader = ScriptLoader::new(Arc::clone(&host) as Arc<dyn ScriptHost>).unwrap();
    (host, loader)
}

/// Cleanup after a settled handle (registry/document removal) runs on the
/// notifying task; give it a turn to land before inspecting shared state.
async fn settle_cleanup() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

#[tokio::test]
async fn test_successful_load_yields_namespace() {
    let (_host, loader) =
        loader_with(&[("https://example.com/app/util.js", value_namespace(42.0))]);

    let namespace = loader.load("./util.js").unwrap().await.unwrap();
    assert_eq!(namespace.get("value"), Some(&ExportValue::Number(42.0)));
}

#[tokio::test]
async fn test_successful_load_clears_registry_and_document() {
    let (host, loader) =
        loader_with(&[("https://example.com/app/util.js", value_namespace(1.0))]);

    let handle = loader.load("./util.js").unwrap();
    let id = handle.id();
    assert!(LoaderRegistry::global().contains(id));

    handle.await.unwrap();
    settle_cleanup().await;
    assert!(!LoaderRegistry::global().contains(id));
    assert!(!host.is_attached(id));
}

#[tokio::test]
async fn test_failed_load_rejects_with_host_error() {
    let (host, loader) = loader_with(&[]);

    let handle = loader.load("./missing.js").unwrap();
    let id = handle.id();

    match handle.await {
        Err(LoaderError::Load(event)) => {
            assert_eq!(event.url, "https://example.com/app/missing.js");
            assert!(event.message.contains("Failed to fetch"));
        }
        other => panic!("expected load error, got {other:?}"),
    }

    // The on-error path removed the entry before settling the handle
    assert!(!LoaderRegistry::global().contains(id));
    settle_cleanup().await;
    assert!(!host.is_attached(id));
}

#[tokio::test]
async fn test_concurrent_loads_settle_independently() {
    let slow_url = "https://example.com/app/slow.js";
    let fast_url = "https://example.com/app/fast.js";
    let (host, loader) = loader_with(&[
        (slow_url, value_namespace(1.0)),
        (fast_url, value_namespace(2.0)),
    ]);
    host.set_delay(slow_url, Duration::from_millis(100));

    let slow = loader.load("./slow.js").unwrap();
    let fast = loader.load("./fast.js").unwrap();

    // Ids are handed out in call order
    assert!(slow.id() < fast.id());

    // The later call completes first; the earlier one stays pending
    let slow_id = slow.id();
    let fast_namespace = fast.await.unwrap();
    assert_eq!(fast_namespace.get("value"), Some(&ExportValue::Number(2.0)));
    assert!(LoaderRegistry::global().contains(slow_id));

    let slow_namespace = slow.await.unwrap();
    assert_eq!(slow_namespace.get("value"), Some(&ExportValue::Number(1.0)));
}

#[tokio::test]
async fn test_same_url_loads_are_not_deduplicated() {
    let url = "https://example.com/app/shared.js";
    let (_host, loader) = loader_with(&[(url, value_namespace(9.0))]);

    let first = loader.load("./shared.js").unwrap();
    let second = loader.load("./shared.js").unwrap();
    assert_ne!(first.id(), second.id());

    let first = first.await.unwrap();
    let second = second.await.unwrap();
    assert_eq!(first, second);
    // Fresh load, fresh namespace object: no shared cached reference
    assert!(!Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_import_meta_url_from_stack() {
    let (_host, loader) = loader_with(&[]);
    assert_eq!(loader.import_meta().url, BASE);
}

#[tokio::test]
async fn test_failed_load_does_not_disturb_other_pending_load() {
    let good_url = "https://example.com/app/good.js";
    let (host, loader) = loader_with(&[(good_url, value_namespace(5.0))]);
    host.set_delay(good_url, Duration::from_millis(100));

    let good = loader.load("./good.js").unwrap();
    let bad = loader.load("./bad.js").unwrap();

    assert!(bad.await.is_err());
    assert!(LoaderRegistry::global().contains(good.id()));
    assert!(good.await.is_ok());
}

#[tokio::test]
async fn test_malformed_specifier_fails_before_injection() {
    let (host, loader) = loader_with(&[]);
    assert!(matches!(loader.load("https://"), Err(LoaderError::Url(_))));
    assert_eq!(host.attached_count(), 0);
}
