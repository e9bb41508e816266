use std::time::Duration;

use httpmock::prelude::*;
use shelfcheck_core::{Cell, RawTable};
use shelfcheck_narrative::{build_prompt, CandidateChain, GeminiClient, NarrativeError};
use shelfcheck_recon::{run, ShelfConfig};

fn dashboard() -> shelfcheck_recon::Dashboard {
    let t = Cell::from_text;
    let sales = RawTable::new(
        Some(vec!["Item de Estoque:".into(), "Valor Venda".into()]),
        vec![vec![t("7"), t("100")], vec![t("9"), t("100")]],
    );
    let inventory = RawTable::from_rows(vec![
        vec![t("7"), t("Cola branca"), t("UN"), Cell::Empty, Cell::Empty, t("0")],
        vec![t("8"), t("Lixa 120"), t("UN"), Cell::Empty, Cell::Empty, t("30")],
    ]);
    run(&sales, &inventory, &ShelfConfig::default()).unwrap()
}

#[test]
fn prompt_carries_both_views() {
    let prompt = build_prompt(&dashboard(), 10);
    assert!(prompt.starts_with("You are a retail inventory analyst."));
    assert!(prompt.contains("PHANTOM STOCK (stock on hand, no sales): showing 1 of 1"));
    assert!(prompt.contains("Lixa 120"));
    assert!(prompt.contains("CRITICAL STOCKOUT (tier A, zero stock): showing 1 of 1"));
    assert!(prompt.contains("Cola branca"));
}

#[test]
fn chain_falls_through_rate_limited_targets() {
    let server = MockServer::start();

    let flash = server.mock(|when, then| {
        when.method(POST).path("/v1beta/models/gemini-1.5-flash:generateContent");
        then.status(429).body("quota");
    });
    let pro = server.mock(|when, then| {
        when.method(POST).path("/v1beta/models/gemini-1.5-pro:generateContent");
        then.status(400)
            .json_body(serde_json::json!({ "error": { "status": "RESOURCE_EXHAUSTED" } }));
    });
    let legacy = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-pro:generateContent")
            .query_param("key", "secret")
            .body_includes("CRITICAL STOCKOUT");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "Reorder item 7 today." }] } }]
            }));
    });

    let config = ShelfConfig::default();
    let client = GeminiClient::new(&server.base_url(), "secret", Duration::from_secs(5)).unwrap();
    let chain = CandidateChain::new(config.narrative.candidates.clone(), Duration::ZERO);

    let outcome = chain.generate(&client, &build_prompt(&dashboard(), 10)).unwrap();

    flash.assert();
    pro.assert();
    legacy.assert();
    assert_eq!(outcome.target, "gemini-pro");
    assert_eq!(outcome.text, "Reorder item 7 today.");
    assert!(outcome.failures.iter().all(|f| f.error.is_rate_limited()));
}

#[test]
fn chain_reports_every_failure_when_exhausted() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(500).body("boom");
    });

    let client = GeminiClient::new(&server.base_url(), "secret", Duration::from_secs(5)).unwrap();
    let chain = CandidateChain::new(vec!["a".into(), "b".into()], Duration::ZERO);

    let err = chain.generate(&client, "p").unwrap_err();
    assert_eq!(err.failures.len(), 2);
    assert_eq!(err.failures[1].error, NarrativeError::Http(500, "boom".into()));
}
