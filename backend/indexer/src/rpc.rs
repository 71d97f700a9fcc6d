//! Soroban RPC client: polls `getEvents` and decodes Duckly events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried.
//! * JSON-RPC `-32600` / `-32601` are hard failures and surface immediately.
//!
//! ## Decoding
//!
//! Events are requested with `xdrFormat: "base64"`, so topics and data arrive
//! as base64 XDR `ScVal`s and are decoded by [`crate::xdr`]. JSON-shaped
//! entries (`{"type":"symbol","value":"minted"}`) are still accepted.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{DucklyEvent, EventKind};
use crate::xdr;

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Topic list, JSON-decoded or base64 XDR
    pub topic: Vec<String>,
    /// Event data, base64 XDR or JSON
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `contract_ids`: every watched contract; one filter covers them all.
/// * `start_ledger`: the ledger sequence to scan from (inclusive).
/// * `cursor`: optional opaque pagination cursor from a previous response.
/// * `limit`: maximum number of events to return.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventsPage> {
    let mut backoff = INITIAL_BACKOFF_SECS;
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": build_params(contract_ids, start_ledger, cursor, limit),
    });

    loop {
        let resp = match client.post(rpc_url).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                back_off(&mut backoff).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC (will retry in {backoff}s)");
            back_off(&mut backoff).await;
            continue;
        }

        let body: RpcResponse = resp.json().await?;
        if let Some(err) = body.error {
            if is_hard_error(err.code) {
                return Err(IndexerError::Rpc {
                    code: err.code,
                    message: err.message,
                });
            }
            warn!(
                "RPC soft error (will retry in {backoff}s): {} {}",
                err.code, err.message
            );
            back_off(&mut backoff).await;
            continue;
        }

        let result = body.result.ok_or_else(|| {
            IndexerError::EventParse("Empty result from getEvents".to_string())
        })?;
        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );
        return Ok(EventsPage {
            events: result.events,
            cursor: result.cursor,
            latest_ledger: result.latest_ledger,
        });
    }
}

/// One page of `getEvents` output.
#[derive(Debug)]
pub struct EventsPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

/// Invalid request / unknown method: retrying cannot help.
fn is_hard_error(code: i64) -> bool {
    code == -32600 || code == -32601
}

async fn back_off(backoff: &mut u64) {
    tokio::time::sleep(Duration::from_secs(*backoff)).await;
    *backoff = next_backoff(*backoff);
}

fn next_backoff(current: u64) -> u64 {
    (current * 2).min(MAX_BACKOFF_SECS)
}

fn build_params(contract_ids: &[String], start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": contract_ids
            }
        ],
        "pagination": {
            "limit": limit
        },
        "xdrFormat": "base64"
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a page of raw RPC events into [`DucklyEvent`]s.
///
/// Events from failed contract calls are dropped.
pub fn decode_events(raw: &[RawEvent]) -> Vec<DucklyEvent> {
    raw.iter()
        .enumerate()
        .filter_map(|(position, e)| decode_single(e, position))
        .collect()
}

fn decode_single(raw: &RawEvent, position: usize) -> Option<DucklyEvent> {
    if raw.in_successful_contract_call == Some(false) {
        return None;
    }

    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);
    let tx_hash = raw.tx_hash.as_deref().and_then(normalise_tx_hash);

    let event_id = raw
        .id
        .clone()
        .or_else(|| raw.paging_token.clone())
        .unwrap_or_else(|| {
            format!("{ledger}:{}:{position}", tx_hash.as_deref().unwrap_or("-"))
        });

    let subject = raw.topic.get(1).map(|t| extract_symbol(t));
    let value = match &raw.value {
        Value::String(encoded) => xdr::decode_scval(encoded).unwrap_or_else(|| raw.value.clone()),
        other => other.clone(),
    };
    let data = decode_data(&value, kind, subject.as_deref());

    Some(DucklyEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        subject,
        actor: data.actor,
        amount: data.amount,
        quantity: data.quantity,
        ledger,
        timestamp,
        contract_id: raw.contract_id.clone().unwrap_or_default(),
        tx_hash,
    })
}

#[derive(Debug, Default)]
struct EventData {
    actor: Option<String>,
    amount: Option<String>,
    quantity: Option<i64>,
}

/// Pull apart the JSON `value` blob that Soroban returns for event data.
fn decode_data(value: &Value, kind: EventKind, subject: Option<&str>) -> EventData {
    let subject = subject.map(String::from);
    match kind {
        EventKind::Minted => EventData {
            actor: extract_field(value, &["to"]).or(subject),
            amount: extract_field(value, &["price"]),
            quantity: extract_quantity(value),
        },
        EventKind::BatchMint => EventData {
            actor: extract_field(value, &["to"]).or(subject),
            amount: None,
            quantity: extract_quantity(value),
        },
        EventKind::PaymentProcessed => EventData {
            actor: subject,
            amount: scalar_or_field(value, &["amount"]),
            quantity: None,
        },
        EventKind::Withdrawn => EventData {
            actor: extract_field(value, &["to"]).or(subject),
            amount: scalar_or_field(value, &["amount"]),
            quantity: None,
        },
        // Data is the caller address.
        EventKind::BatchOpened
        | EventKind::BatchClosed
        | EventKind::Paused
        | EventKind::Unpaused => EventData {
            actor: scalar_or_field(value, &["address", "caller", "by"]),
            ..EventData::default()
        },
        EventKind::Transferred => EventData {
            actor: extract_field(value, &["to"]),
            ..EventData::default()
        },
        EventKind::Burned => EventData {
            actor: scalar_or_field(value, &["owner"]),
            ..EventData::default()
        },
        EventKind::OwnershipTransferred => EventData {
            actor: scalar_or_field(value, &["new_owner"]),
            ..EventData::default()
        },
        EventKind::Unknown => EventData::default(),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("value").and_then(scalar),
        _ => None,
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .find_map(scalar)
}

/// Data that is either a bare scalar or a struct holding one of `keys`.
fn scalar_or_field(value: &Value, keys: &[&str]) -> Option<String> {
    extract_field(value, keys).or_else(|| scalar(value))
}

fn extract_quantity(value: &Value) -> Option<i64> {
    extract_field(value, &["quantity"]).and_then(|q| q.parse().ok())
}

/// Parse a topic entry: base64 XDR, RPC JSON, or a bare string.
fn topic_value(raw: &str) -> Value {
    xdr::decode_scval(raw)
        .or_else(|| serde_json::from_str(raw).ok())
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Text form of a topic: the event symbol, an address, a tier or a token id.
fn extract_symbol(raw: &str) -> String {
    scalar(&topic_value(raw)).unwrap_or_else(|| raw.to_string())
}

/// Lower-case a 32-byte hex transaction hash; anything else is dropped.
fn normalise_tx_hash(raw: &str) -> Option<String> {
    hex::decode(raw)
        .ok()
        .filter(|bytes| bytes.len() == 32)
        .map(hex::encode)
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use stellar_xdr::curr::ScVal;

    use super::*;
    use crate::xdr::tests::{account, account_strkey, encode, i128_val, strukt, symbol};

    const TX: &str = "A1B2C3D4E5F60718293A4B5C6D7E8F90A1B2C3D4E5F60718293A4B5C6D7E8F90";

    fn raw_event(topic: Vec<String>, value: Value) -> RawEvent {
        RawEvent {
            topic,
            value,
            contract_id: Some("CSALE".to_string()),
            tx_hash: Some(TX.to_string()),
            id: Some("0004294967296-0000000001".to_string()),
            ledger: Some(1000),
            ledger_closed_at: Some("2024-01-01T00:00:00Z".to_string()),
            in_successful_contract_call: Some(true),
            paging_token: None,
        }
    }

    fn json_topic(kind: &str, value: &str) -> String {
        json!({ "type": kind, "value": value }).to_string()
    }

    fn xdr_symbol(name: &str) -> String {
        encode(&symbol(name))
    }

    #[test]
    fn event_kind_from_topic() {
        assert_eq!(EventKind::from_topic("minted"), EventKind::Minted);
        assert_eq!(EventKind::from_topic("batch_mnt"), EventKind::BatchMint);
        assert_eq!(EventKind::from_topic("payment"), EventKind::PaymentProcessed);
        assert_eq!(EventKind::from_topic("batch_opn"), EventKind::BatchOpened);
        assert_eq!(EventKind::from_topic("batch_cls"), EventKind::BatchClosed);
        assert_eq!(EventKind::from_topic("withdraw"), EventKind::Withdrawn);
        assert_eq!(EventKind::from_topic("paused"), EventKind::Paused);
        assert_eq!(EventKind::from_topic("unpaused"), EventKind::Unpaused);
        assert_eq!(EventKind::from_topic("transfer"), EventKind::Transferred);
        assert_eq!(EventKind::from_topic("burned"), EventKind::Burned);
        assert_eq!(EventKind::from_topic("owner"), EventKind::OwnershipTransferred);
        assert_eq!(EventKind::from_topic("something_else"), EventKind::Unknown);
    }

    #[test]
    fn event_kind_as_str() {
        assert_eq!(EventKind::BatchMint.as_str(), "batch_mint");
        assert_eq!(EventKind::PaymentProcessed.as_str(), "payment_processed");
        assert_eq!(EventKind::OwnershipTransferred.as_str(), "ownership_transferred");
    }

    #[test]
    fn extract_symbol_from_json() {
        assert_eq!(extract_symbol(&json_topic("symbol", "minted")), "minted");
    }

    #[test]
    fn extract_symbol_from_xdr() {
        assert_eq!(extract_symbol(&xdr_symbol("batch_mnt")), "batch_mnt");
        assert_eq!(extract_symbol(&xdr_symbol("owner")), "owner");
    }

    #[test]
    fn extract_symbol_raw_fallback() {
        assert_eq!(extract_symbol("paused"), "paused");
    }

    #[test]
    fn decode_minted_event() {
        let raw = raw_event(
            vec![json_topic("symbol", "minted"), json_topic("address", "GBUYER")],
            json!({
                "to": "GBUYER",
                "first_token_id": 4,
                "quantity": 3,
                "price": "560000000",
            }),
        );

        let events = decode_events(&[raw]);
        assert_eq!(events.len(), 1);
        let ev = &events[0];
        assert_eq!(ev.event_type, "minted");
        assert_eq!(ev.subject.as_deref(), Some("GBUYER"));
        assert_eq!(ev.actor.as_deref(), Some("GBUYER"));
        assert_eq!(ev.amount.as_deref(), Some("560000000"));
        assert_eq!(ev.quantity, Some(3));
        assert_eq!(ev.ledger, 1000);
        assert_eq!(ev.timestamp, 1_704_067_200);
        assert_eq!(ev.event_id, "0004294967296-0000000001");
        assert_eq!(ev.tx_hash.as_deref(), Some(TX.to_lowercase().as_str()));
    }

    #[test]
    fn decode_genesis_mint_pair() {
        let batch = raw_event(
            vec![xdr_symbol("batch_mnt"), json_topic("address", "GTO")],
            json!({ "to": "GTO", "start_token_id": 0, "quantity": 5 }),
        );
        let payment = raw_event(
            vec![xdr_symbol("payment"), json_topic("address", "GPAYER")],
            json!({ "type": "i128", "value": "4250000000" }),
        );

        let events = decode_events(&[batch, payment]);
        assert_eq!(events[0].event_type, "batch_mint");
        assert_eq!(events[0].actor.as_deref(), Some("GTO"));
        assert_eq!(events[0].quantity, Some(5));
        assert_eq!(events[1].event_type, "payment_processed");
        assert_eq!(events[1].actor.as_deref(), Some("GPAYER"));
        assert_eq!(events[1].amount.as_deref(), Some("4250000000"));
    }

    #[test]
    fn decode_payment_from_xdr_address_and_i128() {
        let raw = raw_event(
            vec![xdr_symbol("payment"), encode(&account(7))],
            json!(encode(&i128_val(4_250_000_000))),
        );

        let events = decode_events(&[raw]);
        let payer = account_strkey(7);
        assert_eq!(events[0].event_type, "payment_processed");
        assert_eq!(events[0].subject.as_deref(), Some(payer.as_str()));
        assert_eq!(events[0].actor.as_deref(), Some(payer.as_str()));
        assert_eq!(events[0].amount.as_deref(), Some("4250000000"));
    }

    #[test]
    fn decode_minted_from_xdr_struct() {
        let data = strukt(vec![
            (
                "allocation",
                strukt(vec![
                    ("apple_tree_holders", ScVal::U32(0)),
                    ("gueio_holders", ScVal::U32(1)),
                    ("open", ScVal::U32(2)),
                ]),
            ),
            ("first_token_id", ScVal::U32(4)),
            ("price", i128_val(560_000_000)),
            ("quantity", ScVal::U32(3)),
            ("to", account(2)),
        ]);
        let raw = raw_event(
            vec![encode(&symbol("minted")), encode(&account(2))],
            json!(encode(&data)),
        );

        let events = decode_events(&[raw]);
        let buyer = account_strkey(2);
        assert_eq!(events[0].event_type, "minted");
        assert_eq!(events[0].actor.as_deref(), Some(buyer.as_str()));
        assert_eq!(events[0].amount.as_deref(), Some("560000000"));
        assert_eq!(events[0].quantity, Some(3));
    }

    #[test]
    fn decode_batch_toggle_from_xdr_tier() {
        let tier = ScVal::Vec(Some(stellar_xdr::curr::ScVec(
            vec![symbol("AppleTreeHolders")].try_into().unwrap(),
        )));
        let raw = raw_event(
            vec![xdr_symbol("batch_cls"), encode(&tier)],
            json!(encode(&account(3))),
        );

        let events = decode_events(&[raw]);
        assert_eq!(events[0].event_type, "batch_closed");
        assert_eq!(events[0].subject.as_deref(), Some("AppleTreeHolders"));
        assert_eq!(events[0].actor, Some(account_strkey(3)));
    }

    #[test]
    fn decode_burn_with_xdr_token_id() {
        let raw = raw_event(vec![xdr_symbol("burned"), encode(&ScVal::U32(17))], json!("GHOLDER"));

        let events = decode_events(&[raw]);
        assert_eq!(events[0].event_type, "burned");
        assert_eq!(events[0].subject.as_deref(), Some("17"));
        assert_eq!(events[0].actor.as_deref(), Some("GHOLDER"));
    }

    #[test]
    fn decode_batch_toggle_event() {
        let raw = raw_event(
            vec![json_topic("symbol", "batch_opn"), json_topic("symbol", "Open")],
            json!("GOWNER"),
        );

        let events = decode_events(&[raw]);
        assert_eq!(events[0].event_type, "batch_opened");
        assert_eq!(events[0].subject.as_deref(), Some("Open"));
        assert_eq!(events[0].actor.as_deref(), Some("GOWNER"));
    }

    #[test]
    fn failed_calls_are_skipped() {
        let mut raw = raw_event(vec![json_topic("symbol", "minted")], json!({}));
        raw.in_successful_contract_call = Some(false);
        assert!(decode_events(&[raw]).is_empty());
    }

    #[test]
    fn missing_id_is_synthesised() {
        let mut first = raw_event(vec![json_topic("symbol", "paused")], json!("GOWNER"));
        first.id = None;
        first.tx_hash = Some("not-hex".to_string());
        let second = RawEvent {
            paging_token: Some("PT-2".to_string()),
            id: None,
            ..first.clone()
        };

        let events = decode_events(&[first, second]);
        assert_eq!(events[0].event_id, "1000:-:0");
        assert_eq!(events[0].tx_hash, None);
        assert_eq!(events[1].event_id, "PT-2");
    }

    #[test]
    fn params_cover_every_contract() {
        let ids = vec!["CSALE".to_string(), "CGENESIS".to_string()];
        let params = build_params(&ids, 42, None, 100);
        assert_eq!(params["filters"][0]["contractIds"], json!(["CSALE", "CGENESIS"]));
        assert_eq!(params["startLedger"], json!(42));
        assert_eq!(params["xdrFormat"], json!("base64"));

        let params = build_params(&ids, 42, Some("CUR"), 100);
        assert_eq!(params["pagination"]["cursor"], json!("CUR"));
        assert!(params.get("startLedger").is_none());
    }

    #[test]
    fn backoff_doubles_up_to_cap() {
        assert_eq!(next_backoff(INITIAL_BACKOFF_SECS), 4);
        assert_eq!(next_backoff(32), MAX_BACKOFF_SECS);
        assert_eq!(next_backoff(MAX_BACKOFF_SECS), MAX_BACKOFF_SECS);
        assert!(is_hard_error(-32601));
        assert!(!is_hard_error(-32000));
    }

    #[test]
    fn parse_iso_timestamp() {
        let ts = parse_iso_to_unix("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(ts, 1_704_067_200);
    }
}
