//! Mock JSON-RPC node and block explorer built on wiremock
#![allow(dead_code)]

use std::time::Duration;

use ethbal::ClientConfig;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const OWNER: &str = "0xAbC1230000000000000000000000000000000000";
pub const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

pub const ERC20_ABI: &str = r#"[{"type":"function","name":"balanceOf","stateMutability":"view","inputs":[{"name":"owner","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},{"type":"function","name":"decimals","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"uint8"}]},{"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}]"#;

/// JSON-RPC success reply that echoes the request id
pub struct RpcResult(pub Value);

impl Respond for RpcResult {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": request_id(request),
            "result": self.0,
        }))
    }
}

/// JSON-RPC error reply that echoes the request id
pub struct RpcError {
    pub code: i64,
    pub message: &'static str,
}

impl Respond for RpcError {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": request_id(request),
            "error": { "code": self.code, "message": self.message },
        }))
    }
}

fn request_id(request: &Request) -> Value {
    serde_json::from_slice::<Value>(&request.body)
        .ok()
        .and_then(|body| body.get("id").cloned())
        .unwrap_or(json!(0))
}

/// Route `rpc_method` to `responder`.
pub async fn mount_rpc(server: &MockServer, rpc_method: &str, responder: impl Respond + 'static) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(responder)
        .mount(server)
        .await;
}

/// A node that answers the liveness check.
pub async fn live_node() -> MockServer {
    let server = MockServer::start().await;
    mount_rpc(&server, "eth_blockNumber", RpcResult(json!("0x1229a70"))).await;
    server
}

/// 32-byte ABI word holding `value`, as a 0x-prefixed hex string.
pub fn uint_word(value: u128) -> String {
    format!("0x{:064x}", value)
}

/// Explorer envelope for a successful getabi lookup.
pub fn explorer_ok(abi: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "1",
        "message": "OK",
        "result": abi,
    }))
}

/// Route getabi for `address` to `response`, expecting `times` hits.
pub async fn mount_getabi(server: &MockServer, address: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "contract"))
        .and(query_param("action", "getabi"))
        .and(query_param("address", address))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

pub fn client_config(node: &MockServer, explorer: &MockServer) -> ClientConfig {
    ClientConfig {
        rpc_url: node.uri(),
        explorer_url: format!("{}/api", explorer.uri()),
        explorer_api_key: None,
        request_timeout: Duration::from_secs(5),
    }
}
