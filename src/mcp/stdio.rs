// src/mcp/stdio.rs
// Line-delimited JSON-RPC transport: one request per input line, one
// response per output line.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::mcp::handle_mcp_request;
use crate::mcp::protocol::{error_codes, Request, Response};
use crate::tools::ToolDispatcher;

fn parse_line(line: &str) -> Result<Request, Response> {
    serde_json::from_str(line).map_err(|e| {
        warn!("Rejecting malformed MCP line: {}", e);
        Response::error(Value::Null, error_codes::PARSE_ERROR, format!("Parse error: {}", e))
    })
}

/// Serves requests from `reader` until EOF. Notifications get no output line.
pub async fn serve<R, W>(reader: R, mut writer: W, dispatcher: &ToolDispatcher) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("MCP <- {}", line);

        let response = match parse_line(line) {
            Ok(request) => handle_mcp_request(request, dispatcher).await,
            Err(response) => Some(response),
        };
        let Some(response) = response else { continue };

        let mut encoded = serde_json::to_vec(&response)?;
        debug!("MCP -> {}", String::from_utf8_lossy(&encoded));
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
    }

    info!("MCP input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::ChainExecutor;
    use crate::error::ChainError;
    use async_trait::async_trait;
    use ethers_core::abi::Token;
    use ethers_core::types::{Address, Bytes, H256};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::io::BufReader;

    struct OfflineExecutor;

    #[async_trait]
    impl ChainExecutor for OfflineExecutor {
        async fn read_call(&self, _: Address, _: &str, _: Vec<Token>) -> Result<Bytes, ChainError> {
            Err(ChainError::Rpc("offline".into()))
        }

        async fn write_call(&self, _: Address, _: &str, _: Vec<Token>) -> Result<H256, ChainError> {
            Err(ChainError::Rpc("offline".into()))
        }
    }

    async fn run(input: &str) -> Vec<Value> {
        let dispatcher = ToolDispatcher::new(Arc::new(OfflineExecutor), Address::zero(), "Rootstock");
        let mut output = Vec::new();
        serve(BufReader::new(input.as_bytes()), &mut output, &dispatcher)
            .await
            .unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_one_response_line_per_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"get_token_address","params":{"tokenName":"DOC"}}"#,
            "\n",
        );
        let responses = run(input).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], json!(1));
        assert_eq!(responses[0]["result"]["tools"].as_array().unwrap().len(), 4);
        assert_eq!(responses[1]["id"], json!(2));
        assert_eq!(responses[1]["result"]["found"], json!(true));
    }

    #[tokio::test]
    async fn test_malformed_line_gets_parse_error_and_loop_continues() {
        let input = "{not json\n{\"id\":7,\"method\":\"initialize\"}";
        let responses = run(input).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["error"]["code"], json!(error_codes::PARSE_ERROR));
        assert!(responses[0].get("result").is_none());
        assert_eq!(responses[1]["id"], json!(7));
        assert_eq!(responses[1]["result"]["serverInfo"]["name"], "rootstock_agent");
    }
}
