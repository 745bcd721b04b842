//! JSON-lines transport for the method channel
//!
//! Each input line is one [`MethodCall`]; each gets exactly one reply line.

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use crate::Result;
use super::{MethodCall, MethodChannel, MethodResult};

#[derive(Debug, Serialize)]
struct Reply {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(flatten)]
    result: MethodResult,
}

/// Serve calls until the reader reaches EOF
///
/// Blank lines are skipped. A line that is not a valid call gets a
/// `malformed_request` error reply and the loop continues. Returns the number
/// of replies written.
pub async fn serve<R, W>(channel: &MethodChannel, reader: R, mut writer: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut replies = 0;

    tracing::info!("Serving method channel {}", channel.name());

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<MethodCall>(line) {
            Ok(call) => Reply {
                id: call.id,
                result: channel.invoke(&call),
            },
            Err(e) => {
                tracing::warn!("Malformed request: {}", e);
                Reply {
                    id: recover_id(line),
                    result: MethodResult::error("malformed_request", e.to_string()),
                }
            }
        };

        let mut out = serde_json::to_vec(&reply)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
        replies += 1;
    }

    tracing::info!("Method channel {} closed after {} replies", channel.name(), replies);
    Ok(replies)
}

/// Best-effort `id` from a line that is JSON but not a valid call
fn recover_id(line: &str) -> Option<u64> {
    serde_json::from_str::<Value>(line)
        .ok()?
        .get("id")
        .and_then(Value::as_u64)
}
