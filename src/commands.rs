//! CLI Command Handlers
//!
//! Implements the CLI commands by calling the resolver and the relay.
//! Each handler takes CLI args, config and Output, returns ExitCode.

use futures::{Stream, StreamExt};
use std::path::PathBuf;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::api::{ConverterClient, YoutubeClient};
use crate::cli::{ExitCode, MixCmd, Output, RelayCmd, RelaySummary};
use crate::config::Config;
use crate::mix::MixResolver;
use crate::models::StreamRequest;
use crate::stream::Relay;

// =============================================================================
// Mix Command
// =============================================================================

pub async fn mix_cmd(cmd: MixCmd, config: &Config, output: &Output) -> ExitCode {
    let api_key = match config.youtube_api_key() {
        Ok(key) => key,
        Err(e) => return output.fail(&e),
    };
    let resolver = MixResolver::new(YoutubeClient::new(api_key));
    let limit = cmd.limit.map(|l| l as usize).unwrap_or_else(|| config.limit());

    output.info(format!("Resolving mix for: {}", cmd.query));

    match resolver.resolve(&cmd.query, limit).await {
        Ok(mix) => {
            output.info(format!("Root: {} ({})", mix.root.title, mix.root.id));
            if let Err(e) = output.print(&mix) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.fail(&e),
    }
}

// =============================================================================
// Relay Command
// =============================================================================

pub async fn relay_cmd(cmd: RelayCmd, config: &Config, output: &Output) -> ExitCode {
    let request = StreamRequest::new(cmd.url.clone(), cmd.title.clone(), cmd.delivery_mode());

    // Source errors take precedence over configuration errors: a bad URL
    // never needs a key to be reported.
    if let Err(e) = crate::stream::extract_video_id(&request.source) {
        return output.fail(&e);
    }

    let api_key = match config.rapidapi_key() {
        Ok(key) => key,
        Err(e) => return output.fail(&e),
    };
    let relay = Relay::new(ConverterClient::new(api_key));

    let response = match relay.relay(&request).await {
        Ok(response) => response,
        Err(e) => return output.fail(&e),
    };

    for (name, value) in response.headers() {
        output.info(format!("{}: {}", name, value));
    }

    let (path, written) = if cmd.stdout {
        (None, pipe(response.body, tokio::io::stdout()).await)
    } else {
        let path = cmd
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&response.filename));
        let file = match tokio::fs::File::create(&path).await {
            Ok(file) => file,
            Err(e) => {
                return output.error(
                    format!("Cannot create {}: {}", path.display(), e),
                    ExitCode::Error,
                )
            }
        };
        (Some(path), pipe(response.body, file).await)
    };

    let bytes = match written {
        Ok(bytes) => bytes,
        Err(e) => return output.error(format!("Write failed: {}", e), ExitCode::Error),
    };

    if bytes == 0 {
        tracing::warn!(video_id = %response.video_id, "relay produced an empty stream");
    }

    let summary = RelaySummary {
        video_id: response.video_id,
        content_type: response.content_type.to_string(),
        content_disposition: response.content_disposition,
        filename: response.filename,
        path,
        bytes,
    };

    if cmd.stdout {
        // stdout carries the audio; keep the summary on stderr
        output.info(format!("Relayed {} bytes", summary.bytes));
    } else if let Err(e) = output.print(&summary) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

/// Drain a byte stream into a writer, one chunk at a time.
///
/// Returns the number of bytes written.
pub async fn pipe<S, W>(mut body: S, mut writer: W) -> std::io::Result<u64>
where
    S: Stream<Item = bytes::Bytes> + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;
    Ok(written)
}
