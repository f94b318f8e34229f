use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use viking_memory::memory::ConversationMessage;
use viking_memory::tags::{project_container_tag, user_container_tag};
use viking_memory::{KeywordDetector, OperationResult, VikingConfig, VikingMemoryClient};

use super::{Cli, Commands, TagKind};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the result and turn its success flag into the process exit code.
fn report<T: Serialize>(result: &OperationResult<T>) -> Result<ExitCode> {
    print_json(result)?;
    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Parse `role:content`. Only the first colon splits, so content may
/// contain colons.
pub fn parse_message(raw: &str) -> Result<ConversationMessage> {
    let Some((role, content)) = raw.split_once(':') else {
        bail!("message must be `role:content`, got {raw:?}");
    };
    let role = role.trim();
    if role.is_empty() {
        bail!("message role is empty in {raw:?}");
    }
    Ok(ConversationMessage::new(role, content))
}

pub async fn dispatch(cli: Cli, config: VikingConfig) -> Result<ExitCode> {
    // Local helpers first; they need no credentials.
    match &cli.command {
        Commands::Tag { kind } => {
            let prefix = &config.container_tag_prefix;
            let tag = match kind {
                TagKind::User { identity } => user_container_tag(prefix, identity),
                TagKind::Project { directory } => project_container_tag(prefix, directory),
            };
            println!("{tag}");
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Keywords { text } => {
            let detector = KeywordDetector::new(config.keyword_patterns.as_slice());
            print_json(&serde_json::json!({ "detected": detector.detects(text) }))?;
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let client = VikingMemoryClient::from_config(&config)
        .context("Viking memory is not configured")?;
    info!(backend = client.backend_name(), "memory client ready");

    match cli.command {
        Commands::Search { query, tag } => report(&client.search_memories(&query, &tag).await),
        Commands::Profile { tag, query } => {
            report(&client.get_profile(&tag, query.as_deref()).await)
        }
        Commands::Add { content, tag } => report(&client.add_memory(&content, &tag, None).await),
        Commands::Delete { id } => report(&client.delete_memory(&id).await),
        Commands::List { tag, limit } => report(&client.list_memories(&tag, limit).await),
        Commands::Experience { query } => report(&client.search_experience_cards(&query).await),
        Commands::Ingest {
            conversation,
            tags,
            messages,
        } => {
            let messages = messages
                .iter()
                .map(String::as_str)
                .map(parse_message)
                .collect::<Result<Vec<_>>>()?;
            report(
                &client
                    .ingest_conversation(&conversation, &messages, &tags, None)
                    .await,
            )
        }
        Commands::Tag { .. } | Commands::Keywords { .. } => Ok(ExitCode::SUCCESS),
    }
}
