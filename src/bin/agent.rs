//! hostbridge-agent - one-shot agent runner.
//!
//! Takes a goal on the command line, runs a single agent turn against a
//! running bridge, and prints the final answer.

use std::sync::Arc;

use hostbridge::agent::{AgentLoop, HttpBridgeClient};
use hostbridge::config::Config;
use hostbridge::llm::OpenRouterClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostbridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let goal = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if goal.trim().is_empty() {
        anyhow::bail!("usage: hostbridge-agent <goal text>");
    }

    let config = Config::from_env()?;
    let api_key = config.require_api_key()?.to_string();

    let llm = Arc::new(OpenRouterClient::new(api_key, config.default_model.clone()));
    let transport = Arc::new(HttpBridgeClient::new(
        config.bridge_url.clone(),
        config.token.clone(),
    )?);

    let agent = AgentLoop::new(llm, transport).with_max_steps(config.max_steps);
    let mut conversation = agent.new_conversation();
    let answer = agent.run_turn(&goal, &mut conversation).await?;

    println!("{}", answer);
    Ok(())
}
