use serde_json::json;

use crate::cli::client::CashCardClient;
use crate::cli::utils::{output_cards, output_success};
use crate::cli::{Commands, OutputFormat};

pub async fn handle(client: &CashCardClient, cmd: Commands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        Commands::List { page, size, sort } => {
            let cards = client.list(page, size, &sort).await?;
            output_cards(&output_format, &cards)
        }
        Commands::Get { id } => {
            let card = client.get(id).await?;
            output_cards(&output_format, std::slice::from_ref(&card))
        }
        Commands::Create { amount } => {
            let location = client.create(amount).await?;
            output_success(
                &output_format,
                &format!("Created cash card at {}", location),
                Some(json!({ "location": location })),
            )
        }
        Commands::Update { id, amount } => {
            client.update(id, amount).await?;
            output_success(
                &output_format,
                &format!("Updated cash card {}", id),
                Some(json!({ "id": id, "amount": amount.to_string() })),
            )
        }
        Commands::Delete { id } => {
            client.delete(id).await?;
            output_success(&output_format, &format!("Deleted cash card {}", id), Some(json!({ "id": id })))
        }
    }
}
