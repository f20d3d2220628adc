use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::CashCard;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(obj)) = (data, response.as_object_mut()) {
                obj.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": false,
                    "error": message
                }))?
            );
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output cash cards as a JSON array or an aligned table
pub fn output_cards(output_format: &OutputFormat, cards: &[CashCard]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(cards)?);
        }
        OutputFormat::Text => {
            if cards.is_empty() {
                println!("No cash cards");
                return Ok(());
            }
            println!("{:>8}  {:>14}  {}", "ID", "AMOUNT", "OWNER");
            for card in cards {
                let id = card.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
                println!("{:>8}  {:>14}  {}", id, card.amount, card.owner);
            }
        }
    }
    Ok(())
}
