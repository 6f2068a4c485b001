//! Smoke-test the Gemini API directly: `GEMINI_API_KEY=... cargo run --example basic`

use gemini_client::GeminiClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = GeminiClient::from_env()?;

    println!("Model: {}", client.model());
    let answer = client
        .generate_text("Say OK if the Gemini API connection is working.")
        .await?;
    println!("Response: {}", answer.trim());

    Ok(())
}
