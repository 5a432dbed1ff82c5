use anyhow::Result;
use dotenv::dotenv;
use product_cost_analyzer::{CostAnalyzer, GeminiClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let mut args = std::env::args().skip(1);
    let product = args.next().unwrap_or_else(|| "Smart Kiosk".to_string());
    let place = args.next().unwrap_or_else(|| "Dubai, UAE".to_string());

    let client = GeminiClient::from_env()?;
    let analyzer = CostAnalyzer::new(client);

    println!("🔍 Estimating costs for \"{}\" in \"{}\"...", product, place);
    let analysis = analyzer.analyze(&product, &place).await;

    if let Some(error) = &analysis.error {
        eprintln!("⚠️  Analysis degraded: {}", error);
    }

    let report = &analysis.report;
    println!("\n=== Cost Report: {} ({}) ===", report.product, report.place);
    for category in &report.categories {
        println!("\n{}", category.title);
        for item in &category.items {
            println!(
                "  {} x{}  {:.2} {}  ({})",
                item.name, item.quantity, item.price, report.currency, item.specs
            );
        }
        println!("  Subtotal: {:.2} {}", category.subtotal, report.currency);
    }
    println!("\nGrand total: {:.2} {}", report.grand_total, report.currency);

    if let Some(raw) = &analysis.raw {
        std::fs::write("raw_model_data.json", serde_json::to_string_pretty(raw)?)?;
        println!("💾 Raw model data saved to raw_model_data.json");
    }

    Ok(())
}
