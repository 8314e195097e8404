use std::env;

use tracing::error;
use uuid::Uuid;

use wayfarer::models::request::{CallerContext, GenerateOverrides};
use wayfarer::{Config, PlannerService, log};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
	// Load our environment variables
	dotenvy::dotenv().ok();
	log::init_panic_handler();
	log::init_logger();

	let config = Config::from_env()?;

	// Startup verifies every artifact: scorers are load-or-die, the
	// reorderer downgrades to disabled inside the service.
	let service = PlannerService::from_config(config).await?;

	// The HTTP layer owns transport in production; this binary drives one
	// generation from the command line.
	let text = env::args().skip(1).collect::<Vec<_>>().join(" ");
	if text.trim().is_empty() {
		eprintln!("usage: wayfarer <free-text travel request>");
		std::process::exit(2);
	}

	let ctx = CallerContext { user_id: Uuid::new_v4(), preferences: None };
	match service.generate(&text, &ctx, &GenerateOverrides::default()).await {
		Ok(itinerary) => println!("{}", serde_json::to_string_pretty(&itinerary)?),
		Err(e) => {
			error!("Itinerary generation failed: {e}");
			eprintln!("{}: {e}", e.kind());
			std::process::exit(1);
		}
	}

	Ok(())
}
