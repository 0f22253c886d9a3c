use clap::Parser;
use review_bot::config::cli::{Command, Step};
use review_bot::core::{Document, EventOutcome, Key, Selector};
use review_bot::utils::{logger, validation::Validate};
use review_bot::{CliConfig, InMemoryDocument, ModalController, ReviewBotError};

fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!("❌ review-bot failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<(), ReviewBotError> {
    config.validate()?;
    let catalog = config.load_catalog()?;
    let markup = config.load_markup()?;

    if let Command::List = config.command {
        for (id, business) in catalog.iter() {
            println!(
                "{:<20} {:<20} {:.1} ★ ({} reviews)",
                id, business.name, business.average, business.review_count
            );
        }
        return Ok(());
    }

    let document = InMemoryDocument::scaffold(&markup, catalog.ids());
    let mut controller = ModalController::with_markup(document, catalog, markup)?;

    match &config.command {
        Command::List => {}
        Command::Show { business_id } => {
            if !controller.open(business_id) {
                tracing::warn!("No business '{}' in the catalog", business_id);
                println!("No business '{}' in the catalog; the modal stays closed.", business_id);
            }
            print_overlay(&controller);
        }
        Command::Replay { steps } => {
            for step in steps {
                let outcome = replay(&mut controller, step);
                println!(
                    "{:<28} -> {}{}",
                    format!("{:?}", step),
                    controller
                        .active_business()
                        .map(|id| format!("open({})", id))
                        .unwrap_or_else(|| "closed".to_string()),
                    if outcome.default_prevented { " [default prevented]" } else { "" }
                );
            }
            print_overlay(&controller);
        }
    }

    Ok(())
}

fn replay(controller: &mut ModalController<InMemoryDocument>, step: &Step) -> EventOutcome {
    let overlay = *controller.overlay();
    match step {
        Step::ClickCard(id) => match controller.document().card(id) {
            Some(card) => {
                controller.document_mut().focus(&card, false);
                controller.click(card)
            }
            None => missing_card(id),
        },
        Step::KeyOnCard(id, key) => match controller.document().card(id) {
            Some(card) => {
                controller.document_mut().focus(&card, false);
                controller.key_down(card, key.clone())
            }
            None => missing_card(id),
        },
        Step::Open(id) => {
            controller.open(id);
            EventOutcome::handled()
        }
        Step::Escape => controller.press_key(Key::Escape),
        Step::Close => {
            let selector = Selector::parse(&controller.markup().close_selector);
            let control = selector
                .ok()
                .and_then(|s| controller.document().query_first(Some(&overlay), &s));
            match control {
                Some(control) => controller.click(control),
                None => EventOutcome::ignored(),
            }
        }
        Step::Backdrop => controller.click(overlay),
        Step::Window => match controller.window().copied() {
            Some(window) => controller.click(window),
            None => EventOutcome::ignored(),
        },
    }
}

fn missing_card(id: &str) -> EventOutcome {
    tracing::warn!("No card for '{}' on the page", id);
    EventOutcome::ignored()
}

fn print_overlay(controller: &ModalController<InMemoryDocument>) {
    print!("{}", controller.document().snapshot(controller.overlay()));
}
