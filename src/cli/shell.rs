use std::io::{self, BufRead};
use std::sync::Arc;

use tracing::info;

use crate::cli::interaction::{ReservationInteraction, ScriptedInteraction, TerminalInteraction};
use crate::cli::output;
use crate::cli::wizard::{FormResult, ReservationWizard};
use crate::config::{Config, ConfigManager};
use crate::core::notifications::NotificationFeed;
use crate::core::time::{Clock, SystemClock};
use crate::domain::address::ManualGeocoder;
use crate::domain::i18n::Translations;
use crate::domain::service::ServiceCatalog;
use crate::errors::CliError;
use crate::storage::{load_reservations, save_reservations, MemoryStore, ReservationStore};
use crate::utils::fs::{app_data_dir, reservations_file_in};

const SCRIPT_ENV: &str = "RESERVATION_CLI_SCRIPT";

/// Entry point of the `reservation_cli` binary.
///
/// With `RESERVATION_CLI_SCRIPT` set, answers are read line by line from stdin
/// instead of interactive prompts.
pub fn run_cli() -> Result<(), CliError> {
    if std::env::var_os(SCRIPT_ENV).is_some() {
        let answers = io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .map_err(|err| CliError::Input(err.to_string()))?;
        let mut script = ScriptedInteraction::new(answers);
        run_session(&mut script)
    } else {
        run_session(&mut TerminalInteraction::new())
    }
}

fn run_session<I: ReservationInteraction>(interaction: &mut I) -> Result<(), CliError> {
    let base = app_data_dir();
    let config = ConfigManager::with_base_dir(base.clone())?.load()?;
    let snapshot_path = reservations_file_in(&base);

    let memory = Arc::new(MemoryStore::with_rows(load_reservations(&snapshot_path)?));
    let store: Arc<dyn ReservationStore> = memory.clone();
    let translations = Translations::french();
    let mut feed = NotificationFeed::subscribe(store.clone())?
        .with_limit(config.notification_limit)
        .with_translator(translations.clone());

    let catalog = ServiceCatalog::new(&translations);
    let today = SystemClock.today();
    let wizard = ReservationWizard::new(&catalog, &ManualGeocoder, &translations, today)
        .with_days_ahead(config.schedule_days_ahead);

    match wizard.run(interaction)? {
        FormResult::Completed(submission) => {
            let reservation = store.insert(submission)?;
            save_reservations(&memory.snapshot()?, &snapshot_path)?;
            info!(reservation = %reservation.id, path = %snapshot_path.display(), "snapshot saved");
            output::success(format!("Réservation enregistrée ({})", reservation.id));
        }
        FormResult::Cancelled => {}
    }

    feed.pump();
    for notification in feed.notifications() {
        output::info(&notification.message);
    }
    print_contact_link(&config);
    feed.close();
    Ok(())
}

fn print_contact_link(config: &Config) {
    match config.whatsapp_link() {
        Ok(link) => output::detail(format!("Une question ? {link}")),
        Err(err) => output::warning(err),
    }
}
