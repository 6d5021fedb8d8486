use clap::Parser;
use dial_lock::config::{self, Overrides};
use dial_lock::gui::app::AppModel;
use dial_lock::gui::dial::State;
use dial_lock::sys::runtime;
use relm4::prelude::*;
use rotary::settings::{JsonSettings, MemorySettings, SettingsStore};

#[derive(Parser, Debug)]
#[command(name = "dial-lock", version, about, long_about = None)]
struct Cli {
    /// Number of positions on the dial (overrides the config file)
    #[arg(short = 'r', long)]
    range: Option<i64>,

    /// Number of digits in the passcode (overrides the config file)
    #[arg(short = 'l', long)]
    code_length: Option<usize>,

    /// Leave the face where the finger let go instead of easing it onto a tick
    #[arg(long)]
    no_snap: bool,

    /// Hide the numbers around the face
    #[arg(long)]
    hide_numbers: bool,

    /// Write the default config file if none exists, print its path and exit
    #[arg(long)]
    write_config: bool,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            range: cli.range,
            code_length: cli.code_length,
            no_snap: cli.no_snap,
            hide_numbers: cli.hide_numbers,
        }
    }
}

fn open_settings() -> Box<dyn SettingsStore> {
    match JsonSettings::default_path().and_then(JsonSettings::open) {
        Ok(settings) => {
            log::debug!("Settings loaded from {}", settings.path().display());
            Box::new(settings)
        }
        Err(e) => {
            log::error!("Failed to open settings, changes will not persist: {}", e);
            Box::new(MemorySettings::default())
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let overrides = Overrides::from(&cli);
    let config = overrides.apply(config::load_or_default());
    let state = State::new(&config);
    let settings = open_settings();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.dial-lock").with_args(Vec::new());
    app.run::<AppModel>((state, settings, overrides, rx));
    Ok(())
}
