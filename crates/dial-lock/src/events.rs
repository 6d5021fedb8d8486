#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
    SettingsReload,
}
