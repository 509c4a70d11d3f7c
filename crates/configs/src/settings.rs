use once_cell::sync::OnceCell;
use serde::Deserialize;

static INSTANCE: OnceCell<SystemSettings> = OnceCell::new();

/// Process-wide settings, installed once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    pub application_name: String,
    /// Page size used when a paginated request omits `size`.
    pub default_page_size: u32,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self { application_name: "laundry-backend".into(), default_page_size: 20 }
    }
}

impl SystemSettings {
    /// Install the process-wide instance. The first call wins.
    pub fn install(settings: SystemSettings) -> &'static SystemSettings {
        INSTANCE.get_or_init(|| settings)
    }

    /// The installed instance, or defaults when nothing was installed.
    pub fn current() -> &'static SystemSettings {
        INSTANCE.get_or_init(SystemSettings::default)
    }
}
