//! Configuration constants for the HiDPI launcher

/// Well-known filesystem locations
pub mod paths {
    /// Persisted daemon settings (JSON object)
    pub const SETTINGS_PATH: &str = "/etc/system76-daemon.json";

    /// DMI attribute holding the hardware model identifier
    pub const PRODUCT_VERSION_PATH: &str = "/sys/class/dmi/id/product_version";

    /// Worker executable used when neither the CLI nor the environment names one
    pub const DEFAULT_WORKER: &str = "/usr/lib/system76-driver/system76-hidpi-worker";
}

/// Environment variables consumed by the launcher
pub mod env {
    /// Desktop session identifier, e.g. `ubuntu:GNOME`
    pub const DESKTOP_SESSION_VAR: &str = "XDG_CURRENT_DESKTOP";

    /// Display protocol of the session, e.g. `x11`
    pub const SESSION_TYPE_VAR: &str = "XDG_SESSION_TYPE";

    /// Worker executable override
    pub const WORKER_VAR: &str = "SYSTEM76_HIDPI_WORKER";
}

/// Environment Guard requirements
pub mod guard {
    /// Substring the desktop session must contain
    pub const REQUIRED_DESKTOP: &str = "GNOME";

    /// Substring the session type must contain
    pub const REQUIRED_SESSION_TYPE: &str = "x11";
}

/// Persisted settings keys and values
pub mod settings {
    /// Opt-out switch; only the exact value `DISABLE_VALUE` disables the launcher
    pub const DISABLE_KEY: &str = "disable-hidpi";

    pub const DISABLE_VALUE: &str = "True";
}

/// Model detection
pub mod model {
    /// Reported when the DMI model cannot be read
    pub const UNKNOWN_MODEL: &str = "nonsystem76";
}

/// Supervisor configuration
pub mod supervisor {
    /// Maximum restarts a single launcher process performs
    pub const RESTART_BOUND: u32 = 100;
}
