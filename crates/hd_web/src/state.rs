use hd_core::DashboardConfig;

/// Shared by every request. Holds configuration only; each request opens
/// and drops its own store handle.
pub struct AppState {
    pub config: DashboardConfig,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }
}
