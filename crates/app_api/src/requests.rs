use serde::Deserialize;
use toll_app::WindowParams;

/// Query parameters accepted by both report endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRequest {
    pub user_id: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Only read by the toll cost report.
    pub include_vehicle: Option<String>,
}

impl ReportRequest {
    pub fn window_params(&self) -> WindowParams {
        WindowParams {
            user_id: self.user_id.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }
}
