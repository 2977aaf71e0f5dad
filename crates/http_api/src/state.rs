use std::time::Duration;

use app_api::AppContext;

#[derive(Clone)]
pub struct HttpState {
    pub context: AppContext,
    pub store_timeout: Duration,
}

impl HttpState {
    pub fn new(context: AppContext) -> Self {
        let store_timeout = context.app_state.config.store_timeout;
        Self {
            context,
            store_timeout,
        }
    }
}
