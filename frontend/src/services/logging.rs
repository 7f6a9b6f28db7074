use gloo::net::http::Request;
use shared::LogRequest;
use wasm_bindgen_futures::spawn_local;

const LOGS_PATH: &str = "/api/logs";

/// Writes to the browser console and forwards the line to the backend log
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        gloo::console::debug!(format!("[{}] {}", component, message));
        Self::log("debug", message, component);
    }

    pub fn info_with_component(component: &str, message: &str) {
        gloo::console::info!(format!("[{}] {}", component, message));
        Self::log("info", message, component);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        gloo::console::warn!(format!("[{}] {}", component, message));
        Self::log("warn", message, component);
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(format!("[{}] {}", component, message));
        Self::log("error", message, component);
    }

    fn log(level: &str, message: &str, component: &str) {
        let request = LogRequest {
            level: level.to_string(),
            message: message.to_string(),
            component: Some(component.to_string()),
        };

        // Fire and forget: a failed log post must not surface to the user
        spawn_local(async move {
            if let Ok(builder) = Request::post(LOGS_PATH).json(&request) {
                let _ = builder.send().await;
            }
        });
    }
}
