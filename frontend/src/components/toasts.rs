//! Short-lived notices in the corner of the screen.

use std::time::Duration;

use dioxus_primitives::toast::{consume_toast, ToastOptions};

fn options(description: &str) -> ToastOptions {
    ToastOptions::new()
        .description(description.to_string())
        .duration(Duration::from_secs(6))
        .permanent(false)
}

pub fn toast_success(title: &str, description: &str) {
    consume_toast().success(title.to_string(), options(description));
}

pub fn toast_info(title: &str, description: &str) {
    consume_toast().info(title.to_string(), options(description));
}

pub fn toast_error(title: &str, description: &str) {
    consume_toast().error(title.to_string(), options(description));
}
