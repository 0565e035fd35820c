use crate::types::WebhookInfo;

params! {
    /// An empty `url` removes the webhook.
    SetWebhook {
        url: String,
    } optional {
        ip_address: String,
        max_connections: i64,
        allowed_updates: Vec<String>,
        drop_pending_updates: bool,
        /// Echoed back in the `X-Telegram-Bot-Api-Secret-Token` header.
        secret_token: String,
    }
}

params! {
    DeleteWebhook {} optional {
        drop_pending_updates: bool,
    }
}

api_methods! {
    fn set_webhook("setWebhook", SetWebhook) -> bool;
    fn delete_webhook("deleteWebhook", DeleteWebhook) -> bool;
    fn get_webhook_info("getWebhookInfo") -> WebhookInfo;
}
